use crate::report::types::{ReportDocument, TestOutcome, TestStatus};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};

fn format_points(outcome: &TestOutcome) -> String {
    match (outcome.score, outcome.max_score) {
        (Some(score), Some(max)) => format!("{} / {}", score, max),
        (Some(score), None) => score.to_string(),
        _ => "-".to_string(),
    }
}

/// 逐行打印每个测试的状态（打包前检查使用）
pub fn print_results(report: &ReportDocument) {
    for test in &report.tests {
        let status = match test.status {
            TestStatus::Passed => test.status.as_str().green(),
            TestStatus::Failed => test.status.as_str().red(),
        };
        println!("\t{} {}", test.name, status);
    }
}

/// 以表格形式打印报告摘要
pub fn print_summary(report: &ReportDocument) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Name", "Status", "Score", "Visibility"]);

    for test in &report.tests {
        let status_color = match test.status {
            TestStatus::Passed => Color::Green,
            TestStatus::Failed => Color::Red,
        };

        table.add_row(vec![
            Cell::new(test.number.as_deref().unwrap_or("")),
            Cell::new(&test.name),
            Cell::new(test.status.as_str()).fg(status_color),
            Cell::new(format_points(test)),
            Cell::new(test.visibility.map(|v| v.as_str()).unwrap_or("")).add_attribute(Attribute::Dim),
        ]);
    }

    println!("{}", table);

    if !report.leaderboard.is_empty() {
        let mut board = Table::new();
        board
            .load_preset(UTF8_FULL)
            .set_header(vec!["Column", "Value", "Order"]);
        for entry in &report.leaderboard {
            let value = entry
                .value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            board.add_row(vec![
                Cell::new(&entry.name),
                Cell::new(value),
                Cell::new(entry.order.as_str()),
            ]);
        }
        println!("{}", board);
    }

    let passed = report.tests.iter().filter(|t| t.passed()).count();
    let failed = report.tests.len() - passed;
    println!(
        "  {}: {} passed, {} failed, {} total",
        "Tests".bold(),
        passed.to_string().green(),
        failed.to_string().red(),
        report.tests.len()
    );
    println!(
        "  {}: {}",
        "Score".bold(),
        report.score.unwrap_or_else(|| report.total_score())
    );
    if let Some(time) = &report.execution_time {
        println!("  {}: {}s", "Duration".bold(), time);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_points() {
        let mut outcome = TestOutcome {
            name: "t".to_string(),
            score: Some(4.2),
            max_score: Some(10.0),
            status: TestStatus::Failed,
            tags: Vec::new(),
            output: None,
            visibility: None,
            number: None,
        };
        assert_eq!(format_points(&outcome), "4.2 / 10");

        outcome.score = None;
        outcome.max_score = None;
        assert_eq!(format_points(&outcome), "-");
    }
}
