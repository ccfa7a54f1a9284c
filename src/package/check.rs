use super::types::PackageConfig;
use crate::Result;
use crate::error::AutogradeError;
use crate::report::ReportDocument;
use std::path::Path;
use std::process::Command;
use tracing::info;

/// 运行测试命令并解析它输出的 JSON 报告
///
/// 命令通过 `sh -c` 在指定目录执行；stdout 必须是报告，stderr 原样忽略。
pub fn run_check(dir: &Path, config: &PackageConfig) -> Result<ReportDocument> {
    info!(command = %config.test_command, "Executing tests");

    let output = Command::new("sh")
        .arg("-c")
        .arg(&config.test_command)
        .current_dir(dir)
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.trim().is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AutogradeError::CheckFailed(format!(
            "test command produced no report (exit status {}): {}",
            output.status,
            stderr.trim()
        )));
    }

    ReportDocument::from_json(&stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_check_parses_report() {
        let temp_dir = TempDir::new().unwrap();
        let config = PackageConfig {
            test_command: r#"echo '{"tests": [{"name": "a", "status": "passed"}], "leaderboard": []}'"#
                .to_string(),
            ..PackageConfig::default()
        };

        let report = run_check(temp_dir.path(), &config).unwrap();
        assert_eq!(report.tests.len(), 1);
        assert!(report.all_passed());
    }

    #[test]
    fn test_run_check_without_output() {
        let temp_dir = TempDir::new().unwrap();
        let config = PackageConfig {
            test_command: "echo broken >&2; exit 3".to_string(),
            ..PackageConfig::default()
        };

        let err = run_check(temp_dir.path(), &config).unwrap_err();
        assert!(matches!(err, AutogradeError::CheckFailed(ref msg) if msg.contains("broken")));
    }
}
