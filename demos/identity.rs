//! 一个完整的作业测试示例
//!
//! cargo run --example identity > results.json

use autograde::{
    IoOptions, JsonTestRunner, RunnerConfig, SortOrder, Suite, TestCase, Visibility,
};
use std::time::Instant;

/// 学生提交的代码
mod identity {
    use autograde::Console;

    pub fn identity<T>(x: T) -> T {
        x
    }

    pub fn doubler(console: &mut Console) -> anyhow::Result<()> {
        let n: i64 = console.input("")?.trim().parse()?;
        console.println(n * 2);
        Ok(())
    }

    pub fn greeter(console: &mut Console) -> anyhow::Result<()> {
        let first = console.input("")?;
        let last = console.input("")?;
        console.println(format!("Hello {} {}", first, last));
        Ok(())
    }

    pub fn sum_to(n: u64) -> u64 {
        (1..=n).sum()
    }
}

fn main() -> anyhow::Result<()> {
    autograde::logger::init_logger();

    let suite = Suite::new("TestIdentity")
        .test(TestCase::new("test_identity", |ctx| {
            ctx.assert_eq(identity::identity(1), 1, "")?;
            ctx.assert_eq(identity::identity(2), 2, "")?;
            ctx.assert_eq(identity::identity(3), 3, "")
        }))
        .test(
            TestCase::new("test_doubler", |ctx| {
                ctx.assert_io_equals(identity::doubler, &["1"], "2", IoOptions::default())
            })
            .visibility(Visibility::Hidden),
        )
        .test(
            TestCase::new("test_greeter", |ctx| {
                ctx.assert_io_equals(
                    identity::greeter,
                    &["John", "Doe"],
                    "Hello John Doe",
                    IoOptions::default(),
                )
            })
            .describe("Greets the user by full name")
            .weight(2.0)
            .number("1.3"),
        )
        .test(
            TestCase::new("test_sum_partial", |ctx| {
                let cases = [(1, 1), (3, 6), (10, 55), (100, 5050)];
                let passed = cases
                    .iter()
                    .filter(|(n, expected)| identity::sum_to(*n) == *expected)
                    .count();
                ctx.println(format!("{}/{} cases correct", passed, cases.len()));
                ctx.set_score(passed as f64 * 2.5);
                Ok(())
            })
            .partial_credit(10.0)
            .tags(["loops"])
            .hide_errors_default(),
        )
        .test(
            TestCase::new("test_speed", |ctx| {
                let start = Instant::now();
                identity::sum_to(1_000_000);
                ctx.set_leaderboard_value(start.elapsed().as_secs_f64());
                Ok(())
            })
            .leaderboard_with_order("time", SortOrder::Asc),
        );

    let mut runner = JsonTestRunner::new(RunnerConfig::default().visibility(Visibility::Visible));
    let mut stdout = std::io::stdout().lock();
    runner.run(&suite, &mut stdout)?;
    Ok(())
}
