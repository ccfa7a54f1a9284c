use crate::Result;
use crate::report::ReportDocument;
use crate::runner::case::Suite;
use crate::runner::executor::TestExecutor;
use crate::runner::reporter::JsonTestResult;
use crate::runner::types::{RunOutcome, RunnerConfig};
use std::io::Write;
use std::time::Instant;
use tracing::info;

/// 报告写出前的回调，可以修改任何字段（例如迟交扣分）
pub type PostProcessor = Box<dyn FnMut(&mut ReportDocument)>;

/// 运行测试并输出 JSON 报告
pub struct JsonTestRunner {
    config: RunnerConfig,
    post_processor: Option<PostProcessor>,
}

impl JsonTestRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            post_processor: None,
        }
    }

    pub fn with_post_processor<F>(mut self, post_processor: F) -> Self
    where
        F: FnMut(&mut ReportDocument) + 'static,
    {
        self.post_processor = Some(Box::new(post_processor));
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// 执行 suite 并生成最终报告（不写出）
    pub fn run_report(&mut self, suite: &Suite) -> Result<RunOutcome> {
        let mut report =
            ReportDocument::new(self.config.visibility, self.config.stdout_visibility);
        let mut result = JsonTestResult::new(&self.config);
        let executor = TestExecutor::new(self.config.buffer);

        let start = Instant::now();
        executor.execute_all(suite, &mut result)?;
        let elapsed = start.elapsed();

        let tests_run = result.tests_run();
        let failures = result.failures();
        let errors = result.errors();
        let (tests, leaderboard) = result.into_parts();
        report.tests = tests;
        report.leaderboard = leaderboard;

        report.execution_time = Some(format!("{:.2}", elapsed.as_secs_f64()));
        report.score = Some(report.total_score());

        if let Some(post_processor) = self.post_processor.as_mut() {
            post_processor(&mut report);
        }

        info!(
            tests_run,
            failures,
            errors,
            score = report.score.unwrap_or_default(),
            "Test run finished"
        );

        Ok(RunOutcome {
            report,
            tests_run,
            failures,
            errors,
        })
    }

    /// 执行 suite 并把报告写入 stream
    pub fn run<W: Write>(&mut self, suite: &Suite, stream: &mut W) -> Result<RunOutcome> {
        let outcome = self.run_report(suite)?;
        outcome.report.write_to(stream)?;
        Ok(outcome)
    }
}

impl Default for JsonTestRunner {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutogradeError;
    use crate::runner::case::TestCase;

    #[test]
    fn test_empty_suite() {
        let mut runner = JsonTestRunner::default();
        let outcome = runner.run_report(&Suite::new("Empty")).unwrap();
        assert!(outcome.report.tests.is_empty());
        assert_eq!(outcome.report.score, Some(0.0));
        assert!(outcome.was_successful());
    }

    #[test]
    fn test_execution_time_two_decimals() {
        let mut runner = JsonTestRunner::default();
        let suite = Suite::new("S").test(TestCase::new("t", |_| Ok(())));
        let outcome = runner.run_report(&suite).unwrap();
        let time = outcome.report.execution_time.unwrap();
        let (_, decimals) = time.split_once('.').unwrap();
        assert_eq!(decimals.len(), 2);
    }

    #[test]
    fn test_post_processor_can_rewrite_score() {
        let mut runner = JsonTestRunner::default().with_post_processor(|report| {
            report.score = report.score.map(|s| s * 0.5);
        });
        let suite = Suite::new("S").test(TestCase::new("t", |_| Ok(())).weight(4.0));
        let outcome = runner.run_report(&suite).unwrap();
        assert_eq!(outcome.report.score, Some(2.0));
    }

    #[test]
    fn test_nan_score_fails_the_report() {
        let mut runner = JsonTestRunner::default();
        let suite = Suite::new("S").test(
            TestCase::new("t", |ctx| {
                ctx.set_score(f64::NAN);
                Ok(())
            })
            .partial_credit(10.0),
        );
        let mut buf = Vec::new();
        let err = runner.run(&suite, &mut buf).unwrap_err();
        assert!(matches!(err, AutogradeError::InvalidMetadata(_)));
        // 不写出任何不完整的报告
        assert!(buf.is_empty());
    }
}
