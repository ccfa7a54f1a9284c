use crate::error::{AutogradeError, Result};
use crate::report::{LeaderboardEntry, TestOutcome, TestStatus};
use crate::runner::types::{ErrorDetail, Execution, RunnerConfig, TestHandle, TestTrace};
use tracing::{debug, warn};

/// 把测试执行事件转换成报告记录
///
/// 每个完成的测试产生一条 TestOutcome；声明了排行榜列的测试只产生 LeaderboardEntry。
#[derive(Debug)]
pub struct JsonTestResult {
    descriptions: bool,
    fail_fast: bool,
    failure_prefix: String,
    tests: Vec<TestOutcome>,
    leaderboard: Vec<LeaderboardEntry>,
    tests_run: usize,
    failures: usize,
    errors: usize,
}

impl JsonTestResult {
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            descriptions: config.descriptions,
            fail_fast: config.fail_fast,
            failure_prefix: config.failure_prefix.clone(),
            tests: Vec::new(),
            leaderboard: Vec::new(),
            tests_run: 0,
            failures: 0,
            errors: 0,
        }
    }

    /// 报告中的测试名：优先使用一行描述
    pub fn get_description(&self, test: &dyn TestHandle) -> String {
        match test.short_description() {
            Some(doc) if self.descriptions => doc,
            _ => test.id(),
        }
    }

    pub fn start_test(&mut self, test: &dyn TestHandle) {
        self.tests_run += 1;
        debug!(test = %test.id(), "Starting test");
    }

    pub fn add_success(&mut self, test: &dyn TestHandle, trace: TestTrace) -> Result<()> {
        self.process_result(test, trace, None)
    }

    pub fn add_failure(
        &mut self,
        test: &dyn TestHandle,
        trace: TestTrace,
        err: &ErrorDetail,
    ) -> Result<()> {
        self.failures += 1;
        self.process_result(test, trace, Some(err))
    }

    pub fn add_error(
        &mut self,
        test: &dyn TestHandle,
        trace: TestTrace,
        err: &ErrorDetail,
    ) -> Result<()> {
        self.errors += 1;
        self.process_result(test, trace, Some(err))
    }

    /// 根据执行结果分发到 add_success / add_failure / add_error
    pub fn add_execution(
        &mut self,
        test: &dyn TestHandle,
        trace: TestTrace,
        execution: &Execution,
    ) -> Result<()> {
        match execution {
            Execution::Success => self.add_success(test, trace),
            Execution::Failure(err) => self.add_failure(test, trace, err),
            Execution::Error(err) => self.add_error(test, trace, err),
        }
    }

    fn process_result(
        &mut self,
        test: &dyn TestHandle,
        trace: TestTrace,
        err: Option<&ErrorDetail>,
    ) -> Result<()> {
        if test.meta().is_leaderboard() {
            if let Some(entry) = self.build_leaderboard_entry(test, &trace) {
                self.leaderboard.push(entry);
            }
        } else {
            let outcome = self.build_result(test, trace, err)?;
            debug!(name = %outcome.name, status = outcome.status.as_str(), "Recorded test result");
            self.tests.push(outcome);
        }
        Ok(())
    }

    /// 构建单个测试的结果记录
    ///
    /// 分数或权重不是有限数时返回 InvalidMetadata，整个报告随之失败。
    pub fn build_result(
        &self,
        test: &dyn TestHandle,
        trace: TestTrace,
        err: Option<&ErrorDetail>,
    ) -> Result<TestOutcome> {
        let meta = test.meta();
        check_finite(test, "weight", meta.weight)?;
        check_finite(test, "score", trace.score)?;

        let mut failed = err.is_some();
        let mut output = trace.output.unwrap_or_default();

        if let Some(err) = err {
            // 空的隐藏消息等同于未设置
            if let Some(message) = meta.hide_errors.as_deref().filter(|m| !m.is_empty()) {
                output.push_str(message);
            } else {
                // 已有输出时空一行
                if !output.is_empty() {
                    if output.ends_with('\n') {
                        output.push('\n');
                    } else {
                        output.push_str("\n\n");
                    }
                }
                output.push_str(&format!("{}{}\n", self.failure_prefix, err));
            }
        }

        let (score, max_score) = match (trace.score, meta.weight) {
            (None, None) => (None, None),
            (score, weight) => {
                let weight = weight.unwrap_or(0.0);
                let score = score.unwrap_or(if failed { 0.0 } else { weight });
                // 丢分也算失败
                failed |= score < weight;
                (Some(score), Some(weight))
            }
        };

        Ok(TestOutcome {
            name: self.get_description(test),
            score,
            max_score,
            status: if failed {
                TestStatus::Failed
            } else {
                TestStatus::Passed
            },
            tags: meta.tags.clone(),
            output: if output.is_empty() { None } else { Some(output) },
            visibility: meta.visibility,
            number: meta.number.clone().filter(|n| !n.is_empty()),
        })
    }

    /// 构建排行榜条目；没有声明排行榜列时返回 None
    pub fn build_leaderboard_entry(
        &self,
        test: &dyn TestHandle,
        trace: &TestTrace,
    ) -> Option<LeaderboardEntry> {
        let column = test.meta().leaderboard.as_ref()?;
        if trace.leaderboard_value.is_none() {
            warn!(column = %column.column, "Leaderboard test finished without a value");
        }
        Some(LeaderboardEntry {
            name: column.column.clone(),
            value: trace.leaderboard_value.clone(),
            order: column.order,
        })
    }

    pub fn should_stop(&self) -> bool {
        self.fail_fast && !self.was_successful()
    }

    pub fn was_successful(&self) -> bool {
        self.failures == 0 && self.errors == 0
    }

    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn tests(&self) -> &[TestOutcome] {
        &self.tests
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// 取出累积的记录
    pub fn into_parts(self) -> (Vec<TestOutcome>, Vec<LeaderboardEntry>) {
        (self.tests, self.leaderboard)
    }
}

fn check_finite(test: &dyn TestHandle, field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => {
            warn!(test = %test.id(), field, value = v, "Rejecting non-finite value");
            Err(AutogradeError::InvalidMetadata(format!(
                "{} of test {} must be a finite number, got {}",
                field,
                test.id(),
                v
            )))
        }
        _ => Ok(()),
    }
}
