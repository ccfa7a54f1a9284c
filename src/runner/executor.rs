use crate::Result;
use crate::capture::{PanicSilencer, panic_message};
use crate::runner::case::{Suite, TestCase, TestContext};
use crate::runner::reporter::JsonTestResult;
use crate::runner::types::{ErrorDetail, Execution, TestTrace};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info};

/// 依次执行测试，把每个结果交给 reporter
pub struct TestExecutor {
    buffered: bool,
}

impl TestExecutor {
    pub fn new(buffered: bool) -> Self {
        Self { buffered }
    }

    /// 按声明顺序执行整个 suite
    ///
    /// 测试本身的失败不会中断执行；只有无法写进报告的结果（如非法分数）才返回错误。
    pub fn execute_all(&self, suite: &Suite, result: &mut JsonTestResult) -> Result<()> {
        info!(suite = suite.name(), tests = suite.len(), "Running test suite");

        for test in suite.iter() {
            if result.should_stop() {
                debug!("Stopping early after first failure");
                break;
            }

            result.start_test(test);
            let (trace, execution) = self.execute_one(test);
            result.add_execution(test, trace, &execution)?;
        }
        Ok(())
    }

    /// 执行单个测试
    ///
    /// 测试体返回的错误和 panic 都会被转换成 Execution，不会传播出去。
    pub fn execute_one(&self, test: &TestCase) -> (TestTrace, Execution) {
        let mut ctx = TestContext::new(self.buffered);

        let outcome = {
            let _silencer = PanicSilencer::install();
            panic::catch_unwind(AssertUnwindSafe(|| test.run(&mut ctx)))
        };

        let execution = match outcome {
            Ok(Ok(())) => Execution::Success,
            Ok(Err(err)) if err.is_failure() => Execution::Failure(ErrorDetail::from(&err)),
            Ok(Err(err)) => Execution::Error(ErrorDetail::from(&err)),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                // assert!/assert_eq! 的 panic 视为断言失败
                if message.starts_with("assertion") {
                    Execution::Failure(ErrorDetail::new("AssertionError", message))
                } else {
                    Execution::Error(ErrorDetail::new("panic", message))
                }
            }
        };

        debug!(test = %test, ?execution, "Test finished");
        (ctx.finish(), execution)
    }
}

impl Default for TestExecutor {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::TestError;

    #[test]
    fn test_success() {
        let executor = TestExecutor::default();
        let case = TestCase::new("ok", |ctx| {
            ctx.println("hi");
            Ok(())
        });
        let (trace, execution) = executor.execute_one(&case);
        assert_eq!(execution, Execution::Success);
        assert_eq!(trace.output.as_deref(), Some("hi\n"));
    }

    #[test]
    fn test_assertion_failure() {
        let executor = TestExecutor::default();
        let case = TestCase::new("bad", |ctx| ctx.assert_eq(1, 2, ""));
        let (_, execution) = executor.execute_one(&case);
        assert_eq!(
            execution,
            Execution::Failure(ErrorDetail::new("AssertionError", "1 != 2"))
        );
    }

    #[test]
    fn test_error_and_panic() {
        let executor = TestExecutor::default();

        let case = TestCase::new("err", |_| Err(TestError::Staff("bad test".into())));
        let (_, execution) = executor.execute_one(&case);
        assert!(matches!(execution, Execution::Error(_)));

        let case = TestCase::new("panic", |ctx| {
            ctx.println("before");
            let v: Vec<i32> = Vec::new();
            ctx.println(v[3]);
            Ok(())
        });
        let (trace, execution) = executor.execute_one(&case);
        assert!(matches!(execution, Execution::Error(ref d) if d.kind == "panic"));
        // panic 之前的输出仍然保留
        assert_eq!(trace.output.as_deref(), Some("before\n"));
    }

    #[test]
    fn test_std_assert_panic_is_failure() {
        let executor = TestExecutor::default();
        let case = TestCase::new("std_assert", |_| {
            assert_eq!(1 + 1, 3);
            Ok(())
        });
        let (_, execution) = executor.execute_one(&case);
        assert!(matches!(execution, Execution::Failure(_)));
    }
}
