use crate::assertion::TestError;
use crate::metadata::{TestMeta, Visibility};
use crate::report::ReportDocument;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// reporter 查询单个测试信息的接口
pub trait TestHandle {
    /// 默认的字符串表示，例如 `test_greeter (TestIdentity)`
    fn id(&self) -> String;

    /// 一行描述（如果有）
    fn short_description(&self) -> Option<String>;

    /// 附加在测试上的元数据
    fn meta(&self) -> &TestMeta;
}

/// 失败或出错时的错误信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// 错误类别，例如 AssertionError / panic
    pub kind: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<&TestError> for ErrorDetail {
    fn from(err: &TestError) -> Self {
        // {:#} 让 anyhow 输出完整的错误链
        Self::new(err.kind(), format!("{:#}", err))
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// 单个测试的执行结果事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution {
    Success,
    /// 断言没有成立
    Failure(ErrorDetail),
    /// 意外的错误或 panic
    Error(ErrorDetail),
}

/// 测试体执行期间收集到的数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestTrace {
    /// 捕获的 stdout + stderr
    pub output: Option<String>,

    /// 测试体通过 set_score 设置的分数
    pub score: Option<f64>,

    /// 测试体通过 set_leaderboard_value 设置的值
    pub leaderboard_value: Option<Value>,
}

/// 运行配置，整个运行期间不变
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// 有描述时用描述作为测试名
    pub descriptions: bool,

    /// 第一个失败后停止
    pub fail_fast: bool,

    /// 捕获测试输出并写进报告
    pub buffer: bool,

    /// 报告顶层的 visibility
    pub visibility: Option<Visibility>,

    /// 报告顶层的 stdout_visibility
    pub stdout_visibility: Option<Visibility>,

    /// 失败信息前缀
    pub failure_prefix: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            descriptions: true,
            fail_fast: false,
            buffer: true,
            visibility: None,
            stdout_visibility: None,
            failure_prefix: Self::DEFAULT_FAILURE_PREFIX.to_string(),
        }
    }
}

impl RunnerConfig {
    pub const DEFAULT_FAILURE_PREFIX: &'static str = "Test Failed: ";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn stdout_visibility(mut self, visibility: Visibility) -> Self {
        self.stdout_visibility = Some(visibility);
        self
    }

    pub fn failure_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.failure_prefix = prefix.into();
        self
    }

    pub fn buffer(mut self, buffer: bool) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn descriptions(mut self, descriptions: bool) -> Self {
        self.descriptions = descriptions;
        self
    }
}

/// 一次运行的结果
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: ReportDocument,
    pub tests_run: usize,
    pub failures: usize,
    pub errors: usize,
}

impl RunOutcome {
    pub fn was_successful(&self) -> bool {
        self.failures == 0 && self.errors == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_config_defaults() {
        let config = RunnerConfig::default();
        assert!(config.descriptions);
        assert!(config.buffer);
        assert!(!config.fail_fast);
        assert_eq!(config.failure_prefix, "Test Failed: ");
        assert_eq!(config.visibility, None);
    }

    #[test]
    fn test_runner_config_partial_toml() {
        let config: RunnerConfig = toml::from_str(
            r#"
visibility = "after_published"
failure_prefix = "FAILED: "
"#,
        )
        .unwrap();
        assert_eq!(config.visibility, Some(Visibility::AfterPublished));
        assert_eq!(config.failure_prefix, "FAILED: ");
        assert!(config.buffer);
    }

    #[test]
    fn test_error_detail_from_anyhow_chain() {
        let err: TestError = anyhow::anyhow!("inner").context("outer").into();
        let detail = ErrorDetail::from(&err);
        assert_eq!(detail.kind, "Error");
        assert_eq!(detail.to_string(), "outer: inner");
    }
}
