/// 测试体返回的错误
///
/// `Assertion` 是普通的测试失败；`Staff` 表示测试本身写错了；
/// 其余错误（包括学生代码返回的错误）都归为 `Other`。
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    #[error("{0}")]
    Assertion(String),

    #[error("Teaching staff error: {0}")]
    Staff(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TestError {
    /// 是否为断言失败（而不是执行出错）
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }

    /// 错误类别名称，写入 ErrorDetail
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Assertion(_) => "AssertionError",
            Self::Staff(_) => "TeachingStaffError",
            Self::Other(_) => "Error",
        }
    }
}

impl From<std::io::Error> for TestError {
    fn from(err: std::io::Error) -> Self {
        TestError::Other(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(TestError::Assertion("x".into()).is_failure());
        assert!(!TestError::Staff("x".into()).is_failure());
        assert_eq!(TestError::Staff("x".into()).kind(), "TeachingStaffError");
    }

    #[test]
    fn test_display_is_message() {
        let err = TestError::Assertion("1 != 2".into());
        assert_eq!(err.to_string(), "1 != 2");

        let err: TestError = anyhow::anyhow!("division by zero").into();
        assert_eq!(err.to_string(), "division by zero");
        assert_eq!(err.kind(), "Error");
    }
}
