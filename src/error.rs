use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutogradeError {
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("无效的元数据: {0}")]
    InvalidMetadata(String),

    #[error("文件查找失败: {0}")]
    DiscoveryError(String),

    #[error("测试未通过: {0}")]
    CheckFailed(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML 解析错误: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("ZIP 打包错误: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    Other(String),
}

// Add conversion from anyhow::Error
impl From<anyhow::Error> for AutogradeError {
    fn from(err: anyhow::Error) -> Self {
        AutogradeError::Other(err.to_string())
    }
}

/// Result type for autograde crate
pub type Result<T> = std::result::Result<T, AutogradeError>;
