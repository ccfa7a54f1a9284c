use crate::package::PackageConfig;
use crate::runner::RunnerConfig;
use serde::Deserialize;

/// 完整的配置文件 (autograde.toml)
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AutogradeConfig {
    /// 报告相关配置
    #[serde(default)]
    pub report: RunnerConfig,

    /// 打包相关配置
    #[serde(default)]
    pub package: PackageConfig,
}
