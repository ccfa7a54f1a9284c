use serde::Deserialize;

/// 打包配置 (autograde.toml 的 [package] 部分)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// 源文件扩展名（不带点）
    pub extension: String,

    /// 测试文件名前缀
    pub test_prefix: String,

    /// 运行测试并把 JSON 报告写到 stdout 的命令
    pub test_command: String,

    /// setup.sh 的内容
    pub setup_script: String,

    /// 查找文件时忽略的文件名
    pub exclude: Vec<String>,

    /// 总是打包的额外文件
    pub include: Vec<String>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            extension: "rs".to_string(),
            test_prefix: "test".to_string(),
            test_command: "cargo run --quiet --release".to_string(),
            setup_script: "#!/bin/bash\n\ncurl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh -s -- -y\n"
                .to_string(),
            exclude: Vec::new(),
            include: Vec::new(),
        }
    }
}

/// 找到的提交文件与测试文件（目录内的文件名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFiles {
    pub submission: String,
    pub test: String,
}
