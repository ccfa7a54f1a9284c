use crate::Result;
use crate::config::types::AutogradeConfig;
use crate::error::AutogradeError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    pub const CONFIG_FILE: &'static str = "autograde.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<AutogradeConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AutogradeError::ConfigError(format!("无法读取 {}: {}", path.display(), e))
        })?;

        let config = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 起始目录及其父目录
    /// 2. 用户配置目录 ~/.config/autograde/
    ///
    /// 都没有时返回默认配置；找到但解析失败时返回错误
    pub fn find_and_load(start: &Path) -> Result<AutogradeConfig> {
        match Self::find(start) {
            Some(path) => Self::load_from_path(path),
            None => Ok(AutogradeConfig::default()),
        }
    }

    /// 查找配置文件路径
    pub fn find(start: &Path) -> Option<PathBuf> {
        Self::find_in_ancestors(start).or_else(Self::find_in_user_dir)
    }

    fn find_in_ancestors(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(Self::CONFIG_FILE))
            .find(|path| path.exists())
    }

    fn find_in_user_dir() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        let config_path = home
            .join(".config")
            .join("autograde")
            .join(Self::CONFIG_FILE);

        config_path.exists().then_some(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Visibility;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(ConfigLoader::CONFIG_FILE);
        fs::write(&path, "[report]\nvisibility = \"after_due_date\"\n").unwrap();

        let config = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(config.report.visibility, Some(Visibility::AfterDueDate));
    }

    #[test]
    fn test_find_in_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp_dir.path().join(ConfigLoader::CONFIG_FILE),
            "[package]\nextension = \"py\"\n",
        )
        .unwrap();

        let config = ConfigLoader::find_and_load(&nested).unwrap();
        assert_eq!(config.package.extension, "py");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(ConfigLoader::CONFIG_FILE);
        fs::write(&path, "[report\n").unwrap();

        let err = ConfigLoader::load_from_path(&path).unwrap_err();
        assert!(matches!(err, AutogradeError::TomlError(_)));
    }
}
