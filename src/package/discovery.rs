use super::types::{PackageConfig, ProjectFiles};
use crate::Result;
use crate::config::ConfigLoader;
use crate::error::AutogradeError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 列出目录下的普通文件名（不递归，按名称排序）
pub(super) fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// 在目录中查找唯一的提交文件和唯一的测试文件
///
/// 以 test_prefix 开头的源文件是测试文件，其余源文件是提交文件。
pub fn discover(dir: &Path, config: &PackageConfig) -> Result<ProjectFiles> {
    let suffix = format!(".{}", config.extension);
    let mut submission: Option<String> = None;
    let mut test: Option<String> = None;

    for name in list_files(dir)? {
        if name == ConfigLoader::CONFIG_FILE
            || config.exclude.contains(&name)
            || config.include.contains(&name)
        {
            continue;
        }
        if !name.ends_with(&suffix) {
            continue;
        }

        let slot = if name.starts_with(&config.test_prefix) {
            &mut test
        } else {
            &mut submission
        };

        if let Some(existing) = slot {
            let kind = if name.starts_with(&config.test_prefix) {
                "test"
            } else {
                "submission"
            };
            return Err(AutogradeError::DiscoveryError(format!(
                "Found multiple possible {} files: {} and {}. Please remove one of them and try again",
                kind, existing, name
            )));
        }
        debug!(file = %name, "Discovered source file");
        *slot = Some(name);
    }

    let submission = submission.ok_or_else(|| {
        AutogradeError::DiscoveryError(
            "No submission file found, please add a file to the directory and try again".to_string(),
        )
    })?;
    let test = test.ok_or_else(|| {
        AutogradeError::DiscoveryError(
            "No test file found, please add a file to the directory and try again".to_string(),
        )
    })?;

    Ok(ProjectFiles { submission, test })
}
