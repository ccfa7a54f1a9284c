use super::discovery::list_files;
use super::types::{PackageConfig, ProjectFiles};
use crate::Result;
use crate::config::ConfigLoader;
use chrono::Local;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// 生成的压缩包文件名
pub const ARCHIVE_NAME: &str = "autograder.zip";

const BACKUP_PREFIX: &str = "autograder-";

/// 已存在的 autograder.zip 重命名为带时间戳的备份
pub fn backup_existing(dir: &Path) -> Result<Option<PathBuf>> {
    let archive = dir.join(ARCHIVE_NAME);
    if !archive.exists() {
        return Ok(None);
    }

    let stamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let backup = dir.join(format!("{}{}.zip", BACKUP_PREFIX, stamp));
    fs::rename(&archive, &backup)?;
    info!(backup = %backup.display(), "Backed up previous archive");
    Ok(Some(backup))
}

/// 生成 run_autograder 脚本
pub fn render_run_script(files: &ProjectFiles, config: &PackageConfig) -> String {
    format!(
        "#!/bin/bash\n\ncd /autograder/source\ncp -r /autograder/submission/{} .\n{} > /autograder/results/results.json\n",
        files.submission, config.test_command
    )
}

/// 可能需要一起打包的其他文件，由调用方决定是否包含
pub fn extra_candidates(
    dir: &Path,
    files: &ProjectFiles,
    config: &PackageConfig,
) -> Result<Vec<String>> {
    let candidates = list_files(dir)?
        .into_iter()
        .filter(|name| !name.starts_with(BACKUP_PREFIX) && !name.starts_with('.'))
        .filter(|name| {
            name != ARCHIVE_NAME
                && *name != files.submission
                && *name != files.test
                && name != ConfigLoader::CONFIG_FILE
                && !config.exclude.contains(name)
                && !config.include.contains(name)
        })
        .collect();
    Ok(candidates)
}

fn add_file<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    dir: &Path,
    name: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    let content = fs::read(dir.join(name))?;
    zip.start_file(name, options)?;
    zip.write_all(&content)?;
    debug!(file = name, bytes = content.len(), "Added file to archive");
    Ok(())
}

/// 写出 autograder.zip
///
/// 包含 run_autograder、setup.sh、测试文件、配置文件（如果有）、include 列表和选中的额外文件。
/// 提交文件不会被打包。
pub fn build_archive(
    dir: &Path,
    files: &ProjectFiles,
    extras: &[String],
    config: &PackageConfig,
) -> Result<PathBuf> {
    let path = dir.join(ARCHIVE_NAME);
    let mut zip = ZipWriter::new(File::create(&path)?);

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let scripts = options.unix_permissions(0o755);

    zip.start_file("run_autograder", scripts)?;
    zip.write_all(render_run_script(files, config).as_bytes())?;
    zip.start_file("setup.sh", scripts)?;
    zip.write_all(config.setup_script.as_bytes())?;

    add_file(&mut zip, dir, &files.test, options)?;

    if dir.join(ConfigLoader::CONFIG_FILE).exists() {
        add_file(&mut zip, dir, ConfigLoader::CONFIG_FILE, options)?;
    }
    for name in config.include.iter().chain(extras) {
        add_file(&mut zip, dir, name, options)?;
    }

    zip.finish()?;
    info!(path = %path.display(), "Wrote autograder archive");
    Ok(path)
}
