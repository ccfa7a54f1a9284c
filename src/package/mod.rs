//! 打包 - 查找提交文件与测试文件，运行检查，生成 autograder.zip
mod archive;
mod check;
mod discovery;
mod types;

pub use archive::{ARCHIVE_NAME, backup_existing, build_archive, extra_candidates, render_run_script};
pub use check::run_check;
pub use discovery::discover;
pub use types::{PackageConfig, ProjectFiles};
