mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // 初始化日志系统
    autograde::logger::init_logger();

    let cli = Cli::parse();
    cli::run(cli)
}
