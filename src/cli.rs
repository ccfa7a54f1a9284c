use anyhow::{Context, bail};
use autograde::config::{AutogradeConfig, ConfigLoader};
use autograde::package::{self, ProjectFiles};
use autograde::report::{self, ReportDocument};
use clap::{Parser, Subcommand};
use colored::Colorize;
use inquire::Confirm;
use std::fs;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 运行测试命令，确认所有测试都通过
    Check {
        /// 作业目录
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// 检查并生成 autograder.zip
    Package {
        /// 作业目录
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// 不询问，包含所有额外文件
        #[arg(short, long)]
        yes: bool,

        /// 不询问，不包含任何额外文件
        #[arg(long, conflicts_with = "yes")]
        no_extras: bool,

        /// 跳过打包前的测试检查
        #[arg(long)]
        skip_check: bool,
    },

    /// 以表格形式显示 JSON 报告
    Summary {
        /// 报告文件 (results.json)
        report: PathBuf,
    },
}

/// 额外文件的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtraPolicy {
    Ask,
    All,
    None,
}

fn load_config(dir: &Path) -> Result<AutogradeConfig> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("cannot open directory {}", dir.display()))?;
    Ok(ConfigLoader::find_and_load(&dir)?)
}

fn check(dir: &Path, config: &AutogradeConfig) -> Result<ReportDocument> {
    println!("Executing tests");
    let report = package::run_check(dir, &config.package)?;
    report::print_results(&report);

    if let Some(test) = report.tests.iter().find(|t| !t.passed()) {
        bail!(
            "test {} did not pass. Please fix the test or solution and try again",
            test.name
        );
    }
    Ok(report)
}

fn select_extras(candidates: Vec<String>, policy: ExtraPolicy) -> Result<Vec<String>> {
    let mut selected = Vec::new();
    for name in candidates {
        let include = match policy {
            ExtraPolicy::All => true,
            ExtraPolicy::None => false,
            ExtraPolicy::Ask => Confirm::new(&format!(
                "Found extra file {} in directory, should this be included?",
                name
            ))
            .with_default(false)
            .prompt()?,
        };

        if include {
            println!("\tAdded {} to {}", name.green(), package::ARCHIVE_NAME);
            selected.push(name);
        } else {
            println!("\tNot including {}", name.dimmed());
        }
    }
    Ok(selected)
}

fn package_assignment(dir: &Path, policy: ExtraPolicy, skip_check: bool) -> Result<()> {
    let config = load_config(dir)?;

    if let Some(backup) = package::backup_existing(dir)? {
        println!("Saved previous archive as {}", backup.display());
    }

    let files: ProjectFiles = package::discover(dir, &config.package)?;
    println!(
        "Submission: {}  Tests: {}",
        files.submission.bold(),
        files.test.bold()
    );

    if !skip_check {
        check(dir, &config)?;
    }

    println!("Generating {}", package::ARCHIVE_NAME);
    let candidates = package::extra_candidates(dir, &files, &config.package)?;
    let extras = select_extras(candidates, policy)?;
    let path = package::build_archive(dir, &files, &extras, &config.package)?;
    println!("{} {}", "✓".green(), path.display());
    Ok(())
}

fn show_summary(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read report {}", path.display()))?;
    let report = ReportDocument::from_json(&content)?;
    report::print_summary(&report);
    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check { dir } => {
            let config = load_config(&dir)?;
            check(&dir, &config)?;
            println!("{}", "All tests passed".green());
            Ok(())
        }
        Commands::Package {
            dir,
            yes,
            no_extras,
            skip_check,
        } => {
            let policy = if yes {
                ExtraPolicy::All
            } else if no_extras {
                ExtraPolicy::None
            } else {
                ExtraPolicy::Ask
            };
            package_assignment(&dir, policy, skip_check)
        }
        Commands::Summary { report } => show_summary(&report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_package_flags() {
        let cli = Cli::try_parse_from(["autograde", "package", "--dir", "hw1", "--yes"]).unwrap();
        match cli.command {
            Commands::Package { dir, yes, no_extras, skip_check } => {
                assert_eq!(dir, PathBuf::from("hw1"));
                assert!(yes);
                assert!(!no_extras);
                assert!(!skip_check);
            }
            _ => panic!("Expected package command"),
        }
    }

    #[test]
    fn test_cli_rejects_conflicting_extras_flags() {
        let result = Cli::try_parse_from(["autograde", "package", "--yes", "--no-extras"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_select_extras_without_prompt() {
        let names = vec!["data.txt".to_string(), "notes.md".to_string()];
        assert_eq!(select_extras(names.clone(), ExtraPolicy::All).unwrap(), names);
        assert!(select_extras(names, ExtraPolicy::None).unwrap().is_empty());
    }
}
