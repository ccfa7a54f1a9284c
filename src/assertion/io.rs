use crate::assertion::checks::assert_eq;
use crate::assertion::types::TestError;
use crate::capture::Console;
use std::fs;
use std::path::Path;

/// 输入输出比对选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoOptions {
    /// 比较前去掉所有空白字符
    pub ignore_whitespace: bool,
    /// 比较前统一转小写
    pub ignore_case: bool,
    /// 输入行是否回显到输出中
    pub output_includes_input: bool,
}

impl Default for IoOptions {
    fn default() -> Self {
        Self {
            ignore_whitespace: true,
            ignore_case: true,
            output_includes_input: false,
        }
    }
}

impl IoOptions {
    /// 期望输出来自文件时的默认选项（文件里通常是完整的终端记录，包含输入）
    pub fn from_file() -> Self {
        Self {
            output_includes_input: true,
            ..Self::default()
        }
    }

    /// 精确比较
    pub fn exact() -> Self {
        Self {
            ignore_whitespace: false,
            ignore_case: false,
            output_includes_input: false,
        }
    }
}

/// 按选项规范化一段文本
pub fn normalize(text: &str, options: &IoOptions) -> String {
    let mut text = text.to_string();
    if options.ignore_whitespace {
        text.retain(|c| !c.is_whitespace());
    }
    if options.ignore_case {
        text = text.to_lowercase();
    }
    text
}

/// 用给定的输入行运行学生函数，并与期望输出比较
///
/// 输入行同样会被规范化后再交给学生函数。
pub fn assert_io_equals<F>(
    func: F,
    stdin: &[&str],
    expected: &str,
    options: IoOptions,
) -> Result<(), TestError>
where
    F: FnOnce(&mut Console) -> anyhow::Result<()>,
{
    let lines: Vec<String> = stdin.iter().map(|line| normalize(line, &options)).collect();
    let expected = normalize(expected, &options);

    let mut console = Console::new(lines).with_echo(options.output_includes_input);
    func(&mut console)?;

    let actual = normalize(console.transcript().trim(), &options);
    let message = format!("Expected: {}\nGot: {}", expected, actual);
    assert_eq(expected, actual, &message)
}

/// 与 `assert_io_equals` 相同，期望输出从文件读取
pub fn assert_io_from_file_equals<F, P>(
    func: F,
    stdin: &[&str],
    expected_file: P,
    options: IoOptions,
) -> Result<(), TestError>
where
    F: FnOnce(&mut Console) -> anyhow::Result<()>,
    P: AsRef<Path>,
{
    let path = expected_file.as_ref();
    let expected = fs::read_to_string(path).map_err(|e| {
        TestError::Staff(format!(
            "cannot read expected output file {}: {}",
            path.display(),
            e
        ))
    })?;

    assert_io_equals(func, stdin, expected.trim(), options)
}
