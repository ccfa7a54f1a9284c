use anyhow::anyhow;
use std::collections::VecDeque;
use std::fmt;

/// 脚本化控制台：学生函数通过它读取输入、打印输出
///
/// 输入来自预先给定的行列表，所有输出（包括提示语）都记录到 transcript 中。
#[derive(Debug, Default)]
pub struct Console {
    input: VecDeque<String>,
    transcript: String,
    echo_input: bool,
}

impl Console {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            transcript: String::new(),
            echo_input: false,
        }
    }

    /// 读取的输入行是否回显到 transcript（模拟终端上看到的内容）
    pub fn with_echo(mut self, echo_input: bool) -> Self {
        self.echo_input = echo_input;
        self
    }

    /// 打印提示语并读取下一行输入
    pub fn input(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.transcript.push_str(prompt);
        let line = self
            .input
            .pop_front()
            .ok_or_else(|| anyhow!("input() called but no more input was provided"))?;
        if self.echo_input {
            self.transcript.push_str(&line);
            self.transcript.push('\n');
        }
        Ok(line)
    }

    pub fn print(&mut self, text: impl fmt::Display) {
        let _ = fmt::Write::write_fmt(&mut self.transcript, format_args!("{}", text));
    }

    pub fn println(&mut self, text: impl fmt::Display) {
        self.print(text);
        self.transcript.push('\n');
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// 剩余未读取的输入行数
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}
