use std::fmt;
use std::io::Write;

/// 单个测试的输出缓冲
///
/// 开启缓冲时，测试体的输出写入内存，由 reporter 放进结果的 `output` 字段；
/// 关闭缓冲时直接写到进程的 stdout/stderr，报告里不包含输出。
#[derive(Debug, Default)]
pub struct OutputCapture {
    buffered: bool,
    stdout: String,
    stderr: String,
}

impl OutputCapture {
    pub fn new(buffered: bool) -> Self {
        Self {
            buffered,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// 写入标准输出
    pub fn write_stdout(&mut self, text: impl fmt::Display) {
        if self.buffered {
            // String 的 fmt::Write 不会失败
            let _ = fmt::Write::write_fmt(&mut self.stdout, format_args!("{}", text));
        } else {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "{}", text);
        }
    }

    /// 写入标准错误
    pub fn write_stderr(&mut self, text: impl fmt::Display) {
        if self.buffered {
            let _ = fmt::Write::write_fmt(&mut self.stderr, format_args!("{}", text));
        } else {
            let mut err = std::io::stderr().lock();
            let _ = write!(err, "{}", text);
        }
    }

    /// 已捕获的 stdout
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// 已捕获的 stderr
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// 合并后的输出：stdout 在前，stderr 追加在后（保证中间有换行）
    ///
    /// 未开启缓冲或没有任何输出时返回 None
    pub fn output(&self) -> Option<String> {
        if !self.buffered {
            return None;
        }

        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }

        if out.is_empty() { None } else { Some(out) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_empty() {
        let capture = OutputCapture::new(true);
        assert_eq!(capture.output(), None);
    }

    #[test]
    fn test_output_stdout_only() {
        let mut capture = OutputCapture::new(true);
        capture.write_stdout("hello");
        assert_eq!(capture.output().as_deref(), Some("hello"));
    }

    #[test]
    fn test_output_stderr_appended_after_newline() {
        let mut capture = OutputCapture::new(true);
        capture.write_stdout("out");
        capture.write_stderr("err\n");
        assert_eq!(capture.output().as_deref(), Some("out\nerr\n"));

        let mut capture = OutputCapture::new(true);
        capture.write_stdout("out\n");
        capture.write_stderr("err");
        assert_eq!(capture.output().as_deref(), Some("out\nerr"));
    }

    #[test]
    fn test_output_stderr_only() {
        // stdout 为空时也会先补一个换行
        let mut capture = OutputCapture::new(true);
        capture.write_stderr("boom");
        assert_eq!(capture.output().as_deref(), Some("\nboom"));
    }

    #[test]
    fn test_unbuffered_reports_nothing() {
        let mut capture = OutputCapture::new(false);
        capture.write_stderr("");
        assert_eq!(capture.output(), None);
        assert!(capture.stderr().is_empty());
    }
}
