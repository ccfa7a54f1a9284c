use crate::assertion::{self, IoOptions, TestError};
use crate::capture::{Console, OutputCapture};
use crate::metadata::{LeaderboardColumn, SortOrder, TestMeta, Visibility};
use crate::runner::types::{TestHandle, TestTrace};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// 测试体签名
pub type TestBody = Box<dyn Fn(&mut TestContext) -> Result<(), TestError>>;

/// 交给测试体的上下文：输出捕获、部分得分、排行榜值
#[derive(Debug)]
pub struct TestContext {
    capture: OutputCapture,
    score: Option<f64>,
    leaderboard_value: Option<Value>,
}

impl TestContext {
    pub fn new(buffered: bool) -> Self {
        Self {
            capture: OutputCapture::new(buffered),
            score: None,
            leaderboard_value: None,
        }
    }

    pub fn print(&mut self, text: impl fmt::Display) {
        self.capture.write_stdout(text);
    }

    pub fn println(&mut self, text: impl fmt::Display) {
        self.capture.write_stdout(format_args!("{}\n", text));
    }

    pub fn eprint(&mut self, text: impl fmt::Display) {
        self.capture.write_stderr(text);
    }

    pub fn eprintln(&mut self, text: impl fmt::Display) {
        self.capture.write_stderr(format_args!("{}\n", text));
    }

    /// 设置部分得分（配合 partial_credit 使用）
    pub fn set_score(&mut self, score: f64) {
        self.score = Some(score);
    }

    /// 设置排行榜上的值（配合 leaderboard 使用）
    pub fn set_leaderboard_value(&mut self, value: impl Into<Value>) {
        self.leaderboard_value = Some(value.into());
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn assert_eq<T>(&self, first: T, second: T, msg: &str) -> Result<(), TestError>
    where
        T: PartialEq + fmt::Debug,
    {
        assertion::assert_eq(first, second, msg)
    }

    pub fn assert_true(&self, condition: bool, msg: &str) -> Result<(), TestError> {
        assertion::assert_true(condition, msg)
    }

    pub fn assert_io_equals<F>(
        &self,
        func: F,
        stdin: &[&str],
        expected: &str,
        options: IoOptions,
    ) -> Result<(), TestError>
    where
        F: FnOnce(&mut Console) -> anyhow::Result<()>,
    {
        assertion::assert_io_equals(func, stdin, expected, options)
    }

    pub fn assert_io_from_file_equals<F, P>(
        &self,
        func: F,
        stdin: &[&str],
        expected_file: P,
        options: IoOptions,
    ) -> Result<(), TestError>
    where
        F: FnOnce(&mut Console) -> anyhow::Result<()>,
        P: AsRef<Path>,
    {
        assertion::assert_io_from_file_equals(func, stdin, expected_file, options)
    }

    /// 结束捕获，取出收集到的数据
    pub fn finish(self) -> TestTrace {
        TestTrace {
            output: self.capture.output(),
            score: self.score,
            leaderboard_value: self.leaderboard_value,
        }
    }
}

/// 一个注册的测试用例
pub struct TestCase {
    name: String,
    suite: String,
    description: Option<String>,
    meta: TestMeta,
    body: TestBody,
}

impl TestCase {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut TestContext) -> Result<(), TestError> + 'static,
    {
        Self {
            name: name.into(),
            suite: String::new(),
            description: None,
            meta: TestMeta::default(),
            body: Box::new(body),
        }
    }

    /// 测试描述，第一行会作为报告中的测试名
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 满分
    pub fn weight(mut self, weight: f64) -> Self {
        self.meta.weight = Some(weight);
        self
    }

    /// 允许部分得分；测试体通过 `TestContext::set_score` 报告得分
    pub fn partial_credit(self, weight: f64) -> Self {
        self.weight(weight)
    }

    /// 排序编号，例如 "1.1"
    pub fn number(mut self, number: impl fmt::Display) -> Self {
        self.meta.number = Some(number.to_string());
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.meta.visibility = Some(visibility);
        self
    }

    /// 失败时只显示这条消息，隐藏具体断言
    pub fn hide_errors(mut self, message: impl Into<String>) -> Self {
        self.meta.hide_errors = Some(message.into());
        self
    }

    pub fn hide_errors_default(self) -> Self {
        self.hide_errors(TestMeta::DEFAULT_HIDE_ERRORS)
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// 声明为排行榜测试（降序）
    pub fn leaderboard(self, column: impl Into<String>) -> Self {
        self.leaderboard_with_order(column, SortOrder::default())
    }

    pub fn leaderboard_with_order(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.meta.leaderboard = Some(LeaderboardColumn {
            column: column.into(),
            order,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// 执行测试体
    pub fn run(&self, ctx: &mut TestContext) -> Result<(), TestError> {
        (self.body)(ctx)
    }
}

impl TestHandle for TestCase {
    fn id(&self) -> String {
        self.to_string()
    }

    fn short_description(&self) -> Option<String> {
        self.description
            .as_deref()
            .and_then(|d| d.lines().map(str::trim).find(|line| !line.is_empty()))
            .map(str::to_string)
    }

    fn meta(&self) -> &TestMeta {
        &self.meta
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suite.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.suite)
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("suite", &self.suite)
            .field("description", &self.description)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// 按声明顺序组织的一组测试
#[derive(Debug, Default)]
pub struct Suite {
    name: String,
    tests: Vec<TestCase>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
        }
    }

    /// 添加测试（链式）
    pub fn test(mut self, case: TestCase) -> Self {
        self.add(case);
        self
    }

    pub fn add(&mut self, mut case: TestCase) {
        if case.suite.is_empty() {
            case.suite = self.name.clone();
        }
        self.tests.push(case);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.tests.iter()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}
