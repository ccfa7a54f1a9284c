use crate::Result;
use crate::metadata::{SortOrder, Visibility};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;
use tracing::warn;

/// ReportDocument 自身字段占用的顶层键
pub const RESERVED_KEYS: [&str; 6] = [
    "tests",
    "leaderboard",
    "visibility",
    "stdout_visibility",
    "execution_time",
    "score",
];

/// 单个测试的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

/// 单个测试的结果记录
///
/// 可选字段未设置时不会出现在 JSON 中（不会输出 null）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,

    pub status: TestStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// 排行榜条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,

    /// 测试体没有设置值时省略
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    pub order: SortOrder,
}

/// 一次运行的完整报告
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportDocument {
    #[serde(default)]
    pub tests: Vec<TestOutcome>,

    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout_visibility: Option<Visibility>,

    /// 总耗时（秒），保留两位小数的字符串
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// post-processor 追加的顶层字段
    ///
    /// 与 RESERVED_KEYS 同名的键在写出时被丢弃，修改这些字段请直接改对应的成员。
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReportDocument {
    pub fn new(visibility: Option<Visibility>, stdout_visibility: Option<Visibility>) -> Self {
        Self {
            visibility,
            stdout_visibility,
            ..Self::default()
        }
    }

    /// 所有测试分数之和，未设置分数的测试按 0.0 计
    pub fn total_score(&self) -> f64 {
        self.tests.iter().map(|t| t.score.unwrap_or(0.0)).sum()
    }

    /// 是否所有测试都通过
    pub fn all_passed(&self) -> bool {
        self.tests.iter().all(TestOutcome::passed)
    }

    /// 序列化为 4 空格缩进的 JSON，末尾带换行
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        // serde_json 只会输出合法 UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// 写入输出流
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.extra.keys().any(|key| is_reserved(key)) {
            let mut cleaned = self.clone();
            cleaned.extra.retain(|key, _| {
                let reserved = is_reserved(key);
                if reserved {
                    warn!(key = %key, "Dropping extra field that shadows a report field");
                }
                !reserved
            });
            return cleaned.write_to(writer);
        }

        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
        self.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}
