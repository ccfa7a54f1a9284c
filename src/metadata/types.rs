use crate::error::AutogradeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 测试结果的可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// 永远不对学生展示
    Hidden,
    /// 截止日期之后展示（允许迟交时以迟交截止日期为准）
    AfterDueDate,
    /// 成绩发布之后展示
    AfterPublished,
    /// 始终展示
    Visible,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::AfterDueDate => "after_due_date",
            Self::AfterPublished => "after_published",
            Self::Visible => "visible",
        }
    }
}

impl FromStr for Visibility {
    type Err = AutogradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hidden" => Ok(Self::Hidden),
            "after_due_date" => Ok(Self::AfterDueDate),
            "after_published" => Ok(Self::AfterPublished),
            "visible" => Ok(Self::Visible),
            other => Err(AutogradeError::InvalidMetadata(format!(
                "unknown visibility '{}' (expected hidden, after_due_date, after_published or visible)",
                other
            ))),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 排行榜排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AutogradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(AutogradeError::InvalidMetadata(format!(
                "unknown leaderboard order '{}' (expected asc or desc)",
                other
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 排行榜列声明，列名与排序方向总是一起出现
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardColumn {
    pub column: String,
    pub order: SortOrder,
}

/// 测试元数据
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestMeta {
    /// 满分（weight / partial_credit）；未设置时不输出分数字段
    pub weight: Option<f64>,

    /// 排序编号，例如 "1.1"
    pub number: Option<String>,

    /// 自由标签
    pub tags: Vec<String>,

    /// 可见性覆盖
    pub visibility: Option<Visibility>,

    /// 失败时用这条消息替换真实错误
    pub hide_errors: Option<String>,

    /// 排行榜列；设置后该测试只进入排行榜
    pub leaderboard: Option<LeaderboardColumn>,
}

impl TestMeta {
    /// 默认的 hide_errors 消息
    pub const DEFAULT_HIDE_ERRORS: &'static str = "Test failed";

    pub fn new() -> Self {
        Self::default()
    }

    /// 是否为排行榜测试
    pub fn is_leaderboard(&self) -> bool {
        self.leaderboard.is_some()
    }
}
