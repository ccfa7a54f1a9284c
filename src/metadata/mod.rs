/// 测试元数据模块 - 权重、可见性、标签、排行榜等
mod types;

pub use types::{LeaderboardColumn, SortOrder, TestMeta, Visibility};
