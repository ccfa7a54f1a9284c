pub mod assertion;
pub mod capture;
pub mod config;
pub mod error;
pub mod logger;
pub mod metadata;
pub mod package;
pub mod report;
pub mod runner;

// Re-export commonly used types
pub use assertion::{IoOptions, TestError};
pub use capture::Console;
pub use error::{AutogradeError, Result};
pub use metadata::{SortOrder, TestMeta, Visibility};
pub use report::{LeaderboardEntry, ReportDocument, TestOutcome, TestStatus};
pub use runner::{JsonTestRunner, RunnerConfig, Suite, TestCase, TestContext};
