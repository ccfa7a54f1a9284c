pub mod printer;
pub mod types;

pub use printer::{print_results, print_summary};
pub use types::{LeaderboardEntry, RESERVED_KEYS, ReportDocument, TestOutcome, TestStatus};
