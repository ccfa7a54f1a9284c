pub mod case;
pub mod executor;
pub mod json_runner;
pub mod reporter;
pub mod types;

pub use case::{Suite, TestCase, TestContext};
pub use executor::TestExecutor;
pub use json_runner::{JsonTestRunner, PostProcessor};
pub use reporter::JsonTestResult;
pub use types::{ErrorDetail, Execution, RunOutcome, RunnerConfig, TestHandle, TestTrace};
