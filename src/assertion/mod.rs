mod checks;
mod io;
/// 断言模块 - 测试体使用的断言与输入输出比对
mod types;

pub use checks::{assert_eq, assert_true, fail};
pub use io::{IoOptions, assert_io_equals, assert_io_from_file_equals, normalize};
pub use types::TestError;
