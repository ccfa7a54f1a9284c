//! 输出捕获 - 每个测试独立的 stdout/stderr 缓冲、脚本化控制台、panic 静默
mod console;
mod output;
mod panic;

pub use console::Console;
pub use output::OutputCapture;
pub use panic::{PanicSilencer, panic_message};
