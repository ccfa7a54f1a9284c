use std::any::Any;
use std::panic::{self, PanicHookInfo};

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// 在测试体执行期间替换 panic hook，避免 panic 信息混进 stdout 的 JSON
///
/// Drop 时恢复原来的 hook，正常返回和被 catch_unwind 捕获的 panic 都一样。
pub struct PanicSilencer {
    previous: Option<PanicHook>,
}

impl PanicSilencer {
    pub fn install() -> Self {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for PanicSilencer {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(previous);
        }
    }
}

/// 从 panic payload 中取出消息文本
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "test panicked".to_string()
    }
}
