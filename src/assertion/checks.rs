use crate::assertion::types::TestError;
use std::fmt::Debug;

/// 比较两个值，不相等时返回断言失败
///
/// 消息格式: `{first:?} != {second:?} : {msg}`，msg 为空时省略后半部分
pub fn assert_eq<T>(first: T, second: T, msg: &str) -> Result<(), TestError>
where
    T: PartialEq + Debug,
{
    if first == second {
        return Ok(());
    }

    let mut message = format!("{:?} != {:?}", first, second);
    if !msg.is_empty() {
        message.push_str(" : ");
        message.push_str(msg);
    }
    Err(TestError::Assertion(message))
}

pub fn assert_true(condition: bool, msg: &str) -> Result<(), TestError> {
    if condition {
        Ok(())
    } else if msg.is_empty() {
        Err(TestError::Assertion("false is not true".to_string()))
    } else {
        Err(TestError::Assertion(msg.to_string()))
    }
}

/// 直接构造一个断言失败
pub fn fail(msg: impl Into<String>) -> TestError {
    TestError::Assertion(msg.into())
}
