use thiserror::Error;

/// 链表操作可能返回的错误
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// 在空链表上访问首/尾元素
    #[error("越界访问: {0}")]
    OutOfRange(&'static str),
    /// 传入的位置不属于当前链表
    #[error("位置不属于当前链表")]
    ForeignPosition,
}

#[cfg(test)]
mod tests {
    use super::ListError;

    #[test]
    fn messages() {
        assert_eq!(
            ListError::OutOfRange("front on empty list").to_string(),
            "越界访问: front on empty list"
        );
        assert_eq!(ListError::ForeignPosition.to_string(), "位置不属于当前链表");
    }
}
