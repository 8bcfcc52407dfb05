use std::mem::MaybeUninit;
use std::ptr;

/// 链表节点：一个元素加上前驱、后继两个指针
///
/// 节点只由 [`List`](crate::List) 创建和释放，邻接指针也只由链表改写。
/// 哨兵节点的 `data` 永远不会被初始化。
pub(crate) struct Node<T> {
    pub(crate) next: *mut Node<T>,
    pub(crate) prev: *mut Node<T>,
    pub(crate) data: MaybeUninit<T>,
}

impl<T> Node<T> {
    /// 构造一个不带数据、邻接指针为空的节点
    ///
    /// 只用于哨兵；链表构造时会把它的两个指针都指回自身。
    pub(crate) fn new() -> Self {
        Node {
            next: ptr::null_mut(),
            prev: ptr::null_mut(),
            data: MaybeUninit::uninit(),
        }
    }

    /// 构造一个持有 `data` 的节点，邻接指针为空，等待链表接入环中
    pub(crate) fn with_value(data: T) -> Self {
        Node {
            next: ptr::null_mut(),
            prev: ptr::null_mut(),
            data: MaybeUninit::new(data),
        }
    }

    /// 两个邻接指针都为空：节点尚未接入任何环
    pub(crate) fn is_unlinked(&self) -> bool {
        self.next.is_null() && self.prev.is_null()
    }
}
