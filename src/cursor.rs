use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr;

use crate::list::Position;
use crate::node::Node;

/// 双向游标，`READ_ONLY` 决定它是只读还是可写
///
/// 游标只是借用链表的节点指针，在环上前后移动，经过哨兵时不会停下，
/// 调用方需要和 [`List::end`](crate::List::end) 或 [`List::sentinel`](crate::List::sentinel)
/// 比较来判断遍历结束。
///
/// 一般通过两个别名使用：[`Cursor`]（只读，可复制）和 [`CursorMut`]（可写，独占）。
pub struct RawCursor<'a, T, const READ_ONLY: bool> {
    node: *mut Node<T>,
    sentinel: *mut Node<T>,
    list: u64,
    marker: PhantomData<&'a mut T>,
}

/// 只读游标
pub type Cursor<'a, T> = RawCursor<'a, T, true>;

/// 可写游标，可以转换为只读游标，反之不行
pub type CursorMut<'a, T> = RawCursor<'a, T, false>;

impl<'a, T, const READ_ONLY: bool> RawCursor<'a, T, READ_ONLY> {
    /// # Safety
    /// `node` 和 `sentinel` 必须属于同一个在 `'a` 内存活的链表；
    /// 构造可写游标时，调用方必须持有该链表的独占借用
    pub(crate) unsafe fn from_raw(node: *mut Node<T>, sentinel: *mut Node<T>, list: u64) -> Self {
        RawCursor {
            node,
            sentinel,
            list,
            marker: PhantomData,
        }
    }

    /// 游标是否停在哨兵上
    pub fn is_sentinel(&self) -> bool {
        ptr::eq(self.node, self.sentinel)
    }

    /// 当前节点的位置标记
    pub fn position(&self) -> Position<T> {
        Position {
            node: self.node,
            list: self.list,
        }
    }

    /// 当前元素的引用，停在哨兵上时返回 `None`
    pub fn current(&self) -> Option<&T> {
        if self.is_sentinel() {
            return None;
        }
        unsafe { Some((*self.node).data.assume_init_ref()) }
    }

    /// 移到后继节点（前置 `++`），在最后一个元素上调用会移到哨兵
    pub fn move_next(&mut self) -> &mut Self {
        unsafe {
            self.node = (*self.node).next;
        }
        self
    }

    /// 移到前驱节点（前置 `--`），在第一个元素上调用会移到哨兵
    pub fn move_prev(&mut self) -> &mut Self {
        unsafe {
            self.node = (*self.node).prev;
        }
        self
    }
}

impl<'a, T> Cursor<'a, T> {
    /// 同 [`RawCursor::current`]，但返回的引用与链表借用同寿命
    pub fn get(&self) -> Option<&'a T> {
        if self.is_sentinel() {
            return None;
        }
        unsafe { Some((*self.node).data.assume_init_ref()) }
    }

    /// 后置 `++`：移到后继节点，返回移动前的游标
    pub fn post_next(&mut self) -> Self {
        let ret = *self;
        self.move_next();
        ret
    }

    /// 后置 `--`：移到前驱节点，返回移动前的游标
    pub fn post_prev(&mut self) -> Self {
        let ret = *self;
        self.move_prev();
        ret
    }
}

impl<'a, T> CursorMut<'a, T> {
    /// 当前元素的可变引用，停在哨兵上时返回 `None`
    pub fn current_mut(&mut self) -> Option<&mut T> {
        if self.is_sentinel() {
            return None;
        }
        unsafe { Some((*self.node).data.assume_init_mut()) }
    }

    /// 借出一个指向同一节点的只读游标
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        unsafe { RawCursor::from_raw(self.node, self.sentinel, self.list) }
    }

    /// 转换为只读游标
    pub fn into_cursor(self) -> Cursor<'a, T> {
        unsafe { RawCursor::from_raw(self.node, self.sentinel, self.list) }
    }

    /// 后置 `++`：移到后继节点，以只读游标的形式返回移动前的位置
    ///
    /// 返回值借用了本游标，在它存活期间本游标不能再写入。
    pub fn post_next(&mut self) -> Cursor<'_, T> {
        let old = self.node;
        self.move_next();
        unsafe { RawCursor::from_raw(old, self.sentinel, self.list) }
    }

    /// 后置 `--`，规则同 [`CursorMut::post_next`]
    pub fn post_prev(&mut self) -> Cursor<'_, T> {
        let old = self.node;
        self.move_prev();
        unsafe { RawCursor::from_raw(old, self.sentinel, self.list) }
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}

impl<T, const READ_ONLY: bool> Deref for RawCursor<'_, T, READ_ONLY> {
    type Target = T;

    /// 解引用哨兵会 panic；不希望 panic 时使用 [`RawCursor::current`]
    fn deref(&self) -> &T {
        match self.current() {
            Some(data) => data,
            None => panic!("对哨兵位置解引用"),
        }
    }
}

impl<T> DerefMut for CursorMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self.current_mut() {
            Some(data) => data,
            None => panic!("对哨兵位置解引用"),
        }
    }
}

// 只比较节点地址，只读/可写游标之间可以混合比较
impl<'b, T, const A: bool, const B: bool> PartialEq<RawCursor<'b, T, B>> for RawCursor<'_, T, A> {
    fn eq(&self, other: &RawCursor<'b, T, B>) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl<T, const READ_ONLY: bool> Eq for RawCursor<'_, T, READ_ONLY> {}

impl<T, const READ_ONLY: bool> PartialEq<Position<T>> for RawCursor<'_, T, READ_ONLY> {
    fn eq(&self, other: &Position<T>) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl<T: fmt::Debug, const READ_ONLY: bool> fmt::Debug for RawCursor<'_, T, READ_ONLY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(if READ_ONLY { "Cursor" } else { "CursorMut" })
            .field("current", &self.current())
            .finish()
    }
}
