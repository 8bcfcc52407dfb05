use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cursor::{Cursor, CursorMut, RawCursor};
use crate::error::ListError;
use crate::node::Node;

// 每个链表实例的唯一编号，供 Position 校验归属
static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// 以哨兵节点闭合成环的双向链表
///
/// 哨兵节点在构造时分配、在析构时释放，从不保存用户数据：
/// - `sentinel.next` 指向第一个元素（空链表时指向哨兵自身）
/// - `sentinel.prev` 指向最后一个元素（空链表时指向哨兵自身）
///
/// 插入只改写新节点两侧的指针，已有节点的地址保持不变。
pub struct List<T> {
    sentinel: *mut Node<T>,
    id: u64,
    marker: PhantomData<Box<Node<T>>>,
}

// 链表独占其全部节点，线程安全性与 Box<T> 一致
unsafe impl<T: Send> Send for List<T> {}
unsafe impl<T: Sync> Sync for List<T> {}

/// 链表中某个节点的位置标记
///
/// 与游标不同，`Position` 不借用链表，插入之后依然有效，
/// 可以通过 [`List::cursor_at`] / [`List::cursor_at_mut`] 重新得到游标。
/// 链表没有删除操作，所以只要所属链表还在，位置指向的节点就一定存活。
pub struct Position<T> {
    pub(crate) node: *mut Node<T>,
    pub(crate) list: u64,
}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl<T> Eq for Position<T> {}

impl<T> Hash for Position<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<T> fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("list", &self.list)
            .field("node", &self.node)
            .finish()
    }
}

// 基础实现
impl<T> List<T> {
    /// 构造一个新的空链表
    ///
    /// # 返回值
    /// 返回一个只含哨兵节点的链表，哨兵的前驱、后继都指向自身
    pub fn new() -> Self {
        let sentinel = Box::into_raw(Box::new(Node::new()));
        unsafe {
            (*sentinel).next = sentinel;
            (*sentinel).prev = sentinel;
        }

        List {
            sentinel,
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            marker: PhantomData,
        }
    }

    /// 判断链表是否为空
    ///
    /// # 返回值
    /// 哨兵的前驱、后继都指向自身时返回 `true`
    pub fn is_empty(&self) -> bool {
        unsafe {
            let sentinel = &*self.sentinel;
            debug_assert!(!sentinel.is_unlinked(), "哨兵节点未接入环");
            sentinel.next == self.sentinel && sentinel.prev == self.sentinel
        }
    }

    /// 在链表尾部插入一个新元素
    ///
    /// # 参数
    /// - `data`: 要插入到链表尾部的数据
    pub fn push_back(&mut self, data: T) {
        unsafe {
            self.link_before(self.sentinel, data);
        }
    }

    /// 在链表头部插入一个新元素
    ///
    /// # 参数
    /// - `data`: 要插入到链表头部的数据
    pub fn push_front(&mut self, data: T) {
        unsafe {
            let first = (*self.sentinel).next;
            self.link_before(first, data);
        }
    }

    /// 在 `position` 之前插入一个新元素
    ///
    /// # 参数
    /// - `position`: 插入点，可以是哨兵位置（即插入到尾部）
    /// - `data`: 要插入的数据
    ///
    /// # 返回值
    /// 指向新元素的可写游标
    ///
    /// # 错误
    /// `position` 来自其他链表时返回 [`ListError::ForeignPosition`]
    pub fn insert(&mut self, position: Position<T>, data: T) -> Result<CursorMut<'_, T>, ListError> {
        self.check_owner(position)?;
        unsafe {
            let node = self.link_before(position.node, data);
            Ok(RawCursor::from_raw(node, self.sentinel, self.id))
        }
    }

    /// 获取第一个元素的引用
    ///
    /// # 错误
    /// 链表为空时返回 [`ListError::OutOfRange`]
    pub fn front(&self) -> Result<&T, ListError> {
        self.check("front on empty list")?;
        unsafe { Ok((*(*self.sentinel).next).data.assume_init_ref()) }
    }

    /// 获取最后一个元素的引用
    ///
    /// # 错误
    /// 链表为空时返回 [`ListError::OutOfRange`]
    pub fn back(&self) -> Result<&T, ListError> {
        self.check("back on empty list")?;
        unsafe { Ok((*(*self.sentinel).prev).data.assume_init_ref()) }
    }

    /// 获取第一个元素的可变引用，错误同 [`List::front`]
    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        self.check("front on empty list")?;
        unsafe { Ok((*(*self.sentinel).next).data.assume_init_mut()) }
    }

    /// 获取最后一个元素的可变引用，错误同 [`List::back`]
    pub fn back_mut(&mut self) -> Result<&mut T, ListError> {
        self.check("back on empty list")?;
        unsafe { Ok((*(*self.sentinel).prev).data.assume_init_mut()) }
    }

    fn check(&self, msg: &'static str) -> Result<(), ListError> {
        if self.is_empty() {
            return Err(ListError::OutOfRange(msg));
        }
        Ok(())
    }

    fn check_owner(&self, position: Position<T>) -> Result<(), ListError> {
        if position.list != self.id {
            return Err(ListError::ForeignPosition);
        }
        Ok(())
    }

    /// 把持有 `data` 的新节点接到 `pos` 之前，返回新节点
    ///
    /// 所有插入都经过这里：新节点的两个指针，加上两侧邻居指回新节点的两个指针。
    ///
    /// # Safety
    /// `pos` 必须是本链表环上的节点（包括哨兵）
    unsafe fn link_before(&mut self, pos: *mut Node<T>, data: T) -> *mut Node<T> {
        unsafe {
            let prev = (*pos).prev;
            let next = (*prev).next;
            debug_assert!(ptr::eq(next, pos), "环的前驱/后继不对称");

            let node = Box::into_raw(Box::new(Node::with_value(data)));
            (*node).next = next;
            (*node).prev = prev;
            (*prev).next = node;
            (*next).prev = node;
            node
        }
    }

    /// 把 `node` 从环上摘下并取出其数据，节点本身随之释放
    ///
    /// # Safety
    /// `node` 必须是本链表上的数据节点，不能是哨兵
    unsafe fn unlink(&mut self, node: *mut Node<T>) -> T {
        unsafe {
            let prev = (*node).prev;
            let next = (*node).next;
            (*prev).next = next;
            (*next).prev = prev;

            let boxed = Box::from_raw(node);
            boxed.data.assume_init_read()
        }
    }

    /// 摘下第一个元素，只供消费迭代器使用
    pub(crate) fn take_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let first = (*self.sentinel).next;
            Some(self.unlink(first))
        }
    }

    /// 摘下最后一个元素，只供消费迭代器使用
    pub(crate) fn take_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let last = (*self.sentinel).prev;
            Some(self.unlink(last))
        }
    }

    pub(crate) fn sentinel_ptr(&self) -> *mut Node<T> {
        self.sentinel
    }
}

// 游标
impl<T> List<T> {
    /// 指向第一个元素的只读游标，空链表时指向哨兵
    pub fn begin(&self) -> Cursor<'_, T> {
        unsafe { RawCursor::from_raw((*self.sentinel).next, self.sentinel, self.id) }
    }

    /// 指向**最后一个**元素的只读游标，空链表时指向哨兵
    ///
    /// 注意这里不是“尾后”位置：`end()` 本身就是最后一个元素。
    /// 遍历时应先处理当前元素，再与 `end()` 比较：
    ///
    /// ```
    /// let list = ring_list::list![0, 1, 2, 3, 4];
    /// let mut out = Vec::new();
    /// let mut it = list.begin();
    /// loop {
    ///     out.push(*it);
    ///     if it == list.end() {
    ///         break;
    ///     }
    ///     it.move_next();
    /// }
    /// assert_eq!(out, [0, 1, 2, 3, 4]);
    /// ```
    pub fn end(&self) -> Cursor<'_, T> {
        unsafe { RawCursor::from_raw((*self.sentinel).prev, self.sentinel, self.id) }
    }

    /// 同 [`List::begin`]
    pub fn cbegin(&self) -> Cursor<'_, T> {
        self.begin()
    }

    /// 同 [`List::end`]，指向最后一个元素
    pub fn cend(&self) -> Cursor<'_, T> {
        self.end()
    }

    /// 指向第一个元素的可写游标，空链表时指向哨兵
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        unsafe { RawCursor::from_raw((*self.sentinel).next, self.sentinel, self.id) }
    }

    /// 指向最后一个元素的可写游标，空链表时指向哨兵
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        unsafe { RawCursor::from_raw((*self.sentinel).prev, self.sentinel, self.id) }
    }

    /// 指向哨兵的只读游标，用于判断遍历是否已经绕回
    pub fn sentinel(&self) -> Cursor<'_, T> {
        unsafe { RawCursor::from_raw(self.sentinel, self.sentinel, self.id) }
    }

    /// 哨兵的位置；在此之前插入即追加到尾部
    pub fn sentinel_position(&self) -> Position<T> {
        Position {
            node: self.sentinel,
            list: self.id,
        }
    }

    /// 由位置标记重新得到只读游标
    ///
    /// # 错误
    /// `position` 来自其他链表时返回 [`ListError::ForeignPosition`]
    pub fn cursor_at(&self, position: Position<T>) -> Result<Cursor<'_, T>, ListError> {
        self.check_owner(position)?;
        unsafe { Ok(RawCursor::from_raw(position.node, self.sentinel, self.id)) }
    }

    /// 由位置标记重新得到可写游标，错误同 [`List::cursor_at`]
    pub fn cursor_at_mut(&mut self, position: Position<T>) -> Result<CursorMut<'_, T>, ListError> {
        self.check_owner(position)?;
        unsafe { Ok(RawCursor::from_raw(position.node, self.sentinel, self.id)) }
    }
}

impl<T> Drop for List<T> {
    /// 沿环释放每个数据节点恰好一次，最后释放哨兵
    fn drop(&mut self) {
        unsafe {
            let mut current = (*self.sentinel).next;
            while current != self.sentinel {
                let next = (*current).next;
                let mut node = Box::from_raw(current);
                node.data.assume_init_drop();
                current = next;
            }
            drop(Box::from_raw(self.sentinel));
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

// 从迭代器创建链表，按顺序逐个 push_back
impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        for item in iter {
            list.push_back(item);
        }
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// 按“先处理、再与 end 比较”的方式完整遍历
    fn walk_inclusive<T: Copy>(list: &List<T>) -> Vec<T> {
        let mut out = Vec::new();
        if list.is_empty() {
            return out;
        }
        let mut it = list.begin();
        loop {
            out.push(*it);
            if it == list.cend() {
                break;
            }
            it.move_next();
        }
        out
    }

    /// 检查整个环的前驱/后继互为逆，并返回数据节点个数
    fn assert_ring(list: &List<i32>) -> usize {
        let sentinel = list.sentinel_ptr();
        let mut count = 0;
        unsafe {
            let mut current = sentinel;
            loop {
                let next = (*current).next;
                assert!(ptr::eq((*next).prev, current), "link symmetry broken");
                current = next;
                if current == sentinel {
                    break;
                }
                count += 1;
            }
        }
        count
    }

    #[test]
    fn new_list_is_empty() {
        let list: List<i32> = List::new();
        assert!(list.is_empty());
        assert!(List::<String>::default().is_empty());
        assert_eq!(assert_ring(&list), 0);
    }

    #[test]
    fn push_makes_list_non_empty() {
        let mut list = List::new();
        list.push_back(1);
        assert!(!list.is_empty());

        let mut list = List::new();
        list.push_front(1);
        assert!(!list.is_empty());
    }

    #[test]
    fn push_back_traversal_prints_in_order() {
        let mut list = List::new();
        for i in 0..5 {
            list.push_back(i);
        }
        let printed = walk_inclusive(&list)
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(printed, "0 1 2 3 4");
    }

    #[test]
    fn end_points_at_last_element() {
        let list = List::from([0, 1, 2, 3, 4]);
        assert_eq!(*list.end(), 4);
        assert_eq!(*list.cend(), 4);
        assert!(!list.end().is_sentinel());
        assert_eq!(list.end(), list.end().clone());
    }

    #[test]
    fn half_open_loop_skips_last_element() {
        let list = List::from([0, 1, 2, 3, 4]);
        let mut seen = Vec::new();
        let mut it = list.begin();
        while it != list.cend() {
            seen.push(*it);
            it.move_next();
        }
        assert_eq!(seen, [0, 1, 2, 3]);
    }

    #[test]
    fn empty_list_begin_and_end_are_the_sentinel() {
        let list: List<i32> = List::new();
        assert!(list.begin().is_sentinel());
        assert!(list.end().is_sentinel());
        assert_eq!(list.begin(), list.sentinel());
    }

    #[test]
    fn push_front_reverses_order() {
        let mut list = List::new();
        for i in 1..=4 {
            list.push_front(i);
        }
        assert_eq!(walk_inclusive(&list), [4, 3, 2, 1]);
    }

    #[test]
    fn push_front_onto_existing_list() {
        let mut list = List::from([0, 1, 2]);
        list.push_front(9);
        assert_eq!(walk_inclusive(&list), [9, 0, 1, 2]);
    }

    #[test]
    fn front_and_back() {
        let mut list = List::new();
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);
        assert_eq!(list.front(), Ok(&1));
        assert_eq!(list.back(), Ok(&3));

        *list.front_mut().unwrap() = 10;
        *list.back_mut().unwrap() += 30;
        assert_eq!(walk_inclusive(&list), [10, 2, 33]);
    }

    #[test]
    fn front_and_back_on_empty_list_are_out_of_range() {
        let mut list: List<i32> = List::new();
        for _ in 0..3 {
            assert_eq!(list.front(), Err(ListError::OutOfRange("front on empty list")));
            assert_eq!(list.back(), Err(ListError::OutOfRange("back on empty list")));
            assert!(list.front_mut().is_err());
            assert!(list.back_mut().is_err());
        }
        assert!(list.is_empty());
        assert_eq!(assert_ring(&list), 0);
    }

    #[test]
    fn insert_before_position() {
        let mut list = List::from([1, 2, 4]);
        let at = list.end().position();

        let inserted = list.insert(at, 3).unwrap();
        assert_eq!(*inserted, 3);

        let before = inserted.as_cursor();
        let mut prev = before;
        prev.move_prev();
        let mut next = before;
        next.move_next();
        assert_eq!(*prev, 2);
        assert_eq!(*next, 4);

        assert_eq!(walk_inclusive(&list), [1, 2, 3, 4]);
        assert_eq!(assert_ring(&list), 4);
    }

    #[test]
    fn insert_at_sentinel_appends() {
        let mut list = List::from([1, 2]);
        let back = list.sentinel_position();
        let cursor = list.insert(back, 3).unwrap();
        assert_eq!(*cursor, 3);
        assert_eq!(list.back(), Ok(&3));

        let mut empty = List::new();
        let at = empty.sentinel_position();
        empty.insert(at, 5).unwrap();
        assert_eq!(empty.front(), Ok(&5));
        assert_eq!(empty.back(), Ok(&5));
    }

    #[test]
    fn insert_rejects_foreign_position() {
        let mut a = List::from([1]);
        let b = List::from([2]);
        let foreign = b.begin().position();

        assert!(matches!(a.insert(foreign, 3), Err(ListError::ForeignPosition)));
        assert!(a.cursor_at(foreign).is_err());
        assert!(a.cursor_at_mut(foreign).is_err());
        assert_eq!(walk_inclusive(&a), [1]);
    }

    #[test]
    fn positions_survive_insertion() {
        let mut list = List::from([10, 30]);
        let first = list.begin().position();
        let last = list.end().position();

        list.insert(last, 20).unwrap();
        list.push_front(0);
        list.push_back(40);

        assert_eq!(*list.cursor_at(first).unwrap(), 10);
        assert_eq!(*list.cursor_at(last).unwrap(), 30);
        *list.cursor_at_mut(last).unwrap() = 31;
        assert_eq!(walk_inclusive(&list), [0, 10, 20, 31, 40]);
    }

    #[test]
    fn ring_stays_symmetric() {
        let mut list = List::new();
        for i in 0..50 {
            if i % 3 == 0 {
                list.push_front(i);
            } else {
                list.push_back(i);
            }
            let mid = list.begin().position();
            list.insert(mid, -i).unwrap();
        }
        assert_eq!(assert_ring(&list), 100);
    }

    #[test]
    fn drop_releases_every_element_once() {
        struct Counted(Rc<Cell<usize>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        {
            let mut list = List::new();
            for _ in 0..8 {
                list.push_back(Counted(drops.clone()));
            }
            list.push_front(Counted(drops.clone()));
        }
        assert_eq!(drops.get(), 9);

        {
            let _empty: List<Counted> = List::new();
        }
        assert_eq!(drops.get(), 9);
    }

    #[test]
    fn literal_construction() {
        let list = crate::list![0, 1, 2, 3, 4];
        assert_eq!(walk_inclusive(&list), [0, 1, 2, 3, 4]);

        let empty: List<u8> = crate::list![];
        assert!(empty.is_empty());
    }

    #[test]
    fn clone_eq_debug() {
        let mut list = List::from(["a".to_string(), "b".to_string()]);
        let copy = list.clone();
        assert_eq!(list, copy);

        list.push_back("c".to_string());
        assert_ne!(list, copy);
        assert_eq!(format!("{:?}", copy), r#"["a", "b"]"#);
    }

    #[test]
    fn extend_by_reference() {
        let mut list = List::from([1, 2]);
        list.extend(&[3, 4]);
        assert_eq!(walk_inclusive(&list), [1, 2, 3, 4]);
    }
}
