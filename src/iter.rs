use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::list::List;
use crate::node::Node;

// 迭代器实现
impl<T> List<T> {
    /// 创建一个从头到尾遍历的只读迭代器
    ///
    /// 与游标不同，迭代器不会绕过哨兵：走完一遍就返回 `None`，也可以从尾部反向遍历。
    pub fn iter(&self) -> Iter<'_, T> {
        let (head, tail) = bounds(self);
        Iter {
            head,
            tail,
            finished: self.is_empty(),
            marker: PhantomData,
        }
    }

    /// 创建一个从头到尾遍历的可变迭代器，只能修改元素，不能修改链接结构
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (head, tail) = bounds(self);
        IterMut {
            head,
            tail,
            finished: self.is_empty(),
            marker: PhantomData,
        }
    }
}

fn bounds<T>(list: &List<T>) -> (*mut Node<T>, *mut Node<T>) {
    let sentinel = list.sentinel_ptr();
    unsafe { ((*sentinel).next, (*sentinel).prev) }
}

/// 只读迭代器
pub struct Iter<'a, T> {
    head: *mut Node<T>,
    tail: *mut Node<T>,
    finished: bool,
    marker: PhantomData<&'a Node<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// 取出 `head` 处的元素；`head` 与 `tail` 相遇后迭代结束
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        unsafe {
            let node = self.head;
            if node == self.tail {
                self.finished = true;
            } else {
                self.head = (*node).next;
            }
            Some((*node).data.assume_init_ref())
        }
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        unsafe {
            let node = self.tail;
            if node == self.head {
                self.finished = true;
            } else {
                self.tail = (*node).prev;
            }
            Some((*node).data.assume_init_ref())
        }
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// 可变迭代器
pub struct IterMut<'a, T> {
    head: *mut Node<T>,
    tail: *mut Node<T>,
    finished: bool,
    marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        unsafe {
            let node = self.head;
            if node == self.tail {
                self.finished = true;
            } else {
                self.head = (*node).next;
            }
            Some((*node).data.assume_init_mut())
        }
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        unsafe {
            let node = self.tail;
            if node == self.head {
                self.finished = true;
            } else {
                self.tail = (*node).prev;
            }
            Some((*node).data.assume_init_mut())
        }
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

/// 消费迭代器，逐个取得元素的所有权
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.take_front()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.take_back()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
