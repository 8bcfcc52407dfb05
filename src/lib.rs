//! 以哨兵节点闭合成环的双向链表，以及只读/可写两种双向游标。
//!
//! ```
//! use ring_list::{list, List};
//!
//! let mut l: List<i32> = list![0, 1, 2];
//! l.push_front(9);
//!
//! let mut out = Vec::new();
//! let mut it = l.begin();
//! loop {
//!     out.push(*it);
//!     // end() 指向最后一个元素本身
//!     if it == l.end() {
//!         break;
//!     }
//!     it.move_next();
//! }
//! assert_eq!(out, [9, 0, 1, 2]);
//! ```
pub mod c_list;
mod cursor;
mod error;
mod iter;
mod list;
mod node;
mod serialize;

pub use cursor::{Cursor, CursorMut, RawCursor};
pub use error::ListError;
pub use iter::{IntoIter, Iter, IterMut};
pub use list::{List, Position};

/// 按给定顺序逐个 `push_back` 构造链表
#[macro_export]
macro_rules! list {
    () => {
        $crate::List::new()
    };
    ($($x:expr),+ $(,)?) => {{
        let mut list = $crate::List::new();
        $(list.push_back($x);)+
        list
    }};
}
