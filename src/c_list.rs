use std::os::raw::{c_int, c_void};
use std::ptr;

use crate::error::ListError;
use crate::list::{List, Position};

// 不透明指针类型，对C完全隐藏实现细节
pub struct CList {
    inner: List<*mut c_void>,
}

// 游标结构，只保存位置标记，每次移动时借助链表重新定位
pub struct CCursor {
    position: Position<*mut c_void>,
}

// 错误码定义
pub const LIST_SUCCESS: c_int = 0;
pub const LIST_ERROR_NULL_PTR: c_int = -1;
pub const LIST_ERROR_EMPTY: c_int = -2;
pub const LIST_ERROR_FOREIGN_POSITION: c_int = -3;

fn error_code(err: ListError) -> c_int {
    match err {
        ListError::OutOfRange(_) => LIST_ERROR_EMPTY,
        ListError::ForeignPosition => LIST_ERROR_FOREIGN_POSITION,
    }
}

fn boxed_cursor(position: Position<*mut c_void>) -> *mut CCursor {
    Box::into_raw(Box::new(CCursor { position }))
}

/// 创建一个新的C语言接口可用的链表实例
///
/// 返回值:
/// - 指向CList实例的裸指针，使用完毕后必须通过[list_free]释放
#[unsafe(no_mangle)]
pub extern "C" fn list_new() -> *mut CList {
    Box::into_raw(Box::new(CList { inner: List::new() }))
}

/// 释放由[list_new]创建的链表实例
///
/// 链表中保存的数据指针不会被释放，由调用方自行管理。
/// 释放后，由该链表得到的所有游标都不能再用于它。
///
/// # Safety
/// `list` 必须为空指针或由[list_new]返回且尚未释放
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_free(list: *mut CList) {
    if !list.is_null() {
        unsafe {
            drop(Box::from_raw(list));
        }
    }
}

/// 检查链表是否为空
///
/// 返回值:
/// - 输入指针为空时返回`LIST_ERROR_NULL_PTR`
/// - 否则返回1表示空，0表示非空
///
/// # Safety
/// `list` 必须为空指针或指向有效的CList
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_is_empty(list: *const CList) -> c_int {
    match unsafe { list.as_ref() } {
        Some(list) => list.inner.is_empty() as c_int,
        None => LIST_ERROR_NULL_PTR,
    }
}

/// 在链表头部插入一个数据指针
///
/// # Safety
/// `list` 必须为空指针或指向有效的CList
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_push_front(list: *mut CList, data: *mut c_void) -> c_int {
    let Some(list) = (unsafe { list.as_mut() }) else {
        return LIST_ERROR_NULL_PTR;
    };
    list.inner.push_front(data);
    LIST_SUCCESS
}

/// 在链表尾部插入一个数据指针
///
/// # Safety
/// `list` 必须为空指针或指向有效的CList
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_push_back(list: *mut CList, data: *mut c_void) -> c_int {
    let Some(list) = (unsafe { list.as_mut() }) else {
        return LIST_ERROR_NULL_PTR;
    };
    list.inner.push_back(data);
    LIST_SUCCESS
}

/// 读取第一个元素
///
/// 参数:
/// - `list`: 链表
/// - `out`: 成功时写入第一个元素的数据指针
///
/// 返回值:
/// - `LIST_SUCCESS`，或链表为空时返回`LIST_ERROR_EMPTY`，
///   任一指针为空时返回`LIST_ERROR_NULL_PTR`
///
/// # Safety
/// `list` 必须为空指针或指向有效的CList，`out` 必须为空指针或可写
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_front(list: *const CList, out: *mut *mut c_void) -> c_int {
    let Some(list) = (unsafe { list.as_ref() }) else {
        return LIST_ERROR_NULL_PTR;
    };
    if out.is_null() {
        return LIST_ERROR_NULL_PTR;
    }
    match list.inner.front() {
        Ok(data) => {
            unsafe {
                *out = *data;
            }
            LIST_SUCCESS
        }
        Err(e) => error_code(e),
    }
}

/// 读取最后一个元素，参数与返回值同[list_front]
///
/// # Safety
/// 同[list_front]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_back(list: *const CList, out: *mut *mut c_void) -> c_int {
    let Some(list) = (unsafe { list.as_ref() }) else {
        return LIST_ERROR_NULL_PTR;
    };
    if out.is_null() {
        return LIST_ERROR_NULL_PTR;
    }
    match list.inner.back() {
        Ok(data) => {
            unsafe {
                *out = *data;
            }
            LIST_SUCCESS
        }
        Err(e) => error_code(e),
    }
}

/// 获取指向第一个元素的游标（空链表时指向哨兵）
///
/// 返回值:
/// - 输入指针为空时返回空指针，否则返回新分配的游标，需通过[cursor_free]释放
///
/// # Safety
/// `list` 必须为空指针或指向有效的CList
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_begin(list: *const CList) -> *mut CCursor {
    match unsafe { list.as_ref() } {
        Some(list) => boxed_cursor(list.inner.begin().position()),
        None => ptr::null_mut(),
    }
}

/// 获取指向**最后一个**元素的游标（空链表时指向哨兵），其余同[list_begin]
///
/// # Safety
/// 同[list_begin]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_end(list: *const CList) -> *mut CCursor {
    match unsafe { list.as_ref() } {
        Some(list) => boxed_cursor(list.inner.end().position()),
        None => ptr::null_mut(),
    }
}

/// 获取指向哨兵的游标，用于判断遍历是否绕回，其余同[list_begin]
///
/// # Safety
/// 同[list_begin]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_sentinel(list: *const CList) -> *mut CCursor {
    match unsafe { list.as_ref() } {
        Some(list) => boxed_cursor(list.inner.sentinel_position()),
        None => ptr::null_mut(),
    }
}

/// 在游标`at`之前插入一个数据指针
///
/// 参数:
/// - `list`: 链表
/// - `at`: 插入点，可以是哨兵游标（即插入到尾部）
/// - `data`: 要插入的数据指针
/// - `out`: 可为空；非空时写入指向新元素的游标，需通过[cursor_free]释放
///
/// 返回值:
/// - `LIST_SUCCESS`；`at`来自其他链表时返回`LIST_ERROR_FOREIGN_POSITION`
///
/// # Safety
/// `list`、`at` 必须为空指针或指向有效对象，`out` 必须为空指针或可写
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_insert(
    list: *mut CList,
    at: *const CCursor,
    data: *mut c_void,
    out: *mut *mut CCursor,
) -> c_int {
    let (Some(list), Some(at)) = (unsafe { list.as_mut() }, unsafe { at.as_ref() }) else {
        return LIST_ERROR_NULL_PTR;
    };
    match list.inner.insert(at.position, data) {
        Ok(cursor) => {
            if !out.is_null() {
                unsafe {
                    *out = boxed_cursor(cursor.position());
                }
            }
            LIST_SUCCESS
        }
        Err(e) => error_code(e),
    }
}

/// 把游标移到后继节点，经过最后一个元素后会停在哨兵上
///
/// # Safety
/// `list`、`cursor` 必须为空指针或指向有效对象
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cursor_next(list: *const CList, cursor: *mut CCursor) -> c_int {
    let (Some(list), Some(cursor)) = (unsafe { list.as_ref() }, unsafe { cursor.as_mut() }) else {
        return LIST_ERROR_NULL_PTR;
    };
    match list.inner.cursor_at(cursor.position) {
        Ok(mut it) => {
            it.move_next();
            cursor.position = it.position();
            LIST_SUCCESS
        }
        Err(e) => error_code(e),
    }
}

/// 把游标移到前驱节点，规则同[cursor_next]
///
/// # Safety
/// 同[cursor_next]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cursor_prev(list: *const CList, cursor: *mut CCursor) -> c_int {
    let (Some(list), Some(cursor)) = (unsafe { list.as_ref() }, unsafe { cursor.as_mut() }) else {
        return LIST_ERROR_NULL_PTR;
    };
    match list.inner.cursor_at(cursor.position) {
        Ok(mut it) => {
            it.move_prev();
            cursor.position = it.position();
            LIST_SUCCESS
        }
        Err(e) => error_code(e),
    }
}

/// 读取游标处的数据指针
///
/// 返回值:
/// - 任一指针为空、游标不属于该链表或游标停在哨兵上时返回空指针
///
/// # Safety
/// 同[cursor_next]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cursor_get(list: *const CList, cursor: *const CCursor) -> *mut c_void {
    let (Some(list), Some(cursor)) = (unsafe { list.as_ref() }, unsafe { cursor.as_ref() }) else {
        return ptr::null_mut();
    };
    list.inner
        .cursor_at(cursor.position)
        .ok()
        .and_then(|it| it.get().copied())
        .unwrap_or(ptr::null_mut())
}

/// 比较两个游标是否指向同一节点
///
/// 返回值:
/// - 1表示相同，0表示不同，任一指针为空时返回`LIST_ERROR_NULL_PTR`
///
/// # Safety
/// `a`、`b` 必须为空指针或指向有效的CCursor
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cursor_equal(a: *const CCursor, b: *const CCursor) -> c_int {
    match (unsafe { a.as_ref() }, unsafe { b.as_ref() }) {
        (Some(a), Some(b)) => (a.position == b.position) as c_int,
        _ => LIST_ERROR_NULL_PTR,
    }
}

/// 释放游标
///
/// # Safety
/// `cursor` 必须为空指针或由本模块返回且尚未释放
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cursor_free(cursor: *mut CCursor) {
    if !cursor.is_null() {
        unsafe {
            drop(Box::from_raw(cursor));
        }
    }
}
