//! Ring store - byte arena with logical cursors and wrap-aware copies
//!
//! 环形存储 - 带逻辑游标和环绕拷贝的字节缓冲区
//!
//! This module holds the raw bytes of the fifo:
//! - Power-of-2 arena with index masking
//! - Monotonic (wrapping) read and write cursors
//! - Slice copy helpers split into at most two linear copies
//!
//! 此模块保存 fifo 的原始字节：
//! - 2 的幂次容量与索引掩码
//! - 单调（回绕运算）的读写游标
//! - 最多拆分为两次线性拷贝的切片拷贝辅助

/// Byte ring storage
///
/// 字节环形存储
///
/// Cursors are logical positions that are never reduced modulo the capacity.
/// They move with wrapping arithmetic so that `write_cursor - read_cursor`
/// is always the number of live bytes, even after the read cursor is moved
/// below zero by a front write.
///
/// 游标是从不取模的逻辑位置，使用回绕运算移动，
/// 因此 `write_cursor - read_cursor` 总是等于有效字节数。
pub struct RingStore {
    /// Byte arena, length is a power of 2
    ///
    /// 字节缓冲区，长度为 2 的幂次
    bytes: Box<[u8]>,

    /// Mask for fast modulo operation (capacity - 1)
    ///
    /// 快速取模运算的掩码（capacity - 1）
    mask: usize,

    /// Position of the next byte written at the back
    ///
    /// 下一个尾部写入字节的位置
    write_cursor: usize,

    /// Position of the oldest live byte
    ///
    /// 最旧有效字节的位置
    read_cursor: usize,
}

impl RingStore {
    /// Wrap an arena into a store
    ///
    /// 将缓冲区包装为环形存储
    ///
    /// The caller has already checked that `bytes.len()` is a non-zero power of 2.
    ///
    /// 调用者已确认 `bytes.len()` 是非零的 2 的幂次。
    pub fn from_arena(bytes: Box<[u8]>) -> Self {
        debug_assert!(is_power_of_two(bytes.len()));
        let mask = bytes.len() - 1;

        Self {
            bytes,
            mask,
            write_cursor: 0,
            read_cursor: 0,
        }
    }

    /// Allocate a zeroed arena of `capacity` bytes
    ///
    /// 分配 `capacity` 字节的清零缓冲区
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_arena(vec![0u8; capacity].into_boxed_slice())
    }

    /// Give the arena back, dropping cursor state
    ///
    /// 交还缓冲区，丢弃游标状态
    pub fn into_arena(self) -> Box<[u8]> {
        self.bytes
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    #[inline]
    pub fn read_cursor(&self) -> usize {
        self.read_cursor
    }

    /// Map a logical position into the arena
    ///
    /// 将逻辑位置映射到缓冲区索引
    #[inline]
    pub fn wrap(&self, position: usize) -> usize {
        position & self.mask
    }

    /// Number of live bytes between the cursors
    ///
    /// 游标之间的有效字节数
    #[inline]
    pub fn live_bytes(&self) -> usize {
        self.write_cursor.wrapping_sub(self.read_cursor)
    }

    #[inline]
    pub fn free_bytes(&self) -> usize {
        self.capacity() - self.live_bytes()
    }

    /// Append bytes after the newest live byte
    ///
    /// 在最新有效字节之后追加数据
    ///
    /// Caller must ensure `src.len() <= free_bytes()`.
    ///
    /// 调用者必须确保 `src.len() <= free_bytes()`。
    pub fn write_at_back(&mut self, src: &[u8]) {
        debug_assert!(src.len() <= self.free_bytes());
        self.copy_from_slice(self.write_cursor, src);
        self.write_cursor = self.write_cursor.wrapping_add(src.len());
    }

    /// Prepend bytes before the oldest live byte
    ///
    /// 在最旧有效字节之前插入数据
    ///
    /// The read cursor is moved back first and the copy starts there.
    /// Caller must ensure `src.len() <= free_bytes()`.
    ///
    /// 先回退读游标，再从新位置开始拷贝。
    /// 调用者必须确保 `src.len() <= free_bytes()`。
    pub fn write_at_front(&mut self, src: &[u8]) {
        debug_assert!(src.len() <= self.free_bytes());
        self.read_cursor = self.read_cursor.wrapping_sub(src.len());
        self.copy_from_slice(self.read_cursor, src);
    }

    /// Copy `dest.len()` bytes out of the front and consume them
    ///
    /// 从头部拷贝 `dest.len()` 字节并消费
    ///
    /// Caller must ensure `dest.len() <= live_bytes()`.
    ///
    /// 调用者必须确保 `dest.len() <= live_bytes()`。
    pub fn read_from_front(&mut self, dest: &mut [u8]) {
        self.peek_front(dest);
        self.read_cursor = self.read_cursor.wrapping_add(dest.len());
    }

    /// Copy `dest.len()` bytes out of the front without consuming them
    ///
    /// 从头部拷贝 `dest.len()` 字节但不消费
    pub fn peek_front(&self, dest: &mut [u8]) {
        debug_assert!(dest.len() <= self.live_bytes());
        self.copy_to_slice(self.read_cursor, dest);
    }

    /// Drop `len` bytes from the front without copying
    ///
    /// 丢弃头部 `len` 字节（不拷贝）
    pub fn discard_front(&mut self, len: usize) {
        debug_assert!(len <= self.live_bytes());
        self.read_cursor = self.read_cursor.wrapping_add(len);
    }

    /// Drop `len` bytes from the back without copying
    ///
    /// 丢弃尾部 `len` 字节（不拷贝）
    pub fn discard_back(&mut self, len: usize) {
        debug_assert!(len <= self.live_bytes());
        self.write_cursor = self.write_cursor.wrapping_sub(len);
    }

    /// Forget all live bytes
    ///
    /// 清空所有有效字节
    pub fn reset(&mut self) {
        self.read_cursor = self.write_cursor;
    }

    /// Copy a slice into the arena starting at a logical position
    ///
    /// 从逻辑位置开始将切片拷贝到缓冲区
    ///
    /// Handles wrap-around automatically by splitting into two copies if necessary.
    ///
    /// 自动处理环绕，必要时分成两次拷贝。
    pub fn copy_from_slice(&mut self, start: usize, src: &[u8]) {
        if src.is_empty() {
            return;
        }

        let start_index = self.wrap(start);
        let first_part = src.len().min(self.capacity() - start_index);
        let (head, tail) = src.split_at(first_part);

        // First part runs from start_index towards the end of the arena
        // 第一部分从 start_index 到缓冲区末尾
        self.bytes[start_index..start_index + first_part].copy_from_slice(head);

        // Remainder wraps to the beginning
        // 剩余部分回绕到缓冲区开头
        if !tail.is_empty() {
            self.bytes[..tail.len()].copy_from_slice(tail);
        }
    }

    /// Copy bytes out of the arena starting at a logical position
    ///
    /// 从逻辑位置开始将缓冲区数据拷贝到切片
    ///
    /// Handles wrap-around automatically by splitting into two copies if necessary.
    ///
    /// 自动处理环绕，必要时分成两次拷贝。
    pub fn copy_to_slice(&self, start: usize, dest: &mut [u8]) {
        if dest.is_empty() {
            return;
        }

        let start_index = self.wrap(start);
        let first_part = dest.len().min(self.capacity() - start_index);
        let (head, tail) = dest.split_at_mut(first_part);

        head.copy_from_slice(&self.bytes[start_index..start_index + first_part]);
        if !tail.is_empty() {
            let second_part = tail.len();
            tail.copy_from_slice(&self.bytes[..second_part]);
        }
    }
}

impl std::fmt::Debug for RingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingStore")
            .field("capacity", &self.capacity())
            .field("write_cursor", &self.write_cursor)
            .field("read_cursor", &self.read_cursor)
            .field("live_bytes", &self.live_bytes())
            .finish()
    }
}

/// Check for a non-zero power of 2
///
/// 检查是否为非零的 2 的幂次
#[inline]
pub fn is_power_of_two(capacity: usize) -> bool {
    capacity != 0 && capacity & (capacity - 1) == 0
}

/// Round up a capacity to the next power of 2
///
/// 将容量向上取整到下一个 2 的幂次
///
/// # Returns
/// The smallest power of 2 that is >= capacity, or `None` for zero or on overflow
///
/// # 返回值
/// >= capacity 的最小 2 的幂次；容量为 0 或溢出时返回 `None`
#[inline]
pub fn round_to_power_of_two(capacity: usize) -> Option<usize> {
    if capacity == 0 {
        None
    } else {
        capacity.checked_next_power_of_two()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_power_of_two() {
        assert_eq!(round_to_power_of_two(0), None);
        assert_eq!(round_to_power_of_two(1), Some(1));
        assert_eq!(round_to_power_of_two(2), Some(2));
        assert_eq!(round_to_power_of_two(3), Some(4));
        assert_eq!(round_to_power_of_two(5), Some(8));
        assert_eq!(round_to_power_of_two(8), Some(8));
        assert_eq!(round_to_power_of_two(9), Some(16));
        assert_eq!(round_to_power_of_two(usize::MAX), None);
    }

    #[test]
    fn test_is_power_of_two() {
        assert!(!is_power_of_two(0));
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(16));
        assert!(!is_power_of_two(24));
    }

    #[test]
    fn test_store_basic() {
        let store = RingStore::with_capacity(8);
        assert_eq!(store.capacity(), 8);
        assert_eq!(store.live_bytes(), 0);
        assert_eq!(store.free_bytes(), 8);
        assert_eq!(store.wrap(13), 5);
    }

    #[test]
    fn test_write_read_no_wrap() {
        let mut store = RingStore::with_capacity(8);
        store.write_at_back(b"abcd");
        assert_eq!(store.live_bytes(), 4);

        let mut dest = [0u8; 4];
        store.read_from_front(&mut dest);
        assert_eq!(&dest, b"abcd");
        assert_eq!(store.live_bytes(), 0);
        assert_eq!(store.read_cursor(), 4);
    }

    #[test]
    fn test_write_read_with_wrap() {
        let mut store = RingStore::with_capacity(4);
        store.write_at_back(b"xyz");
        store.discard_front(3);

        // Starts at index 3 and wraps around
        store.write_at_back(b"123");
        assert_eq!(store.into_arena().as_ref(), b"23z1");
    }

    #[test]
    fn test_wrapped_read_matches_write() {
        let mut store = RingStore::with_capacity(4);
        store.write_at_back(b"xyz");
        store.discard_front(3);
        store.write_at_back(b"123");

        let mut dest = [0u8; 3];
        store.read_from_front(&mut dest);
        assert_eq!(&dest, b"123");
    }

    #[test]
    fn test_write_at_front_from_empty() {
        let mut store = RingStore::with_capacity(8);
        store.write_at_front(b"ab");

        // Read cursor moved below zero, bytes land at the end of the arena
        assert_eq!(store.read_cursor(), 0usize.wrapping_sub(2));
        assert_eq!(store.wrap(store.read_cursor()), 6);
        assert_eq!(store.live_bytes(), 2);

        let mut dest = [0u8; 2];
        store.peek_front(&mut dest);
        assert_eq!(&dest, b"ab");
    }

    #[test]
    fn test_front_and_back_interleave() {
        let mut store = RingStore::with_capacity(8);
        store.write_at_back(b"cd");
        store.write_at_front(b"ab");
        store.write_at_back(b"ef");

        let mut dest = [0u8; 6];
        store.read_from_front(&mut dest);
        assert_eq!(&dest, b"abcdef");
    }

    #[test]
    fn test_discard_back() {
        let mut store = RingStore::with_capacity(8);
        store.write_at_back(b"abcdef");
        store.discard_back(2);
        assert_eq!(store.live_bytes(), 4);
        store.write_at_back(b"XY");

        let mut dest = [0u8; 6];
        store.read_from_front(&mut dest);
        assert_eq!(&dest, b"abcdXY");
    }

    #[test]
    fn test_reset() {
        let mut store = RingStore::with_capacity(8);
        store.write_at_back(b"abc");
        store.reset();
        assert_eq!(store.live_bytes(), 0);
        assert_eq!(store.free_bytes(), 8);
    }
}
