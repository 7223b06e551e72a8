//! Record ledger - ordered record boundaries
//!
//! 记录账本 - 有序的记录边界
//!
//! The ledger remembers where each live record starts and how long it is,
//! oldest first. It never touches the bytes themselves.
//!
//! 账本按从旧到新的顺序记录每条有效记录的起始位置与长度，不持有字节数据。

use std::collections::VecDeque;

/// Position and length of one live record
///
/// 单条有效记录的位置与长度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDescriptor {
    /// Logical (unwrapped) start position in the ring
    ///
    /// 环中的逻辑起始位置（未取模）
    pub offset: usize,

    /// Payload length in bytes
    ///
    /// 负载字节长度
    pub length: usize,
}

impl RecordDescriptor {
    #[inline]
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Logical position one past the last byte
    ///
    /// 最后一个字节之后的逻辑位置
    #[inline]
    pub fn end(&self) -> usize {
        self.offset.wrapping_add(self.length)
    }
}

/// Ordered sequence of record descriptors
///
/// 有序的记录描述符序列
#[derive(Debug, Default, Clone)]
pub struct RecordLedger {
    records: VecDeque<RecordDescriptor>,

    /// Sum of all record lengths
    ///
    /// 所有记录长度之和
    total: usize,
}

impl RecordLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record as the newest
    ///
    /// 作为最新记录添加
    pub fn append_back(&mut self, offset: usize, length: usize) {
        self.records.push_back(RecordDescriptor::new(offset, length));
        self.total += length;
    }

    /// Add a record as the oldest
    ///
    /// 作为最旧记录添加
    pub fn append_front(&mut self, offset: usize, length: usize) {
        self.records.push_front(RecordDescriptor::new(offset, length));
        self.total += length;
    }

    pub fn remove_oldest(&mut self) -> Option<RecordDescriptor> {
        let record = self.records.pop_front()?;
        self.total -= record.length;
        Some(record)
    }

    pub fn remove_newest(&mut self) -> Option<RecordDescriptor> {
        let record = self.records.pop_back()?;
        self.total -= record.length;
        Some(record)
    }

    #[inline]
    pub fn peek_oldest(&self) -> Option<&RecordDescriptor> {
        self.records.front()
    }

    #[inline]
    pub fn peek_newest(&self) -> Option<&RecordDescriptor> {
        self.records.back()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn total_len(&self) -> usize {
        self.total
    }

    /// Iterate descriptors from oldest to newest
    ///
    /// 从旧到新遍历描述符
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &RecordDescriptor> + ExactSizeIterator {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.total = 0;
    }
}
