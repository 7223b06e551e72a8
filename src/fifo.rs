//! Overwrite-when-full record fifo
//!
//! 满时覆盖的记录 fifo
//!
//! This module composes the byte [`RingStore`] with the [`RecordLedger`]:
//! - Variable-length records stored back to back in a power-of-2 arena
//! - Insertion at either end of the queue
//! - Whole-record eviction when a new record does not fit
//!
//! 本模块组合字节环形存储与记录账本：
//! - 变长记录在 2 的幂次缓冲区中连续存放
//! - 支持在队列两端插入
//! - 新记录放不下时按整条记录淘汰

use crate::core::{RingStore, is_power_of_two};
use crate::error::FifoError;
use crate::ledger::{RecordDescriptor, RecordLedger};
use tracing::{debug, trace, warn};

/// Fixed-capacity fifo of byte records
///
/// 固定容量的字节记录 fifo
///
/// # Behavior
///
/// - [`insert_back`](Fifo::insert_back) evicts the **oldest** records until the new one fits
/// - [`insert_front`](Fifo::insert_front) evicts the **newest** records until the new one fits
/// - Records are never split: eviction may free more bytes than strictly needed
///
/// # 行为
///
/// - [`insert_back`](Fifo::insert_back) 淘汰**最旧**的记录直到新记录放得下
/// - [`insert_front`](Fifo::insert_front) 淘汰**最新**的记录直到新记录放得下
/// - 记录从不被拆分：淘汰释放的字节可能多于所需
///
/// # Examples
///
/// ```
/// use recring::Fifo;
///
/// let mut fifo = Fifo::new(16).unwrap();
/// fifo.insert_back(b"ABCDEFGH").unwrap();
/// fifo.insert_back(b"IJKLMNOP").unwrap();
/// assert_eq!(fifo.free_bytes(), 0);
///
/// // Full: the oldest record makes room
/// fifo.insert_back(b"Q").unwrap();
/// assert_eq!(fifo.remove_oldest().unwrap(), b"IJKLMNOP");
/// assert_eq!(fifo.remove_oldest().unwrap(), b"Q");
/// ```
#[derive(Debug)]
pub struct Fifo {
    store: RingStore,
    ledger: RecordLedger,
}

impl Fifo {
    /// Create a fifo with an internally allocated arena
    ///
    /// 创建使用内部分配缓冲区的 fifo
    ///
    /// # Errors
    ///
    /// Returns [`FifoError::InvalidCapacity`] unless `capacity` is a non-zero power of 2.
    ///
    /// 若 `capacity` 不是非零的 2 的幂次，返回 [`FifoError::InvalidCapacity`]。
    pub fn new(capacity: usize) -> Result<Self, FifoError> {
        if !is_power_of_two(capacity) {
            return Err(FifoError::InvalidCapacity { capacity });
        }

        Ok(Self {
            store: RingStore::with_capacity(capacity),
            ledger: RecordLedger::new(),
        })
    }

    /// Create a fifo on top of caller-supplied memory
    ///
    /// 在调用者提供的内存上创建 fifo
    ///
    /// The arena's length becomes the capacity. Existing contents are ignored.
    ///
    /// 缓冲区长度即容量，原有内容被忽略。
    ///
    /// # Examples
    ///
    /// ```
    /// use recring::{Fifo, FifoError};
    ///
    /// let fifo = Fifo::with_arena(vec![0u8; 64]).unwrap();
    /// assert_eq!(fifo.capacity(), 64);
    ///
    /// let err = Fifo::with_arena(vec![0u8; 60]).unwrap_err();
    /// assert_eq!(err, FifoError::InvalidCapacity { capacity: 60 });
    /// ```
    pub fn with_arena(arena: impl Into<Box<[u8]>>) -> Result<Self, FifoError> {
        let arena = arena.into();
        if !is_power_of_two(arena.len()) {
            return Err(FifoError::InvalidCapacity {
                capacity: arena.len(),
            });
        }

        Ok(Self {
            store: RingStore::from_arena(arena),
            ledger: RecordLedger::new(),
        })
    }

    /// Tear the fifo down and hand the arena back
    ///
    /// 销毁 fifo 并交还缓冲区
    pub fn into_arena(self) -> Box<[u8]> {
        self.store.into_arena()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Bytes held by live records
    ///
    /// 有效记录占用的字节数
    #[inline]
    pub fn live_bytes(&self) -> usize {
        self.store.live_bytes()
    }

    #[inline]
    pub fn free_bytes(&self) -> usize {
        self.store.free_bytes()
    }

    #[inline]
    pub fn live_record_count(&self) -> usize {
        self.ledger.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Iterate record descriptors from oldest to newest
    ///
    /// 从旧到新遍历记录描述符
    pub fn records(&self) -> impl DoubleEndedIterator<Item = &RecordDescriptor> + ExactSizeIterator {
        self.ledger.iter()
    }

    /// Ledger and byte cursors must agree on the live byte count
    #[inline]
    fn debug_check_totals(&self) {
        debug_assert_eq!(self.ledger.total_len(), self.store.live_bytes());
    }

    fn check_insert(&self, len: usize) -> Result<(), FifoError> {
        if len == 0 {
            return Err(FifoError::EmptyRecord);
        }
        if len > self.capacity() {
            warn!(len, capacity = self.capacity(), "record larger than fifo rejected");
            return Err(FifoError::CapacityExceeded {
                len,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// Append a record as the newest, evicting the oldest records if needed
    ///
    /// 追加一条最新记录，必要时淘汰最旧的记录
    ///
    /// # Returns
    ///
    /// Number of bytes written, always `data.len()`
    ///
    /// # Errors
    ///
    /// - [`FifoError::EmptyRecord`] if `data` is empty
    /// - [`FifoError::CapacityExceeded`] if `data` is larger than the arena
    ///
    /// No state changes on error.
    ///
    /// 出错时状态不变。
    pub fn insert_back(&mut self, data: &[u8]) -> Result<usize, FifoError> {
        self.check_insert(data.len())?;

        while data.len() > self.store.free_bytes() {
            // An empty ledger means an empty store, which always fits the record
            let Some(evicted) = self.ledger.remove_oldest() else {
                break;
            };
            debug_assert_eq!(evicted.offset, self.store.read_cursor());
            self.store.discard_front(evicted.length);
            debug!(
                offset = evicted.offset,
                length = evicted.length,
                "evicted oldest record"
            );
        }

        let offset = self.store.write_cursor();
        self.store.write_at_back(data);
        self.ledger.append_back(offset, data.len());
        self.debug_check_totals();
        trace!(offset, length = data.len(), "inserted record at back");

        Ok(data.len())
    }

    /// Prepend a record as the oldest, evicting the newest records if needed
    ///
    /// 插入一条最旧记录，必要时淘汰最新的记录
    ///
    /// Eviction runs from the newest end so the records just ahead of the
    /// new one in read order are the ones kept.
    ///
    /// 淘汰从最新端开始，读取顺序上紧随新记录的记录得以保留。
    ///
    /// # Examples
    ///
    /// ```
    /// use recring::Fifo;
    ///
    /// let mut fifo = Fifo::new(8).unwrap();
    /// fifo.insert_back(b"aaaa").unwrap();
    /// fifo.insert_back(b"bbbb").unwrap();
    ///
    /// fifo.insert_front(b"zz").unwrap();
    /// assert_eq!(fifo.remove_oldest().unwrap(), b"zz");
    /// assert_eq!(fifo.remove_oldest().unwrap(), b"aaaa");
    /// assert!(fifo.is_empty());
    /// ```
    pub fn insert_front(&mut self, data: &[u8]) -> Result<usize, FifoError> {
        self.check_insert(data.len())?;

        while data.len() > self.store.free_bytes() {
            let Some(evicted) = self.ledger.remove_newest() else {
                break;
            };
            debug_assert_eq!(evicted.end(), self.store.write_cursor());
            self.store.discard_back(evicted.length);
            debug!(
                offset = evicted.offset,
                length = evicted.length,
                "evicted newest record"
            );
        }

        self.store.write_at_front(data);
        let offset = self.store.read_cursor();
        self.ledger.append_front(offset, data.len());
        self.debug_check_totals();
        trace!(offset, length = data.len(), "inserted record at front");

        Ok(data.len())
    }

    /// Remove the oldest record and return its payload
    ///
    /// 移除最旧记录并返回其负载
    ///
    /// # Errors
    ///
    /// Returns [`FifoError::EmptyQueue`] if there are no records.
    ///
    /// 如果没有记录则返回 [`FifoError::EmptyQueue`]。
    pub fn remove_oldest(&mut self) -> Result<Vec<u8>, FifoError> {
        let record = self.ledger.remove_oldest().ok_or(FifoError::EmptyQueue)?;
        debug_assert_eq!(record.offset, self.store.read_cursor());

        let mut payload = vec![0u8; record.length];
        self.store.read_from_front(&mut payload);
        self.debug_check_totals();
        trace!(offset = record.offset, length = record.length, "removed oldest record");

        Ok(payload)
    }

    /// Remove the oldest record into a caller buffer
    ///
    /// 将最旧记录移除到调用者缓冲区
    ///
    /// # Returns
    ///
    /// Length of the record; only `dest[..len]` is written
    ///
    /// # Errors
    ///
    /// - [`FifoError::EmptyQueue`] if there are no records
    /// - [`FifoError::BufferTooSmall`] if `dest` is shorter than the record, which stays queued
    pub fn remove_oldest_into(&mut self, dest: &mut [u8]) -> Result<usize, FifoError> {
        let record = self.ledger.remove_oldest().ok_or(FifoError::EmptyQueue)?;
        if record.length > dest.len() {
            self.ledger.append_front(record.offset, record.length);
            return Err(FifoError::BufferTooSmall {
                needed: record.length,
                available: dest.len(),
            });
        }

        debug_assert_eq!(record.offset, self.store.read_cursor());
        self.store.read_from_front(&mut dest[..record.length]);
        self.debug_check_totals();
        trace!(offset = record.offset, length = record.length, "removed oldest record");

        Ok(record.length)
    }

    /// Copy of the oldest record, left in place
    ///
    /// 最旧记录的拷贝，记录保留在 fifo 中
    pub fn peek_oldest(&self) -> Option<Vec<u8>> {
        let record = self.ledger.peek_oldest()?;
        let mut payload = vec![0u8; record.length];
        self.store.peek_front(&mut payload);
        Some(payload)
    }

    #[inline]
    pub fn oldest_len(&self) -> Option<usize> {
        self.ledger.peek_oldest().map(|record| record.length)
    }

    /// Drop every record
    ///
    /// 丢弃所有记录
    pub fn clear(&mut self) {
        self.ledger.clear();
        self.store.reset();
    }

    /// Create a draining iterator over records, oldest first
    ///
    /// 创建按从旧到新顺序消费记录的迭代器
    ///
    /// # Examples
    ///
    /// ```
    /// use recring::Fifo;
    ///
    /// let mut fifo = Fifo::new(32).unwrap();
    /// fifo.insert_back(b"one").unwrap();
    /// fifo.insert_back(b"two").unwrap();
    ///
    /// let records: Vec<Vec<u8>> = fifo.drain().collect();
    /// assert_eq!(records, vec![b"one".to_vec(), b"two".to_vec()]);
    /// assert!(fifo.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { fifo: self }
    }
}

/// Draining iterator for the fifo
///
/// fifo 的消费迭代器
///
/// This iterator removes and returns records until the fifo is empty.
///
/// 此迭代器移除并返回记录，直到 fifo 为空。
pub struct Drain<'a> {
    fifo: &'a mut Fifo,
}

impl Iterator for Drain<'_> {
    type Item = Vec<u8>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.fifo.remove_oldest().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.fifo.live_record_count();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Drain<'_> {}
