//! Error types
//!
//! 错误类型

use std::io;
use thiserror::Error;

/// Errors returned by [`Fifo`](crate::fifo::Fifo) construction and operations
///
/// [`Fifo`](crate::fifo::Fifo) 构造与操作返回的错误
///
/// Every failing call leaves the engine exactly as it was before the call.
///
/// 任何失败的调用都不会修改引擎状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FifoError {
    /// A single record is larger than the whole arena
    ///
    /// 单条记录大于整个缓冲区
    #[error("record of {len} bytes exceeds fifo capacity of {capacity} bytes")]
    CapacityExceeded { len: usize, capacity: usize },

    /// No live records to remove
    ///
    /// 没有可移除的记录
    #[error("fifo is empty")]
    EmptyQueue,

    /// Capacity is zero or not a power of two
    ///
    /// 容量为 0 或不是 2 的幂次
    #[error("capacity {capacity} is not a non-zero power of two")]
    InvalidCapacity { capacity: usize },

    /// Zero-length records are not stored
    ///
    /// 不存储零长度记录
    #[error("cannot insert an empty record")]
    EmptyRecord,

    /// Destination buffer cannot hold the oldest record
    ///
    /// 目标缓冲区无法容纳最旧的记录
    #[error("buffer of {available} bytes cannot hold record of {needed} bytes")]
    BufferTooSmall { needed: usize, available: usize },
}

/// Errors returned by [`TlvBox`](crate::tlv::TlvBox)
///
/// [`TlvBox`](crate::tlv::TlvBox) 返回的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TlvError {
    /// Fields can no longer be added
    ///
    /// 已无法再添加字段
    #[error("tlv box is already serialized")]
    AlreadySerialized,

    /// A nested box must be encoded before it is embedded
    ///
    /// 嵌套编码盒必须先序列化
    #[error("tlv box has not been serialized")]
    NotSerialized,

    /// Header or value runs past the end of the input
    ///
    /// 头部或值超出输入末尾
    #[error("truncated tlv field at offset {offset}")]
    Truncated { offset: usize },

    /// Value length does not fit in 32 bits
    ///
    /// 值长度超出 32 位
    #[error("value of {len} bytes does not fit a tlv length field")]
    ValueTooLarge { len: usize },

    /// No field carries the tag
    ///
    /// 没有字段带有该标签
    #[error("no field with tag {tag}")]
    MissingTag { tag: i32 },

    /// Stored width differs from the requested scalar's
    ///
    /// 存储宽度与请求的标量宽度不同
    #[error("field {tag} holds {found} bytes, expected {expected}")]
    LengthMismatch {
        tag: i32,
        expected: usize,
        found: usize,
    },

    /// Destination buffer cannot hold the field value
    ///
    /// 目标缓冲区无法容纳字段值
    #[error("buffer of {available} bytes cannot hold field of {needed} bytes")]
    BufferTooSmall { needed: usize, available: usize },

    /// Missing NUL terminator or invalid UTF-8
    ///
    /// 缺少 NUL 结尾或不是合法 UTF-8
    #[error("field {tag} is not a valid nul-terminated utf-8 string")]
    InvalidString { tag: i32 },

    /// Writer failure while encoding
    ///
    /// 编码时写入失败
    #[error("tlv encoding failed: {0}")]
    Io(io::ErrorKind),
}

impl From<io::Error> for TlvError {
    fn from(err: io::Error) -> Self {
        TlvError::Io(err.kind())
    }
}
