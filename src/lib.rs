//! # Overwrite-When-Full Record Ring Buffer
//!
//! 满时覆盖的记录环形缓冲区
//!
//! `recring` stores variable-length byte records in a fixed, power-of-2 sized
//! arena. When a new record does not fit, whole old records are discarded to
//! make room, so the newest data always wins.
//!
//! `recring` 在固定的 2 的幂次大小缓冲区中存储变长字节记录。
//! 新记录放不下时按整条记录丢弃旧数据，保证最新数据总能写入。
//!
//! ## Features
//!
//! 特性
//!
//! - **Record boundaries** - Each record comes back exactly as it was inserted
//! - **Automatic eviction** - Inserting into a full fifo drops whole records, never partial ones
//! - **Both ends** - Records can be queued as the newest or as the oldest
//! - **Two-copy wrap-around** - Every copy is at most two linear `memcpy`s
//! - **TLV encoding** - A small tag-length-value box for structured records
//!
//! - **记录边界** - 每条记录按插入时的样子原样取回
//! - **自动淘汰** - 向满 fifo 插入时丢弃整条记录，从不拆分
//! - **双端插入** - 记录可作为最新或最旧的记录入队
//! - **两段式环绕拷贝** - 每次拷贝最多两次线性 `memcpy`
//! - **TLV 编码** - 用于结构化记录的标签-长度-值编码盒
//!
//! ## Quick Start
//!
//! 快速开始
//!
//! ```rust
//! use recring::Fifo;
//!
//! // Capacity must be a power of 2
//! // 容量必须是 2 的幂次
//! let mut fifo = Fifo::new(16).unwrap();
//!
//! fifo.insert_back(b"hello").unwrap();
//! fifo.insert_back(b"world").unwrap();
//!
//! assert_eq!(fifo.remove_oldest().unwrap(), b"hello");
//! assert_eq!(fifo.remove_oldest().unwrap(), b"world");
//! assert!(fifo.remove_oldest().is_err());
//! ```
//!
//! ## Eviction
//!
//! 淘汰
//!
//! ```rust
//! use recring::Fifo;
//!
//! let mut fifo = Fifo::new(16).unwrap();
//! fifo.insert_back(b"aaaaaa").unwrap();
//! fifo.insert_back(b"bbbbbb").unwrap();
//!
//! // 6 bytes needed, 4 free: the oldest record is dropped
//! // 需要 6 字节，剩余 4 字节：丢弃最旧的记录
//! fifo.insert_back(b"cccccc").unwrap();
//! assert_eq!(fifo.live_record_count(), 2);
//! assert_eq!(fifo.remove_oldest().unwrap(), b"bbbbbb");
//!
//! // Front insertion drops from the newest end instead
//! // 头部插入则从最新端丢弃
//! fifo.insert_back(b"dddddddd").unwrap();
//! fifo.insert_front(b"zzzzzzzzzz").unwrap();
//! assert_eq!(fifo.remove_oldest().unwrap(), b"zzzzzzzzzz");
//! assert_eq!(fifo.remove_oldest().unwrap(), b"cccccc");
//! assert!(fifo.is_empty());
//! ```
//!
//! ## Configuration
//!
//! 配置
//!
//! ```rust
//! use recring::{Fifo, FifoConfig};
//!
//! // Caller-supplied arena
//! // 调用者提供的缓冲区
//! let fifo = Fifo::with_arena(vec![0u8; 1024]).unwrap();
//! assert_eq!(fifo.capacity(), 1024);
//!
//! // Round arbitrary sizes up to a power of 2
//! // 将任意大小向上取整到 2 的幂次
//! let fifo = FifoConfig::new(1000).round_up(true).build().unwrap();
//! assert_eq!(fifo.capacity(), 1024);
//! ```
//!
//! ## Logging
//!
//! 日志
//!
//! Evictions are reported through `tracing` at `debug` level, rejected
//! oversized records at `warn`. The crate installs no subscriber.
//!
//! 淘汰通过 `tracing` 以 `debug` 级别输出，过大记录被拒绝时以 `warn` 级别输出。
//! 本库不安装任何 subscriber。
//!
//! ## Notes
//!
//! 注意事项
//!
//! - Capacity must be a non-zero power of 2 unless rounded by [`FifoConfig`]
//! - Not thread-safe: a `Fifo` can move between threads but is used by one at a time
//! - Zero-length records are rejected
//!
//! - 容量必须是非零的 2 的幂次，除非通过 [`FifoConfig`] 取整
//! - 非线程安全：`Fifo` 可以在线程间移动，但同一时间只能由一个线程使用
//! - 拒绝零长度记录

pub mod config;
pub mod error;
pub mod fifo;
pub mod ledger;
pub mod tlv;
mod core;

#[cfg(test)]
mod tests;

pub use config::FifoConfig;
pub use error::{FifoError, TlvError};
pub use fifo::{Drain, Fifo};
pub use ledger::RecordDescriptor;
pub use tlv::{TlvBox, TlvScalar};
