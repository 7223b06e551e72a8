//! Fifo construction options
//!
//! Fifo 构造选项

use crate::core::{is_power_of_two, round_to_power_of_two};
use crate::error::FifoError;
use crate::fifo::Fifo;

/// Builder for [`Fifo`]
///
/// [`Fifo`] 的构建器
///
/// By default the capacity must already be a power of 2. With
/// [`round_up`](FifoConfig::round_up) enabled it is raised to the next power of 2.
///
/// 默认容量必须是 2 的幂次；启用 [`round_up`](FifoConfig::round_up) 后向上取整。
///
/// # Examples
///
/// ```
/// use recring::FifoConfig;
///
/// let fifo = FifoConfig::new(100).round_up(true).build().unwrap();
/// assert_eq!(fifo.capacity(), 128);
///
/// assert!(FifoConfig::new(100).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoConfig {
    capacity: usize,
    round_up: bool,
}

impl FifoConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            round_up: false,
        }
    }

    /// Accept any non-zero capacity and round it up to a power of 2
    ///
    /// 接受任意非零容量并向上取整到 2 的幂次
    pub fn round_up(mut self, round_up: bool) -> Self {
        self.round_up = round_up;
        self
    }

    /// Capacity the built fifo will have
    ///
    /// 构建后 fifo 的实际容量
    pub fn resolved_capacity(&self) -> Result<usize, FifoError> {
        let invalid = FifoError::InvalidCapacity {
            capacity: self.capacity,
        };

        if self.round_up {
            round_to_power_of_two(self.capacity).ok_or(invalid)
        } else if is_power_of_two(self.capacity) {
            Ok(self.capacity)
        } else {
            Err(invalid)
        }
    }

    pub fn build(&self) -> Result<Fifo, FifoError> {
        Fifo::new(self.resolved_capacity()?)
    }
}
