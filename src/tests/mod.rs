//! Comprehensive engine tests
//!
//! 引擎的全面测试


use crate::fifo::Fifo;

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`
///
/// 将 `tracing` 输出交给测试框架，按 `RUST_LOG` 过滤
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Check the ledger against the ring cursors
///
/// 校验账本与环形游标一致
pub(crate) fn assert_consistent(fifo: &Fifo) {
    assert!(fifo.live_bytes() <= fifo.capacity());
    assert_eq!(fifo.free_bytes(), fifo.capacity() - fifo.live_bytes());

    let total: usize = fifo.records().map(|r| r.length).sum();
    assert_eq!(total, fifo.live_bytes(), "ledger does not cover live bytes");

    // Records are back to back, oldest first
    let mut expected = None;
    for record in fifo.records() {
        if let Some(end) = expected {
            assert_eq!(record.offset, end, "gap or overlap between records");
        }
        expected = Some(record.end());
    }
}
