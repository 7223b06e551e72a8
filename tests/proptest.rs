use proptest::prelude::*;
use recring::{Fifo, FifoError};
use std::collections::VecDeque;

const CAPACITY: usize = 64;

#[derive(Debug, Clone)]
enum Op {
    InsertBack { len: usize, seed: u8 },
    InsertFront { len: usize, seed: u8 },
    Remove,
    RemoveInto { dest_len: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => (0usize..=CAPACITY + 8, any::<u8>()).prop_map(|(len, seed)| Op::InsertBack { len, seed }),
        2 => (0usize..=CAPACITY + 8, any::<u8>()).prop_map(|(len, seed)| Op::InsertFront { len, seed }),
        3 => Just(Op::Remove),
        1 => (0usize..=CAPACITY).prop_map(|dest_len| Op::RemoveInto { dest_len }),
    ]
}

fn record(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| seed.wrapping_add(i as u8)).collect()
}

/// Same eviction rules over unbounded, never-wrapping storage
struct Model {
    records: VecDeque<Vec<u8>>,
}

impl Model {
    fn live(&self) -> usize {
        self.records.iter().map(Vec::len).sum()
    }

    fn check(&self, data: &[u8]) -> Result<(), FifoError> {
        if data.is_empty() {
            return Err(FifoError::EmptyRecord);
        }
        if data.len() > CAPACITY {
            return Err(FifoError::CapacityExceeded {
                len: data.len(),
                capacity: CAPACITY,
            });
        }
        Ok(())
    }

    fn insert_back(&mut self, data: Vec<u8>) -> Result<usize, FifoError> {
        self.check(&data)?;
        while self.live() + data.len() > CAPACITY {
            self.records.pop_front();
        }
        let len = data.len();
        self.records.push_back(data);
        Ok(len)
    }

    fn insert_front(&mut self, data: Vec<u8>) -> Result<usize, FifoError> {
        self.check(&data)?;
        while self.live() + data.len() > CAPACITY {
            self.records.pop_back();
        }
        let len = data.len();
        self.records.push_front(data);
        Ok(len)
    }

    fn remove(&mut self) -> Result<Vec<u8>, FifoError> {
        self.records.pop_front().ok_or(FifoError::EmptyQueue)
    }
}

fn check_invariants(fifo: &Fifo) {
    assert!(fifo.live_bytes() <= fifo.capacity(), "live bytes exceed capacity");
    let total: usize = fifo.records().map(|r| r.length).sum();
    assert_eq!(total, fifo.live_bytes(), "ledger out of sync with ring");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn random_ops_match_model(ops in proptest::collection::vec(op_strategy(), 1..200)) {
        let mut fifo = Fifo::new(CAPACITY).unwrap();
        let mut model = Model { records: VecDeque::new() };

        for op in ops {
            match op {
                Op::InsertBack { len, seed } => {
                    let data = record(len, seed);
                    prop_assert_eq!(fifo.insert_back(&data), model.insert_back(data));
                }
                Op::InsertFront { len, seed } => {
                    let data = record(len, seed);
                    prop_assert_eq!(fifo.insert_front(&data), model.insert_front(data));
                }
                Op::Remove => {
                    prop_assert_eq!(fifo.remove_oldest(), model.remove());
                }
                Op::RemoveInto { dest_len } => {
                    let mut dest = vec![0u8; dest_len];
                    match model.records.front().map(Vec::len) {
                        None => {
                            prop_assert_eq!(
                                fifo.remove_oldest_into(&mut dest),
                                Err(FifoError::EmptyQueue)
                            );
                        }
                        Some(needed) if needed > dest_len => {
                            prop_assert_eq!(
                                fifo.remove_oldest_into(&mut dest),
                                Err(FifoError::BufferTooSmall { needed, available: dest_len })
                            );
                        }
                        Some(needed) => {
                            prop_assert_eq!(fifo.remove_oldest_into(&mut dest), Ok(needed));
                            let expected = model.remove().unwrap();
                            prop_assert_eq!(&dest[..needed], &expected[..]);
                        }
                    }
                }
            }

            check_invariants(&fifo);
            prop_assert_eq!(fifo.live_bytes(), model.live());
            prop_assert_eq!(fifo.live_record_count(), model.records.len());
        }

        let remaining: Vec<Vec<u8>> = fifo.drain().collect();
        let expected: Vec<Vec<u8>> = model.records.into_iter().collect();
        prop_assert_eq!(remaining, expected);
    }

    #[test]
    fn fifo_order_without_eviction(lens in proptest::collection::vec(1usize..=8, 1..8)) {
        let mut fifo = Fifo::new(CAPACITY).unwrap();
        let records: Vec<Vec<u8>> = lens
            .iter()
            .enumerate()
            .map(|(i, &len)| record(len, (i as u8).wrapping_mul(31)))
            .collect();

        for data in &records {
            fifo.insert_back(data).unwrap();
        }
        for data in &records {
            prop_assert_eq!(&fifo.remove_oldest().unwrap(), data);
        }
        prop_assert!(fifo.is_empty());
    }

    #[test]
    fn oversized_insert_changes_nothing(
        prefill in proptest::collection::vec(1usize..=16, 0..8),
        extra in 1usize..=32,
    ) {
        let mut fifo = Fifo::new(CAPACITY).unwrap();
        for (i, len) in prefill.into_iter().enumerate() {
            fifo.insert_back(&record(len, i as u8)).unwrap();
        }
        let before: Vec<_> = fifo.records().copied().collect();
        let live = fifo.live_bytes();

        let oversized = record(CAPACITY + extra, 0);
        prop_assert_eq!(
            fifo.insert_back(&oversized),
            Err(FifoError::CapacityExceeded { len: CAPACITY + extra, capacity: CAPACITY })
        );
        let after: Vec<_> = fifo.records().copied().collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(fifo.live_bytes(), live);
    }
}
