use std::collections::VecDeque;

use crate::cluster::random::RandomSource;

mod hierarchy;

/// Initialize the logger
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Random source returning a fixed sequence of values (then zeros)
#[derive(Default)]
pub(crate) struct FixedSequence {
    values: VecDeque<usize>,
    pub draws: usize,
}

impl FixedSequence {
    pub fn new(values: &[usize]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            draws: 0,
        }
    }

    fn next_value(&mut self) -> usize {
        self.draws += 1;
        self.values.pop_front().unwrap_or(0)
    }
}

impl RandomSource for FixedSequence {
    fn next_bit(&mut self) -> bool {
        self.next_value() % 2 == 1
    }

    fn choose(&mut self, n: usize) -> usize {
        self.next_value() % n
    }
}
