//! Fixed-capacity FIFO windows of recent consumption samples.

use std::collections::VecDeque;

use crate::constants::{LONG_WINDOW, SHORT_WINDOW};

/// Bounded FIFO of samples.
///
/// When the buffer is full the oldest sample is evicted before the new one is
/// appended. Iteration follows insertion order. A buffer built with capacity
/// zero stays empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one when full.
    pub fn push(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Drop every sample. The capacity is unchanged.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Copy of the samples from oldest to newest.
    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    /// Most recently pushed sample, if any.
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }
}

/// The short (recency) and long (distribution) windows fed by every step.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindows {
    pub short: RollingBuffer,
    pub long: RollingBuffer,
}

impl Default for RollingWindows {
    fn default() -> Self {
        Self::new(SHORT_WINDOW, LONG_WINDOW)
    }
}

impl RollingWindows {
    pub fn new(short_capacity: usize, long_capacity: usize) -> Self {
        Self {
            short: RollingBuffer::new(short_capacity),
            long: RollingBuffer::new(long_capacity),
        }
    }

    /// Record one sample in both windows.
    pub fn push(&mut self, value: f64) {
        self.short.push(value);
        self.long.push(value);
    }

    /// Empty both windows.
    pub fn reset(&mut self) {
        self.short.reset();
        self.long.reset();
    }
}
