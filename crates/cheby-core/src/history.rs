//! Sample history for direct-form filters.
//!
//! [`DelayHistory`] keeps the most recent `len` samples in a circular
//! buffer. Pushing a sample drops the oldest one; reads are indexed
//! most-recent-first so `get(0)` is `x[n-1]` from the filter's point of view
//! once the current sample has been pushed.

use alloc::vec;
use alloc::vec::Vec;

/// Fixed-length, most-recent-first sample history.
///
/// Resizing always zero-fills (silence), so energy from a previous filter
/// order never leaks into a new one.
#[derive(Debug, Clone, Default)]
pub struct DelayHistory {
    buffer: Vec<f64>,
    write_pos: usize,
}

impl DelayHistory {
    /// Creates a silent history of `len` samples.
    pub fn new(len: usize) -> Self {
        Self {
            buffer: vec![0.0; len],
            write_pos: 0,
        }
    }

    /// Number of samples held.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when the history holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Pushes the newest sample, dropping the oldest.
    #[inline]
    pub fn push(&mut self, sample: f64) {
        let n = self.buffer.len();
        if n == 0 {
            return;
        }
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % n;
    }

    /// Sample pushed `age` pushes ago (`0` = newest).
    ///
    /// # Panics
    ///
    /// Panics if `age >= len()`.
    #[inline]
    pub fn get(&self, age: usize) -> f64 {
        let n = self.buffer.len();
        assert!(age < n, "history index {age} out of range for length {n}");
        self.buffer[(self.write_pos + n - age - 1) % n]
    }

    /// Iterates newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |age| self.get(age))
    }

    /// Zeroes every sample without changing the length.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Changes the length; all positions are zeroed.
    pub fn resize(&mut self, len: usize) {
        self.buffer.clear();
        self.buffer.resize(len, 0.0);
        self.write_pos = 0;
    }

    /// Frees the storage. The history becomes empty.
    pub fn release(&mut self) {
        self.buffer = Vec::new();
        self.write_pos = 0;
    }
}
