//! Per-path response rotation.
//!
//! Generated mock servers pick which documented response to return by counting how many
//! times each request path has been seen. [`RotationState`] is the in-process counterpart
//! of the `createMockContext()` object emitted into the mock module: one counter per
//! pathname, shared by every operation registered on that path.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct RotationState {
    counters: HashMap<String, usize>,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current count for `pathname` and advance it.
    ///
    /// The first call for a path returns 0.
    pub fn next(&mut self, pathname: &str) -> usize {
        let counter = self.counters.entry(pathname.to_string()).or_insert(0);
        let current = *counter;
        *counter = counter.wrapping_add(1);
        current
    }

    /// The value the next call to [`next`](Self::next) would return.
    pub fn peek(&self, pathname: &str) -> usize {
        self.counters.get(pathname).copied().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.counters.clear();
    }

    /// Number of distinct paths seen so far.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
