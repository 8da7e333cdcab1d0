//! Rolling history of raw inbound messages.

use std::collections::VecDeque;

/// Number of messages replayed to a newly opened connection by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Bounded FIFO of raw message payloads.
///
/// Holds at most `capacity` entries; pushing onto a full buffer evicts the
/// oldest entry. A capacity of 0 retains nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Append a raw payload, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, raw: String) {
        self.entries.push_back(raw);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Entries oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
