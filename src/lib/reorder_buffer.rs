//! Reordering buffer for results that complete out of order.
//!
//! Workers finish queries in whatever order the scheduler allows. The ordered writer
//! inserts each result under its ordinal and pops the contiguous run starting at the
//! next expected ordinal, so output order matches input order.
//!
//! # Example
//!
//! ```
//! use snps_lib::reorder_buffer::ReorderBuffer;
//!
//! let mut buffer: ReorderBuffer<&str> = ReorderBuffer::new();
//!
//! buffer.insert(2, "Query3");
//! buffer.insert(0, "Query1");
//! assert_eq!(buffer.drain_ready().collect::<Vec<_>>(), vec!["Query1"]);
//!
//! buffer.insert(1, "Query2");
//! assert_eq!(buffer.drain_ready().collect::<Vec<_>>(), vec!["Query2", "Query3"]);
//! assert!(buffer.is_empty());
//! ```

use std::collections::VecDeque;

/// A buffer that releases items in ordinal order.
///
/// Items can be inserted with any ordinal at or after the next expected one; they are
/// released only once every earlier ordinal has been released. Backed by a sparse
/// `VecDeque` so insert and pop are O(1).
#[derive(Debug)]
pub struct ReorderBuffer<T> {
    /// Sparse buffer: index (ordinal - `base_seq`) holds the item if it has arrived.
    buffer: VecDeque<Option<T>>,
    /// The ordinal corresponding to buffer[0].
    base_seq: u64,
    /// Number of items currently stored.
    count: usize,
}

impl<T> ReorderBuffer<T> {
    /// Create a new reorder buffer expecting ordinal 0 first.
    #[must_use]
    pub fn new() -> Self {
        Self { buffer: VecDeque::new(), base_seq: 0, count: 0 }
    }

    /// Insert an item under its ordinal.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the ordinal was already inserted or already released.
    #[allow(clippy::cast_possible_truncation)]
    pub fn insert(&mut self, seq: u64, item: T) {
        debug_assert!(seq >= self.base_seq, "Ordinal {seq} is before base {}", self.base_seq);

        let index = (seq - self.base_seq) as usize;
        if self.buffer.len() <= index {
            self.buffer.resize_with(index + 1, || None);
        }

        debug_assert!(self.buffer[index].is_none(), "Duplicate ordinal: {seq}");
        self.buffer[index] = Some(item);
        self.count += 1;
    }

    /// Pop the item with the next expected ordinal, if it has arrived.
    #[must_use]
    pub fn try_pop_next(&mut self) -> Option<T> {
        if !self.can_pop() {
            return None;
        }
        let item = self.buffer.pop_front().flatten();
        self.base_seq += 1;
        self.count -= 1;
        item
    }

    /// Drain all consecutive ready items starting from the next expected ordinal.
    ///
    /// Stops at the first gap.
    pub fn drain_ready(&mut self) -> DrainReady<'_, T> {
        DrainReady { buffer: self }
    }

    /// Drain every buffered item in ordinal order, skipping over gaps.
    ///
    /// Used once the input has ended; afterwards the buffer is empty and expects the
    /// ordinal following the last slot it held.
    pub fn drain_remaining(&mut self) -> impl Iterator<Item = T> + '_ {
        self.base_seq += self.buffer.len() as u64;
        self.count = 0;
        self.buffer.drain(..).flatten()
    }

    /// Check if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of items currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// The next ordinal expected to be released.
    #[must_use]
    pub fn next_seq(&self) -> u64 {
        self.base_seq
    }

    /// Check if the item with the next expected ordinal is ready.
    #[must_use]
    pub fn can_pop(&self) -> bool {
        self.buffer.front().is_some_and(Option::is_some)
    }
}

impl<T> Default for ReorderBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator that drains consecutive ready items from a `ReorderBuffer`.
pub struct DrainReady<'a, T> {
    buffer: &'a mut ReorderBuffer<T>,
}

impl<T> Iterator for DrainReady<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.try_pop_next()
    }
}
