//! A fixed-capacity ring buffer: one arena allocated up front plus a head index.

/// Holds the most recent `capacity` values pushed into it, oldest first.
#[derive(Debug, Clone)]
pub struct RingBuffer<T: Copy> {
    slots: Vec<T>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl<T: Copy> RingBuffer<T> {
    /// An empty ring holding at most `capacity` entries. Storage grows on
    /// demand, so a huge capacity costs nothing until it is filled.
    pub fn new(capacity: usize) -> Self {
        Self::with_preallocation(capacity, 0)
    }

    /// Like `new`, reserving room for `expected` entries (never more than
    /// `capacity`) up front.
    pub fn with_preallocation(capacity: usize, expected: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(expected.min(capacity)),
            head: 0,
            len: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Appends `value` as the newest entry. Once full, the oldest entry is
    /// overwritten and returned.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.len < self.capacity {
            // Not yet wrapped: head is 0 and the arena grows in step with `len`.
            self.slots.push(value);
            self.len += 1;
            return None;
        }
        let evicted = std::mem::replace(&mut self.slots[self.head], value);
        self.head = (self.head + 1) % self.capacity;
        Some(evicted)
    }

    /// The `k`-th oldest entry.
    pub fn get(&self, k: usize) -> Option<T> {
        if k >= self.len {
            return None;
        }
        Some(self.slots[(self.head + k) % self.capacity])
    }

    pub fn oldest(&self) -> Option<T> {
        self.get(0)
    }

    pub fn newest(&self) -> Option<T> {
        self.len.checked_sub(1).and_then(|k| self.get(k))
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).map(move |k| self.slots[(self.head + k) % self.capacity])
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
        self.len = 0;
    }
}
