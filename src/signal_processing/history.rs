/// Fixed-capacity circular history of recent samples
///
/// Holds the last `capacity` values pushed, zero-initialized so that a fresh
/// ring behaves as if it had seen a run of zero-valued samples. Older values
/// are overwritten in place, never shifted.
pub struct HistoryRing<T> {
    values: Vec<T>,
    pos: usize,
}

impl<T: Copy + Default> HistoryRing<T> {
    /// Create a zero-filled ring
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history ring capacity must be nonzero");
        Self {
            values: vec![T::default(); capacity],
            pos: 0,
        }
    }

    /// Store `value` in the current slot and advance the write position
    pub fn push(&mut self, value: T) {
        self.values[self.pos] = value;
        self.pos += 1;
        if self.pos == self.values.len() {
            self.pos = 0;
        }
    }

    /// Iterate from the most recent value back to the oldest
    ///
    /// Walks the ring as two contiguous reverse ranges instead of indexing
    /// modulo the capacity.
    pub fn recent(&self) -> impl Iterator<Item = T> + '_ {
        self.values[..self.pos]
            .iter()
            .rev()
            .chain(self.values[self.pos..].iter().rev())
            .copied()
    }
}
