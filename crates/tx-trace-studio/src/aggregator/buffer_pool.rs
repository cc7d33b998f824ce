//! One append-only buffer per depth level.
//!
//! A slot holds records of frames that are still waiting for their
//! ancestors to close. Slots keep their allocation across resets.

/// Depth-indexed pool of record buffers
#[derive(Debug, Clone)]
pub struct BufferPool<T> {
    slots: Vec<Vec<T>>,

    /// Number of leading slots written since the last reset
    touched: usize,
}

impl<T> Default for BufferPool<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            touched: 0,
        }
    }
}

impl<T> BufferPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable buffer for `depth`, allocating levels up to it if needed
    pub fn slot(&mut self, depth: usize) -> &mut Vec<T> {
        if depth >= self.slots.len() {
            self.slots.resize_with(depth + 1, Vec::new);
        }
        self.touched = self.touched.max(depth + 1);
        &mut self.slots[depth]
    }

    /// Records currently buffered at `depth`
    pub fn peek(&self, depth: usize) -> &[T] {
        self.slots.get(depth).map_or(&[], |s| s.as_slice())
    }

    /// Move everything buffered at `child` to the end of `parent`
    ///
    /// `parent` must be shallower than `child`. Never-allocated children are a no-op.
    pub fn append_child_into(&mut self, parent: usize, child: usize) {
        debug_assert!(parent < child, "parent {} must be above child {}", parent, child);
        if child >= self.slots.len() || self.slots[child].is_empty() {
            return;
        }

        self.slot(parent);
        let (upper, lower) = self.slots.split_at_mut(child);
        upper[parent].append(&mut lower[0]);
    }

    /// Move everything buffered at `depth` to the end of `out`
    pub fn drain_into(&mut self, depth: usize, out: &mut Vec<T>) {
        if let Some(slot) = self.slots.get_mut(depth) {
            out.append(slot);
        }
    }

    /// True when every slot deeper than `depth` is empty
    pub fn is_empty_below(&self, depth: usize) -> bool {
        self.slots.iter().skip(depth + 1).all(Vec::is_empty)
    }

    /// Clear the slots that were written since the last reset
    pub fn reset(&mut self) {
        for slot in &mut self.slots[..self.touched] {
            slot.clear();
        }
        self.touched = 0;
    }
}

impl<T: PartialEq> PartialEq for BufferPool<T> {
    fn eq(&self, other: &Self) -> bool {
        self.touched == other.touched && self.slots[..self.touched] == other.slots[..other.touched]
    }
}

impl<T: Eq> Eq for BufferPool<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_child_keeps_order() {
        let mut pool = BufferPool::new();
        pool.slot(1).push("a");
        pool.slot(2).push("b");
        pool.slot(2).push("c");

        pool.append_child_into(1, 2);

        assert_eq!(pool.peek(1), &["a", "b", "c"]);
        assert!(pool.peek(2).is_empty());
        assert!(pool.is_empty_below(1));
    }

    #[test]
    fn test_append_from_unallocated_child_is_noop() {
        let mut pool: BufferPool<u8> = BufferPool::new();
        pool.slot(0).push(1);
        pool.append_child_into(0, 9);
        assert_eq!(pool.peek(0), &[1u8]);
    }

    #[test]
    fn test_drain_into_output() {
        let mut pool = BufferPool::new();
        pool.slot(0).push(1);
        pool.slot(0).push(2);

        let mut out = vec![0];
        pool.drain_into(0, &mut out);

        assert_eq!(out, vec![0, 1, 2]);
        assert!(pool.peek(0).is_empty());
    }

    #[test]
    fn test_reset_matches_fresh_pool() {
        let mut pool = BufferPool::new();
        pool.slot(3).push(7u32);
        pool.reset();
        assert_eq!(pool, BufferPool::new());
    }
}
