//! Per-depth call-site counters.
//!
//! Every depth level keeps the next sibling index, the index of the frame
//! currently open at that level, and a parent link to the frame open one
//! level up. Together they give each frame a stable structural address
//! without storing the call tree.

/// Counters for one depth level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SiteCounter {
    /// Next sibling index at this depth; never decreases within a transaction
    next_site: u32,

    /// Site index of the frame currently open at this depth
    open_site: u32,

    /// Site index of the frame open at depth - 1 when this one was opened
    parent_link: u32,
}

/// Depth-indexed counter table, grown on demand
#[derive(Debug, Clone, Default)]
pub struct DepthTable {
    entries: Vec<SiteCounter>,

    /// Number of leading entries touched since the last reset
    touched: usize,
}

impl DepthTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next call-site index that a frame opened at `depth` would receive
    pub fn next_call_index(&self, depth: usize) -> u32 {
        self.entries.get(depth).map_or(0, |e| e.next_site)
    }

    /// Open a frame at `depth` and return its call-site index
    ///
    /// Deeper levels lose their open frame; their sibling counters are kept.
    pub fn open_frame(&mut self, depth: usize) -> u32 {
        if depth >= self.entries.len() {
            self.entries.resize(depth + 1, SiteCounter::default());
        }

        let parent_link = if depth == 0 {
            0
        } else {
            self.entries[depth - 1].open_site
        };

        let entry = &mut self.entries[depth];
        let site = entry.next_site;
        entry.next_site += 1;
        entry.open_site = site;
        entry.parent_link = parent_link;

        for deeper in self.entries.iter_mut().take(self.touched).skip(depth + 1) {
            deeper.open_site = 0;
            deeper.parent_link = 0;
        }

        self.touched = self.touched.max(depth + 1);
        site
    }

    /// Site indices of the open frame chain for depths 1..=depth
    ///
    /// Depth 0 yields an empty path. Levels with no open frame read as 0.
    pub fn path_at(&self, depth: usize) -> Vec<u32> {
        (1..=depth)
            .map(|d| self.entries.get(d).map_or(0, |e| e.open_site))
            .collect()
    }

    /// Parent links for depths 1..=depth
    pub fn call_stack_at(&self, depth: usize) -> Vec<u32> {
        (1..=depth)
            .map(|d| self.entries.get(d).map_or(0, |e| e.parent_link))
            .collect()
    }

    /// Deepest level touched since the last reset, if any
    pub fn max_depth_reached(&self) -> Option<usize> {
        self.touched.checked_sub(1)
    }

    /// Zero the counters that were actually used
    pub fn reset(&mut self) {
        for entry in &mut self.entries[..self.touched] {
            *entry = SiteCounter::default();
        }
        self.touched = 0;
    }
}

// Entries past `touched` are always zeroed, so allocation size is not state.
impl PartialEq for DepthTable {
    fn eq(&self, other: &Self) -> bool {
        self.touched == other.touched
            && self.entries[..self.touched] == other.entries[..other.touched]
    }
}

impl Eq for DepthTable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_indices_increment() {
        let mut table = DepthTable::new();
        assert_eq!(table.open_frame(0), 0);
        assert_eq!(table.open_frame(1), 0);
        assert_eq!(table.open_frame(1), 1);
        assert_eq!(table.open_frame(1), 2);
        assert_eq!(table.next_call_index(1), 3);
        assert_eq!(table.next_call_index(7), 0);
    }

    #[test]
    fn test_path_tracks_open_chain() {
        let mut table = DepthTable::new();
        table.open_frame(0);
        table.open_frame(1); // site 0
        table.open_frame(2); // site 0
        table.open_frame(1); // site 1
        table.open_frame(2); // site 1

        assert_eq!(table.path_at(0), Vec::<u32>::new());
        assert_eq!(table.path_at(2), vec![1, 1]);
        assert_eq!(table.call_stack_at(2), vec![0, 1]);
    }

    #[test]
    fn test_skipped_depth_reads_zero() {
        let mut table = DepthTable::new();
        table.open_frame(0);
        table.open_frame(3);
        assert_eq!(table.path_at(3), vec![0, 0, 0]);
        assert_eq!(table.max_depth_reached(), Some(3));
    }

    #[test]
    fn test_closed_subtree_does_not_leak_into_skipped_levels() {
        let mut table = DepthTable::new();
        table.open_frame(0);
        table.open_frame(1); // site 0
        table.open_frame(2); // site 0
        table.open_frame(2); // site 1
        table.open_frame(1); // site 1, closes the depth-2 frames
        assert_eq!(table.open_frame(3), 0);

        assert_eq!(table.path_at(3), vec![1, 0, 0]);
        assert_eq!(table.call_stack_at(3), vec![0, 0, 0]);
        // Sibling counters survive the close
        assert_eq!(table.next_call_index(2), 2);
    }

    #[test]
    fn test_reopened_skip_after_deep_subtree() {
        let mut table = DepthTable::new();
        for depth in [0, 1, 2, 3, 1] {
            table.open_frame(depth);
        }
        assert_eq!(table.open_frame(3), 1);

        assert_eq!(table.path_at(3), vec![1, 0, 1]);
        assert_eq!(table.call_stack_at(3), vec![0, 0, 0]);
    }

    #[test]
    fn test_reset_matches_fresh_table() {
        let mut table = DepthTable::new();
        table.open_frame(0);
        table.open_frame(1);
        table.open_frame(2);
        table.reset();

        assert_eq!(table, DepthTable::new());
        assert_eq!(table.max_depth_reached(), None);
        assert_eq!(table.open_frame(2), 0);
    }
}
