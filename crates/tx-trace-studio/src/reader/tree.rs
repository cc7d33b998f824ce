//! Rebuilds the call tree from a flattened function trace.

use crate::model::CallRecord;

/// A call with its direct sub-calls in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNode {
    pub record: CallRecord,
    pub children: Vec<CallNode>,
}

impl CallNode {
    /// Number of calls in this subtree, including itself
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(CallNode::size).sum::<usize>()
    }
}

/// Nest a flattened trace into one tree per top-level call
///
/// Rows must be in function-trace order: every call precedes its sub-calls,
/// which precede its next sibling. A call attaches to the nearest preceding
/// call of smaller depth, so skipped depths still nest.
pub fn build_call_tree(records: &[CallRecord]) -> Vec<CallNode> {
    let mut roots = Vec::new();
    let mut open: Vec<CallNode> = Vec::new();

    for record in records {
        while open
            .last()
            .is_some_and(|top| top.record.frame.depth >= record.frame.depth)
        {
            close_top(&mut open, &mut roots);
        }
        open.push(CallNode {
            record: record.clone(),
            children: Vec::new(),
        });
    }

    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }

    roots
}

fn close_top(open: &mut Vec<CallNode>, roots: &mut Vec<CallNode>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, CallFrame, CallType};

    fn record(index: u64, depth: usize) -> CallRecord {
        CallRecord {
            frame: CallFrame::new(index, CallType::Call, depth, Address::zero(), Address::zero()),
            call_stack: vec![],
            trace_path: vec![],
        }
    }

    #[test]
    fn test_nesting() {
        // 0 ─┬─ 1 ── 2
        //    └─ 3
        // 4
        let records = [record(0, 0), record(1, 1), record(2, 2), record(3, 1), record(4, 0)];
        let tree = build_call_tree(&records);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].size(), 4);
        assert_eq!(tree[0].children[0].children[0].record.frame.index, 2);
        assert_eq!(tree[0].children[1].record.frame.index, 3);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_skipped_depth_attaches_to_nearest() {
        let tree = build_call_tree(&[record(0, 0), record(1, 2)]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children[0].record.frame.depth, 2);
    }
}
