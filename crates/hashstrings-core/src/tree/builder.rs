use tracing::debug;

use super::{SkipTable, TreeNode};
use crate::{HashRecord, TreeError};

/// Lays sorted records out as a pre-order balanced tree.
///
/// The sub-range `[offset, offset + length)` becomes the node at
/// `offset + length / 2`; its lower half and upper half become the lower and
/// higher subtrees. A node claims its index before either subtree, so the
/// lower child is always `index + 1` and the higher child follows the whole
/// lower subtree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    records: Vec<HashRecord>,
}

impl TreeBuilder {
    /// Collect records for layout.
    #[must_use]
    pub fn new(records: Vec<HashRecord>) -> Self {
        Self { records }
    }

    /// Sort, reject collisions and lay out the tree.
    pub fn build(mut self) -> Result<SkipTable, TreeError> {
        if u32::try_from(self.records.len()).is_err() {
            return Err(TreeError::TooManyRecords(self.records.len()));
        }

        self.records.sort_by_key(|r| r.hash);
        if let Some(pair) = self.records.windows(2).find(|w| w[0].hash == w[1].hash) {
            return Err(TreeError::HashCollision {
                hash: pair[0].hash,
                first: String::from_utf8_lossy(&pair[0].source_text).into_owned(),
                second: String::from_utf8_lossy(&pair[1].source_text).into_owned(),
            });
        }

        let nodes = layout(&self.records);
        let table = SkipTable { nodes };
        debug!(
            nodes = table.len(),
            depth = table.depth(),
            "laid out search table"
        );
        Ok(table)
    }
}

/// Pre-order median split over a sorted slice, driven by an explicit stack.
fn layout(sorted: &[HashRecord]) -> Vec<TreeNode> {
    let mut nodes = Vec::with_capacity(sorted.len());
    let mut pending = Vec::new();
    if !sorted.is_empty() {
        pending.push((0usize, sorted.len()));
    }

    while let Some((offset, length)) = pending.pop() {
        let index = nodes.len();
        let split = length / 2;
        let lower_len = split;
        let higher_len = length - split - 1;
        let record = &sorted[offset + split];

        nodes.push(TreeNode {
            hash: record.hash,
            source_text: record.source_text.clone(),
            target_index: record.target_index,
            lower: (lower_len > 0).then_some(index + 1),
            higher: (higher_len > 0).then_some(index + 1 + lower_len),
        });

        // lower subtree must be emitted first, so it goes on the stack last
        if higher_len > 0 {
            pending.push((offset + split + 1, higher_len));
        }
        if lower_len > 0 {
            pending.push((offset, lower_len));
        }
    }

    nodes
}
