//! Flat balanced search tree ("skip table").
//!
//! Nodes are stored in pre-order with the root at index 0, and children are
//! referenced by index. Every child index is strictly greater than its
//! parent's, which is what allows [`LEAF`] to be 0 in emitted tables.
//!
//! ```
//! use hashstrings_core::{CharMap, KeywordHasher, TreeBuilder};
//!
//! let map = CharMap::identity();
//! let hasher = KeywordHasher::new(&map);
//! let set = hasher.hash_keywords(["if", "else", "while"]).expect("valid keywords");
//! let table = TreeBuilder::new(set.records().to_vec()).build().expect("no collisions");
//!
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.lookup("while", &hasher), 3);
//! assert_eq!(table.lookup("until", &hasher), 0);
//! ```

mod builder;

pub use builder::TreeBuilder;

use crate::keyword::{HashMixer, KeywordHasher};

/// Child index written for an absent child in emitted tables.
///
/// Index 0 is always the root, and the root is never anybody's child.
pub const LEAF: usize = 0;

/// Target index returned when a lookup finds nothing.
pub const UNKNOWN: u32 = 0;

/// One node of the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Hash of `source_text`
    pub hash: u64,
    /// The bytes this node was hashed from
    pub source_text: Vec<u8>,
    /// Target index of the keyword it resolves to
    pub target_index: u32,
    /// Index of the subtree with smaller hashes
    pub lower: Option<usize>,
    /// Index of the subtree with larger hashes
    pub higher: Option<usize>,
}

impl TreeNode {
    /// Lower child as written to generated code.
    #[must_use]
    pub fn lower_index(&self) -> usize {
        self.lower.unwrap_or(LEAF)
    }

    /// Higher child as written to generated code.
    #[must_use]
    pub fn higher_index(&self) -> usize {
        self.higher.unwrap_or(LEAF)
    }
}

/// Pre-order node sequence produced by [`TreeBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipTable {
    nodes: Vec<TreeNode>,
}

impl SkipTable {
    /// Nodes in pre-order.
    #[must_use]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the table holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk the tree from the root looking for `hash`.
    #[must_use]
    pub fn find(&self, hash: u64) -> Option<&TreeNode> {
        let mut current = if self.nodes.is_empty() { None } else { Some(0) };

        while let Some(index) = current {
            let node = self.nodes.get(index)?;
            current = match hash.cmp(&node.hash) {
                std::cmp::Ordering::Equal => return Some(node),
                std::cmp::Ordering::Less => node.lower,
                std::cmp::Ordering::Greater => node.higher,
            };
        }
        None
    }

    /// Hash `text` and return the target index it resolves to, or
    /// [`UNKNOWN`].
    pub fn lookup<M: HashMixer>(
        &self,
        text: impl AsRef<[u8]>,
        hasher: &KeywordHasher<'_, M>,
    ) -> u32 {
        self.find(hasher.hash(text))
            .map_or(UNKNOWN, |node| node.target_index)
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = Vec::new();
        if !self.nodes.is_empty() {
            pending.push((0usize, 1usize));
        }

        while let Some((index, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            if let Some(node) = self.nodes.get(index) {
                pending.extend(node.lower.map(|i| (i, depth + 1)));
                pending.extend(node.higher.map(|i| (i, depth + 1)));
            }
        }
        deepest
    }
}

impl<'a> IntoIterator for &'a SkipTable {
    type Item = &'a TreeNode;
    type IntoIter = std::slice::Iter<'a, TreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
