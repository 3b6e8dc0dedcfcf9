//! Disjoint-set forest of up-trees with union-by-size and path compression.
//!
//! Nodes live in an arena addressed by index; a node is a root iff its
//! parent index is its own index, and the subtree size is meaningful only at
//! the root. Nodes are never deleted; the forest only grows or flattens.
//!
//! Unlike the textbook structure, the forest keeps an internal element-to-
//! node lookup so `find` can be called by element value rather than by a
//! previously obtained position.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::{GraphError, Result};

/// Handle to a node in an [`UpTreeForest`]. Positions are never
/// invalidated; `find` and `union` re-resolve them to their current roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetPosition {
    pub(crate) index: u32,
}

impl fmt::Display for SetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.index)
    }
}

#[derive(Debug, Clone)]
struct UpTreeNode<T> {
    element: T,
    parent: u32,
    /// Number of nodes in the subtree; meaningful only at a root.
    size: u32,
}

/// Forest of up-trees over elements of type `T`.
///
/// `union` attaches the smaller-size root under the larger, with ties
/// attaching the second root under the first. `find` compresses the path it
/// walks, re-parenting every visited node directly to the discovered root,
/// for O(log*n) amortized cost per operation.
#[derive(Debug, Clone, Default)]
pub struct UpTreeForest<T> {
    nodes: Vec<UpTreeNode<T>>,
    lookup: HashMap<T, u32>,
}

impl<T: Clone + Eq + Hash> UpTreeForest<T> {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Returns the number of elements ever added to the forest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the forest holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a new singleton set holding `value` and returns its position.
    pub fn make_set(&mut self, value: T) -> SetPosition {
        let index = self.nodes.len() as u32;
        self.nodes.push(UpTreeNode {
            element: value.clone(),
            parent: index,
            size: 1,
        });
        self.lookup.insert(value, index);
        SetPosition { index }
    }

    /// Returns the position of the representative (root) of the set
    /// containing `value`, compressing the walked path.
    pub fn find(&mut self, value: &T) -> Result<SetPosition> {
        let index = *self.lookup.get(value).ok_or(GraphError::ElementNotFound)?;
        Ok(SetPosition {
            index: self.find_root(index),
        })
    }

    /// Merges the sets reachable from the two positions. Each position is
    /// re-resolved to its current root first; unioning a set with itself is
    /// a no-op.
    pub fn union(&mut self, a: SetPosition, b: SetPosition) -> Result<()> {
        self.validate(a)?;
        self.validate(b)?;

        let root_a = self.find_root(a.index);
        let root_b = self.find_root(b.index);
        if root_a == root_b {
            return Ok(());
        }

        let size_a = self.nodes[root_a as usize].size;
        let size_b = self.nodes[root_b as usize].size;
        // Smaller tree goes under larger; on a tie the second goes under
        // the first.
        let (winner, loser) = if size_a >= size_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.nodes[loser as usize].parent = winner;
        self.nodes[winner as usize].size = size_a + size_b;
        Ok(())
    }

    /// Returns a reference to the element stored at a position.
    pub fn element(&self, position: SetPosition) -> Result<&T> {
        self.validate(position)?;
        Ok(&self.nodes[position.index as usize].element)
    }

    /// Recursive path-compression find: every node visited on the walk to
    /// the root is re-parented directly to the root.
    fn find_root(&mut self, index: u32) -> u32 {
        let parent = self.nodes[index as usize].parent;
        if parent == index {
            return index;
        }
        let root = self.find_root(parent);
        self.nodes[index as usize].parent = root;
        root
    }

    fn validate(&self, position: SetPosition) -> Result<()> {
        if (position.index as usize) < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::InvalidPosition(position))
        }
    }
}
