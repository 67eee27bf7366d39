//! Huffman tree construction over a flat, append-only node arena.
//!
//! Nodes are addressed by their index in the arena. Leaves are appended the
//! first time they leave the heap, merge nodes as soon as they are created,
//! so the root is always the last node.

use derivative::Derivative;
use heapless::Vec;
use log::trace;

use crate::config::{HEAP_CAPACITY, TREE_CAPACITY};
use crate::domain::SymbolSet;
use crate::error::{Corruption, Error, Result};
use crate::frequency::Histogram;
use crate::heap::MinHeap;

/// Heap entry and tree node in one.
///
/// Ordering looks only at `weight`, then `symbols`; tree links never take
/// part in comparisons.
#[derive(Debug, Clone, Copy, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
pub struct Node {
    weight: u32,

    symbols: SymbolSet,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    left: Option<usize>,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    right: Option<usize>,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    inserted_at: Option<usize>,
}

impl Node {
    pub fn leaf(index: usize, weight: u32) -> Self {
        Self {
            weight,
            symbols: SymbolSet::singleton(index),
            left: None,
            right: None,
            inserted_at: None,
        }
    }

    /// Parent of two nodes already placed in the tree.
    fn merge(a: &Node, b: &Node, a_at: usize, b_at: usize) -> Self {
        Self {
            weight: a.weight + b.weight,
            symbols: a.symbols.union(&b.symbols),
            left: Some(a_at),
            right: Some(b_at),
            inserted_at: None,
        }
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    pub fn left(&self) -> Option<usize> {
        self.left
    }

    pub fn right(&self) -> Option<usize> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// One step of a root-to-leaf descent: a 0 bit goes left, a 1 bit right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Left,
    Right,
}

impl Branch {
    #[inline]
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Branch::Right
        } else {
            Branch::Left
        }
    }

    #[inline]
    pub fn bit(self) -> bool {
        self == Branch::Right
    }

    #[inline]
    pub fn select(self, (left, right): (usize, usize)) -> usize {
        match self {
            Branch::Left => left,
            Branch::Right => right,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node, TREE_CAPACITY>,
}

impl Tree {
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Rebuild from `histogram`, using `heap` as scratch space.
    ///
    /// Equal weights are resolved by the lowest domain index each node
    /// covers, so the same histogram always yields the same tree.
    pub fn build(
        &mut self,
        histogram: &Histogram,
        heap: &mut MinHeap<Node, HEAP_CAPACITY>,
    ) -> Result<()> {
        self.nodes.clear();
        heap.build(histogram.present().map(|(i, count)| Node::leaf(i, count)))?;

        while heap.len() > 1 {
            let (Some(mut a), Some(mut b)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let a_at = self.append(&mut a)?;
            let b_at = self.append(&mut b)?;

            let mut merged = Node::merge(&a, &b, a_at, b_at);
            let at = self.append(&mut merged)?;
            trace!("merge {a_at} + {b_at} -> {at} (weight {})", merged.weight);
            heap.push(merged)?;
        }

        // A lone symbol never merges and is still waiting in the heap.
        if let Some(mut last) = heap.pop() {
            self.append(&mut last)?;
        }
        Ok(())
    }

    /// Place `node` at the end of the arena unless it is already there.
    fn append(&mut self, node: &mut Node) -> Result<usize> {
        if let Some(at) = node.inserted_at {
            return Ok(at);
        }
        let at = self.nodes.len();
        node.inserted_at = Some(at);
        self.nodes.push(*node).map_err(|_| Error::Capacity {
            needed: at + 1,
            available: TREE_CAPACITY,
        })?;
        Ok(at)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<usize> {
        self.nodes.len().checked_sub(1)
    }

    pub fn get(&self, at: usize) -> Option<&Node> {
        self.nodes.get(at)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Children of `at`, or `None` for a leaf.
    ///
    /// A node with one child, or a link past the end of the arena, means the
    /// tree is corrupt.
    pub fn links(&self, at: usize) -> Result<Option<(usize, usize)>> {
        let node = self
            .nodes
            .get(at)
            .ok_or(Corruption::DanglingLink { node: at })?;
        match (node.left, node.right) {
            (None, None) => Ok(None),
            (Some(l), Some(r)) if l < self.nodes.len() && r < self.nodes.len() => Ok(Some((l, r))),
            (Some(_), Some(_)) => Err(Corruption::DanglingLink { node: at }.into()),
            _ => Err(Corruption::HalfLeaf { node: at }.into()),
        }
    }

    /// Branch to take at internal node `(left, right)` to reach symbol `index`.
    #[inline]
    pub(crate) fn branch_toward(&self, (left, _): (usize, usize), index: usize) -> Branch {
        if self.get(left).is_some_and(|n| n.symbols.contains(index)) {
            Branch::Left
        } else {
            Branch::Right
        }
    }

    /// Structural checks: size law, weight sums, symbol unions, root last.
    pub fn is_consistent(&self) -> bool {
        let Some(root) = self.root() else {
            return true;
        };
        let leaves = self.nodes.iter().filter(|n| n.is_leaf()).count();
        if self.nodes.len() + 1 != 2 * leaves {
            return false;
        }
        if self.nodes[root].symbols.len() != leaves {
            return false;
        }
        self.nodes.iter().enumerate().all(|(at, node)| {
            if node.inserted_at != Some(at) {
                return false;
            }
            match (node.left, node.right) {
                (None, None) => node.symbols.len() == 1,
                (Some(l), Some(r)) if l < at && r < at => {
                    let (l, r) = (&self.nodes[l], &self.nodes[r]);
                    node.weight == l.weight + r.weight
                        && l.symbols.is_disjoint(&r.symbols)
                        && node.symbols == l.symbols.union(&r.symbols)
                }
                _ => false,
            }
        })
    }

    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, at: usize) -> &mut Node {
        &mut self.nodes[at]
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Node {
    pub(crate) fn set_links(&mut self, left: Option<usize>, right: Option<usize>) {
        self.left = left;
        self.right = right;
    }
}
