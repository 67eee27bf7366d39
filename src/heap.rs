//! Fixed-capacity binary min-heap.
//!
//! 0-indexed storage: parent = (i-1)/2, children = 2i+1, 2i+2. The smallest
//! element under `Ord` sits at index 0.

use heapless::Vec;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct MinHeap<T, const N: usize> {
    nodes: Vec<T, N>,
}

impl<T: Ord, const N: usize> MinHeap<T, N> {
    pub const fn new() -> Self {
        MinHeap { nodes: Vec::new() }
    }

    /// Replace the contents with `items` and heapify bottom-up.
    pub fn build(&mut self, items: impl IntoIterator<Item = T>) -> Result<()> {
        self.nodes.clear();
        for item in items {
            self.nodes.push(item).map_err(|_| Error::Capacity {
                needed: N + 1,
                available: N,
            })?;
        }

        for start in (0..self.nodes.len() / 2).rev() {
            self.sift_down(start);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.nodes.first()
    }

    pub fn push(&mut self, item: T) -> Result<()> {
        self.nodes.push(item).map_err(|_| Error::Capacity {
            needed: N + 1,
            available: N,
        })?;
        self.sift_up(self.nodes.len() - 1);
        Ok(())
    }

    /// Remove the minimum. The last element takes its place and sinks.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.nodes.len().checked_sub(1)?;
        self.nodes.swap(0, last);
        let min = self.nodes.pop();
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// Every child compares `>=` its parent.
    pub fn is_valid(&self) -> bool {
        (1..self.nodes.len()).all(|i| self.nodes[(i - 1) / 2] <= self.nodes[i])
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.nodes[index] < self.nodes[parent] {
                self.nodes.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.nodes[left] < self.nodes[smallest] {
                smallest = left;
            }
            if right < len && self.nodes[right] < self.nodes[smallest] {
                smallest = right;
            }

            if smallest == index {
                break;
            }

            self.nodes.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: Ord, const N: usize> Default for MinHeap<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
