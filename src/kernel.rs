//! The benchmark entry point: one reusable context that owns every buffer a
//! compress-and-verify pass needs.

use bitvec::prelude::*;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{code_words_for, CODE_WORDS, HEAP_CAPACITY, INPUT_LEN, WORD_BITS};
use crate::decode::decode;
use crate::encode::{encode, Packed};
use crate::error::{Error, Result};
use crate::frequency::Histogram;
use crate::heap::MinHeap;
use crate::tree::{Node, Tree};

/// Shared calling convention of the benchmark kernels: take one fixed-length
/// buffer, do the work, return nothing. A failure aborts the invocation.
pub trait Kernel<const N: usize> {
    type Sample;

    fn run(&mut self, input: &[Self::Sample; N]);
}

/// What one pass produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub symbols: usize,
    pub distinct: usize,
    pub tree_nodes: usize,
    pub encoded_bits: usize,
    pub words_used: usize,
}

/// Working storage for `N`-symbol inputs packed into `W` words.
///
/// Every pass starts from scratch, so one context can be reused across
/// timed iterations; separate contexts share nothing.
#[derive(Debug, Clone)]
pub struct HuffmanContext<const N: usize, const W: usize> {
    histogram: Histogram,
    heap: MinHeap<Node, HEAP_CAPACITY>,
    tree: Tree,
    words: Packed<W>,
    bit_len: usize,
    decoded: [u8; N],
}

/// The context sized for the default kernel length.
pub type DefaultContext = HuffmanContext<INPUT_LEN, CODE_WORDS>;

impl<const N: usize, const W: usize> HuffmanContext<N, W> {
    const SIZED: () = {
        assert!(W >= code_words_for(N), "packed buffer too small for N symbols");
        assert!(N <= u32::MAX as usize, "weights are 32-bit");
    };

    pub fn new() -> Self {
        let () = Self::SIZED;
        Self {
            histogram: Histogram::new(),
            heap: MinHeap::new(),
            tree: Tree::new(),
            words: BitArray::ZERO,
            bit_len: 0,
            decoded: [0; N],
        }
    }

    /// Count, build the tree and pack `input`. Returns the encoded length in
    /// bits.
    pub fn compress(&mut self, input: &[u8; N]) -> Result<usize> {
        self.bit_len = 0;
        self.histogram.count(input)?;
        self.tree.build(&self.histogram, &mut self.heap)?;
        self.bit_len = encode(&self.tree, input, &mut self.words)?;
        Ok(self.bit_len)
    }

    /// Decode the packed stream from the last `compress`.
    pub fn decompress(&mut self) -> Result<&[u8; N]> {
        let n = decode(&self.tree, &self.words, self.bit_len, &mut self.decoded)?;
        if n != N {
            return Err(Error::Mismatch { position: n });
        }
        Ok(&self.decoded)
    }

    /// Compress `input`, decode the result and require it to match.
    pub fn compress_and_verify(&mut self, input: &[u8; N]) -> Result<Summary> {
        self.compress(input)?;
        let decoded = self.decompress()?;
        if let Some(position) = decoded.iter().zip(input).position(|(a, b)| a != b) {
            return Err(Error::Mismatch { position });
        }

        let summary = self.summary();
        debug!(
            "huffman: {} symbols, {} distinct, {} nodes, {} bits in {} words",
            summary.symbols,
            summary.distinct,
            summary.tree_nodes,
            summary.encoded_bits,
            summary.words_used
        );
        Ok(summary)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            symbols: N,
            distinct: self.histogram.distinct(),
            tree_nodes: self.tree.len(),
            encoded_bits: self.bit_len,
            words_used: self.bit_len.div_ceil(WORD_BITS),
        }
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn packed(&self) -> &Packed<W> {
        &self.words
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }
}

impl<const N: usize, const W: usize> Default for HuffmanContext<N, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const W: usize> Kernel<N> for HuffmanContext<N, W> {
    type Sample = u8;

    fn run(&mut self, input: &[u8; N]) {
        if let Err(e) = self.compress_and_verify(input) {
            panic!("huffman kernel aborted: {e}");
        }
    }
}
