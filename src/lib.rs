//! Huffman compress-and-verify kernel over printable ASCII.
//!
//! One pass counts symbol frequencies, builds a Huffman tree with a binary
//! min-heap, packs every symbol's prefix code MSB-first into fixed-width
//! words, then walks the tree again to decode and checks the result against
//! the input. All storage is fixed capacity and owned by a
//! [`HuffmanContext`], so nothing allocates during a pass.
//!
//! ```
//! use huffman_kernel::{HuffmanContext, Kernel, code_words_for};
//!
//! let mut ctx: HuffmanContext<11, { code_words_for(11) }> = HuffmanContext::new();
//! let summary = ctx.compress_and_verify(b"hello world").unwrap();
//! assert_eq!(summary.distinct, 8);
//!
//! // The same pass through the shared kernel calling convention.
//! ctx.run(b"hello world");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod config;
pub mod decode;
pub mod domain;
pub mod encode;
pub mod error;
pub mod frequency;
pub mod heap;
pub mod kernel;
pub mod tree;

#[cfg(test)]
mod proptests;

pub use config::{code_words_for, Word, CODE_WORDS, DOMAIN_LEN, INPUT_LEN, WORD_BITS};
pub use decode::decode;
pub use domain::SymbolSet;
pub use encode::{code_for, encode, Code, Codebook, Packed};
pub use error::{Corruption, Error, Result};
pub use frequency::Histogram;
pub use heap::MinHeap;
pub use kernel::{DefaultContext, HuffmanContext, Kernel, Summary};
pub use tree::{Branch, Node, Tree};
