//! Bit-by-bit tree walk over a packed stream.
//!
//! The walk is a small state machine: the state is a tree index, each bit
//! picks a child, and reaching a leaf emits its symbol and returns to the
//! root.

use crate::config::WORD_BITS;
use crate::domain::symbol_at;
use crate::encode::Packed;
use crate::error::{Corruption, Result};
use crate::tree::{Branch, Tree};

fn leaf_symbol(tree: &Tree, at: usize) -> Result<u8> {
    tree.get(at)
        .and_then(|leaf| leaf.symbols().lowest())
        .map(symbol_at)
        .ok_or_else(|| Corruption::EmptyLeaf { node: at }.into())
}

/// Decode the first `bit_len` bits of `words` into `out`, returning how many
/// symbols were written.
///
/// A tree whose root is a leaf reads every bit as one copy of its symbol and
/// accepts only 0 bits.
pub fn decode<const W: usize>(
    tree: &Tree,
    words: &Packed<W>,
    bit_len: usize,
    out: &mut [u8],
) -> Result<usize> {
    let capacity = W * WORD_BITS;
    if bit_len > capacity {
        return Err(Corruption::LengthOverrun {
            bits: bit_len,
            capacity,
        }
        .into());
    }
    if bit_len == 0 {
        return Ok(0);
    }

    let root = tree.root().ok_or(Corruption::EmptyTree)?;
    let mut written = 0;
    let mut emit = |symbol: u8| -> Result<()> {
        let slot = out
            .get_mut(written)
            .ok_or(Corruption::OutputOverflow { capacity: written })?;
        *slot = symbol;
        written += 1;
        Ok(())
    };

    let mut at = root;
    for (position, bit) in words[..bit_len].iter().by_vals().enumerate() {
        let Some(children) = tree.links(at)? else {
            if bit {
                return Err(Corruption::UnexpectedBit { position }.into());
            }
            emit(leaf_symbol(tree, root)?)?;
            continue;
        };

        at = Branch::from_bit(bit).select(children);
        if tree.links(at)?.is_none() {
            emit(leaf_symbol(tree, at)?)?;
            at = root;
        }
    }

    if at != root {
        return Err(Corruption::TruncatedCode { consumed: bit_len }.into());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::vec;

    use bitvec::prelude::*;

    use super::*;
    use crate::domain::index_of;
    use crate::encode::{encode, Codebook};
    use crate::error::Error;
    use crate::frequency::Histogram;
    use crate::heap::MinHeap;

    fn build(input: &[u8]) -> Tree {
        let mut histogram = Histogram::new();
        histogram.count(input).unwrap();
        let mut tree = Tree::new();
        tree.build(&histogram, &mut MinHeap::new()).unwrap();
        tree
    }

    fn round_trip<const W: usize>(input: &[u8]) -> (usize, std::vec::Vec<u8>) {
        let tree = build(input);
        let mut words: Packed<W> = BitArray::ZERO;
        let bits = encode(&tree, input, &mut words).unwrap();
        let mut out = vec![0u8; input.len()];
        let n = decode(&tree, &words, bits, &mut out).unwrap();
        assert_eq!(n, input.len());
        (bits, out)
    }

    #[test]
    fn aaab() {
        let (bits, out) = round_trip::<2>(b"aaab");
        assert_eq!(bits, 4);
        assert_eq!(out, b"aaab");
    }

    #[test]
    fn text_round_trip() {
        let s = b"This is a really long message, I sure do hope it encodes and decodes properly.";
        let (_, out) = round_trip::<32>(s);
        assert_eq!(&out[..], &s[..]);
    }

    #[test]
    fn boundary_and_split_lengths() {
        // 4 equally likely symbols -> 2-bit codes; 16 symbols fill one word.
        let (bits, out) = round_trip::<4>(b"abcdabcdabcdabcd");
        assert_eq!(bits, 32);
        assert_eq!(out, b"abcdabcdabcdabcd");

        // 8 equally likely symbols -> 3-bit codes; the 11th straddles.
        let (bits, out) = round_trip::<4>(b"abcdefghabcdefgh");
        assert_eq!(bits, 48);
        assert_eq!(out, b"abcdefghabcdefgh");
    }

    #[test]
    fn codes_longer_than_a_word() {
        // Fibonacci weights chain every merge, so 36 symbols reach depth 35.
        let mut histogram = Histogram::new();
        let (mut a, mut b) = (1u32, 1u32);
        for index in 0..36 {
            histogram.set(index, a);
            (a, b) = (b, a + b);
        }
        let mut tree = Tree::new();
        tree.build(&histogram, &mut MinHeap::new()).unwrap();
        assert!(tree.is_consistent());

        let book = Codebook::from_tree(&tree).unwrap();
        let deepest = book.iter().map(|(_, c)| c.len()).max().unwrap();
        assert_eq!(deepest, 35);
        assert!(deepest > WORD_BITS);
        assert_eq!(book.get(35).unwrap().len(), 1);

        let message = [0, 1, 2, 3, 0, 1, 2, 3, 1, 0, 3, 2].map(symbol_at);
        let expected: usize = message
            .iter()
            .map(|&s| book.get(index_of(s).unwrap()).unwrap().len())
            .sum();

        let mut words: Packed<16> = BitArray::ZERO;
        let bits = encode(&tree, &message, &mut words).unwrap();
        assert_eq!(bits, expected);
        assert_eq!(bits, 3 * (35 + 35 + 34 + 33));

        let mut out = [0u8; 12];
        assert_eq!(decode(&tree, &words, bits, &mut out), Ok(12));
        assert_eq!(out, message);
    }

    #[test]
    fn single_symbol_policy() {
        let (bits, out) = round_trip::<2>(b"kkkkk");
        assert_eq!(bits, 5);
        assert_eq!(out, b"kkkkk");

        let tree = build(b"k");
        let mut words: Packed<1> = BitArray::ZERO;
        words.set(2, true);
        let mut out = [0u8; 4];
        assert_eq!(
            decode(&tree, &words, 4, &mut out),
            Err(Error::Corrupt(Corruption::UnexpectedBit { position: 2 }))
        );
    }

    #[test]
    fn truncated_stream() {
        let tree = build(b"abcdefgh");
        let mut words: Packed<1> = BitArray::ZERO;
        let bits = encode(&tree, b"ab", &mut words).unwrap();
        let mut out = [0u8; 2];
        assert_eq!(
            decode(&tree, &words, bits - 1, &mut out),
            Err(Error::Corrupt(Corruption::TruncatedCode { consumed: 5 }))
        );
    }

    #[test]
    fn length_beyond_buffer() {
        let tree = build(b"ab");
        let words: Packed<1> = BitArray::ZERO;
        let mut out = [0u8; 64];
        assert_eq!(
            decode(&tree, &words, 33, &mut out),
            Err(Error::Corrupt(Corruption::LengthOverrun {
                bits: 33,
                capacity: 32
            }))
        );
    }

    #[test]
    fn output_overflow() {
        let tree = build(b"ab");
        let words: Packed<1> = BitArray::ZERO;
        let mut out = [0u8; 3];
        assert_eq!(
            decode(&tree, &words, 4, &mut out),
            Err(Error::Corrupt(Corruption::OutputOverflow { capacity: 3 }))
        );
    }

    #[test]
    fn half_leaf_is_fatal() {
        let mut tree = build(b"aaab");
        let mut words: Packed<1> = BitArray::ZERO;
        let bits = encode(&tree, b"aaab", &mut words).unwrap();
        tree.node_mut(2).set_links(None, Some(1));
        let mut out = [0u8; 4];
        assert_eq!(
            decode(&tree, &words, bits, &mut out),
            Err(Error::Corrupt(Corruption::HalfLeaf { node: 2 }))
        );
    }

    #[test]
    fn empty_stream() {
        let mut out = [0u8; 1];
        let words: Packed<1> = BitArray::ZERO;
        assert_eq!(decode(&Tree::new(), &words, 0, &mut out), Ok(0));
        assert_eq!(
            decode(&Tree::new(), &words, 1, &mut out),
            Err(Error::Corrupt(Corruption::EmptyTree))
        );
    }
}
