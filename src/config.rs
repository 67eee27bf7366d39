//! Compile-time sizing.
//!
//! Every buffer the kernel touches is sized from the constants below. The
//! derived capacities are checked with `const` assertions so an undersized
//! configuration fails to build instead of failing mid-run.

/// First symbol of the domain (space).
pub const FIRST_SYMBOL: u8 = b' ';

/// Last symbol of the domain (tilde).
pub const LAST_SYMBOL: u8 = b'~';

/// Number of symbols in the domain.
pub const DOMAIN_LEN: usize = (LAST_SYMBOL - FIRST_SYMBOL) as usize + 1;

/// Storage unit of the packed bitstream.
pub type Word = u32;

/// Bits per packed word.
pub const WORD_BITS: usize = Word::BITS as usize;

/// Words backing one symbol bitmap.
pub const SYMBOL_WORDS: usize = DOMAIN_LEN.div_ceil(WORD_BITS);

/// At most one heap entry per distinct symbol.
pub const HEAP_CAPACITY: usize = DOMAIN_LEN;

/// A full binary tree over `DOMAIN_LEN` leaves.
pub const TREE_CAPACITY: usize = 2 * DOMAIN_LEN - 1;

/// Deepest possible code: a fully skewed tree over the whole domain.
pub const MAX_CODE_LEN: usize = DOMAIN_LEN - 1;

/// Bits of a fixed-length code covering the domain, `ceil(log2(DOMAIN_LEN))`.
///
/// A Huffman code is never longer in total than this fixed-length code, so
/// `n * FIXED_CODE_LEN` bounds the encoded length of `n` symbols.
pub const FIXED_CODE_LEN: usize = (usize::BITS - (DOMAIN_LEN - 1).leading_zeros()) as usize;

/// Symbols per kernel invocation.
pub const INPUT_LEN: usize = 1000;

/// Packed words needed for `input_len` symbols, plus one worst-case code of
/// slack.
pub const fn code_words_for(input_len: usize) -> usize {
    (input_len * FIXED_CODE_LEN + MAX_CODE_LEN).div_ceil(WORD_BITS)
}

/// Packed words for the default kernel length.
pub const CODE_WORDS: usize = code_words_for(INPUT_LEN);

const _: () = assert!(DOMAIN_LEN == 95);
const _: () = assert!(SYMBOL_WORDS * WORD_BITS >= DOMAIN_LEN);
const _: () = assert!(MAX_CODE_LEN < u128::BITS as usize);
const _: () = assert!(1 << FIXED_CODE_LEN >= DOMAIN_LEN);
const _: () = assert!(CODE_WORDS * WORD_BITS >= INPUT_LEN * FIXED_CODE_LEN);
