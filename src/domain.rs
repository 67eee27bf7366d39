//! The printable-ASCII symbol domain and the bitmap used to name sets of
//! domain symbols.

use core::cmp::Ordering;

use bitvec::prelude::*;

use crate::config::{DOMAIN_LEN, FIRST_SYMBOL, LAST_SYMBOL, SYMBOL_WORDS};

/// Domain position of `symbol`, or `None` when it is not printable ASCII.
#[inline]
pub fn index_of(symbol: u8) -> Option<usize> {
    (FIRST_SYMBOL..=LAST_SYMBOL)
        .contains(&symbol)
        .then(|| (symbol - FIRST_SYMBOL) as usize)
}

/// Symbol at domain position `index`. `index` must be below `DOMAIN_LEN`.
#[inline]
pub fn symbol_at(index: usize) -> u8 {
    debug_assert!(index < DOMAIN_LEN);
    FIRST_SYMBOL + index as u8
}

/// A set of domain positions, one bit per symbol.
///
/// Sets order by their lowest member first, so among pairwise disjoint sets
/// (every set that can meet in the heap) the one holding the smallest domain
/// index always sorts first. Sets sharing a lowest member fall back to
/// comparing their backing words, which keeps the order total.
#[derive(Debug, Clone, Copy)]
pub struct SymbolSet(BitArray<[u32; SYMBOL_WORDS], Lsb0>);

impl SymbolSet {
    pub const EMPTY: Self = Self(BitArray::ZERO);

    pub fn singleton(index: usize) -> Self {
        let mut set = Self::EMPTY;
        set.0.set(index, true);
        set
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        for (dst, src) in out
            .0
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.0.as_raw_slice())
        {
            *dst |= *src;
        }
        out
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < DOMAIN_LEN && self.0[index]
    }

    /// Lowest member. `None` only for the empty set, which no tree node holds.
    #[inline]
    pub fn lowest(&self) -> Option<usize> {
        self.0.first_one()
    }

    pub fn len(&self) -> usize {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0.not_any()
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.0
            .as_raw_slice()
            .iter()
            .zip(other.0.as_raw_slice())
            .all(|(a, b)| a & b == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter_ones()
    }
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for SymbolSet {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_raw_slice() == other.0.as_raw_slice()
    }
}

impl Eq for SymbolSet {}

impl Ord for SymbolSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lowest()
            .cmp(&other.lowest())
            .then_with(|| self.0.as_raw_slice().cmp(other.0.as_raw_slice()))
    }
}

impl PartialOrd for SymbolSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
