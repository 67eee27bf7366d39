//! Prefix-code derivation and MSB-first bit packing.

use bitvec::prelude::*;
use log::trace;

use crate::config::{Word, DOMAIN_LEN, MAX_CODE_LEN, WORD_BITS};
use crate::domain::{index_of, symbol_at};
use crate::error::{Corruption, Error, Result};
use crate::tree::{Branch, Tree};

/// Packed bitstream: `W` words, bit 0 is the most significant bit of word 0.
pub type Packed<const W: usize> = BitArray<[Word; W], Msb0>;

/// A prefix code, right-aligned in `bits`, first branch most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    pub fn bits(&self) -> u128 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn push(&mut self, branch: Branch) {
        self.bits = (self.bits << 1) | branch.bit() as u128;
        self.len += 1;
    }

    /// `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

/// Descend from the root toward `symbol`, recording each branch.
///
/// A tree whose root is a leaf codes its single symbol as one 0 bit.
pub fn code_for(tree: &Tree, symbol: u8) -> Result<Code> {
    let index = index_of(symbol).ok_or(Error::Domain {
        symbol,
        position: 0,
    })?;
    let mut at = tree.root().ok_or(Corruption::EmptyTree)?;
    let mut code = Code::default();

    while let Some(children) = tree.links(at)? {
        if code.len() == MAX_CODE_LEN {
            return Err(Corruption::TooDeep { node: at }.into());
        }
        let branch = tree.branch_toward(children, index);
        code.push(branch);
        at = branch.select(children);
    }

    let reached = tree
        .get(at)
        .is_some_and(|leaf| leaf.symbols().contains(index));
    if !reached {
        return Err(Corruption::UnknownSymbol { symbol }.into());
    }
    if code.is_empty() {
        code.push(Branch::Left);
    }
    Ok(code)
}

/// Every present symbol's code, indexed by domain position.
#[derive(Debug, Clone)]
pub struct Codebook {
    codes: [Code; DOMAIN_LEN],
}

impl Codebook {
    pub fn from_tree(tree: &Tree) -> Result<Self> {
        let mut codes = [Code::default(); DOMAIN_LEN];
        if let Some(root) = tree.root().and_then(|r| tree.get(r)) {
            for index in root.symbols().iter() {
                codes[index] = code_for(tree, symbol_at(index))?;
            }
        }
        Ok(Self { codes })
    }

    /// Code for domain position `index`, `None` if the symbol is absent.
    pub fn get(&self, index: usize) -> Option<Code> {
        self.codes.get(index).copied().filter(|c| !c.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(i, &c)| (i, c))
    }
}

/// Appends codes to a packed buffer, splitting them across word boundaries.
struct BitWriter<'a, const W: usize> {
    out: &'a mut Packed<W>,
    word: usize,
    bit: usize,
}

impl<'a, const W: usize> BitWriter<'a, W> {
    fn new(out: &'a mut Packed<W>) -> Self {
        *out = BitArray::ZERO;
        Self {
            out,
            word: 0,
            bit: 0,
        }
    }

    fn position(&self) -> usize {
        self.word * WORD_BITS + self.bit
    }

    /// Write `code` MSB-first. The leading fragment fills the current word,
    /// the rest continues at the top of the next one.
    fn write(&mut self, code: Code) -> Result<()> {
        let mut bits = code.bits;
        let mut remaining = code.len();

        while remaining > 0 {
            if self.word == W {
                return Err(Error::Capacity {
                    needed: self.position() + remaining,
                    available: W * WORD_BITS,
                });
            }
            let take = remaining.min(WORD_BITS - self.bit);
            let fragment = (bits >> (remaining - take)) as Word;

            let start = self.position();
            self.out[start..start + take].store_be::<Word>(fragment);

            remaining -= take;
            bits &= (1u128 << remaining) - 1;
            self.bit += take;
            if self.bit == WORD_BITS {
                if remaining > 0 {
                    trace!(
                        "code split at word {}: {take} + {remaining} bits",
                        self.word
                    );
                }
                self.word += 1;
                self.bit = 0;
            }
        }
        Ok(())
    }
}

/// Encode `input` into `out`, returning the number of bits written.
///
/// Bits past the returned length are zero. Each symbol's code is found by a
/// fresh descent from the root.
pub fn encode<const W: usize>(tree: &Tree, input: &[u8], out: &mut Packed<W>) -> Result<usize> {
    let mut writer = BitWriter::new(out);
    for (position, &symbol) in input.iter().enumerate() {
        let code = code_for(tree, symbol).map_err(|e| match e {
            Error::Domain { symbol, .. } => Error::Domain { symbol, position },
            other => other,
        })?;
        writer.write(code)?;
    }
    Ok(writer.position())
}
