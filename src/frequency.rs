//! Symbol frequency analysis over the printable domain.

use crate::config::DOMAIN_LEN;
use crate::domain::index_of;
use crate::error::{Error, Result};

/// Occurrence counts indexed by domain position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; DOMAIN_LEN],
    /// Number of positions with a nonzero count.
    distinct: usize,
}

impl Histogram {
    pub const fn new() -> Self {
        Self {
            counts: [0; DOMAIN_LEN],
            distinct: 0,
        }
    }

    /// Reset and count `input`.
    ///
    /// Fails on the first symbol outside the domain; the histogram is left
    /// partially filled in that case and must be recounted before use.
    pub fn count(&mut self, input: &[u8]) -> Result<()> {
        self.counts = [0; DOMAIN_LEN];
        self.distinct = 0;

        for (position, &symbol) in input.iter().enumerate() {
            let i = index_of(symbol).ok_or(Error::Domain { symbol, position })?;
            if self.counts[i] == 0 {
                self.distinct += 1;
            }
            self.counts[i] += 1;
        }
        Ok(())
    }

    pub fn distinct(&self) -> usize {
        self.distinct
    }

    pub fn get(&self, index: usize) -> u32 {
        self.counts[index]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Present symbols as `(domain index, count)` in ascending domain order.
    pub fn present(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i, c))
    }
}

#[cfg(test)]
impl Histogram {
    /// Weights too large to spell out as an input buffer.
    pub(crate) fn set(&mut self, index: usize, count: u32) {
        match (self.counts[index], count) {
            (0, c) if c > 0 => self.distinct += 1,
            (c, 0) if c > 0 => self.distinct -= 1,
            _ => {}
        }
        self.counts[index] = count;
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}
