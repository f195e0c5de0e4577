// SPDX-License-Identifier: MIT OR Apache-2.0

pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Yields zero once the input is exhausted.
    pub fn next_u8(&mut self) -> u8 {
        let value = self.data.get(self.offset).copied().unwrap_or(0);
        self.offset = self.offset.saturating_add(1);
        value
    }

    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.offset..).unwrap_or(&[])
    }
}

/// Maps a seed byte onto `[low, high]`.
pub fn bounded(seed: u8, low: usize, high: usize) -> usize {
    low + usize::from(seed) % (high - low + 1)
}
