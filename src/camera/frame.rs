// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-size intensity frame.

/// One thermal image: `ROWS x COLS` non-negative intensity samples, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<const ROWS: usize, const COLS: usize> {
    samples: [[u16; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Frame<ROWS, COLS> {
    /// All-zero frame.
    pub const fn new() -> Self {
        Self {
            samples: [[0; COLS]; ROWS],
        }
    }

    pub const fn from_rows(samples: [[u16; COLS]; ROWS]) -> Self {
        Self { samples }
    }

    #[inline]
    pub const fn rows(&self) -> usize {
        ROWS
    }

    #[inline]
    pub const fn cols(&self) -> usize {
        COLS
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.samples[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u16) {
        self.samples[row][col] = value;
    }

    /// Fill the rectangle starting at `(row, col)` with `value`, clipped to the frame.
    pub fn fill_block(&mut self, row: usize, col: usize, height: usize, width: usize, value: u16) {
        for r in row..(row + height).min(ROWS) {
            for c in col..(col + width).min(COLS) {
                self.samples[r][c] = value;
            }
        }
    }

    pub fn row(&self, row: usize) -> &[u16; COLS] {
        &self.samples[row]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [u16; COLS] {
        &mut self.samples[row]
    }

    /// Mutable access to every sample in row-major order.
    pub fn samples_mut(&mut self) -> impl Iterator<Item = &mut u16> {
        self.samples.iter_mut().flat_map(|row| row.iter_mut())
    }
}

impl<const ROWS: usize, const COLS: usize> Default for Frame<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}
