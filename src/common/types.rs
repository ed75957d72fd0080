// src/common/types.rs

use super::decode;
use super::frame::{FRAME_SIZE, GRID_COLS, GRID_ROWS, PIXELS};

// --- 4 x 8 Pixel Grid ---

/// One value per sensor pixel, stored row-major (row 0 first, 8 columns per row).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelGrid<T>([T; PIXELS]);

impl<T: Copy> PixelGrid<T> {
    pub const ROWS: usize = GRID_ROWS;
    pub const COLS: usize = GRID_COLS;

    /// Wraps row-major cells.
    pub fn from_cells(cells: [T; PIXELS]) -> Self {
        Self(cells)
    }

    /// Value at (`row`, `col`), or `None` outside the 4 x 8 grid.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < GRID_ROWS && col < GRID_COLS {
            Some(self.0[row * GRID_COLS + col])
        } else {
            None
        }
    }

    /// One row of 8 cells.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < GRID_ROWS {
            let start = row * GRID_COLS;
            Some(&self.0[start..start + GRID_COLS])
        } else {
            None
        }
    }

    pub fn rows(&self) -> core::slice::Chunks<'_, T> {
        self.0.chunks(GRID_COLS)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_cells(self) -> [T; PIXELS] {
        self.0
    }
}

impl<T> From<[T; PIXELS]> for PixelGrid<T> {
    fn from(cells: [T; PIXELS]) -> Self {
        Self(cells)
    }
}

// --- Full Frame Decode ---

/// Every measurement carried by one validated response frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Measurement {
    /// Scalar range.
    pub range: f32,
    /// Scalar reflected intensity.
    pub intensity: f32,
    pub range_grid: PixelGrid<f32>,
    pub intensity_grid: PixelGrid<f32>,
    /// Raw per-pixel status bytes; the device does not document their meaning.
    pub status_grid: PixelGrid<u8>,
}

impl Measurement {
    /// Decodes all fields. The frame must already be validated.
    pub fn from_frame(frame: &[u8; FRAME_SIZE]) -> Self {
        Measurement {
            range: decode::range(frame),
            intensity: decode::intensity(frame),
            range_grid: PixelGrid(decode::range_grid(frame)),
            intensity_grid: PixelGrid(decode::intensity_grid(frame)),
            status_grid: PixelGrid(decode::status_grid(frame)),
        }
    }
}
