//! Dense RGBA pixel grid with bounds-checked access
//!
//! Coordinates are `[x, y]` pairs and every access is validated against
//! `[0,W)x[0,H)`. Color sampling outside the grid yields the white
//! sentinel so neighborhood scans near the edges need no special casing.

use crate::color::rgba::{Rgba, WHITE};
use ndarray::Array2;

/// Offsets of the eight surrounding cells
pub const NEIGHBORS_8: [[i32; 2]; 8] = [
    [-1, -1],
    [0, -1],
    [1, -1],
    [-1, 0],
    [1, 0],
    [-1, 1],
    [0, 1],
    [1, 1],
];

/// An owned RGBA grid, allocated once per run by the host
///
/// The host owns the buffer; the engine borrows it for the duration of a
/// run and mutates it incrementally between blits.
#[derive(Clone, Debug)]
pub struct RasterBuffer {
    pixels: Array2<Rgba>,
    width: usize,
    height: usize,
}

impl RasterBuffer {
    /// Allocate a buffer filled with the given color
    pub fn new(width: usize, height: usize, fill: Rgba) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), fill),
            width,
            height,
        }
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total cell count
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check a coordinate against the grid bounds
    pub const fn contains(&self, position: [i32; 2]) -> bool {
        let [x, y] = position;
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, position: [i32; 2]) -> Option<[usize; 2]> {
        if self.contains(position) {
            Some([position[1] as usize, position[0] as usize])
        } else {
            None
        }
    }

    /// Read a pixel, `None` outside the grid
    pub fn get(&self, position: [i32; 2]) -> Option<Rgba> {
        let index = self.index(position)?;
        self.pixels.get(index).copied()
    }

    /// Read a pixel for color sampling, white outside the grid
    pub fn sample(&self, position: [i32; 2]) -> Rgba {
        self.get(position).unwrap_or(WHITE)
    }

    /// Write a pixel, reporting whether the coordinate was in bounds
    pub fn set(&mut self, position: [i32; 2], color: Rgba) -> bool {
        let Some(index) = self.index(position) else {
            return false;
        };
        if let Some(cell) = self.pixels.get_mut(index) {
            *cell = color;
            return true;
        }
        false
    }

    /// Overwrite every cell with the given color
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Iterate all cells in row-major order as (position, color) pairs
    pub fn cells(&self) -> impl Iterator<Item = ([i32; 2], Rgba)> + '_ {
        self.pixels
            .indexed_iter()
            .map(|((row, col), &color)| ([col as i32, row as i32], color))
    }
}
