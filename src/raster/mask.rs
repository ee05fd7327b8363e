//! Filled-set membership tracking over the grid

use crate::raster::buffer::NEIGHBORS_8;
use bitvec::prelude::*;

/// Tracks which cells an algorithm has filled
///
/// Marks are never cleared within a run, so the fill count is monotone
/// and bounded by the grid area.
#[derive(Clone, Debug)]
pub struct CoverageMask {
    bits: BitVec,
    width: usize,
    height: usize,
    filled: usize,
}

impl CoverageMask {
    /// Create an empty mask for a grid of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            bits: bitvec![0; width * height],
            width,
            height,
            filled: 0,
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

    fn index(&self, position: [i32; 2]) -> Option<usize> {
        let [x, y] = position;
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some((y as usize) * self.width + x as usize)
        } else {
            None
        }
    }

    /// Mark a cell filled, reporting whether it was newly marked
    ///
    /// Out-of-bounds coordinates are ignored.
    pub fn mark(&mut self, position: [i32; 2]) -> bool {
        let Some(index) = self.index(position) else {
            return false;
        };
        if self.bits.get(index).as_deref() == Some(&true) {
            return false;
        }
        self.bits.set(index, true);
        self.filled += 1;
        true
    }

    /// Test membership; out-of-bounds cells are never filled
    pub fn is_filled(&self, position: [i32; 2]) -> bool {
        self.index(position)
            .is_some_and(|index| self.bits.get(index).as_deref() == Some(&true))
    }

    /// Number of filled cells
    pub const fn filled(&self) -> usize {
        self.filled
    }

    /// Whether every cell is filled
    pub const fn is_full(&self) -> bool {
        self.filled >= self.area()
    }

    /// Count filled cells among the eight neighbors
    pub fn filled_neighbors(&self, position: [i32; 2]) -> usize {
        NEIGHBORS_8
            .iter()
            .filter(|&&[dx, dy]| self.is_filled([position[0] + dx, position[1] + dy]))
            .count()
    }
}
