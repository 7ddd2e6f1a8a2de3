//! Grid dimensions and the linear cell index mapping.
//!
//! A [`GridSize`] is supplied by the host for every generation pass. It defines the
//! mapping `index = x + y * width` shared by shape keys and the flat [`crate::mask::Mask`]
//! buffer.
use std::fmt;

use glam::IVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Width and height of the generation grid in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a grid size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Validates the dimensions, returning an error if either is zero or the
    /// cell count does not fit the index space.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid dimensions must be > 0, got {self}"
            )));
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(Error::InvalidConfig(format!(
                "grid dimensions must fit in i32, got {self}"
            )));
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| Error::InvalidConfig(format!("grid {self} has too many cells")))?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells, `width * height`.
    pub fn total_cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the cell lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Linear index of a cell, or `None` if it lies outside the grid.
    #[inline]
    pub fn index_of(&self, cell: IVec2) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(cell.x as usize + cell.y as usize * self.width as usize)
    }

    /// Inverse of [`GridSize::index_of`].
    #[inline]
    pub fn position_of(&self, index: usize) -> Option<IVec2> {
        if index >= self.total_cells() {
            return None;
        }
        let w = self.width as usize;
        Some(IVec2::new((index % w) as i32, (index / w) as i32))
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
