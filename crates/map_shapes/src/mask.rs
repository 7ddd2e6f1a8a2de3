//! Binary occupancy mask over the generation grid.
//!
//! Cells are stored row-major as `f32` values that are either `0.0` (empty) or `1.0`
//! (occupied by a shape or a corridor segment), which is the buffer format hosts read.
use glam::IVec2;

use crate::grid::GridSize;

pub const EMPTY: f32 = 0.0;
pub const OCCUPIED: f32 = 1.0;

/// A flat `width * height` mask with values in `{0.0, 1.0}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    grid: GridSize,
    data: Vec<f32>,
}

impl Mask {
    /// Create a new mask for the given grid, initializing all cells to empty.
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            data: vec![EMPTY; grid.total_cells()],
        }
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether this mask can be served for `grid` without recomputation.
    pub fn is_sized_for(&self, grid: GridSize) -> bool {
        self.grid == grid && self.data.len() == grid.total_cells()
    }

    /// Value at `cell`, returning `0.0` if out of bounds.
    pub fn get(&self, cell: IVec2) -> f32 {
        self.grid
            .index_of(cell)
            .map(|i| self.data[i])
            .unwrap_or(EMPTY)
    }

    pub fn is_occupied(&self, cell: IVec2) -> bool {
        self.get(cell) == OCCUPIED
    }

    /// Marks `cell` as occupied. Out-of-bounds cells are ignored and reported as `false`.
    pub fn mark(&mut self, cell: IVec2) -> bool {
        match self.grid.index_of(cell) {
            Some(i) => {
                self.data[i] = OCCUPIED;
                true
            }
            None => false,
        }
    }

    /// Marks every cell yielded by `cells`.
    pub fn mark_all<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = IVec2>,
    {
        for cell in cells {
            self.mark(cell);
        }
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|v| **v == OCCUPIED).count()
    }

    /// Iterates the occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == OCCUPIED)
            .filter_map(|(i, _)| self.grid.position_of(i))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}
