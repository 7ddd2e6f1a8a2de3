//! Placed shapes and the position-keyed collection that owns them.
//!
//! A [`Shape`] is a single grid cell feature. Its `index` is derived from its cell via
//! [`GridSize::index_of`] once, at creation, and doubles as its key in the owning
//! [`ShapeMap`] and as the reference stored in other shapes' neighbour sets.
use std::collections::HashMap;

use glam::IVec2;

use crate::error::{Error, Result};
use crate::grid::GridSize;

/// Squared Euclidean distance between two cells.
///
/// Integer arithmetic keeps radius comparisons exact: `d < r` iff `d² < r²`.
#[inline]
pub fn distance_squared(a: IVec2, b: IVec2) -> i64 {
    let dx = a.x as i64 - b.x as i64;
    let dy = a.y as i64 - b.y as i64;
    dx * dx + dy * dy
}

/// A point feature placed on a single grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    index: usize,
    position: IVec2,
    neighbours: Vec<usize>,
}

impl Shape {
    /// Creates an unconnected shape at `position`, or `None` if it lies outside `grid`.
    pub fn new(grid: GridSize, position: IVec2) -> Option<Self> {
        let index = grid.index_of(position)?;
        Some(Self {
            index,
            position,
            neighbours: Vec::new(),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Indices of connected shapes, in the order they were linked.
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbours
    }

    pub fn degree(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_connected_to(&self, index: usize) -> bool {
        self.neighbours.contains(&index)
    }

    #[inline]
    pub fn distance_squared_to(&self, other: &Shape) -> i64 {
        distance_squared(self.position, other.position)
    }

    pub(crate) fn link(&mut self, index: usize) -> bool {
        if index == self.index || self.is_connected_to(index) {
            return false;
        }
        self.neighbours.push(index);
        true
    }

    /// Removes `index`, keeping the remaining neighbours in link order.
    pub(crate) fn unlink(&mut self, index: usize) -> bool {
        match self.neighbours.iter().position(|&n| n == index) {
            Some(pos) => {
                self.neighbours.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_neighbours(&mut self) {
        self.neighbours.clear();
    }
}

/// Shapes keyed by their cell index, iterated in insertion order.
///
/// At most one shape occupies a cell; colliding insertions are rejected.
#[derive(Clone, Debug)]
pub struct ShapeMap {
    grid: GridSize,
    shapes: Vec<Shape>,
    slots: HashMap<usize, usize>,
}

impl ShapeMap {
    /// Creates an empty map for shapes on `grid`.
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            shapes: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Builds a map from cells, failing on cells outside the grid or on duplicates.
    pub fn from_cells<I>(grid: GridSize, cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = IVec2>,
    {
        let mut map = Self::new(grid);
        for cell in cells {
            let shape = Shape::new(grid, cell).ok_or_else(|| {
                Error::InvalidConfig(format!("cell {cell} lies outside the {grid} grid"))
            })?;
            if !map.insert(shape) {
                return Err(Error::InvalidConfig(format!(
                    "cell {cell} is already occupied"
                )));
            }
        }
        Ok(map)
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Key a shape at `cell` would have in this map.
    pub fn key_of(&self, cell: IVec2) -> Option<usize> {
        self.grid.index_of(cell)
    }

    pub fn contains_key(&self, key: usize) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn get(&self, key: usize) -> Option<&Shape> {
        self.slots.get(&key).map(|&slot| &self.shapes[slot])
    }

    pub(crate) fn get_mut(&mut self, key: usize) -> Option<&mut Shape> {
        match self.slots.get(&key) {
            Some(&slot) => Some(&mut self.shapes[slot]),
            None => None,
        }
    }

    /// Inserts `shape` keyed by its index. Returns `false` if the cell is taken or the
    /// shape's index does not match its position on this grid.
    pub fn insert(&mut self, shape: Shape) -> bool {
        if self.key_of(shape.position) != Some(shape.index) || self.contains_key(shape.index) {
            return false;
        }
        self.slots.insert(shape.index, self.shapes.len());
        self.shapes.push(shape);
        true
    }

    /// Whether any shape lies strictly closer than `radius` to `cell`.
    pub fn any_within(&self, cell: IVec2, radius: u32) -> bool {
        let r2 = radius as i64 * radius as i64;
        self.shapes
            .iter()
            .any(|s| distance_squared(s.position, cell) < r2)
    }

    /// Shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.shapes.iter().map(|s| s.index)
    }

    /// Number of distinct connections across all shapes.
    pub fn edge_count(&self) -> usize {
        self.shapes.iter().map(Shape::degree).sum::<usize>() / 2
    }

    pub(crate) fn clear_neighbours(&mut self) {
        for shape in &mut self.shapes {
            shape.clear_neighbours();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSize {
        GridSize::new(10, 10).unwrap()
    }

    #[test]
    fn shape_index_follows_linear_mapping() {
        let shape = Shape::new(grid(), IVec2::new(3, 4)).unwrap();
        assert_eq!(shape.index(), 43);
        assert_eq!(shape.position(), IVec2::new(3, 4));
        assert_eq!(shape.degree(), 0);
        assert!(Shape::new(grid(), IVec2::new(10, 0)).is_none());
    }

    #[test]
    fn insert_rejects_occupied_cell() {
        let mut map = ShapeMap::new(grid());
        assert!(map.insert(Shape::new(grid(), IVec2::new(1, 1)).unwrap()));
        assert!(!map.insert(Shape::new(grid(), IVec2::new(1, 1)).unwrap()));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn insert_rejects_shape_from_other_grid() {
        let other = GridSize::new(5, 5).unwrap();
        let mut map = ShapeMap::new(grid());
        assert!(!map.insert(Shape::new(other, IVec2::new(1, 1)).unwrap()));
        assert!(map.is_empty());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let cells = [IVec2::new(9, 9), IVec2::new(0, 0), IVec2::new(5, 2)];
        let map = ShapeMap::from_cells(grid(), cells).unwrap();
        let positions: Vec<_> = map.iter().map(Shape::position).collect();
        assert_eq!(positions, cells.to_vec());
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec![99, 0, 25]);
    }

    #[test]
    fn keys_match_owned_shape_index() {
        let map = ShapeMap::from_cells(grid(), [IVec2::new(2, 7), IVec2::new(8, 1)]).unwrap();
        for key in map.keys() {
            let shape = map.get(key).unwrap();
            assert_eq!(shape.index(), key);
            assert_eq!(map.key_of(shape.position()), Some(key));
        }
    }

    #[test]
    fn from_cells_reports_bad_input() {
        assert!(ShapeMap::from_cells(grid(), [IVec2::new(-1, 0)]).is_err());
        assert!(ShapeMap::from_cells(grid(), [IVec2::new(1, 0), IVec2::new(1, 0)]).is_err());
    }

    #[test]
    fn any_within_is_strict() {
        let map = ShapeMap::from_cells(grid(), [IVec2::new(0, 0)]).unwrap();
        assert!(map.any_within(IVec2::new(2, 0), 3));
        assert!(!map.any_within(IVec2::new(3, 0), 3));
        // (2, 2) is sqrt(8) ~ 2.83 away.
        assert!(map.any_within(IVec2::new(2, 2), 3));
    }

    #[test]
    fn link_refuses_self_loops() {
        let mut shape = Shape::new(grid(), IVec2::new(1, 0)).unwrap();
        assert!(!shape.link(shape.index()));
        assert!(shape.link(5));
        assert!(!shape.link(5));
        assert!(shape.unlink(5));
        assert_eq!(shape.degree(), 0);
    }

    #[test]
    fn unlink_keeps_link_order() {
        let mut shape = Shape::new(grid(), IVec2::new(1, 0)).unwrap();
        for n in [9, 3, 7, 5] {
            assert!(shape.link(n));
        }
        assert!(shape.unlink(3));
        assert!(!shape.unlink(3));
        assert_eq!(shape.neighbours(), &[9, 7, 5]);
    }
}
