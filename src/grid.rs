use alloc::vec::Vec;

use crate::coord::Coord2;
use crate::error::GridcastError;
use crate::grid_trait::{Occupancy, SpatialGrid};

/// 2D rectangular grid backed by a flat row-major Vec.
///
/// The size is fixed at construction; cells can be rewritten but the grid
/// never grows or shrinks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    cells: Vec<T>,
    width: u32,
    height: u32,
}

impl<T: Clone> Grid<T> {
    pub fn new_filled(width: u32, height: u32, fill: T) -> Self {
        let len = width as usize * height as usize;
        Self {
            cells: alloc::vec![fill; len],
            width,
            height,
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(i32, i32) -> T) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(f(x, y));
            }
        }
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn from_vec(width: u32, height: u32, cells: Vec<T>) -> Result<Self, GridcastError> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(GridcastError::GridSizeMismatch {
                expected,
                got: cells.len(),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord2) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.width as i32
            && coord.y < self.height as i32
    }

    pub fn get(&self, coord: Coord2) -> Option<&T> {
        self.coord_to_index(coord).and_then(|i| self.cells.get(i))
    }

    /// Writes `value` at `coord`; out-of-bounds writes are ignored.
    pub fn set(&mut self, coord: Coord2, value: T) {
        if let Some(index) = self.coord_to_index(coord) {
            self.cells[index] = value;
        }
    }

    pub fn try_set(&mut self, coord: Coord2, value: T) -> Result<(), GridcastError> {
        let index = self
            .coord_to_index(coord)
            .ok_or(GridcastError::OutOfBounds {
                coord,
                width: self.width,
                height: self.height,
            })?;
        self.cells[index] = value;
        Ok(())
    }

    pub fn coord_to_index(&self, coord: Coord2) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        coord.to_index(self.width)
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }
}

impl<T: Clone + Default> Grid<T> {
    /// N x N grid of default (empty) cells.
    pub fn square(size: u32) -> Self {
        Self::new_filled(size, size, T::default())
    }
}

impl<T: Clone + Occupancy> Grid<T> {
    pub fn is_occupied(&self, coord: Coord2) -> bool {
        SpatialGrid::is_occupied(self, coord)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }
}

impl<T: Clone + Occupancy> SpatialGrid for Grid<T> {
    type Cell = T;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn in_bounds(&self, coord: Coord2) -> bool {
        Grid::in_bounds(self, coord)
    }

    fn get(&self, coord: Coord2) -> Option<&T> {
        Grid::get(self, coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_square_is_empty() {
        let g: Grid<i32> = Grid::square(4);
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 4);
        assert_eq!(g.occupied_count(), 0);
    }

    #[test]
    fn grid_from_fn() {
        let g = Grid::from_fn(3, 2, |x, y| x + y * 10);
        assert_eq!(g.get(Coord2::new(2, 1)), Some(&12));
    }

    #[test]
    fn grid_from_vec_row_major() {
        let mut cells = alloc::vec![0i32; 16 * 16];
        cells[16 * 8 + 3] = 255;
        let g = Grid::from_vec(16, 16, cells).unwrap();
        assert!(g.is_occupied(Coord2::new(3, 8)));
        assert!(!g.is_occupied(Coord2::new(8, 3)));
    }

    #[test]
    fn grid_from_vec_size_mismatch() {
        let err = Grid::from_vec(3, 3, alloc::vec![0u8; 8]).unwrap_err();
        assert_eq!(
            err,
            GridcastError::GridSizeMismatch {
                expected: 9,
                got: 8
            }
        );
    }

    #[test]
    fn grid_set_get() {
        let mut g = Grid::new_filled(2, 2, false);
        g.set(Coord2::new(1, 1), true);
        assert_eq!(g.get(Coord2::new(1, 1)), Some(&true));
    }

    #[test]
    fn grid_out_of_bounds() {
        let mut g = Grid::new_filled(2, 2, 0u8);
        assert_eq!(g.get(Coord2::new(2, 0)), None);
        assert!(!g.is_occupied(Coord2::new(-1, 0)));
        g.set(Coord2::new(5, 5), 1);
        assert_eq!(g.occupied_count(), 0);
    }

    #[test]
    fn grid_try_set_out_of_bounds() {
        let mut g = Grid::new_filled(2, 3, 0u8);
        assert_eq!(
            g.try_set(Coord2::new(2, 0), 1),
            Err(GridcastError::OutOfBounds {
                coord: Coord2::new(2, 0),
                width: 2,
                height: 3
            })
        );
        assert_eq!(g.try_set(Coord2::new(1, 2), 1), Ok(()));
        assert_eq!(g.occupied_count(), 1);
    }

    #[test]
    fn grid_bounds_cover_extent() {
        let g = Grid::new_filled(5, 3, 0u8);
        let b = SpatialGrid::bounds(&g);
        assert_eq!(b.min, crate::coord::Point2::ZERO);
        assert_eq!(b.max, crate::coord::Point2::new(5.0, 3.0));
    }
}
