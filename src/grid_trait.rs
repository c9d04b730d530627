use crate::bounds::Bounds;
use crate::coord::Coord2;

/// Cell values that can be read as solid or empty.
pub trait Occupancy {
    fn is_occupied(&self) -> bool;
}

impl Occupancy for bool {
    #[inline]
    fn is_occupied(&self) -> bool {
        *self
    }
}

macro_rules! impl_occupancy_for_int {
    ($($t:ty),*) => {
        $(
            impl Occupancy for $t {
                #[inline]
                fn is_occupied(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_occupancy_for_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Read access to a bounded 2D grid, as needed by the raycaster.
pub trait SpatialGrid {
    type Cell: Occupancy;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn in_bounds(&self, coord: Coord2) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.width() as i32
            && coord.y < self.height() as i32
    }

    /// Continuous extent `[0, width) x [0, height)` rays are clipped to.
    #[inline]
    fn bounds(&self) -> Bounds {
        Bounds::from_extent(self.width(), self.height())
    }

    fn get(&self, coord: Coord2) -> Option<&Self::Cell>;

    /// Out-of-bounds cells read as empty.
    #[inline]
    fn is_occupied(&self, coord: Coord2) -> bool {
        self.get(coord).is_some_and(Occupancy::is_occupied)
    }
}
