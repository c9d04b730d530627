//! Axis-aligned bounding box and the ray slab test.
//!
//! [`Bounds::slab`] clips a ray against the box and reports the entry and
//! exit ray parameters. A zero direction component divides to a signed
//! infinity, which makes that axis drop out of the min/max reduction without
//! any special casing. The only value patched is the `0 / 0` produced when
//! the origin sits exactly on a plane the ray runs parallel to.

use crate::coord::Point2;

/// Axis-aligned box in continuous grid space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Point2,
    pub max: Point2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Entry and exit parameters of a ray against a [`Bounds`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlabHit {
    pub t_near: f32,
    pub t_far: f32,
    /// Axis whose slab sets `t_near`; x on a tie.
    pub near_axis: Axis,
}

impl SlabHit {
    /// True when the ray overlaps the box at or ahead of its origin.
    #[inline]
    pub fn intersects(&self) -> bool {
        self.t_near <= self.t_far && self.t_far > 0.0
    }
}

impl Bounds {
    #[inline]
    pub const fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// `[0, width) x [0, height)`, the extent of a grid of that size.
    #[inline]
    pub fn from_extent(width: u32, height: u32) -> Self {
        Self::new(Point2::ZERO, Point2::new(width as f32, height as f32))
    }

    /// Slab test of the ray `origin + direction * t` against this box.
    ///
    /// `direction` does not have to be normalized, but the parameters are
    /// expressed in multiples of it. A ray lying in a box plane counts as
    /// inside that plane's slab: that `0 / 0` is replaced explicitly, since
    /// `f32::min`/`f32::max` would otherwise drop it in favour of the other
    /// plane's infinity.
    pub fn slab(&self, origin: Point2, direction: Point2) -> SlabHit {
        let t1 = plane_t(self.min.x, origin.x, direction.x, f32::NEG_INFINITY);
        let t2 = plane_t(self.max.x, origin.x, direction.x, f32::INFINITY);
        let t3 = plane_t(self.min.y, origin.y, direction.y, f32::NEG_INFINITY);
        let t4 = plane_t(self.max.y, origin.y, direction.y, f32::INFINITY);

        let near_x = t1.min(t2);
        let near_y = t3.min(t4);
        SlabHit {
            t_near: near_x.max(near_y),
            t_far: t1.max(t2).min(t3.max(t4)),
            near_axis: if near_x >= near_y { Axis::X } else { Axis::Y },
        }
    }
}

/// Ray parameter at which `origin + direction * t` reaches `plane`.
/// Division by a zero direction stays IEEE-754 (signed infinity); only the
/// in-plane `0 / 0` case is replaced by `in_plane`.
#[inline]
fn plane_t(plane: f32, origin: f32, direction: f32, in_plane: f32) -> f32 {
    let t = (plane - origin) / direction;
    if t.is_nan() { in_plane } else { t }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid16() -> Bounds {
        Bounds::from_extent(16, 16)
    }

    #[test]
    fn slab_from_inside() {
        let hit = grid16().slab(Point2::new(8.5, 0.5), Point2::new(0.0, 1.0));
        assert!(hit.intersects());
        assert_relative_eq!(hit.t_near, -0.5);
        assert_relative_eq!(hit.t_far, 15.5);
    }

    #[test]
    fn slab_from_outside_toward_box() {
        let hit = grid16().slab(Point2::new(-4.0, 3.0), Point2::new(1.0, 0.0));
        assert!(hit.intersects());
        assert_relative_eq!(hit.t_near, 4.0);
        assert_relative_eq!(hit.t_far, 20.0);
        assert_eq!(hit.near_axis, Axis::X);
    }

    #[test]
    fn slab_reports_entry_through_top_edge() {
        let hit = grid16().slab(Point2::new(3.0, -2.0), Point2::new(0.2, 1.0).normalized());
        assert!(hit.intersects());
        assert_eq!(hit.near_axis, Axis::Y);
    }

    #[test]
    fn slab_box_behind_ray() {
        let hit = grid16().slab(Point2::new(-4.0, 3.0), Point2::new(-1.0, 0.0));
        assert!(!hit.intersects());
        assert!(hit.t_far <= 0.0);
    }

    #[test]
    fn slab_parallel_outside_misses() {
        // Parallel to x but above the box: the y slab is (+inf, +inf).
        let hit = grid16().slab(Point2::new(2.0, -1.0), Point2::new(1.0, 0.0));
        assert_eq!(hit.t_near, f32::INFINITY);
        assert!(!hit.intersects());
    }

    #[test]
    fn slab_diagonal_passing_beside_corner() {
        let hit = grid16().slab(Point2::new(17.0, -3.0), Point2::new(1.0, 1.0).normalized());
        assert!(!hit.intersects());
    }

    #[test]
    fn slab_origin_on_parallel_plane() {
        // Lying in the y = 0 plane gives 0/0 for the min side.
        let hit = grid16().slab(Point2::new(2.0, 0.0), Point2::new(1.0, 0.0));
        assert!(hit.intersects());
        assert_relative_eq!(hit.t_near, -2.0);
        assert_relative_eq!(hit.t_far, 14.0);
    }

    #[test]
    fn slab_origin_on_far_parallel_plane() {
        let hit = grid16().slab(Point2::new(2.0, 16.0), Point2::new(1.0, 0.0));
        assert!(hit.intersects());
        assert_relative_eq!(hit.t_far, 14.0);
    }
}
