use core::ops::{Add, Div, Mul, Sub};

/// 2D integer coordinate for grid cells. `x` is the column, `y` the row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord2 {
    pub x: i32,
    pub y: i32,
}

impl Coord2 {
    pub const ZERO: Coord2 = Coord2 { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn manhattan_distance(self, other: Coord2) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    #[inline]
    pub fn to_index(self, width: u32) -> Option<usize> {
        if width == 0 || self.x < 0 || self.y < 0 || self.x >= width as i32 {
            return None;
        }
        Some((self.y as usize) * (width as usize) + (self.x as usize))
    }
}

/// Continuous 2D point or vector in grid space (one unit per cell).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y)
    }

    /// Unit-length copy, or zero when the length is zero or not finite.
    pub fn normalized(self) -> Point2 {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Point2::new(self.x / len, self.y / len)
        } else {
            Point2::ZERO
        }
    }

    #[inline]
    pub fn floor(self) -> Point2 {
        Point2::new(libm::floorf(self.x), libm::floorf(self.y))
    }

    /// Cell containing this point.
    #[inline]
    pub fn floor_to_coord(self) -> Coord2 {
        let f = self.floor();
        Coord2::new(f.x as i32, f.y as i32)
    }

    /// Per-axis sign as a cell step: -1, 0 or +1.
    #[inline]
    pub fn signum_step(self) -> Coord2 {
        Coord2::new(sign(self.x), sign(self.y))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[inline]
fn sign(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Self) -> Self::Output {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Self) -> Self::Output {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point2 {
    type Output = Point2;

    fn mul(self, rhs: f32) -> Self::Output {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

/// Elementwise product.
impl Mul for Point2 {
    type Output = Point2;

    fn mul(self, rhs: Self) -> Self::Output {
        Point2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

/// Elementwise quotient with IEEE-754 semantics (x / 0.0 is ±inf, 0.0 / 0.0 is NaN).
impl Div for Point2 {
    type Output = Point2;

    fn div(self, rhs: Self) -> Self::Output {
        Point2::new(self.x / rhs.x, self.y / rhs.y)
    }
}
