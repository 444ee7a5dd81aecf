//! Point and Bounds: Positions and the stage rectangle.

use rand::Rng;

/// A position on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate (positive = right).
    pub x: f64,
    /// Vertical coordinate (positive = up).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The stage origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Component-wise sum.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A symmetric rectangle around the origin: `[-half_width, half_width] ×
/// [-half_height, half_height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Half of the stage width.
    pub half_width: i32,
    /// Half of the stage height.
    pub half_height: i32,
}

impl Bounds {
    /// Create bounds from half extents. Negative extents are flipped.
    #[inline]
    pub const fn new(half_width: i32, half_height: i32) -> Self {
        Self {
            half_width: half_width.saturating_abs(),
            half_height: half_height.saturating_abs(),
        }
    }

    /// Whether both half extents are non-negative.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.half_width >= 0 && self.half_height >= 0
    }

    /// Half extents with the sign dropped, for bounds built field by field.
    #[inline]
    const fn extents(&self) -> (i32, i32) {
        (self.half_width.saturating_abs(), self.half_height.saturating_abs())
    }

    /// The classic 480×360 stage.
    pub const STAGE: Self = Self::new(240, 180);

    /// Check if a point lies inside the rectangle (edges included).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        let (hw, hh) = self.extents();
        point.x.abs() <= f64::from(hw) && point.y.abs() <= f64::from(hh)
    }

    /// Draw a uniformly distributed whole-number point inside the rectangle.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let (hw, hh) = self.extents();
        let x = rng.gen_range(-hw..=hw);
        let y = rng.gen_range(-hh..=hh);
        Point::new(f64::from(x), f64::from(y))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::STAGE
    }
}
