use serde::{Deserialize, Serialize};

use footingplan_core::constants::MIN_BOUNDS_EXTENT;

use super::Point;

/// Axis-aligned bounding box in drawing units.
///
/// [`width`](Self::width) and [`height`](Self::height) never report less than
/// one unit so that fitting code can divide by them unconditionally. The raw
/// extents are still available for validity checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates a box from two corners in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Creates a box from an origin and a size.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// An empty accumulator; any included point replaces it.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.include_point(*p);
        }
        bounds
    }

    /// True until something has been included.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Finite with a positive extent on both axes.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.raw_width() > 0.0
            && self.raw_height() > 0.0
    }

    pub fn raw_width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn raw_height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Width, clamped to at least one unit.
    pub fn width(&self) -> f64 {
        let w = self.raw_width();
        if w.is_finite() {
            w.max(MIN_BOUNDS_EXTENT)
        } else {
            MIN_BOUNDS_EXTENT
        }
    }

    /// Height, clamped to at least one unit.
    pub fn height(&self) -> f64 {
        let h = self.raw_height();
        if h.is_finite() {
            h.max(MIN_BOUNDS_EXTENT)
        } else {
            MIN_BOUNDS_EXTENT
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grows this box to cover `other`. Empty boxes are ignored.
    pub fn include(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        out.include(other);
        out
    }

    /// Grows every side by `padding`.
    pub fn expand(&self, padding: f64) -> BoundingBox {
        if self.is_empty() {
            return *self;
        }
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }

    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.min_x - tolerance
            && p.x <= self.max_x + tolerance
            && p.y >= self.min_y - tolerance
            && p.y <= self.max_y + tolerance
    }

    pub fn contains(&self, other: &BoundingBox, tolerance: f64) -> bool {
        other.is_empty()
            || (self.contains_point(Point::new(other.min_x, other.min_y), tolerance)
                && self.contains_point(Point::new(other.max_x, other.max_y), tolerance))
    }

    /// Four corners, clockwise from the minimum corner.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
