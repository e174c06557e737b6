//! Fit transform between drawing coordinates and a page region.
//!
//! A [`FitTransform`] is a uniform scale followed by a translation:
//!
//! ```text
//! page = region_offset + (drawing - source_min) * scale
//! ```
//!
//! It is used both as a single group transform for the geometry layer and as a
//! per-coordinate [`Projection`] for annotation primitives.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use footingplan_core::constants::FILL_RATIO;

use crate::model::{BoundingBox, GroupTransform, Point, Projection};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitTransform {
    /// Page units per drawing unit
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub source_min_x: f64,
    pub source_min_y: f64,
}

impl FitTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            source_min_x: 0.0,
            source_min_y: 0.0,
        }
    }

    pub fn project(&self, p: Point) -> Point {
        Point::new(
            self.offset_x + (p.x - self.source_min_x) * self.scale,
            self.offset_y + (p.y - self.source_min_y) * self.scale,
        )
    }

    pub fn project_bounds(&self, bounds: &BoundingBox) -> BoundingBox {
        if bounds.is_empty() {
            return *bounds;
        }
        let a = self.project(Point::new(bounds.min_x, bounds.min_y));
        let b = self.project(Point::new(bounds.max_x, bounds.max_y));
        BoundingBox::new(a.x, a.y, b.x, b.y)
    }

    /// The same mapping as `p * scale + translate`.
    pub fn group_transform(&self) -> GroupTransform {
        GroupTransform {
            scale: self.scale,
            translate: Point::new(
                self.offset_x - self.source_min_x * self.scale,
                self.offset_y - self.source_min_y * self.scale,
            ),
        }
    }
}

impl Default for FitTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for FitTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scale {:.4}, offset ({:.2}, {:.2})",
            self.scale, self.offset_x, self.offset_y
        )
    }
}

impl Projection for FitTransform {
    fn project_point(&self, p: Point) -> Point {
        self.project(p)
    }

    fn project_length(&self, length: f64) -> f64 {
        length * self.scale
    }

    fn compose_group(&self, inner: &GroupTransform) -> GroupTransform {
        self.group_transform().then(inner)
    }
}

/// Largest uniform scale that fits `source` into `region`, times `fill_ratio`.
///
/// Returns `None` when the result is not a finite positive number.
pub fn fit_scale(source: &BoundingBox, region: &BoundingBox, fill_ratio: f64) -> Option<f64> {
    let scale_x = region.raw_width() / source.width();
    let scale_y = region.raw_height() / source.height();
    let scale = scale_x.min(scale_y) * fill_ratio;
    (scale.is_finite() && scale > 0.0).then_some(scale)
}

/// Fill ratio actually used for a fit. It must lie strictly inside (0, 1) so
/// the content never touches the region edges; anything else is replaced with
/// the default and reported.
pub fn checked_fill_ratio(requested: f64) -> (f64, Option<String>) {
    if requested.is_finite() && requested > 0.0 && requested < 1.0 {
        (requested, None)
    } else {
        let message = format!(
            "fill ratio {} is outside (0, 1); using {}",
            requested, FILL_RATIO
        );
        (FILL_RATIO, Some(message))
    }
}

/// Fits `source` into `region`, centered on both axes.
///
/// Never fails: a degenerate fit falls back to scale 1 and reports it.
pub fn fit_to_region(
    source: &BoundingBox,
    region: &BoundingBox,
    fill_ratio: f64,
) -> (FitTransform, Vec<String>) {
    let mut warnings = Vec::new();
    let (fill_ratio, fill_warning) = checked_fill_ratio(fill_ratio);
    if let Some(message) = fill_warning {
        warn!("{}", message);
        warnings.push(message);
    }
    let scale = match fit_scale(source, region, fill_ratio) {
        Some(scale) => scale,
        None => {
            let message = format!(
                "could not fit {:?} into {:?}; falling back to scale 1",
                source, region
            );
            warn!("{}", message);
            warnings.push(message);
            1.0
        }
    };

    let (source_min_x, source_min_y) = if source.is_empty() {
        (0.0, 0.0)
    } else {
        (source.min_x, source.min_y)
    };
    let content_width = source.width() * scale;
    let content_height = source.height() * scale;

    let transform = FitTransform {
        scale,
        offset_x: region.min_x + (region.raw_width() - content_width) / 2.0,
        offset_y: region.min_y + (region.raw_height() - content_height) / 2.0,
        source_min_x,
        source_min_y,
    };
    (transform, warnings)
}
