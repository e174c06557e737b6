use serde::{Deserialize, Serialize};

use super::{BoundingBox, DrawingShape, Point, Projection, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// Filled arrowhead with its tip at the marker position.
    Arrow,
    /// Short oblique stroke through the marker position.
    Tick,
}

/// Terminator drawn at the end of a dimension or leader line.
///
/// `size` is in page units and is not scaled by page fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawMarker {
    pub position: Point,
    /// Direction the marker points, degrees clockwise from +X on a y-down page.
    pub angle_deg: f64,
    pub size: f64,
    pub kind: MarkerKind,
    pub style: Style,
    /// Coordinate units per authored size unit in the current frame.
    #[serde(default = "default_unit_scale")]
    pub unit_scale: f64,
}

fn default_unit_scale() -> f64 {
    1.0
}

impl DrawMarker {
    pub fn arrow(position: Point, angle_deg: f64, size: f64, style: Style) -> Self {
        Self {
            position,
            angle_deg,
            size,
            kind: MarkerKind::Arrow,
            style,
            unit_scale: 1.0,
        }
    }

    pub fn tick(position: Point, size: f64, style: Style) -> Self {
        Self {
            position,
            angle_deg: 45.0,
            size,
            kind: MarkerKind::Tick,
            style,
            unit_scale: 1.0,
        }
    }

    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    /// Outline of the marker in absolute coordinates.
    ///
    /// Arrows are a closed triangle (tip first); ticks are the two ends of
    /// the stroke.
    pub fn outline(&self) -> Vec<Point> {
        let p = self.position;
        let size = self.size * self.unit_scale;
        match self.kind {
            MarkerKind::Arrow => {
                let half_width = size * 0.3;
                let back = p.offset(-size, 0.0);
                vec![
                    p,
                    back.offset(0.0, -half_width).rotate_about(p, self.angle_deg),
                    back.offset(0.0, half_width).rotate_about(p, self.angle_deg),
                ]
            }
            MarkerKind::Tick => {
                let half = size / 2.0;
                vec![
                    p.offset(-half, 0.0).rotate_about(p, self.angle_deg),
                    p.offset(half, 0.0).rotate_about(p, self.angle_deg),
                ]
            }
        }
    }
}

impl DrawingShape for DrawMarker {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(&self.outline())
    }

    fn reproject(&self, projection: &dyn Projection) -> Self {
        Self {
            position: projection.project_point(self.position),
            unit_scale: 1.0,
            ..self.clone()
        }
    }
}
