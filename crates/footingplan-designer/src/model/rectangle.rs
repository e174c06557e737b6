use serde::{Deserialize, Serialize};

use super::{BoundingBox, DrawingShape, Projection, Style};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub style: Style,
}

impl DrawRectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64, style: Style) -> Self {
        Self {
            x,
            y,
            width,
            height,
            corner_radius: 0.0,
            style,
        }
    }

    /// Rectangle of the given size centered on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64, style: Style) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height, style)
    }
}

impl DrawingShape for DrawRectangle {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_rect(self.x, self.y, self.width, self.height)
    }

    /// Position is projected; width, height and corner radius are lengths and
    /// only scale.
    fn reproject(&self, projection: &dyn Projection) -> Self {
        let origin = projection.project_point(super::Point::new(self.x, self.y));
        Self {
            x: origin.x,
            y: origin.y,
            width: projection.project_length(self.width),
            height: projection.project_length(self.height),
            corner_radius: projection.project_length(self.corner_radius),
            style: self.style.clone(),
        }
    }
}
