use serde::{Deserialize, Serialize};

use super::{BoundingBox, DrawingShape, Point, Projection, Style};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawLine {
    pub start: Point,
    pub end: Point,
    pub style: Style,
}

impl DrawLine {
    pub fn new(start: Point, end: Point, style: Style) -> Self {
        Self { start, end, style }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

impl DrawingShape for DrawLine {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.start.x, self.start.y, self.end.x, self.end.y)
    }

    fn reproject(&self, projection: &dyn Projection) -> Self {
        Self {
            start: projection.project_point(self.start),
            end: projection.project_point(self.end),
            style: self.style.clone(),
        }
    }
}
