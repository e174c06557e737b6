//! Immutable scene graph produced by the layout engine.
//!
//! Shapes are plain tagged values; serializers in [`crate::svg_renderer`] and
//! [`crate::dxf_renderer`] turn them into concrete vector formats.

use serde::{Deserialize, Serialize};

mod bounds;
mod group;
mod line;
mod marker;
mod rectangle;
mod text;

pub use bounds::BoundingBox;
pub use group::{DrawGroup, GroupTransform, LayerRole};
pub use line::DrawLine;
pub use marker::{DrawMarker, MarkerKind};
pub use rectangle::DrawRectangle;
pub use text::{DrawText, TextAnchor, TextRotation};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Rotates this point by `angle_deg` about `pivot` (clockwise on a y-down page).
    pub fn rotate_about(&self, pivot: Point, angle_deg: f64) -> Point {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }
}

/// Presentation attributes. Stroke widths and font sizes are authored in
/// page units and are never rescaled by page fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub fill: Option<String>,
    pub dash: Option<Vec<f64>>,
    /// Keep the stroke width constant under a scaling group transform.
    pub non_scaling_stroke: bool,
    pub class: Option<String>,
}

impl Style {
    pub fn stroke(color: &str, width: f64) -> Self {
        Self {
            stroke: Some(color.to_string()),
            stroke_width: width,
            fill: None,
            dash: None,
            non_scaling_stroke: false,
            class: None,
        }
    }

    pub fn filled(fill: &str, stroke: &str, width: f64) -> Self {
        Self {
            fill: Some(fill.to_string()),
            ..Self::stroke(stroke, width)
        }
    }

    pub fn text(fill: &str) -> Self {
        Self {
            stroke: None,
            stroke_width: 0.0,
            fill: Some(fill.to_string()),
            dash: None,
            non_scaling_stroke: false,
            class: None,
        }
    }

    pub fn with_dash(mut self, dash: &[f64]) -> Self {
        self.dash = Some(dash.to_vec());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn non_scaling(mut self) -> Self {
        self.non_scaling_stroke = true;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::stroke("#000000", 1.0)
    }
}

/// Maps source drawing coordinates into page coordinates.
pub trait Projection {
    fn project_point(&self, p: Point) -> Point;
    fn project_length(&self, length: f64) -> f64;
    /// Composes this projection after a group's own transform.
    fn compose_group(&self, inner: &GroupTransform) -> GroupTransform;
}

pub trait DrawingShape {
    /// Extent of the shape in its own coordinate frame, including estimated
    /// label extents.
    fn bounds(&self) -> BoundingBox;

    /// Re-projects coordinates and lengths while leaving stroke widths,
    /// font sizes and rotation angles untouched.
    fn reproject(&self, projection: &dyn Projection) -> Self
    where
        Self: Sized;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(DrawRectangle),
    Line(DrawLine),
    Text(DrawText),
    Group(DrawGroup),
    Marker(DrawMarker),
}

impl DrawingShape for Shape {
    fn bounds(&self) -> BoundingBox {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Group(s) => s.bounds(),
            Shape::Marker(s) => s.bounds(),
        }
    }

    fn reproject(&self, projection: &dyn Projection) -> Self {
        match self {
            Shape::Rectangle(s) => Shape::Rectangle(s.reproject(projection)),
            Shape::Line(s) => Shape::Line(s.reproject(projection)),
            Shape::Text(s) => Shape::Text(s.reproject(projection)),
            Shape::Group(s) => Shape::Group(s.reproject(projection)),
            Shape::Marker(s) => Shape::Marker(s.reproject(projection)),
        }
    }
}

impl Shape {
    /// Visits every leaf shape, depth first.
    pub fn for_each_leaf<'a>(&'a self, f: &mut dyn FnMut(&'a Shape)) {
        match self {
            Shape::Group(g) => {
                for child in &g.children {
                    child.for_each_leaf(f);
                }
            }
            leaf => f(leaf),
        }
    }
}

/// A drawing with a declared extent, before page fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Declared extent of the drawing, used when computed bounds are unusable.
    pub view_box: BoundingBox,
    pub root: DrawGroup,
}

impl SceneDocument {
    pub fn width(&self) -> f64 {
        self.view_box.width()
    }

    pub fn height(&self) -> f64 {
        self.view_box.height()
    }

    /// First direct child group carrying `role`.
    pub fn layer(&self, role: LayerRole) -> Option<&DrawGroup> {
        self.root.find_layer(role)
    }
}
