use serde::{Deserialize, Serialize};

use super::{BoundingBox, DrawingShape, Point, Projection, Shape};

/// What a group holds. Page fitting treats each layer differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerRole {
    /// Structural shapes; scaled as one unit.
    Geometry,
    /// Dimensions and labels; re-projected primitive by primitive.
    Annotations,
    /// Page frame, title block and legend.
    Furniture,
}

impl LayerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerRole::Geometry => "geometry",
            LayerRole::Annotations => "annotations",
            LayerRole::Furniture => "furniture",
        }
    }
}

/// Uniform scale followed by a translation: `p' = p * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupTransform {
    pub scale: f64,
    pub translate: Point,
}

impl GroupTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            translate: Point::new(0.0, 0.0),
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.translate.x,
            p.y * self.scale + self.translate.y,
        )
    }

    /// `self` applied after `inner`.
    pub fn then(&self, inner: &GroupTransform) -> GroupTransform {
        GroupTransform {
            scale: self.scale * inner.scale,
            translate: self.apply(inner.translate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawGroup {
    pub id: Option<String>,
    pub role: Option<LayerRole>,
    pub class: Option<String>,
    pub transform: Option<GroupTransform>,
    pub children: Vec<Shape>,
}

impl DrawGroup {
    pub fn new() -> Self {
        Self {
            id: None,
            role: None,
            class: None,
            transform: None,
            children: Vec::new(),
        }
    }

    pub fn layer(role: LayerRole, children: Vec<Shape>) -> Self {
        Self {
            id: Some(role.as_str().to_string()),
            role: Some(role),
            class: None,
            transform: None,
            children,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn push(&mut self, shape: Shape) {
        self.children.push(shape);
    }

    pub fn find_layer(&self, role: LayerRole) -> Option<&DrawGroup> {
        self.children.iter().find_map(|child| match child {
            Shape::Group(g) if g.role == Some(role) => Some(g),
            _ => None,
        })
    }
}

impl Default for DrawGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingShape for DrawGroup {
    fn bounds(&self) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        for child in &self.children {
            bounds.include(&child.bounds());
        }
        match (&self.transform, bounds.is_empty()) {
            (Some(t), false) => {
                let a = t.apply(Point::new(bounds.min_x, bounds.min_y));
                let b = t.apply(Point::new(bounds.max_x, bounds.max_y));
                BoundingBox::new(a.x, a.y, b.x, b.y)
            }
            _ => bounds,
        }
    }

    /// A group with its own transform keeps its children as they are and
    /// folds the projection into the transform instead.
    fn reproject(&self, projection: &dyn Projection) -> Self {
        match &self.transform {
            Some(inner) => Self {
                transform: Some(projection.compose_group(inner)),
                ..self.clone()
            },
            None => Self {
                children: self
                    .children
                    .iter()
                    .map(|c| c.reproject(projection))
                    .collect(),
                ..self.clone()
            },
        }
    }
}
