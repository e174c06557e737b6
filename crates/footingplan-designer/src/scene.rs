//! Per-render scene construction context.
//!
//! A [`SceneBuilder`] is created for one layout call, threaded explicitly
//! through every drawing helper, and consumed by [`SceneBuilder::finish`].
//! Nothing survives between renders, so concurrent renders cannot interfere.

use crate::model::{
    BoundingBox, DrawGroup, DrawingShape, LayerRole, SceneDocument, Shape,
};

/// Declared extent for a drawing with nothing in it.
const EMPTY_VIEW_BOX: BoundingBox = BoundingBox {
    min_x: 0.0,
    min_y: 0.0,
    max_x: 100.0,
    max_y: 100.0,
};

#[derive(Debug, Default)]
pub struct SceneBuilder {
    geometry: Vec<Shape>,
    annotations: Vec<Shape>,
    geometry_bounds: BoundingBox,
    annotation_bounds: BoundingBox,
    next_id: usize,
}

/// Output of [`SceneBuilder::finish`].
#[derive(Debug, Clone)]
pub struct BuiltScene {
    pub document: SceneDocument,
    pub geometry_bounds: BoundingBox,
    pub annotation_bounds: BoundingBox,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequential element id, e.g. `dim-3`. Ids never influence geometry.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    /// Adds a structural shape and grows the geometry bounds.
    pub fn add_geometry(&mut self, shape: Shape) {
        self.geometry_bounds.include(&shape.bounds());
        self.geometry.push(shape);
    }

    /// Adds an annotation whose extent the caller has already computed
    /// (including label estimates and padding).
    pub fn add_annotation_with_bounds(&mut self, shape: Shape, bounds: &BoundingBox) {
        self.annotation_bounds.include(bounds);
        self.annotation_bounds.include(&shape.bounds());
        self.annotations.push(shape);
    }

    pub fn add_annotation(&mut self, shape: Shape) {
        let bounds = shape.bounds();
        self.add_annotation_with_bounds(shape, &bounds);
    }

    pub fn geometry_bounds(&self) -> BoundingBox {
        self.geometry_bounds
    }

    pub fn annotation_bounds(&self) -> BoundingBox {
        self.annotation_bounds
    }

    pub fn finish(self) -> BuiltScene {
        let mut view_box = self.geometry_bounds.union(&self.annotation_bounds);
        if !view_box.is_valid() {
            view_box = EMPTY_VIEW_BOX;
        }

        let mut root = DrawGroup::new().with_id("drawing");
        root.push(Shape::Group(DrawGroup::layer(
            LayerRole::Geometry,
            self.geometry,
        )));
        root.push(Shape::Group(DrawGroup::layer(
            LayerRole::Annotations,
            self.annotations,
        )));

        BuiltScene {
            document: SceneDocument { view_box, root },
            geometry_bounds: self.geometry_bounds,
            annotation_bounds: self.annotation_bounds,
        }
    }
}
