//! DXF serializer.
//!
//! Flattens the composed page into absolute coordinates, converts page units
//! to millimeters and flips Y so the sheet reads the same way up in CAD.
//! Geometry, dimensions and page furniture land on separate layers.

use dxf::entities::{Entity, EntityType, Line, LwPolyline, Text};
use dxf::enums::AcadVersion;
use dxf::{Drawing, LwPolylineVertex};

use footingplan_core::units::px_to_mm;

use crate::compose::ComposedDocument;
use crate::error::{ExportError, ExportResult};
use crate::model::{
    DrawGroup, DrawText, GroupTransform, LayerRole, MarkerKind, Point, Shape, TextAnchor,
};

const LAYER_GEOMETRY: &str = "GEOMETRY";
const LAYER_DIMENSIONS: &str = "DIMENSIONS";
const LAYER_FURNITURE: &str = "FURNITURE";

/// Baseline sits this fraction of the text height below the visual center.
const BASELINE_DROP: f64 = 0.35;

struct Sheet {
    drawing: Drawing,
    height_mm: f64,
}

impl Sheet {
    fn point(&self, p: Point) -> dxf::Point {
        dxf::Point::new(px_to_mm(p.x), self.height_mm - px_to_mm(p.y), 0.0)
    }

    fn add(&mut self, entity_type: EntityType, layer: &str) {
        let mut entity = Entity::new(entity_type);
        entity.common.layer = layer.to_string();
        self.drawing.add_entity(entity);
    }

    fn add_line(&mut self, a: Point, b: Point, layer: &str) {
        let line = Line::new(self.point(a), self.point(b));
        self.add(EntityType::Line(line), layer);
    }

    fn add_closed(&mut self, points: &[Point], layer: &str) {
        let mut polyline = LwPolyline::default();
        polyline.vertices = points
            .iter()
            .map(|p| {
                let q = self.point(*p);
                LwPolylineVertex {
                    x: q.x,
                    y: q.y,
                    id: 0,
                    starting_width: 0.0,
                    ending_width: 0.0,
                    bulge: 0.0,
                }
            })
            .collect();
        polyline.set_is_closed(true);
        self.add(EntityType::LwPolyline(polyline), layer);
    }

    /// Left-justified text placed so it covers the same box as the SVG output.
    fn add_text(&mut self, text: &DrawText, transform: &GroupTransform, layer: &str) {
        let height = text.effective_font_size() * transform.scale;
        let width = text.estimated_width() * transform.scale;
        let angle = text.rotation.map(|r| r.angle_deg).unwrap_or(0.0);
        let position = transform.apply(text.position);

        let shift = match text.anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => -width / 2.0,
            TextAnchor::End => -width,
        };
        let pivot = text
            .rotation
            .map(|r| transform.apply(r.pivot))
            .unwrap_or(position);
        // Left end of the baseline in the text's own frame, then rotated with it.
        let start = position
            .offset(shift, height * BASELINE_DROP)
            .rotate_about(pivot, angle);

        let mut entity = Text::default();
        entity.location = self.point(start);
        entity.text_height = px_to_mm(height);
        entity.value = text.content.clone();
        // Clockwise on a y-down page is counterclockwise in CAD.
        entity.rotation = -angle;
        self.add(EntityType::Text(entity), layer);
    }
}

/// Serializes `document` to DXF bytes.
pub fn render_dxf(document: &ComposedDocument) -> ExportResult<Vec<u8>> {
    let mut drawing = Drawing::new();
    drawing.header.version = AcadVersion::R2010;
    let mut sheet = Sheet {
        drawing,
        height_mm: document.height_mm,
    };
    write_group(
        &mut sheet,
        &document.root,
        &GroupTransform::identity(),
        LAYER_FURNITURE,
    );

    let mut buffer = Vec::new();
    sheet
        .drawing
        .save(&mut buffer)
        .map_err(|e| ExportError::Render(format!("Failed to write DXF: {:?}", e)))?;
    Ok(buffer)
}

fn layer_for(role: LayerRole) -> &'static str {
    match role {
        LayerRole::Geometry => LAYER_GEOMETRY,
        LayerRole::Annotations => LAYER_DIMENSIONS,
        LayerRole::Furniture => LAYER_FURNITURE,
    }
}

fn write_group(sheet: &mut Sheet, group: &DrawGroup, parent: &GroupTransform, layer: &str) {
    let transform = match &group.transform {
        Some(t) => parent.then(t),
        None => *parent,
    };
    let layer = group.role.map(layer_for).unwrap_or(layer);
    for child in &group.children {
        write_shape(sheet, child, &transform, layer);
    }
}

fn write_shape(sheet: &mut Sheet, shape: &Shape, transform: &GroupTransform, layer: &str) {
    match shape {
        Shape::Group(group) => write_group(sheet, group, transform, layer),
        Shape::Line(line) => {
            sheet.add_line(transform.apply(line.start), transform.apply(line.end), layer)
        }
        Shape::Rectangle(rect) => {
            let corners = [
                Point::new(rect.x, rect.y),
                Point::new(rect.x + rect.width, rect.y),
                Point::new(rect.x + rect.width, rect.y + rect.height),
                Point::new(rect.x, rect.y + rect.height),
            ]
            .map(|p| transform.apply(p));
            sheet.add_closed(&corners, layer);
        }
        Shape::Marker(marker) => {
            let outline: Vec<Point> = marker
                .outline()
                .into_iter()
                .map(|p| transform.apply(p))
                .collect();
            match marker.kind {
                MarkerKind::Arrow => sheet.add_closed(&outline, layer),
                MarkerKind::Tick => {
                    if let [a, b] = outline.as_slice() {
                        sheet.add_line(*a, *b, layer);
                    }
                }
            }
        }
        Shape::Text(text) => sheet.add_text(text, transform, layer),
    }
}
