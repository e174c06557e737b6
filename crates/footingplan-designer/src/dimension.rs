//! Dimension primitive calculator.
//!
//! Turns a measured span into drawable annotation geometry: two extension
//! lines, a dimension line with an arrowhead at each end and a label, plus the
//! padded bounding box of all of it. Ordinate labels (a leader from a single
//! reference point ending in a tick and a label) are computed here as well.
//!
//! Every size in [`DimensionStyle`] is authored in page units and does not
//! depend on the scale the drawing is later fitted at. `unit_scale` converts
//! them into drawing units while the scene is still in the layout frame.

use serde::{Deserialize, Serialize};

use crate::model::{
    BoundingBox, DrawGroup, DrawLine, DrawMarker, DrawText, DrawingShape, Point, Shape, Style,
    TextAnchor,
};
use crate::scene::SceneBuilder;

/// Which coordinate a dimension measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionAxis {
    /// Measures X distance; the dimension line is horizontal.
    Horizontal,
    /// Measures Y distance; the dimension line is vertical.
    Vertical,
}

/// How a label sits relative to its dimension line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOrientation {
    /// Follow the dimension line (vertical dimensions rotate by -90°).
    Aligned,
    /// Always upright, anchored away from the line so a stack of vertical
    /// dimensions reads as one column.
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionStyle {
    /// Clearance between the measured object and the start of an extension line
    pub extension_gap: f64,
    /// How far extension lines run past the dimension line
    pub extension_overshoot: f64,
    /// Distance from the dimension line to the label center line
    pub text_offset: f64,
    pub arrow_size: f64,
    /// Margin added around the computed extent
    pub padding: f64,
    pub stroke_width: f64,
    pub color: String,
    pub font_family: Option<String>,
    /// Drawing units per page unit for the current render
    #[serde(skip)]
    pub unit_scale: f64,
}

impl Default for DimensionStyle {
    fn default() -> Self {
        Self {
            extension_gap: 4.0,
            extension_overshoot: 6.0,
            text_offset: 10.0,
            arrow_size: 9.0,
            padding: 4.0,
            stroke_width: 0.8,
            color: "#1a4f8b".to_string(),
            font_family: None,
            unit_scale: 1.0,
        }
    }
}

impl DimensionStyle {
    /// Copy of this style for a layout frame with `unit_scale` drawing units
    /// per page unit.
    pub fn for_unit_scale(&self, unit_scale: f64) -> Self {
        Self {
            unit_scale,
            ..self.clone()
        }
    }

    fn gap(&self) -> f64 {
        self.extension_gap * self.unit_scale
    }

    fn overshoot(&self) -> f64 {
        self.extension_overshoot * self.unit_scale
    }

    fn text_distance(&self) -> f64 {
        self.text_offset * self.unit_scale
    }

    fn pad(&self) -> f64 {
        self.padding * self.unit_scale
    }

    fn line_style(&self) -> Style {
        Style::stroke(&self.color, self.stroke_width).with_class("dimension")
    }

    fn extension_style(&self) -> Style {
        Style::stroke(&self.color, self.stroke_width * 0.75).with_class("extension")
    }

    fn arrow(&self, tip: Point, angle_deg: f64) -> DrawMarker {
        DrawMarker::arrow(
            tip,
            angle_deg,
            self.arrow_size,
            Style::filled(&self.color, &self.color, self.stroke_width),
        )
        .with_unit_scale(self.unit_scale)
    }

    fn tick(&self, at: Point) -> DrawMarker {
        DrawMarker::tick(at, self.arrow_size, self.line_style()).with_unit_scale(self.unit_scale)
    }

    fn label(&self, position: Point, content: &str, font_size: f64) -> DrawText {
        let mut text = DrawText::new(position, content, font_size)
            .with_family(self.font_family.as_deref())
            .with_unit_scale(self.unit_scale);
        text.style = Style::text(&self.color).with_class("dimension-label");
        text
    }
}

/// One measurement request.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSpec {
    pub start: Point,
    pub end: Point,
    pub axis: DimensionAxis,
    /// Signed distance from the outermost reference point to the dimension
    /// line. Negative draws left of / above the object, positive right of /
    /// below it.
    pub offset: f64,
    pub label: String,
    pub font_size: f64,
    pub orientation: LabelOrientation,
}

impl DimensionSpec {
    pub fn new(
        start: Point,
        end: Point,
        axis: DimensionAxis,
        offset: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            axis,
            offset,
            label: label.into(),
            font_size: 12.0,
            orientation: LabelOrientation::Aligned,
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_orientation(mut self, orientation: LabelOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Measured distance along the dimension axis.
    pub fn measured(&self) -> f64 {
        match self.axis {
            DimensionAxis::Horizontal => (self.end.x - self.start.x).abs(),
            DimensionAxis::Vertical => (self.end.y - self.start.y).abs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionGeometry {
    pub extension_lines: [DrawLine; 2],
    pub dimension_line: DrawLine,
    pub arrows: [DrawMarker; 2],
    pub label: DrawText,
    pub bounds: BoundingBox,
}

impl DimensionGeometry {
    pub fn into_group(self, id: String) -> DrawGroup {
        let [ext_a, ext_b] = self.extension_lines;
        let [arrow_a, arrow_b] = self.arrows;
        let mut group = DrawGroup::new().with_id(id).with_class("dimension");
        group.push(Shape::Line(ext_a));
        group.push(Shape::Line(ext_b));
        group.push(Shape::Line(self.dimension_line));
        group.push(Shape::Marker(arrow_a));
        group.push(Shape::Marker(arrow_b));
        group.push(Shape::Text(self.label));
        group
    }
}

/// Computes the full annotation geometry for `spec`.
pub fn compute_dimension(spec: &DimensionSpec, style: &DimensionStyle) -> DimensionGeometry {
    let sign = if spec.offset < 0.0 { -1.0 } else { 1.0 };
    let refs = [spec.start, spec.end];

    let (extension_lines, ends, label) = match spec.axis {
        DimensionAxis::Vertical => {
            let base = if sign > 0.0 {
                spec.start.x.max(spec.end.x)
            } else {
                spec.start.x.min(spec.end.x)
            };
            let line_x = base + spec.offset;
            let ext = refs.map(|p| {
                DrawLine::new(
                    Point::new(p.x + sign * style.gap(), p.y),
                    Point::new(line_x + sign * style.overshoot(), p.y),
                    style.extension_style(),
                )
            });
            let ends = refs.map(|p| Point::new(line_x, p.y));
            let mid = Point::new(
                line_x + sign * style.text_distance(),
                (spec.start.y + spec.end.y) / 2.0,
            );
            let label = match spec.orientation {
                LabelOrientation::Aligned => style
                    .label(mid, &spec.label, spec.font_size)
                    .rotated(-90.0),
                LabelOrientation::Horizontal => {
                    let anchor = if sign > 0.0 {
                        TextAnchor::Start
                    } else {
                        TextAnchor::End
                    };
                    style
                        .label(mid, &spec.label, spec.font_size)
                        .with_anchor(anchor)
                }
            };
            (ext, ends, label)
        }
        DimensionAxis::Horizontal => {
            let base = if sign > 0.0 {
                spec.start.y.max(spec.end.y)
            } else {
                spec.start.y.min(spec.end.y)
            };
            let line_y = base + spec.offset;
            let ext = refs.map(|p| {
                DrawLine::new(
                    Point::new(p.x, p.y + sign * style.gap()),
                    Point::new(p.x, line_y + sign * style.overshoot()),
                    style.extension_style(),
                )
            });
            let ends = refs.map(|p| Point::new(p.x, line_y));
            let mid = Point::new(
                (spec.start.x + spec.end.x) / 2.0,
                line_y + sign * style.text_distance(),
            );
            (ext, ends, style.label(mid, &spec.label, spec.font_size))
        }
    };

    let dimension_line = DrawLine::new(ends[0], ends[1], style.line_style());
    let arrows = [
        style.arrow(ends[0], outward_angle(ends[1], ends[0], spec.axis)),
        style.arrow(ends[1], outward_angle(ends[0], ends[1], spec.axis)),
    ];

    let mut bounds = BoundingBox::empty();
    for line in extension_lines.iter().chain(std::iter::once(&dimension_line)) {
        bounds.include(&line.bounds());
    }
    for arrow in &arrows {
        bounds.include(&arrow.bounds());
    }
    bounds.include(&label.bounds());

    DimensionGeometry {
        extension_lines,
        dimension_line,
        arrows,
        label,
        bounds: bounds.expand(style.pad()),
    }
}

/// Angle of an arrow at `tip` pointing away from `from`.
///
/// Coincident ends fall back to the positive axis direction.
fn outward_angle(from: Point, tip: Point, axis: DimensionAxis) -> f64 {
    match axis {
        DimensionAxis::Horizontal => {
            if tip.x < from.x {
                180.0
            } else {
                0.0
            }
        }
        DimensionAxis::Vertical => {
            if tip.y < from.y {
                -90.0
            } else {
                90.0
            }
        }
    }
}

/// Computes `spec` and adds it to the annotation layer. Returns its extent.
pub fn draw_dimension(
    builder: &mut SceneBuilder,
    spec: &DimensionSpec,
    style: &DimensionStyle,
) -> BoundingBox {
    let geometry = compute_dimension(spec, style);
    let bounds = geometry.bounds;
    let id = builder.next_id("dim");
    builder.add_annotation_with_bounds(Shape::Group(geometry.into_group(id)), &bounds);
    bounds
}

/// A labelled position: a leader from `reference` out to `line_coord`,
/// closed by a tick, with an upright label beyond it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinateSpec {
    pub reference: Point,
    pub axis: DimensionAxis,
    /// Signed distance from the reference point to the tick.
    pub offset: f64,
    pub label: String,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrdinateGeometry {
    pub leader: DrawLine,
    pub tick: DrawMarker,
    pub label: DrawText,
    pub bounds: BoundingBox,
}

/// Computes an ordinate label. A vertical axis runs the leader horizontally
/// (it marks a Y position); a horizontal axis runs it vertically.
pub fn compute_ordinate(spec: &OrdinateSpec, style: &DimensionStyle) -> OrdinateGeometry {
    let sign = if spec.offset < 0.0 { -1.0 } else { 1.0 };
    let r = spec.reference;
    let (start, end, label) = match spec.axis {
        DimensionAxis::Vertical => {
            let end = Point::new(r.x + spec.offset, r.y);
            let anchor = if sign > 0.0 {
                TextAnchor::Start
            } else {
                TextAnchor::End
            };
            let label = style
                .label(end.offset(sign * style.text_distance(), 0.0), &spec.label, spec.font_size)
                .with_anchor(anchor);
            (Point::new(r.x + sign * style.gap(), r.y), end, label)
        }
        DimensionAxis::Horizontal => {
            let end = Point::new(r.x, r.y + spec.offset);
            let label = style.label(
                end.offset(0.0, sign * style.text_distance()),
                &spec.label,
                spec.font_size,
            );
            (Point::new(r.x, r.y + sign * style.gap()), end, label)
        }
    };

    let leader = DrawLine::new(start, end, style.extension_style());
    let tick = style.tick(end);

    let mut bounds = leader.bounds();
    bounds.include(&tick.bounds());
    bounds.include(&label.bounds());

    OrdinateGeometry {
        leader,
        tick,
        label,
        bounds: bounds.expand(style.pad()),
    }
}

pub fn draw_ordinate(
    builder: &mut SceneBuilder,
    spec: &OrdinateSpec,
    style: &DimensionStyle,
) -> BoundingBox {
    let geometry = compute_ordinate(spec, style);
    let bounds = geometry.bounds;
    let mut group = DrawGroup::new()
        .with_id(builder.next_id("ord"))
        .with_class("ordinate");
    group.push(Shape::Line(geometry.leader));
    group.push(Shape::Marker(geometry.tick));
    group.push(Shape::Text(geometry.label));
    builder.add_annotation_with_bounds(Shape::Group(group), &bounds);
    bounds
}
