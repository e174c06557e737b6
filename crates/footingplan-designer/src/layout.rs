//! Geometry Layout Engine.
//!
//! Places the body, the row of feet and the foundation strips in drawing
//! units, then dimensions them according to an [`AnnotationPolicy`].
//!
//! Conventions:
//! - The repeat axis is Y (feet run top to bottom on a y-down page), the cross
//!   axis is X. The body and the foot row are both centered on the origin.
//! - `foot_gaps[i]` is the clear gap between foot `i` and foot `i + 1`.
//! - A foundation strip spans `foundation_width` along the repeat axis,
//!   centered on its foot, and `foundation_depth` across it (the foot width
//!   when the depth is zero).
//!
//! Dimensions are referenced from the edge of the geometry envelope on the
//! side they are drawn, so every tier of a side is a single column and no
//! extension line crosses a shape.

use serde::{Deserialize, Serialize};
use tracing::debug;

use footingplan_core::units::{cm_to_units, format_cm};
use footingplan_core::{SanitizedConfig, StructuralConfig};

use crate::dimension::{
    draw_dimension, draw_ordinate, DimensionAxis, DimensionSpec, DimensionStyle,
    LabelOrientation, OrdinateSpec,
};
use crate::model::{
    BoundingBox, DrawLine, DrawRectangle, DrawText, DrawingShape, Point, SceneDocument, Shape,
    Style,
};
use crate::scene::SceneBuilder;

/// Side of the structure a group of vertical dimensions is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn sign(&self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Named placement constants for every dimension the engine draws.
///
/// Distances are page units; the layout multiplies them by
/// [`LayoutOptions::annotation_scale`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationPolicy {
    /// Distance from the geometry envelope to the first dimension tier
    pub first_tier_offset: f64,
    /// Distance between consecutive tiers on one side
    pub tier_spacing: f64,
    /// How far the centerline runs past the geometry
    pub centerline_overhang: f64,
    /// Gap between the caption and the annotations below it
    pub caption_gap: f64,
    /// Side carrying the per-foot margin and thickness dimensions; gap
    /// dimensions go on the opposite side
    pub per_foot_side: Side,
    /// Give each per-foot measurement its own tier. When off, margins and
    /// thickness share the first tier and the foundation width takes the second.
    pub stack_per_foot: bool,
    pub per_foot_labels: LabelOrientation,
    pub gap_labels: LabelOrientation,
    /// Ordinate label at every foot center, measured from the first foot
    pub show_foot_centers: bool,
    pub show_body_length: bool,
    pub dimension: DimensionStyle,
}

impl Default for AnnotationPolicy {
    fn default() -> Self {
        Self {
            first_tier_offset: 30.0,
            tier_spacing: 45.0,
            centerline_overhang: 20.0,
            caption_gap: 12.0,
            per_foot_side: Side::Left,
            stack_per_foot: true,
            per_foot_labels: LabelOrientation::Horizontal,
            gap_labels: LabelOrientation::Aligned,
            show_foot_centers: true,
            show_body_length: true,
            dimension: DimensionStyle::default(),
        }
    }
}

impl AnnotationPolicy {
    /// Signed offset of tier `tier` on `side`, in page units.
    pub fn tier_offset(&self, side: Side, tier: usize) -> f64 {
        side.sign() * (self.first_tier_offset + tier as f64 * self.tier_spacing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub caption: Option<String>,
    pub font_family: Option<String>,
    /// Dimension label size, page units
    pub font_size: f64,
    pub caption_font_size: f64,
    pub policy: AnnotationPolicy,
    /// Drawing units per page unit. Annotation sizes are multiplied by this
    /// so they end up at their authored size once the drawing is fitted.
    pub annotation_scale: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            caption: Some("PLAN".to_string()),
            font_family: None,
            font_size: 12.0,
            caption_font_size: 16.0,
            policy: AnnotationPolicy::default(),
            annotation_scale: 1.0,
        }
    }
}

impl LayoutOptions {
    pub fn with_annotation_scale(&self, annotation_scale: f64) -> Self {
        Self {
            annotation_scale,
            ..self.clone()
        }
    }

    fn dimension_style(&self) -> DimensionStyle {
        let mut style = self.policy.dimension.for_unit_scale(self.annotation_scale);
        if style.font_family.is_none() {
            style.font_family = self.font_family.clone();
        }
        style
    }
}

/// Values derived from the foot row, all in centimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetrics {
    pub foot_count: usize,
    /// Outer edge of the first foot to outer edge of the last
    pub total_foot_span: f64,
    /// First foot center to last foot center
    pub first_to_last: f64,
    /// Foot centers measured from the leading edge of the first foot
    pub foot_centers: Vec<f64>,
    /// Foundation overhang on each side of a foot along the repeat axis.
    /// Negative when the strip is narrower than the foot.
    pub foundation_margin: f64,
}

impl PlanMetrics {
    pub fn compute(config: &SanitizedConfig) -> Self {
        let foot_centers = foot_centers(config.foot_thickness, &config.foot_gaps);
        let foot_count = foot_centers.len();
        let total_foot_span =
            config.foot_gaps.iter().sum::<f64>() + foot_count as f64 * config.foot_thickness;
        Self {
            foot_count,
            total_foot_span,
            first_to_last: total_foot_span - config.foot_thickness,
            foot_centers,
            foundation_margin: (config.foundation_width - config.foot_thickness) / 2.0,
        }
    }
}

/// Running sum of foot centers: `c[0] = t/2`, `c[i] = c[i-1] + t + gap[i-1]`.
pub fn foot_centers(foot_thickness: f64, gaps: &[f64]) -> Vec<f64> {
    let mut centers = Vec::with_capacity(gaps.len() + 1);
    let mut center = foot_thickness / 2.0;
    centers.push(center);
    for gap in gaps {
        center += foot_thickness + gap;
        centers.push(center);
    }
    centers
}

/// One foot and the foundation strip beneath it, in drawing units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootPlacement {
    pub index: usize,
    /// Center along the repeat axis relative to the first foot's leading
    /// edge, centimeters
    pub center_offset: f64,
    pub center_y: f64,
    pub foot: BoundingBox,
    pub foundation: BoundingBox,
}

/// Absolute foot and foundation placement for `config`.
pub fn place_feet(config: &SanitizedConfig, metrics: &PlanMetrics) -> Vec<FootPlacement> {
    let row_top = -cm_to_units(metrics.total_foot_span) / 2.0;
    let thickness = cm_to_units(config.foot_thickness);
    let foot_width = cm_to_units(config.foot_width);
    let strip_width = cm_to_units(config.foundation_width);
    let strip_span = cm_to_units(config.foundation_cross_span());

    metrics
        .foot_centers
        .iter()
        .enumerate()
        .map(|(index, &center_offset)| {
            let center_y = row_top + cm_to_units(center_offset);
            FootPlacement {
                index,
                center_offset,
                center_y,
                foot: BoundingBox::from_rect(
                    -foot_width / 2.0,
                    center_y - thickness / 2.0,
                    foot_width,
                    thickness,
                ),
                foundation: BoundingBox::from_rect(
                    -strip_span / 2.0,
                    center_y - strip_width / 2.0,
                    strip_span,
                    strip_width,
                ),
            }
        })
        .collect()
}

/// Output of [`layout_plan`].
#[derive(Debug, Clone)]
pub struct PlanLayout {
    pub document: SceneDocument,
    pub metrics: PlanMetrics,
    pub warnings: Vec<String>,
    pub geometry_bounds: BoundingBox,
    pub annotation_bounds: BoundingBox,
    /// Body, feet and foundations only; everything else drawn around them
    /// scales with `annotation_scale`
    pub structure_bounds: BoundingBox,
    pub annotation_scale: f64,
    pub feet: Vec<FootPlacement>,
}

/// Lays out and dimensions one plan drawing. Never fails; invalid inputs are
/// sanitized and reported in `warnings`.
pub fn layout_plan(config: &StructuralConfig, options: &LayoutOptions) -> PlanLayout {
    let (config, warnings) = config.sanitize();
    let metrics = PlanMetrics::compute(&config);
    let feet = place_feet(&config, &metrics);

    let mut builder = SceneBuilder::new();
    draw_structure(&mut builder, &config, &feet);
    let envelope = builder.geometry_bounds();
    draw_centerline(&mut builder, &envelope, options);

    let style = options.dimension_style();
    let mut ctx = AnnotationContext {
        builder: &mut builder,
        options,
        style: &style,
        envelope,
    };
    ctx.per_foot_dimensions(&config, &metrics, &feet);
    ctx.gap_side_dimensions(&config, &metrics, &feet);
    ctx.cross_axis_dimensions(&config);
    ctx.caption();

    let scene = builder.finish();
    debug!(
        "Plan layout: {} feet, span {} cm, first-to-last {} cm, geometry {:?}, annotations {:?}",
        metrics.foot_count,
        metrics.total_foot_span,
        metrics.first_to_last,
        scene.geometry_bounds,
        scene.annotation_bounds
    );

    PlanLayout {
        document: scene.document,
        metrics,
        warnings,
        geometry_bounds: scene.geometry_bounds,
        annotation_bounds: scene.annotation_bounds,
        structure_bounds: envelope,
        annotation_scale: options.annotation_scale,
        feet,
    }
}

fn draw_structure(builder: &mut SceneBuilder, config: &SanitizedConfig, feet: &[FootPlacement]) {
    let foundation_style = Style::filled("#d9d9d9", "#555555", 1.0)
        .with_class("foundation")
        .non_scaling();
    let foot_style = Style::filled("#8c8c8c", "#222222", 1.0)
        .with_class("foot")
        .non_scaling();
    let body_style = Style::stroke("#000000", 1.6)
        .with_class("body")
        .non_scaling();

    // Foundations first so each foot sits on top of its strip.
    for placement in feet {
        builder.add_geometry(rect_shape(&placement.foundation, foundation_style.clone()));
    }
    for placement in feet {
        builder.add_geometry(rect_shape(&placement.foot, foot_style.clone()));
    }
    builder.add_geometry(Shape::Rectangle(DrawRectangle::centered(
        0.0,
        0.0,
        cm_to_units(config.main_body_width),
        cm_to_units(config.main_body_length),
        body_style,
    )));
}

fn draw_centerline(builder: &mut SceneBuilder, envelope: &BoundingBox, options: &LayoutOptions) {
    if envelope.is_empty() {
        return;
    }
    let overhang = options.policy.centerline_overhang * options.annotation_scale;
    let style = Style::stroke("#555555", 0.6)
        .with_dash(&[12.0, 3.0, 2.0, 3.0])
        .with_class("centerline")
        .non_scaling();
    builder.add_geometry(Shape::Line(DrawLine::new(
        Point::new(0.0, envelope.min_y - overhang),
        Point::new(0.0, envelope.max_y + overhang),
        style,
    )));
}

fn rect_shape(bounds: &BoundingBox, style: Style) -> Shape {
    Shape::Rectangle(DrawRectangle::new(
        bounds.min_x,
        bounds.min_y,
        bounds.raw_width(),
        bounds.raw_height(),
        style,
    ))
}

struct AnnotationContext<'a> {
    builder: &'a mut SceneBuilder,
    options: &'a LayoutOptions,
    style: &'a DimensionStyle,
    envelope: BoundingBox,
}

impl AnnotationContext<'_> {
    fn offset(&self, side: Side, tier: usize) -> f64 {
        self.options.policy.tier_offset(side, tier) * self.options.annotation_scale
    }

    fn edge_x(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.envelope.min_x,
            Side::Right => self.envelope.max_x,
        }
    }

    /// Vertical dimension from `y0` to `y1` on `side`.
    fn vertical(
        &mut self,
        side: Side,
        tier: usize,
        y0: f64,
        y1: f64,
        value_cm: f64,
        orientation: LabelOrientation,
    ) {
        let x = self.edge_x(side);
        let spec = DimensionSpec::new(
            Point::new(x, y0),
            Point::new(x, y1),
            DimensionAxis::Vertical,
            self.offset(side, tier),
            format_cm(value_cm),
        )
        .with_font_size(self.options.font_size)
        .with_orientation(orientation);
        draw_dimension(self.builder, &spec, self.style);
    }

    fn per_foot_dimensions(
        &mut self,
        config: &SanitizedConfig,
        metrics: &PlanMetrics,
        feet: &[FootPlacement],
    ) {
        let options = self.options;
        let policy = &options.policy;
        let side = policy.per_foot_side;
        let orientation = policy.per_foot_labels;
        let (margin_tier, thickness_tier, bottom_tier, strip_tier) = if policy.stack_per_foot {
            (0, 1, 2, 3)
        } else {
            (0, 0, 0, 1)
        };

        for placement in feet {
            let foot = &placement.foot;
            let strip = &placement.foundation;
            if metrics.foundation_margin > 0.0 {
                self.vertical(
                    side,
                    margin_tier,
                    strip.min_y,
                    foot.min_y,
                    metrics.foundation_margin,
                    orientation,
                );
            }
            if config.foot_thickness > 0.0 {
                self.vertical(
                    side,
                    thickness_tier,
                    foot.min_y,
                    foot.max_y,
                    config.foot_thickness,
                    orientation,
                );
            }
            if metrics.foundation_margin > 0.0 {
                self.vertical(
                    side,
                    bottom_tier,
                    foot.max_y,
                    strip.max_y,
                    metrics.foundation_margin,
                    orientation,
                );
            }
            if config.foundation_width > 0.0 {
                self.vertical(
                    side,
                    strip_tier,
                    strip.min_y,
                    strip.max_y,
                    config.foundation_width,
                    orientation,
                );
            }
        }
    }

    /// Gaps, foot centers and the spans, nearest to farthest. Empty tiers are
    /// skipped so the stack stays compact.
    fn gap_side_dimensions(
        &mut self,
        config: &SanitizedConfig,
        metrics: &PlanMetrics,
        feet: &[FootPlacement],
    ) {
        let options = self.options;
        let policy = &options.policy;
        let side = policy.per_foot_side.opposite();
        let mut tier = 0;

        if feet.len() > 1 {
            for (pair, gap) in feet.windows(2).zip(&config.foot_gaps) {
                self.vertical(
                    side,
                    tier,
                    pair[0].foot.max_y,
                    pair[1].foot.min_y,
                    *gap,
                    policy.gap_labels,
                );
            }
            tier += 1;
        }

        if policy.show_foot_centers && !feet.is_empty() {
            let first = metrics.foot_centers[0];
            let x = self.edge_x(side);
            for placement in feet {
                let spec = OrdinateSpec {
                    reference: Point::new(x, placement.center_y),
                    axis: DimensionAxis::Vertical,
                    offset: self.offset(side, tier),
                    label: format_cm(placement.center_offset - first),
                    font_size: self.options.font_size,
                };
                draw_ordinate(self.builder, &spec, self.style);
            }
            tier += 1;
        }

        if let (Some(first), Some(last)) = (feet.first(), feet.last()) {
            if feet.len() > 1 {
                self.vertical(
                    side,
                    tier,
                    first.center_y,
                    last.center_y,
                    metrics.first_to_last,
                    policy.gap_labels,
                );
                tier += 1;
            }
            if metrics.total_foot_span > 0.0 {
                self.vertical(
                    side,
                    tier,
                    first.foot.min_y,
                    last.foot.max_y,
                    metrics.total_foot_span,
                    policy.gap_labels,
                );
                tier += 1;
            }
        }

        if policy.show_body_length && config.main_body_length > 0.0 {
            let half = cm_to_units(config.main_body_length) / 2.0;
            self.vertical(
                side,
                tier,
                -half,
                half,
                config.main_body_length,
                policy.gap_labels,
            );
        }
    }

    /// Foot width, foundation span and body width below the drawing, the
    /// largest outermost.
    fn cross_axis_dimensions(&mut self, config: &SanitizedConfig) {
        let mut spans = vec![config.foot_width];
        if config.foundation_depth > 0.0 && config.foundation_depth != config.foot_width {
            spans.push(config.foundation_depth);
        }
        spans.push(config.main_body_width);
        spans.retain(|v| *v > 0.0);
        spans.sort_by(|a, b| a.total_cmp(b));

        let y = self.envelope.max_y;
        for (tier, value) in spans.into_iter().enumerate() {
            let half = cm_to_units(value) / 2.0;
            let spec = DimensionSpec::new(
                Point::new(-half, y),
                Point::new(half, y),
                DimensionAxis::Horizontal,
                self.offset(Side::Right, tier),
                format_cm(value),
            )
            .with_font_size(self.options.font_size);
            draw_dimension(self.builder, &spec, self.style);
        }
    }

    fn caption(&mut self) {
        let Some(caption) = self.options.caption.as_deref() else {
            return;
        };
        if caption.is_empty() {
            return;
        }
        let scale = self.options.annotation_scale;
        let above = self.builder.geometry_bounds().union(&self.builder.annotation_bounds());
        if above.is_empty() {
            return;
        }
        let font_size = self.options.caption_font_size;
        let y = above.min_y
            - self.options.policy.caption_gap * scale
            - font_size * scale / 2.0;
        let mut text = DrawText::new(Point::new(above.center().x, y), caption, font_size)
            .with_family(self.options.font_family.as_deref())
            .with_unit_scale(scale)
            .bold();
        text.style = Style::text("#000000").with_class("caption");
        let bounds = text.bounds();
        self.builder.add_annotation_with_bounds(Shape::Text(text), &bounds);
    }
}
