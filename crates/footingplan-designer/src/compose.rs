//! Page Fitting / Composition Engine.
//!
//! Places a [`PlanLayout`] into the content region of a [`PageTemplate`]:
//! the geometry layer is wrapped in one group transform, every annotation
//! primitive is re-projected on its own so stroke widths and font sizes keep
//! their authored page size, and the page furniture (frame, header, legend)
//! is drawn around it.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use footingplan_core::constants::{FILL_RATIO, MIN_DOMINANT_COVERAGE};
use footingplan_core::units::{mm_to_px, scale_denominator};
use footingplan_core::StructuralConfig;

use crate::layout::{layout_plan, LayoutOptions, PlanLayout};
use crate::model::{
    BoundingBox, DrawGroup, DrawLine, DrawMarker, DrawRectangle, DrawText, DrawingShape,
    LayerRole, Point, Shape, Style, TextAnchor,
};
use crate::templates::PageTemplate;
use crate::viewport::{checked_fill_ratio, fit_scale, fit_to_region, FitTransform};

/// Named page regions in page units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRegions {
    pub page: BoundingBox,
    /// Page minus margins
    pub frame: BoundingBox,
    pub header: BoundingBox,
    pub content: BoundingBox,
    pub legend: BoundingBox,
}

impl PageRegions {
    /// Partitions the frame top to bottom into header, content and legend.
    pub fn from_template(template: &PageTemplate) -> Self {
        let page = BoundingBox::from_rect(
            0.0,
            0.0,
            mm_to_px(template.page_width_mm),
            mm_to_px(template.page_height_mm),
        );
        let frame = BoundingBox::new(
            mm_to_px(template.margins.left),
            mm_to_px(template.margins.top),
            page.max_x - mm_to_px(template.margins.right),
            page.max_y - mm_to_px(template.margins.bottom),
        );
        let header_bottom = (frame.min_y + mm_to_px(template.header_height_mm)).min(frame.max_y);
        let legend_top = (frame.max_y - mm_to_px(template.legend_height_mm)).max(header_bottom);

        Self {
            page,
            frame,
            header: BoundingBox::new(frame.min_x, frame.min_y, frame.max_x, header_bottom),
            content: BoundingBox::new(frame.min_x, header_bottom, frame.max_x, legend_top),
            legend: BoundingBox::new(frame.min_x, legend_top, frame.max_x, frame.max_y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    pub fill_ratio: f64,
    pub min_dominant_coverage: f64,
    /// Fit geometry and annotations together. Off fits geometry alone.
    pub include_annotations_in_fit: bool,
    pub show_annotations: bool,
    pub show_furniture: bool,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub notes: Vec<String>,
    pub font_family: Option<String>,
    pub title_font_size: f64,
    pub legend_font_size: f64,
    /// Print the drawing scale in the legend
    pub show_scale: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            fill_ratio: FILL_RATIO,
            min_dominant_coverage: MIN_DOMINANT_COVERAGE,
            include_annotations_in_fit: true,
            show_annotations: true,
            show_furniture: true,
            title: Some("Foundation plan".to_string()),
            subtitle: None,
            notes: Vec::new(),
            font_family: None,
            title_font_size: 16.0,
            legend_font_size: 9.0,
            show_scale: true,
        }
    }
}

impl ComposeOptions {
    /// Geometry only, fitted to the content region, no page furniture.
    pub fn thumbnail() -> Self {
        Self {
            include_annotations_in_fit: false,
            show_annotations: false,
            show_furniture: false,
            title: None,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComposedDocument {
    /// Page size in page units
    pub width: f64,
    pub height: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub template_id: String,
    pub regions: PageRegions,
    pub fit: FitTransform,
    /// Share of the content region covered on the dominant axis
    pub coverage: f64,
    pub scale_denominator: f64,
    pub root: DrawGroup,
    pub warnings: Vec<String>,
}

impl ComposedDocument {
    pub fn layer(&self, role: LayerRole) -> Option<&DrawGroup> {
        self.root.find_layer(role)
    }
}

/// Fits `layout` into `template` and adds the page furniture.
///
/// Never fails; every fallback is reported in `warnings`.
pub fn compose_plan_document(
    template: &PageTemplate,
    layout: &PlanLayout,
    options: &ComposeOptions,
) -> ComposedDocument {
    let regions = PageRegions::from_template(template);
    let mut warnings = layout.warnings.clone();

    let source = source_bounds(layout, options, &mut warnings);
    let (fit, fit_warnings) = fit_to_region(&source, &regions.content, options.fill_ratio);
    warnings.extend(fit_warnings);

    let drawing = fit_layers(layout, &fit, options, &mut warnings);

    let fitted_geometry = if layout.geometry_bounds.is_valid() {
        fit.project_bounds(&layout.geometry_bounds)
    } else {
        fit.project_bounds(&source)
    };
    let coverage = dominant_coverage(&fitted_geometry, &regions.content);
    if coverage < options.min_dominant_coverage {
        let message = format!(
            "drawing covers {:.0}% of the content region; below the {:.0}% minimum",
            coverage * 100.0,
            options.min_dominant_coverage * 100.0
        );
        warn!("{}", message);
        warnings.push(message);
    }

    let denominator = scale_denominator(fit.scale);
    let mut root = DrawGroup::new().with_id("page");
    if options.show_furniture {
        root.push(Shape::Group(furniture(
            template,
            &regions,
            options,
            denominator,
        )));
    }
    for layer in drawing {
        root.push(Shape::Group(layer));
    }

    debug!(
        "Composed on {}: {}, coverage {:.2}, 1:{:.0}",
        template.id, fit, coverage, denominator
    );

    ComposedDocument {
        width: regions.page.raw_width(),
        height: regions.page.raw_height(),
        width_mm: template.page_width_mm,
        height_mm: template.page_height_mm,
        template_id: template.id.clone(),
        regions,
        fit,
        coverage,
        scale_denominator: denominator,
        root,
        warnings,
    }
}

fn source_bounds(
    layout: &PlanLayout,
    options: &ComposeOptions,
    warnings: &mut Vec<String>,
) -> BoundingBox {
    if !layout.geometry_bounds.is_valid() {
        let message = format!(
            "geometry bounds {:?} are degenerate; fitting the declared extent {:?}",
            layout.geometry_bounds, layout.document.view_box
        );
        warn!("{}", message);
        warnings.push(message);
        return layout.document.view_box;
    }
    if options.include_annotations_in_fit {
        layout.geometry_bounds.union(&layout.annotation_bounds)
    } else {
        layout.geometry_bounds
    }
}

/// Geometry keeps its shapes and gains one transform; annotations are
/// re-projected primitive by primitive. A document without both layers is
/// transformed as one unit.
fn fit_layers(
    layout: &PlanLayout,
    fit: &FitTransform,
    options: &ComposeOptions,
    warnings: &mut Vec<String>,
) -> Vec<DrawGroup> {
    let document = &layout.document;
    match (
        document.layer(LayerRole::Geometry),
        document.layer(LayerRole::Annotations),
    ) {
        (Some(geometry), Some(annotations)) => {
            let mut layers = vec![with_fit_transform(geometry, fit)];
            if options.show_annotations {
                layers.push(annotations.reproject(fit));
            }
            layers
        }
        _ => {
            let message =
                "geometry or annotation layer missing; transforming the whole drawing".to_string();
            warn!("{}", message);
            warnings.push(message);
            vec![with_fit_transform(&document.root, fit)]
        }
    }
}

fn with_fit_transform(group: &DrawGroup, fit: &FitTransform) -> DrawGroup {
    let transform = match &group.transform {
        Some(inner) => fit.group_transform().then(inner),
        None => fit.group_transform(),
    };
    DrawGroup {
        transform: Some(transform),
        ..group.clone()
    }
}

/// Larger of the two axis ratios between `content` and `region`.
pub fn dominant_coverage(content: &BoundingBox, region: &BoundingBox) -> f64 {
    if content.is_empty() {
        return 0.0;
    }
    let x = content.raw_width() / region.width();
    let y = content.raw_height() / region.height();
    let coverage = x.max(y);
    if coverage.is_finite() {
        coverage
    } else {
        0.0
    }
}

fn furniture(
    template: &PageTemplate,
    regions: &PageRegions,
    options: &ComposeOptions,
    denominator: f64,
) -> DrawGroup {
    let mut children = Vec::new();
    let frame_style = Style::stroke("#000000", 1.2).with_class("frame");
    let family = options.font_family.as_deref();

    children.push(Shape::Rectangle(DrawRectangle::new(
        regions.frame.min_x,
        regions.frame.min_y,
        regions.frame.raw_width(),
        regions.frame.raw_height(),
        frame_style.clone(),
    )));
    if regions.header.raw_height() > 0.0 {
        children.push(divider(regions.header.max_y, &regions.frame, &frame_style));
    }
    if regions.legend.raw_height() > 0.0 {
        children.push(divider(regions.legend.min_y, &regions.frame, &frame_style));
    }

    // Header
    let header = &regions.header;
    if header.raw_height() > 0.0 {
        if let Some(title) = options.title.as_deref() {
            children.push(Shape::Text(
                DrawText::new(header.center(), title, options.title_font_size)
                    .with_family(family)
                    .bold(),
            ));
        }
        let subtitle = options.subtitle.as_deref().unwrap_or(template.name.as_str());
        children.push(Shape::Text(
            DrawText::new(
                Point::new(header.max_x - 8.0, header.center().y),
                subtitle,
                options.legend_font_size,
            )
            .with_family(family)
            .with_anchor(TextAnchor::End),
        ));
    }

    // Legend
    let legend = &regions.legend;
    if legend.raw_height() > 0.0 {
        let font = options.legend_font_size;
        let pad = 8.0;
        let row_a = legend.min_y + legend.raw_height() * 0.3;
        let row_b = legend.min_y + legend.raw_height() * 0.7;
        let key_x = legend.min_x + pad;

        children.push(Shape::Line(DrawLine::new(
            Point::new(key_x, row_a),
            Point::new(key_x + 30.0, row_a),
            Style::stroke("#000000", 1.6).with_class("legend-key"),
        )));
        children.push(legend_text(key_x + 38.0, row_a, "Structure", font, family));

        let dim_color = "#1a4f8b";
        children.push(Shape::Line(DrawLine::new(
            Point::new(key_x, row_b),
            Point::new(key_x + 30.0, row_b),
            Style::stroke(dim_color, 0.8).with_class("legend-key"),
        )));
        for (x, angle) in [(key_x, 180.0), (key_x + 30.0, 0.0)] {
            children.push(Shape::Marker(DrawMarker::arrow(
                Point::new(x, row_b),
                angle,
                6.0,
                Style::filled(dim_color, dim_color, 0.8),
            )));
        }
        children.push(legend_text(key_x + 38.0, row_b, "Dimensions", font, family));

        let notes_x = legend.min_x + legend.raw_width() * 0.3;
        for (i, note) in options.notes.iter().enumerate() {
            let y = legend.min_y + pad + font / 2.0 + i as f64 * font * 1.4;
            if y > legend.max_y - font / 2.0 {
                break;
            }
            children.push(legend_text(notes_x, y, note, font, family));
        }

        let right_x = legend.max_x - pad;
        children.push(Shape::Text(
            DrawText::new(Point::new(right_x, row_a), "All dimensions in cm", font)
                .with_family(family)
                .with_anchor(TextAnchor::End),
        ));
        if options.show_scale {
            children.push(Shape::Text(
                DrawText::new(
                    Point::new(right_x, row_b),
                    format!("Scale 1:{:.0}", denominator),
                    font,
                )
                .with_family(family)
                .with_anchor(TextAnchor::End),
            ));
        }
    }

    DrawGroup::layer(LayerRole::Furniture, children)
}

fn divider(y: f64, frame: &BoundingBox, style: &Style) -> Shape {
    Shape::Line(DrawLine::new(
        Point::new(frame.min_x, y),
        Point::new(frame.max_x, y),
        style.clone(),
    ))
}

fn legend_text(x: f64, y: f64, content: &str, font: f64, family: Option<&str>) -> Shape {
    Shape::Text(
        DrawText::new(Point::new(x, y), content, font)
            .with_family(family)
            .with_anchor(TextAnchor::Start),
    )
}

/// A layout together with the page it was composed on.
#[derive(Debug, Clone)]
pub struct RenderedPlan {
    pub layout: PlanLayout,
    pub document: ComposedDocument,
}

/// Lays out and composes `config` so that annotations come out at their
/// authored page size.
///
/// Annotation sizes are scaled into drawing units by the inverse of the fit
/// scale, but the fit scale depends on the annotation extent. A first layout
/// at the geometry-only scale measures the annotation margins in page units;
/// the final scale then solves `scale * geometry + margins = fill * region`
/// on the limiting axis.
pub fn render_plan(
    config: &StructuralConfig,
    template: &PageTemplate,
    layout_options: &LayoutOptions,
    compose_options: &ComposeOptions,
) -> RenderedPlan {
    let regions = PageRegions::from_template(template);
    let content = regions.content;
    let (fill, _) = checked_fill_ratio(compose_options.fill_ratio);

    let probe = layout_plan(config, &layout_options.with_annotation_scale(1.0));
    let Some(geometry_scale) = fit_scale(&probe.geometry_bounds, &content, fill) else {
        let document = compose_plan_document(template, &probe, compose_options);
        return RenderedPlan {
            layout: probe,
            document,
        };
    };

    let mut scale = geometry_scale;
    if compose_options.include_annotations_in_fit {
        let first = layout_plan(config, &layout_options.with_annotation_scale(1.0 / scale));
        let structure = first.structure_bounds;
        let all = first.geometry_bounds.union(&first.annotation_bounds);
        let margin_x = (all.width() - structure.width()) * scale;
        let margin_y = (all.height() - structure.height()) * scale;
        let solved = ((content.raw_width() * fill - margin_x) / structure.width())
            .min((content.raw_height() * fill - margin_y) / structure.height());
        scale = if solved.is_finite() && solved > 0.0 {
            solved
        } else {
            // Annotations alone outgrow the region; settle for a plain fit.
            fit_scale(&all, &content, fill).unwrap_or(geometry_scale)
        };
    }

    let layout = layout_plan(config, &layout_options.with_annotation_scale(1.0 / scale));
    let document = compose_plan_document(template, &layout, compose_options);
    RenderedPlan { layout, document }
}
