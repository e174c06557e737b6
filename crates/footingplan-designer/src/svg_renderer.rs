//! SVG serializer for the scene graph.
//!
//! Walks a [`DrawGroup`] tree and writes one SVG element per shape. Group
//! transforms become `matrix(...)` attributes, text rotations become
//! `rotate(angle pivot)` and styles flagged as non-scaling get
//! `vector-effect="non-scaling-stroke"`.
//!
//! Pure functions with no I/O; everything returns a `String`.

use std::fmt::Write;

use crate::compose::ComposedDocument;
use crate::model::{
    BoundingBox, DrawGroup, DrawLine, DrawMarker, DrawRectangle, DrawText, MarkerKind,
    SceneDocument, Shape, Style,
};

/// Units for the outer `width`/`height` attributes of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvgSize {
    /// Page units, matching the view box one to one
    Pixels,
    /// Physical paper size, for print pipelines
    Millimeters,
}

/// Escape the five XML special characters.
pub fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Compact number formatting: at most three decimals, no trailing zeros.
fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{:.3}", value);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Renders a composed page with its size in page units.
pub fn render_svg(document: &ComposedDocument) -> String {
    render_page(document, SvgSize::Pixels)
}

pub fn render_page(document: &ComposedDocument, size: SvgSize) -> String {
    let (width, height) = match size {
        SvgSize::Pixels => (num(document.width), num(document.height)),
        SvgSize::Millimeters => (
            format!("{}mm", num(document.width_mm)),
            format!("{}mm", num(document.height_mm)),
        ),
    };
    let view_box = BoundingBox::from_rect(0.0, 0.0, document.width, document.height);
    let mut out = String::new();
    write_preamble(&mut out, &width, &height, &view_box);
    let _ = writeln!(
        out,
        r##"  <rect x="0" y="0" width="{}" height="{}" fill="#ffffff"/>"##,
        num(document.width),
        num(document.height)
    );
    write_group(&mut out, &document.root, 1);
    out.push_str("</svg>\n");
    out
}

/// Renders an unfitted scene in drawing units, sized to its view box.
pub fn render_scene(document: &SceneDocument) -> String {
    let view_box = document.view_box;
    let mut out = String::new();
    write_preamble(
        &mut out,
        &num(view_box.width()),
        &num(view_box.height()),
        &view_box,
    );
    write_group(&mut out, &document.root, 1);
    out.push_str("</svg>\n");
    out
}

fn write_preamble(out: &mut String, width: &str, height: &str, view_box: &BoundingBox) {
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        width,
        height,
        num(view_box.min_x),
        num(view_box.min_y),
        num(view_box.width()),
        num(view_box.height()),
    );
}

fn write_shape(out: &mut String, shape: &Shape, depth: usize) {
    match shape {
        Shape::Group(group) => write_group(out, group, depth),
        Shape::Rectangle(rect) => write_rect(out, rect, depth),
        Shape::Line(line) => write_line(out, line, depth),
        Shape::Text(text) => write_text(out, text, depth),
        Shape::Marker(marker) => write_marker(out, marker, depth),
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn write_group(out: &mut String, group: &DrawGroup, depth: usize) {
    let mut attrs = String::new();
    if let Some(id) = &group.id {
        let _ = write!(attrs, r#" id="{}""#, xml_escape(id));
    }
    if let Some(class) = &group.class {
        let _ = write!(attrs, r#" class="{}""#, xml_escape(class));
    }
    if let Some(t) = &group.transform {
        let _ = write!(
            attrs,
            r#" transform="matrix({} 0 0 {} {} {})""#,
            num(t.scale),
            num(t.scale),
            num(t.translate.x),
            num(t.translate.y)
        );
    }
    let _ = writeln!(out, "{}<g{}>", indent(depth), attrs);
    for child in &group.children {
        write_shape(out, child, depth + 1);
    }
    let _ = writeln!(out, "{}</g>", indent(depth));
}

fn style_attrs(style: &Style) -> String {
    let mut attrs = String::new();
    match &style.fill {
        Some(fill) => {
            let _ = write!(attrs, r#" fill="{}""#, xml_escape(fill));
        }
        None => attrs.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &style.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-width="{}""#,
            xml_escape(stroke),
            num(style.stroke_width)
        );
    }
    if let Some(dash) = &style.dash {
        let pattern = dash.iter().map(|d| num(*d)).collect::<Vec<_>>().join(" ");
        let _ = write!(attrs, r#" stroke-dasharray="{}""#, pattern);
    }
    if style.non_scaling_stroke {
        attrs.push_str(r#" vector-effect="non-scaling-stroke""#);
    }
    if let Some(class) = &style.class {
        let _ = write!(attrs, r#" class="{}""#, xml_escape(class));
    }
    attrs
}

fn write_rect(out: &mut String, rect: &DrawRectangle, depth: usize) {
    let radius = if rect.corner_radius > 0.0 {
        format!(r#" rx="{}""#, num(rect.corner_radius))
    } else {
        String::new()
    };
    let _ = writeln!(
        out,
        r#"{}<rect x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
        indent(depth),
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height),
        radius,
        style_attrs(&rect.style)
    );
}

fn write_line(out: &mut String, line: &DrawLine, depth: usize) {
    let _ = writeln!(
        out,
        r#"{}<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
        indent(depth),
        num(line.start.x),
        num(line.start.y),
        num(line.end.x),
        num(line.end.y),
        style_attrs(&line.style)
    );
}

fn write_text(out: &mut String, text: &DrawText, depth: usize) {
    let mut attrs = format!(
        r#" x="{}" y="{}" font-size="{}" text-anchor="{}" dominant-baseline="central""#,
        num(text.position.x),
        num(text.position.y),
        num(text.effective_font_size()),
        text.anchor.as_svg()
    );
    if let Some(family) = &text.font_family {
        let _ = write!(attrs, r#" font-family="{}""#, xml_escape(family));
    }
    if text.bold {
        attrs.push_str(r#" font-weight="bold""#);
    }
    if let Some(rotation) = &text.rotation {
        let _ = write!(
            attrs,
            r#" transform="rotate({} {} {})""#,
            num(rotation.angle_deg),
            num(rotation.pivot.x),
            num(rotation.pivot.y)
        );
    }
    attrs.push_str(&style_attrs(&text.style));
    let _ = writeln!(
        out,
        "{}<text{}>{}</text>",
        indent(depth),
        attrs,
        xml_escape(&text.content)
    );
}

fn write_marker(out: &mut String, marker: &DrawMarker, depth: usize) {
    let outline = marker.outline();
    match marker.kind {
        MarkerKind::Arrow => {
            let points = outline
                .iter()
                .map(|p| format!("{},{}", num(p.x), num(p.y)))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(
                out,
                r#"{}<polygon points="{}"{}/>"#,
                indent(depth),
                points,
                style_attrs(&marker.style)
            );
        }
        MarkerKind::Tick => {
            if let [a, b] = outline.as_slice() {
                write_line(out, &DrawLine::new(*a, *b, marker.style.clone()), depth);
            }
        }
    }
}
