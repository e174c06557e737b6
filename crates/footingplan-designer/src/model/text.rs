use serde::{Deserialize, Serialize};

use footingplan_core::constants::TEXT_WIDTH_FACTOR;

use super::{BoundingBox, DrawingShape, Point, Projection, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Rotation applied about an explicit pivot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextRotation {
    pub angle_deg: f64,
    pub pivot: Point,
}

/// A single line of text, vertically centered on `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawText {
    pub position: Point,
    pub content: String,
    pub font_size: f64,
    pub font_family: Option<String>,
    pub bold: bool,
    pub anchor: TextAnchor,
    pub rotation: Option<TextRotation>,
    pub style: Style,
    /// Coordinate units per authored font unit in the frame the text lives in.
    /// Layout frames use the drawing's annotation scale; page frames use 1.
    #[serde(default = "default_unit_scale")]
    pub unit_scale: f64,
}

fn default_unit_scale() -> f64 {
    1.0
}

impl DrawText {
    pub fn new(position: Point, content: impl Into<String>, font_size: f64) -> Self {
        Self {
            position,
            content: content.into(),
            font_size,
            font_family: None,
            bold: false,
            anchor: TextAnchor::Middle,
            rotation: None,
            style: Style::text("#000000"),
            unit_scale: 1.0,
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_family(mut self, family: Option<&str>) -> Self {
        self.font_family = family.map(str::to_string);
        self
    }

    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    /// Font size in the coordinates of the current frame.
    pub fn effective_font_size(&self) -> f64 {
        self.font_size * self.unit_scale
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Rotates the label about its own position.
    pub fn rotated(mut self, angle_deg: f64) -> Self {
        self.rotation = Some(TextRotation {
            angle_deg,
            pivot: self.position,
        });
        self
    }

    /// Estimated advance width of the label.
    ///
    /// Approximation: character count times font size times a fixed factor.
    /// Real glyph metrics are not available at layout time.
    pub fn estimated_width(&self) -> f64 {
        estimate_text_width(&self.content, self.effective_font_size())
    }

    /// Unrotated extent around `position`.
    fn local_box(&self) -> BoundingBox {
        let w = self.estimated_width();
        let h = self.effective_font_size();
        let left = match self.anchor {
            TextAnchor::Start => self.position.x,
            TextAnchor::Middle => self.position.x - w / 2.0,
            TextAnchor::End => self.position.x - w,
        };
        BoundingBox::from_rect(left, self.position.y - h / 2.0, w, h)
    }
}

/// `chars * font_size * TEXT_WIDTH_FACTOR`.
pub fn estimate_text_width(content: &str, font_size: f64) -> f64 {
    content.chars().count() as f64 * font_size * TEXT_WIDTH_FACTOR
}

impl DrawingShape for DrawText {
    fn bounds(&self) -> BoundingBox {
        let local = self.local_box();
        match &self.rotation {
            Some(r) if r.angle_deg.abs() > f64::EPSILON => {
                let corners = local.corners().map(|c| c.rotate_about(r.pivot, r.angle_deg));
                BoundingBox::from_points(&corners)
            }
            _ => local,
        }
    }

    /// The anchor and the rotation pivot go through the same projection; the
    /// angle is kept because the fit scale is uniform.
    fn reproject(&self, projection: &dyn Projection) -> Self {
        Self {
            position: projection.project_point(self.position),
            rotation: self.rotation.map(|r| TextRotation {
                angle_deg: r.angle_deg,
                pivot: projection.project_point(r.pivot),
            }),
            unit_scale: 1.0,
            ..self.clone()
        }
    }
}
