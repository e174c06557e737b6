//! Export Adapter.
//!
//! Hands a finished [`ComposedDocument`] and a page size to a
//! [`PageRenderer`] picked by format. The adapter validates the document
//! first and renders fully in memory, so a failure never leaves a partial file.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::compose::ComposedDocument;
use crate::dxf_renderer::render_dxf;
use crate::error::{ExportError, ExportResult};
use crate::svg_renderer::{render_page, SvgSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Svg,
    Dxf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Dxf => "dxf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Dxf => "image/vnd.dxf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "dxf" => Ok(ExportFormat::Dxf),
            other => Err(ExportError::RendererUnavailable(other.to_string())),
        }
    }
}

/// Physical page size handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub fn of(document: &ComposedDocument) -> Self {
        Self {
            width_mm: document.width_mm,
            height_mm: document.height_mm,
        }
    }
}

/// Converts a composed vector document into file bytes.
pub trait PageRenderer: Send + Sync {
    fn format(&self) -> ExportFormat;
    fn render(&self, document: &ComposedDocument, page: PageSize) -> ExportResult<Vec<u8>>;
}

/// SVG sized in millimeters with a view box in page units.
#[derive(Debug, Default)]
pub struct SvgPageRenderer;

impl PageRenderer for SvgPageRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Svg
    }

    fn render(&self, document: &ComposedDocument, page: PageSize) -> ExportResult<Vec<u8>> {
        if (page.width_mm - document.width_mm).abs() > 1e-6
            || (page.height_mm - document.height_mm).abs() > 1e-6
        {
            return Err(ExportError::MalformedDocument(format!(
                "page size {}x{} mm does not match the composed {}x{} mm",
                page.width_mm, page.height_mm, document.width_mm, document.height_mm
            )));
        }
        Ok(render_page(document, SvgSize::Millimeters).into_bytes())
    }
}

#[derive(Debug, Default)]
pub struct DxfPageRenderer;

impl PageRenderer for DxfPageRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Dxf
    }

    fn render(&self, document: &ComposedDocument, _page: PageSize) -> ExportResult<Vec<u8>> {
        render_dxf(document)
    }
}

/// Rendered file, held in memory until written.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub format: ExportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl ExportedFile {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Registry of page renderers keyed by format.
pub struct ExportAdapter {
    renderers: HashMap<ExportFormat, Box<dyn PageRenderer>>,
}

impl ExportAdapter {
    /// Adapter without any renderer.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Adapter with the SVG and DXF renderers.
    pub fn with_defaults() -> Self {
        let mut adapter = Self::new();
        adapter.register(Box::new(SvgPageRenderer));
        adapter.register(Box::new(DxfPageRenderer));
        adapter
    }

    pub fn register(&mut self, renderer: Box<dyn PageRenderer>) {
        self.renderers.insert(renderer.format(), renderer);
    }

    pub fn supports(&self, format: ExportFormat) -> bool {
        self.renderers.contains_key(&format)
    }

    /// Renders `document` as `format`. `base_name` gets the format's extension.
    pub fn export(
        &self,
        document: &ComposedDocument,
        format: ExportFormat,
        base_name: &str,
    ) -> ExportResult<ExportedFile> {
        validate_document(document)?;
        let renderer = self
            .renderers
            .get(&format)
            .ok_or_else(|| ExportError::RendererUnavailable(format.to_string()))?;

        let bytes = renderer.render(document, PageSize::of(document))?;
        let file_name = format!("{}.{}", sanitize_file_stem(base_name), format.extension());
        info!(
            "Exported {} ({} bytes, template {})",
            file_name,
            bytes.len(),
            document.template_id
        );
        Ok(ExportedFile {
            format,
            file_name,
            bytes,
            created_at: Utc::now(),
        })
    }
}

impl Default for ExportAdapter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for ExportAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formats: Vec<_> = self.renderers.keys().map(|k| k.to_string()).collect();
        formats.sort();
        f.debug_struct("ExportAdapter")
            .field("formats", &formats)
            .finish()
    }
}

fn validate_document(document: &ComposedDocument) -> ExportResult<()> {
    if document.root.children.is_empty() {
        return Err(ExportError::MissingRoot);
    }
    let sizes = [
        document.width,
        document.height,
        document.width_mm,
        document.height_mm,
    ];
    if sizes.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return Err(ExportError::MalformedDocument(format!(
            "page size {}x{} is not positive",
            document.width, document.height
        )));
    }
    if !document.fit.scale.is_finite() || document.fit.scale <= 0.0 {
        return Err(ExportError::MalformedDocument(format!(
            "fit scale {} is not positive",
            document.fit.scale
        )));
    }
    Ok(())
}

fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "plan".to_string()
    } else {
        stem
    }
}

/// Writes `file` into `dir` under its own file name. Returns the path written.
pub async fn write_export_to_dir(dir: &Path, file: &ExportedFile) -> ExportResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&file.file_name);
    write_export(&path, file).await?;
    Ok(path)
}

/// Writes an already rendered file in one call.
pub async fn write_export(path: &Path, file: &ExportedFile) -> ExportResult<()> {
    tokio::fs::write(path, &file.bytes).await?;
    debug!("Wrote {} bytes to {}", file.bytes.len(), path.display());
    Ok(())
}
