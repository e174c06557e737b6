//! # Page Template Registry
//!
//! Static catalog of page templates: paper size, margins and the heights of
//! the header and legend bands, all in millimeters.
//!
//! Built-in templates:
//! - ISO A4 and A3, landscape and portrait
//! - US Letter landscape
//!
//! Lookups never fail. An unknown id resolves to the default template
//! (A4 landscape).

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_TEMPLATE_ID: &str = "a4-landscape";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl PageMargins {
    pub fn uniform(mm: f64) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTemplate {
    pub id: String,
    pub name: String,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margins: PageMargins,
    /// Title band at the top of the frame
    pub header_height_mm: f64,
    /// Legend band at the bottom of the frame
    pub legend_height_mm: f64,
}

impl PageTemplate {
    pub fn new(id: &str, name: &str, page_width_mm: f64, page_height_mm: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            page_width_mm,
            page_height_mm,
            margins: PageMargins::uniform(10.0),
            header_height_mm: 14.0,
            legend_height_mm: 22.0,
        }
    }

    pub fn with_margins(mut self, margins: PageMargins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_bands(mut self, header_height_mm: f64, legend_height_mm: f64) -> Self {
        self.header_height_mm = header_height_mm;
        self.legend_height_mm = legend_height_mm;
        self
    }

    pub fn is_landscape(&self) -> bool {
        self.page_width_mm >= self.page_height_mm
    }

    /// Height left for the drawing once margins and both bands are removed.
    pub fn content_height_mm(&self) -> f64 {
        self.page_height_mm
            - self.margins.top
            - self.margins.bottom
            - self.header_height_mm
            - self.legend_height_mm
    }

    pub fn content_width_mm(&self) -> f64 {
        self.page_width_mm - self.margins.left - self.margins.right
    }

    /// Checks that every size is finite and the content region is not empty.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.page_width_mm,
            self.page_height_mm,
            self.margins.top,
            self.margins.right,
            self.margins.bottom,
            self.margins.left,
            self.header_height_mm,
            self.legend_height_mm,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(anyhow!("template {} has a negative or non-finite size", self.id));
        }
        if self.content_width_mm() <= 0.0 || self.content_height_mm() <= 0.0 {
            return Err(anyhow!("template {} leaves no room for content", self.id));
        }
        Ok(())
    }
}

/// Catalog of page templates keyed by id.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, PageTemplate>,
    default_id: String,
    fallback: PageTemplate,
}

impl TemplateRegistry {
    /// Registry holding the built-in templates.
    pub fn builtin() -> Self {
        let fallback = a4_landscape();
        let mut registry = Self {
            templates: BTreeMap::new(),
            default_id: DEFAULT_TEMPLATE_ID.to_string(),
            fallback: fallback.clone(),
        };
        for template in [
            fallback,
            PageTemplate::new("a4-portrait", "ISO A4 portrait", 210.0, 297.0),
            PageTemplate::new("a3-landscape", "ISO A3 landscape", 420.0, 297.0)
                .with_bands(18.0, 28.0),
            PageTemplate::new("a3-portrait", "ISO A3 portrait", 297.0, 420.0)
                .with_bands(18.0, 28.0),
            PageTemplate::new("letter-landscape", "US Letter landscape", 279.4, 215.9)
                .with_margins(PageMargins::uniform(12.7)),
        ] {
            registry.templates.insert(template.id.clone(), template);
        }
        registry
    }

    /// Built-in templates plus the ones defined in a JSON array.
    pub fn from_json(content: &str) -> Result<Self> {
        let extra: Vec<PageTemplate> =
            serde_json::from_str(content).context("Failed to parse page templates")?;
        let mut registry = Self::builtin();
        for template in extra {
            registry.register(template)?;
        }
        Ok(registry)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read templates from {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Adds or replaces a template.
    pub fn register(&mut self, template: PageTemplate) -> Result<()> {
        template.validate()?;
        debug!("Registered page template {}", template.id);
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Changes the template unknown ids resolve to.
    pub fn set_default(&mut self, id: &str) -> Result<()> {
        let template = self
            .templates
            .get(id)
            .ok_or_else(|| anyhow!("unknown template: {}", id))?;
        self.fallback = template.clone();
        self.default_id = id.to_string();
        Ok(())
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn list_templates(&self) -> Vec<&PageTemplate> {
        self.templates.values().collect()
    }

    /// Template `id`, or the default template when `id` is unknown.
    pub fn get_template(&self, id: &str) -> &PageTemplate {
        match self.templates.get(id) {
            Some(template) => template,
            None => {
                warn!(
                    "Unknown page template {}; using {}",
                    id, self.default_id
                );
                &self.fallback
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn a4_landscape() -> PageTemplate {
    PageTemplate::new(DEFAULT_TEMPLATE_ID, "ISO A4 landscape", 297.0, 210.0)
}
