//! Application configuration for FootingPlan.
//!
//! Stored as JSON or TOML, chosen by file extension. Sections:
//! - Typography (fonts and sizes for labels, titles and the legend)
//! - Annotation placement policy (tiers, offsets, label orientation)
//! - Page fitting (template, fill ratio, coverage threshold)
//! - Export defaults (format, output directory)
//! - Configuration store location
//!
//! Every section has defaults, so a file only needs the values it changes.

use footingplan_designer::{
    AnnotationPolicy, ComposeOptions, ExportFormat, LayoutOptions, DEFAULT_TEMPLATE_ID,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "footingplan";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographySettings {
    /// Font family for every label; renderer default when unset
    pub font_family: Option<String>,
    /// Dimension labels, page units
    pub dimension_font_size: f64,
    /// Caption above the plan
    pub caption_font_size: f64,
    /// Header band title
    pub title_font_size: f64,
    /// Legend band text
    pub legend_font_size: f64,
}

impl Default for TypographySettings {
    fn default() -> Self {
        Self {
            font_family: None,
            dimension_font_size: 12.0,
            caption_font_size: 16.0,
            title_font_size: 16.0,
            legend_font_size: 9.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub template_id: String,
    /// Extra templates loaded on top of the built-in ones
    pub template_file: Option<PathBuf>,
    pub fill_ratio: f64,
    pub min_dominant_coverage: f64,
    pub include_annotations_in_fit: bool,
    pub caption: Option<String>,
    pub title: Option<String>,
    pub notes: Vec<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        let compose = ComposeOptions::default();
        Self {
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            template_file: None,
            fill_ratio: compose.fill_ratio,
            min_dominant_coverage: compose.min_dominant_coverage,
            include_annotations_in_fit: compose.include_annotations_in_fit,
            caption: LayoutOptions::default().caption,
            title: compose.title,
            notes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub format: ExportFormat,
    pub output_directory: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Svg,
            output_directory: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// JSON file holding the saved configurations
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(APP_DIR).join("configs.json"),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub typography: TypographySettings,
    pub annotation: AnnotationPolicy,
    pub page: PageSettings,
    pub export: ExportSettings,
    pub store: StoreSettings,
}

enum FileFormat {
    Json,
    Toml,
}

fn file_format(path: &Path) -> SettingsResult<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location, e.g. `~/.config/footingplan/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = file_format(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No settings at {}; using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match file_format(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        let t = &self.typography;
        for (key, value) in [
            ("typography.dimension_font_size", t.dimension_font_size),
            ("typography.caption_font_size", t.caption_font_size),
            ("typography.title_font_size", t.title_font_size),
            ("typography.legend_font_size", t.legend_font_size),
        ] {
            positive(key, value)?;
        }

        let a = &self.annotation;
        let d = &a.dimension;
        for (key, value) in [
            ("annotation.first_tier_offset", a.first_tier_offset),
            ("annotation.tier_spacing", a.tier_spacing),
            ("annotation.centerline_overhang", a.centerline_overhang),
            ("annotation.caption_gap", a.caption_gap),
            ("annotation.dimension.extension_gap", d.extension_gap),
            ("annotation.dimension.extension_overshoot", d.extension_overshoot),
            ("annotation.dimension.text_offset", d.text_offset),
            ("annotation.dimension.padding", d.padding),
        ] {
            non_negative(key, value)?;
        }
        positive("annotation.dimension.arrow_size", d.arrow_size)?;
        positive("annotation.dimension.stroke_width", d.stroke_width)?;

        let p = &self.page;
        if p.template_id.trim().is_empty() {
            return Err(SettingsError::invalid("page.template_id", "must not be empty"));
        }
        if !(p.fill_ratio > 0.0 && p.fill_ratio < 1.0) {
            return Err(SettingsError::invalid(
                "page.fill_ratio",
                format!("{} is outside (0, 1)", p.fill_ratio),
            ));
        }
        if !(0.0..=1.0).contains(&p.min_dominant_coverage) {
            return Err(SettingsError::invalid(
                "page.min_dominant_coverage",
                format!("{} is outside [0, 1]", p.min_dominant_coverage),
            ));
        }
        Ok(())
    }

    /// Layout options built from the typography and annotation sections.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            caption: self.page.caption.clone(),
            font_family: self.typography.font_family.clone(),
            font_size: self.typography.dimension_font_size,
            caption_font_size: self.typography.caption_font_size,
            policy: self.annotation.clone(),
            ..LayoutOptions::default()
        }
    }

    /// Page composition options built from the page and typography sections.
    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            fill_ratio: self.page.fill_ratio,
            min_dominant_coverage: self.page.min_dominant_coverage,
            include_annotations_in_fit: self.page.include_annotations_in_fit,
            title: self.page.title.clone(),
            notes: self.page.notes.clone(),
            font_family: self.typography.font_family.clone(),
            title_font_size: self.typography.title_font_size,
            legend_font_size: self.typography.legend_font_size,
            ..ComposeOptions::default()
        }
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("{} must be > 0", value)))
    }
}

fn non_negative(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("{} must be >= 0", value)))
    }
}
