//! # FootingPlan
//!
//! Parametric plan drawings for a cylindrical body resting on a row of
//! repeated feet, each on its own foundation strip. One structural record
//! goes in; a dimensioned, page-fitted vector drawing comes out.
//!
//! ## Architecture
//!
//! FootingPlan is organized as a workspace with multiple crates:
//!
//! 1. **footingplan-core** - Structural record, sanitization, units, errors
//! 2. **footingplan-designer** - Layout, dimensioning, page fitting, SVG/DXF export
//! 3. **footingplan-store** - Named configuration storage and record import/export
//! 4. **footingplan-settings** - Typography, annotation policy and page settings
//! 5. **footingplan** - Command line binary that integrates all crates

pub mod cli;

pub use footingplan_core::{Error, InputError, Result, SanitizedConfig, StructuralConfig};

pub use footingplan_designer::{
    compose_plan_document, layout_plan, render_plan, AnnotationPolicy, ComposeOptions,
    ComposedDocument, ExportAdapter, ExportError, ExportFormat, ExportedFile, LayoutOptions,
    PageTemplate, PlanLayout, PlanMetrics, RenderedPlan, TemplateRegistry,
};

pub use footingplan_settings::{Config, SettingsError};

pub use footingplan_store::{
    ConfigRecord, ConfigStore, InMemoryConfigStore, JsonFileConfigStore, StoreError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so rendered documents can go to stdout
/// - RUST_LOG environment variable support (default level `info`)
/// - Pretty formatting, or one JSON object per line when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
