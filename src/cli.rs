//! Command line interface.
//!
//! ```text
//! footingplan render tank.json --template a3-landscape --format dxf
//! footingplan render --stored <id> --thumbnail
//! footingplan templates
//! footingplan store list | import <file> | export <file> | delete <id>
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use footingplan_core::StructuralConfig;
use footingplan_designer::{
    render_plan, write_export_to_dir, ComposeOptions, ExportAdapter, ExportFormat,
    TemplateRegistry,
};
use footingplan_settings::Config;
use footingplan_store::{
    export_store, import_into, ConfigStore, JsonFileConfigStore,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Settings file (.toml or .json); the platform default when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log as JSON lines instead of pretty text
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a structural configuration to a file
    Render(RenderArgs),
    /// List the available page templates
    Templates,
    /// Manage stored configurations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Structural configuration JSON file
    pub input: Option<PathBuf>,

    /// Render a stored configuration instead of a file
    #[arg(long, conflicts_with = "input")]
    pub stored: Option<String>,

    /// Page template id
    #[arg(short, long)]
    pub template: Option<String>,

    /// Output format (svg or dxf)
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output file name without extension
    #[arg(short, long)]
    pub name: Option<String>,

    /// Header title
    #[arg(long)]
    pub title: Option<String>,

    /// Geometry only, no dimensions or page furniture
    #[arg(long)]
    pub thumbnail: bool,
}

#[derive(Debug, Subcommand)]
pub enum StoreAction {
    /// List stored configurations
    List,
    /// Import records or bare configurations from a JSON file
    Import { file: PathBuf },
    /// Export every stored record to a JSON file
    Export { file: PathBuf },
    /// Delete a stored configuration
    Delete { id: String },
}

/// Runs one parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    match cli.command {
        Command::Render(args) => {
            let path = render(&settings, &args).await?;
            println!("{}", path.display());
        }
        Command::Templates => {
            let registry = load_templates(&settings)?;
            for template in registry.list_templates() {
                let marker = if template.id == registry.default_id() {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {:<18} {:>6.1} x {:<6.1} mm  {}",
                    marker, template.id, template.page_width_mm, template.page_height_mm, template.name
                );
            }
        }
        Command::Store { action } => {
            let store = open_store(&settings)?;
            match action {
                StoreAction::List => {
                    for record in store.list()? {
                        println!(
                            "{}  {:<24} {} feet  {}",
                            record.id,
                            record.name,
                            record.config.foot_count(),
                            record.modified_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
                StoreAction::Import { file } => {
                    let count = import_into(&store, &file)
                        .with_context(|| format!("Failed to import {}", file.display()))?;
                    println!("Imported {} configuration(s)", count);
                }
                StoreAction::Export { file } => {
                    let count = export_store(&store, &file)
                        .with_context(|| format!("Failed to export to {}", file.display()))?;
                    println!("Exported {} configuration(s)", count);
                }
                StoreAction::Delete { id } => {
                    store.delete(&id)?;
                    println!("Deleted {}", id);
                }
            }
        }
    }
    Ok(())
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => match Config::default_path() {
            Ok(path) => Ok(Config::load_or_default(&path)?),
            Err(e) => {
                warn!("{}; using default settings", e);
                Ok(Config::default())
            }
        },
    }
}

fn load_templates(settings: &Config) -> anyhow::Result<TemplateRegistry> {
    match &settings.page.template_file {
        Some(path) => TemplateRegistry::load_from_file(path),
        None => Ok(TemplateRegistry::builtin()),
    }
}

fn open_store(settings: &Config) -> anyhow::Result<JsonFileConfigStore> {
    JsonFileConfigStore::open(settings.store.path.clone()).with_context(|| {
        format!(
            "Failed to open configuration store {}",
            settings.store.path.display()
        )
    })
}

/// Renders and writes one plan. Returns the written path.
pub async fn render(settings: &Config, args: &RenderArgs) -> anyhow::Result<PathBuf> {
    let (config, default_name) = match (&args.input, &args.stored) {
        (Some(path), _) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config = StructuralConfig::from_json(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "plan".to_string());
            (config, stem)
        }
        (None, Some(id)) => {
            let record = open_store(settings)?.require(id)?;
            (record.config, record.name)
        }
        (None, None) => bail!("either an input file or --stored <id> is required"),
    };

    let registry = load_templates(settings)?;
    let template_id = args.template.as_deref().unwrap_or(&settings.page.template_id);
    let template = registry.get_template(template_id);

    let layout_options = settings.layout_options();
    let mut compose_options = if args.thumbnail {
        ComposeOptions {
            fill_ratio: settings.page.fill_ratio,
            ..ComposeOptions::thumbnail()
        }
    } else {
        settings.compose_options()
    };
    if let Some(title) = &args.title {
        compose_options.title = Some(title.clone());
    }

    let rendered = render_plan(&config, template, &layout_options, &compose_options);
    for warning in rendered
        .layout
        .warnings
        .iter()
        .chain(&rendered.document.warnings)
    {
        warn!("{}", warning);
    }
    info!(
        "{} feet, span {} cm, scale 1:{:.0} on {}",
        rendered.layout.metrics.foot_count,
        rendered.layout.metrics.total_foot_span,
        rendered.document.scale_denominator,
        template.id
    );

    let format = args.format.unwrap_or(settings.export.format);
    let name = args.name.clone().unwrap_or(default_name);
    let file = ExportAdapter::with_defaults().export(&rendered.document, format, &name)?;
    let dir = args
        .output
        .clone()
        .unwrap_or_else(|| settings.export.output_directory.clone());
    let path = write_export_to_dir(&dir, &file).await?;
    Ok(path)
}
