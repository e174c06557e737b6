//! FootingPlan Settings Crate
//!
//! Application configuration: typography, annotation placement, page fitting,
//! export defaults and the configuration store location.

pub mod config;
pub mod error;

pub use config::{Config, ExportSettings, PageSettings, StoreSettings, TypographySettings};
pub use error::{SettingsError, SettingsResult};
