//! # FootingPlan Store
//!
//! Named structural configurations: the record model, the [`ConfigStore`]
//! trait with in-memory and JSON-file backends, and raw record import and
//! export.

pub mod error;
pub mod model;
pub mod store;
pub mod transfer;

pub use error::{StoreError, StoreResult};
pub use model::ConfigRecord;
pub use store::{ConfigStore, InMemoryConfigStore, JsonFileConfigStore};
pub use transfer::{export_records, export_store, import_into, import_records};
