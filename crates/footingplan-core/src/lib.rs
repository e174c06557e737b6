//! # FootingPlan Core
//!
//! Core types, constants and utilities for FootingPlan.
//! Provides the structural parameter model, the drawing-unit conventions
//! and the shared error taxonomy used by every other crate in the workspace.

pub mod constants;
pub mod data;
pub mod error;
pub mod units;

pub use data::{SanitizedConfig, StructuralConfig};

pub use error::{Error, InputError, Result};
