//! Structural parameter model.
//!
//! [`StructuralConfig`] is the raw, immutable input record. Geometry code only
//! ever sees a [`SanitizedConfig`], produced by [`StructuralConfig::sanitize`],
//! which replaces negative or non-finite numbers with zero and reports every
//! substitution as a warning instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::constants::RECOMMENDED_MIN_FEET;
use crate::error::{InputError, Result};

/// Parameters describing a cylindrical body resting on a row of feet.
///
/// All lengths are centimeters. `foot_gaps[i]` is the clear, edge-to-edge gap
/// between foot `i` and foot `i + 1`, so the foot count is
/// `foot_gaps.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralConfig {
    /// Body extent along the repeat axis
    pub main_body_length: f64,
    /// Body extent across the repeat axis
    pub main_body_width: f64,
    /// Foot extent across the repeat axis
    pub foot_width: f64,
    /// Foot extent along the repeat axis
    pub foot_thickness: f64,
    /// Foundation strip extent along the repeat axis
    pub foundation_width: f64,
    /// Foundation strip extent across the repeat axis; zero means "match the foot"
    #[serde(default)]
    pub foundation_depth: f64,
    /// Clear gaps between adjacent feet
    #[serde(default)]
    pub foot_gaps: Vec<f64>,
}

impl Default for StructuralConfig {
    fn default() -> Self {
        Self {
            main_body_length: 220.0,
            main_body_width: 210.0,
            foot_width: 200.0,
            foot_thickness: 8.0,
            foundation_width: 40.0,
            foundation_depth: 0.0,
            foot_gaps: vec![79.0, 100.0, 79.0],
        }
    }
}

const NUMERIC_FIELDS: [&str; 6] = [
    "mainBodyLength",
    "mainBodyWidth",
    "footWidth",
    "footThickness",
    "foundationWidth",
    "foundationDepth",
];

fn check_field(field: &str, value: &Value) -> Result<()> {
    let reason = if field == "footGaps" {
        let numeric = value
            .as_array()
            .is_some_and(|gaps| gaps.iter().all(Value::is_number));
        (!numeric).then_some("expected an array of numbers")
    } else if NUMERIC_FIELDS.contains(&field) {
        (!value.is_number()).then_some("expected a number")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(InputError::InvalidField {
            field: field.to_string(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

/// A [`StructuralConfig`] whose values are all finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedConfig {
    pub main_body_length: f64,
    pub main_body_width: f64,
    pub foot_width: f64,
    pub foot_thickness: f64,
    pub foundation_width: f64,
    pub foundation_depth: f64,
    pub foot_gaps: Vec<f64>,
}

impl SanitizedConfig {
    /// Number of feet in the row.
    pub fn foot_count(&self) -> usize {
        self.foot_gaps.len() + 1
    }

    /// Cross-axis extent of a foundation strip.
    pub fn foundation_cross_span(&self) -> f64 {
        if self.foundation_depth > 0.0 {
            self.foundation_depth
        } else {
            self.foot_width
        }
    }
}

impl StructuralConfig {
    /// Parse a record from JSON.
    ///
    /// Text that is not JSON at all is an [`Error::Json`](crate::Error::Json).
    /// A known field holding the wrong kind of value is reported by name as
    /// [`InputError::InvalidField`]; any other shape problem is
    /// [`InputError::Malformed`].
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        let Some(fields) = value.as_object() else {
            return Err(InputError::Malformed {
                reason: "expected a JSON object".to_string(),
            }
            .into());
        };
        for (field, value) in fields {
            check_field(field, value)?;
        }
        serde_json::from_value(value).map_err(|e| {
            InputError::Malformed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Number of feet described by this record.
    pub fn foot_count(&self) -> usize {
        self.foot_gaps.len() + 1
    }

    /// Replace invalid values with safe defaults.
    ///
    /// Never fails. Every substitution, every degenerate primary dimension and
    /// a short foot row each add one human-readable warning.
    pub fn sanitize(&self) -> (SanitizedConfig, Vec<String>) {
        let mut warnings = Vec::new();

        let main_body_length =
            sanitize_primary("mainBodyLength", self.main_body_length, &mut warnings);
        let main_body_width =
            sanitize_primary("mainBodyWidth", self.main_body_width, &mut warnings);
        let foot_width = sanitize_primary("footWidth", self.foot_width, &mut warnings);
        let foot_thickness =
            sanitize_primary("footThickness", self.foot_thickness, &mut warnings);
        let foundation_width =
            sanitize_primary("foundationWidth", self.foundation_width, &mut warnings);
        let foundation_depth =
            sanitize_value("foundationDepth", self.foundation_depth, &mut warnings);

        let foot_gaps = self
            .foot_gaps
            .iter()
            .enumerate()
            .map(|(i, &gap)| sanitize_value(&format!("footGaps[{}]", i), gap, &mut warnings))
            .collect::<Vec<_>>();

        let foot_count = foot_gaps.len() + 1;
        if foot_count < RECOMMENDED_MIN_FEET {
            let message = format!(
                "only {} foot/feet configured; at least {} are recommended",
                foot_count, RECOMMENDED_MIN_FEET
            );
            warn!("{}", message);
            warnings.push(message);
        }

        (
            SanitizedConfig {
                main_body_length,
                main_body_width,
                foot_width,
                foot_thickness,
                foundation_width,
                foundation_depth,
                foot_gaps,
            },
            warnings,
        )
    }
}

fn sanitize_value(name: &str, value: f64, warnings: &mut Vec<String>) -> f64 {
    if !value.is_finite() {
        let message = format!("{} is not a finite number ({}); using 0", name, value);
        warn!("{}", message);
        warnings.push(message);
        return 0.0;
    }
    if value < 0.0 {
        let message = format!("{} is negative ({}); using 0", name, value);
        warn!("{}", message);
        warnings.push(message);
        return 0.0;
    }
    value
}

/// Primary dimensions additionally warn when they end up zero.
fn sanitize_primary(name: &str, value: f64, warnings: &mut Vec<String>) -> f64 {
    let sanitized = sanitize_value(name, value, warnings);
    if sanitized == 0.0 {
        let message = format!("{} is zero; geometry will be degenerate", name);
        warn!("{}", message);
        warnings.push(message);
    }
    sanitized
}
