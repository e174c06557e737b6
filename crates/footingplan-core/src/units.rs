//! Unit conversion utilities
//!
//! Structural dimensions arrive in centimeters and are converted to drawing
//! units once, up front. Page templates are specified in millimeters and
//! converted to page units at [`PAGE_DPI`](crate::constants::PAGE_DPI).

use crate::constants::{MM_PER_INCH, PAGE_DPI, UNITS_PER_CM};

/// Convert centimeters to drawing units.
pub fn cm_to_units(cm: f64) -> f64 {
    cm * UNITS_PER_CM
}

/// Convert drawing units back to centimeters.
pub fn units_to_cm(units: f64) -> f64 {
    units / UNITS_PER_CM
}

/// Convert template millimeters to page units.
pub fn mm_to_px(mm: f64) -> f64 {
    mm * PAGE_DPI / MM_PER_INCH
}

/// Convert page units to millimeters.
pub fn px_to_mm(px: f64) -> f64 {
    px * MM_PER_INCH / PAGE_DPI
}

/// Format a centimeter value for a dimension label.
///
/// Whole numbers print without decimals, everything else with one.
pub fn format_cm(value_cm: f64) -> String {
    let rounded = (value_cm * 10.0).round() / 10.0;
    if (rounded - rounded.round()).abs() < 1e-9 {
        format!("{}", rounded.round() as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

/// Drawing scale denominator for a fitted page.
///
/// `scale` is page units per drawing unit. One centimeter of structure becomes
/// `UNITS_PER_CM * scale` page units, i.e. `px_to_mm(...)` millimeters on paper,
/// so the paper-to-real ratio is `10 mm / that`.
pub fn scale_denominator(scale: f64) -> f64 {
    let paper_mm_per_cm = px_to_mm(UNITS_PER_CM * scale);
    if paper_mm_per_cm <= 0.0 || !paper_mm_per_cm.is_finite() {
        return 1.0;
    }
    10.0 / paper_mm_per_cm
}
