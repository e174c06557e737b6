//! Numeric constants shared across the drawing pipeline.

/// Drawing units per centimeter. Applied to every structural dimension
/// before any layout math happens.
pub const UNITS_PER_CM: f64 = 10.0;

/// Resolution used to convert template millimeters into page units.
pub const PAGE_DPI: f64 = 96.0;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Fraction of the content region the fitted drawing may occupy.
pub const FILL_RATIO: f64 = 0.92;

/// Below this share of the dominant axis the drawing is reported as too small.
pub const MIN_DOMINANT_COVERAGE: f64 = 0.6;

/// Estimated glyph advance as a fraction of the font size.
///
/// This is an approximation: real glyph metrics are unknown at layout time,
/// so label extents are padded generously instead of measured.
pub const TEXT_WIDTH_FACTOR: f64 = 0.6;

/// Smallest extent reported for a bounding box axis.
pub const MIN_BOUNDS_EXTENT: f64 = 1.0;

/// Feet counts below this produce an informational warning.
pub const RECOMMENDED_MIN_FEET: usize = 3;

/// Tolerance for floating point comparisons in geometry checks.
pub const EPSILON: f64 = 1e-9;
