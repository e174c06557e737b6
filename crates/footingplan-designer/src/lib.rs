//! # FootingPlan Designer
//!
//! Turns a [`StructuralConfig`](footingplan_core::StructuralConfig) into a
//! dimensioned plan drawing fitted onto a page.
//!
//! ## Pipeline
//!
//! ```text
//! StructuralConfig
//!   └── layout_plan          (shapes, metrics, geometry + annotation bounds)
//!         └── compose_plan_document   (fit transform, page furniture)
//!               └── ExportAdapter     (SVG or DXF bytes)
//! ```
//!
//! Data only flows forward. Every stage is a pure function of its inputs;
//! scene construction state lives in a [`SceneBuilder`] scoped to one call.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use footingplan_core::StructuralConfig;
//! use footingplan_designer::{render_plan, ComposeOptions, LayoutOptions, TemplateRegistry};
//!
//! let templates = TemplateRegistry::builtin();
//! let rendered = render_plan(
//!     &StructuralConfig::default(),
//!     templates.get_template("a4-landscape"),
//!     &LayoutOptions::default(),
//!     &ComposeOptions::default(),
//! );
//! let svg = footingplan_designer::svg_renderer::render_svg(&rendered.document);
//! ```

pub mod compose;
pub mod dimension;
pub mod dxf_renderer;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod scene;
pub mod svg_renderer;
pub mod templates;
pub mod viewport;

pub use compose::{
    compose_plan_document, render_plan, ComposeOptions, ComposedDocument, PageRegions,
    RenderedPlan,
};
pub use dimension::{
    compute_dimension, compute_ordinate, draw_dimension, draw_ordinate, DimensionAxis,
    DimensionGeometry, DimensionSpec, DimensionStyle, LabelOrientation, OrdinateGeometry,
    OrdinateSpec,
};
pub use error::{ExportError, ExportResult};
pub use export::{
    write_export, write_export_to_dir, DxfPageRenderer, ExportAdapter, ExportFormat,
    ExportedFile, PageRenderer, PageSize, SvgPageRenderer,
};
pub use layout::{
    foot_centers, layout_plan, place_feet, AnnotationPolicy, FootPlacement, LayoutOptions,
    PlanLayout, PlanMetrics, Side,
};
pub use model::{
    BoundingBox, DrawGroup, DrawLine, DrawMarker, DrawRectangle, DrawText, DrawingShape,
    GroupTransform, LayerRole, MarkerKind, Point, Projection, SceneDocument, Shape, Style,
    TextAnchor, TextRotation,
};
pub use scene::{BuiltScene, SceneBuilder};
pub use templates::{PageMargins, PageTemplate, TemplateRegistry, DEFAULT_TEMPLATE_ID};
pub use viewport::{checked_fill_ratio, fit_scale, fit_to_region, FitTransform};
