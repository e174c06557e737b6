use footingplan_core::StructuralConfig;
use footingplan_designer::{
    render_plan, write_export, write_export_to_dir, ComposeOptions, ComposedDocument, DrawGroup,
    ExportAdapter, ExportError, ExportFormat, LayoutOptions, TemplateRegistry,
};

fn composed() -> ComposedDocument {
    let registry = TemplateRegistry::builtin();
    render_plan(
        &StructuralConfig::default(),
        registry.get_template("a4-landscape"),
        &LayoutOptions::default(),
        &ComposeOptions::default(),
    )
    .document
}

#[test]
fn test_export_svg() {
    let adapter = ExportAdapter::with_defaults();
    let file = adapter
        .export(&composed(), ExportFormat::Svg, "tank plan")
        .unwrap();
    assert_eq!(file.file_name, "tank_plan.svg");
    assert_eq!(file.mime_type(), "image/svg+xml");
    let svg = String::from_utf8(file.bytes.clone()).unwrap();
    assert!(svg.contains(r#"width="297mm""#));
}

#[test]
fn test_export_dxf() {
    let adapter = ExportAdapter::default();
    let file = adapter.export(&composed(), ExportFormat::Dxf, "plan").unwrap();
    assert_eq!(file.file_name, "plan.dxf");
    assert!(!file.is_empty());
}

#[test]
fn test_export_is_deterministic() {
    let adapter = ExportAdapter::with_defaults();
    let document = composed();
    let a = adapter.export(&document, ExportFormat::Svg, "a").unwrap();
    let b = adapter.export(&document, ExportFormat::Svg, "a").unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn test_missing_root_is_rejected() {
    let mut document = composed();
    document.root = DrawGroup::new();
    let err = ExportAdapter::with_defaults()
        .export(&document, ExportFormat::Svg, "plan")
        .unwrap_err();
    assert!(matches!(err, ExportError::MissingRoot));
    assert!(err.is_document_error());
}

#[test]
fn test_malformed_page_is_rejected() {
    let mut document = composed();
    document.width_mm = 0.0;
    let err = ExportAdapter::with_defaults()
        .export(&document, ExportFormat::Dxf, "plan")
        .unwrap_err();
    assert!(matches!(err, ExportError::MalformedDocument(_)));
}

#[test]
fn test_unregistered_format() {
    let err = ExportAdapter::new()
        .export(&composed(), ExportFormat::Svg, "plan")
        .unwrap_err();
    assert!(matches!(err, ExportError::RendererUnavailable(_)));
    assert!(!err.is_document_error());
}

#[tokio::test]
async fn test_write_export_to_dir() {
    let dir = tempfile::tempdir().unwrap();
    let file = ExportAdapter::with_defaults()
        .export(&composed(), ExportFormat::Svg, "plan")
        .unwrap();

    let nested = dir.path().join("out");
    let path = write_export_to_dir(&nested, &file).await.unwrap();
    assert_eq!(path, nested.join("plan.svg"));
    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, file.bytes);
}

#[tokio::test]
async fn test_write_export_fails_without_parent() {
    let dir = tempfile::tempdir().unwrap();
    let file = ExportAdapter::with_defaults()
        .export(&composed(), ExportFormat::Dxf, "plan")
        .unwrap();
    let path = dir.path().join("missing").join("plan.dxf");
    let err = write_export(&path, &file).await.unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
    assert!(!path.exists());
}
