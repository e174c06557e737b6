use footingplan_core::StructuralConfig;
use footingplan_designer::dxf_renderer::render_dxf;
use footingplan_designer::{render_plan, ComposeOptions, LayoutOptions, TemplateRegistry};

fn dxf_text() -> String {
    let registry = TemplateRegistry::builtin();
    let plan = render_plan(
        &StructuralConfig::default(),
        registry.get_template("a3-landscape"),
        &LayoutOptions::default(),
        &ComposeOptions::default(),
    );
    let bytes = render_dxf(&plan.document).expect("dxf output");
    assert!(!bytes.is_empty());
    String::from_utf8(bytes).expect("ascii dxf")
}

#[test]
fn test_dxf_has_sections_and_entities() {
    let text = dxf_text();
    assert!(text.contains("SECTION"));
    assert!(text.contains("ENTITIES"));
    assert!(text.contains("LWPOLYLINE"));
    assert!(text.contains("LINE"));
    assert!(text.contains("TEXT"));
    assert!(text.trim_end().ends_with("EOF"));
}

#[test]
fn test_dxf_layers_follow_roles() {
    let text = dxf_text();
    assert!(text.contains("GEOMETRY"));
    assert!(text.contains("DIMENSIONS"));
    assert!(text.contains("FURNITURE"));
}

#[test]
fn test_dxf_carries_dimension_values() {
    let text = dxf_text();
    for line in ["290", "282", "All dimensions in cm"] {
        assert!(
            text.lines().any(|l| l.trim() == line),
            "missing text value {}",
            line
        );
    }
}
