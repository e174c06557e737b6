use std::io::Write;

use footingplan_core::units::mm_to_px;
use footingplan_core::StructuralConfig;
use footingplan_designer::{
    render_plan, ComposeOptions, LayoutOptions, PageMargins, PageRegions, PageTemplate,
    TemplateRegistry, DEFAULT_TEMPLATE_ID,
};

#[test]
fn test_builtin_catalog() {
    let registry = TemplateRegistry::builtin();
    assert_eq!(registry.default_id(), DEFAULT_TEMPLATE_ID);
    let ids: Vec<_> = registry.list_templates().iter().map(|t| t.id.clone()).collect();
    for id in [
        "a3-landscape",
        "a3-portrait",
        "a4-landscape",
        "a4-portrait",
        "letter-landscape",
    ] {
        assert!(ids.contains(&id.to_string()), "missing {}", id);
    }
    let a4 = registry.get_template("a4-landscape");
    assert!(a4.is_landscape());
    assert_eq!(a4.page_width_mm, 297.0);
    assert!(!registry.get_template("a4-portrait").is_landscape());
}

#[test]
fn test_lookup_never_fails() {
    let registry = TemplateRegistry::builtin();
    let fallback = registry.get_template("");
    assert_eq!(fallback.id, DEFAULT_TEMPLATE_ID);
    assert_eq!(registry.get_template("no-such-page"), fallback);
}

#[test]
fn test_content_size_accounts_for_bands() {
    let template = PageTemplate::new("t", "Test", 200.0, 100.0)
        .with_margins(PageMargins::uniform(10.0))
        .with_bands(15.0, 20.0);
    assert_eq!(template.content_width_mm(), 180.0);
    assert_eq!(template.content_height_mm(), 100.0 - 20.0 - 15.0 - 20.0);

    let regions = PageRegions::from_template(&template);
    assert!((regions.page.raw_width() - mm_to_px(200.0)).abs() < 1e-9);
    assert!((regions.content.raw_height() - mm_to_px(45.0)).abs() < 1e-9);
    assert!(regions.header.max_y <= regions.content.min_y + 1e-9);
    assert!(regions.legend.min_y >= regions.content.max_y - 1e-9);
}

#[test]
fn test_load_templates_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{
            "id": "a2-landscape",
            "name": "ISO A2 landscape",
            "pageWidthMm": 594.0,
            "pageHeightMm": 420.0,
            "margins": {{"top": 15.0, "right": 15.0, "bottom": 15.0, "left": 15.0}},
            "headerHeightMm": 20.0,
            "legendHeightMm": 30.0
        }}]"#
    )
    .unwrap();

    let registry = TemplateRegistry::load_from_file(file.path()).unwrap();
    assert!(registry.contains("a2-landscape"));
    assert!(registry.contains(DEFAULT_TEMPLATE_ID));
}

#[test]
fn test_malformed_template_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(TemplateRegistry::load_from_file(file.path()).is_err());
}

#[test]
fn test_plan_fits_every_builtin_template() {
    let registry = TemplateRegistry::builtin();
    for template in registry.list_templates() {
        let rendered = render_plan(
            &StructuralConfig::default(),
            template,
            &LayoutOptions::default(),
            &ComposeOptions::default(),
        );
        let document = &rendered.document;
        assert_eq!(document.template_id, template.id);
        assert!(document.fit.scale > 0.0, "{}", template.id);
        assert!(document.coverage <= 1.0 + 1e-9, "{}", template.id);
    }
}
