use footingplan_core::StructuralConfig;
use footingplan_designer::{
    compose_plan_document, layout_plan, render_plan, BoundingBox, ComposeOptions, DrawGroup, DrawRectangle,
    DrawText, DrawingShape, LayerRole, LayoutOptions, PageRegions, PlanLayout, PlanMetrics,
    SceneDocument, Shape, Style, TemplateRegistry,
};

fn a4() -> footingplan_designer::PageTemplate {
    TemplateRegistry::builtin().get_template("a4-landscape").clone()
}

fn bare_layout(root: DrawGroup, geometry_bounds: BoundingBox) -> PlanLayout {
    PlanLayout {
        document: SceneDocument {
            view_box: BoundingBox::new(0.0, 0.0, 500.0, 250.0),
            root,
        },
        metrics: PlanMetrics {
            foot_count: 1,
            total_foot_span: 0.0,
            first_to_last: 0.0,
            foot_centers: vec![0.0],
            foundation_margin: 0.0,
        },
        warnings: Vec::new(),
        geometry_bounds,
        annotation_bounds: BoundingBox::empty(),
        structure_bounds: geometry_bounds,
        annotation_scale: 1.0,
        feet: Vec::new(),
    }
}

#[test]
fn test_fit_scale_matches_formula_and_centers() {
    let layout = layout_plan(&StructuralConfig::default(), &LayoutOptions::default());
    let options = ComposeOptions::default();
    let document = compose_plan_document(&a4(), &layout, &options);

    let source = layout.geometry_bounds.union(&layout.annotation_bounds);
    let region = document.regions.content;
    let expected = options.fill_ratio
        * (region.raw_width() / source.width()).min(region.raw_height() / source.height());
    assert!((document.fit.scale - expected).abs() < 1e-12);

    let placed = document.fit.project_bounds(&source);
    let left = placed.min_x - region.min_x;
    let right = region.max_x - placed.max_x;
    let top = placed.min_y - region.min_y;
    let bottom = region.max_y - placed.max_y;
    assert!((left - right).abs() < 1e-9);
    assert!((top - bottom).abs() < 1e-9);
}

#[test]
fn test_composition_is_deterministic() {
    let layout = layout_plan(&StructuralConfig::default(), &LayoutOptions::default());
    let a = compose_plan_document(&a4(), &layout, &ComposeOptions::default());
    let b = compose_plan_document(&a4(), &layout, &ComposeOptions::default());
    assert_eq!(a.fit, b.fit);
    assert_eq!(a.root, b.root);
}

#[test]
fn test_geometry_gets_one_transform_annotations_get_reprojected() {
    let rendered = render_plan(
        &StructuralConfig::default(),
        &a4(),
        &LayoutOptions::default(),
        &ComposeOptions::default(),
    );
    let (layout, document) = (&rendered.layout, &rendered.document);

    let geometry = document.layer(LayerRole::Geometry).expect("geometry");
    let transform = geometry.transform.expect("geometry transform");
    assert!((transform.scale - document.fit.scale).abs() < 1e-12);
    let source_geometry = layout.document.layer(LayerRole::Geometry).expect("source");
    assert_eq!(geometry.children, source_geometry.children);

    let annotations = document.layer(LayerRole::Annotations).expect("annotations");
    assert!(annotations.transform.is_none());
    // everything re-projected lands inside the content region
    let region = document.regions.content;
    assert!(region.contains(&annotations.bounds(), 1e-6));
}

#[test]
fn test_rotated_label_pivot_is_projected() {
    let mut annotations = DrawGroup::layer(LayerRole::Annotations, Vec::new());
    let label = DrawText::new(footingplan_designer::Point::new(50.0, 60.0), "12", 10.0)
        .rotated(-90.0);
    annotations.push(Shape::Text(label.clone()));
    let geometry = DrawGroup::layer(
        LayerRole::Geometry,
        vec![Shape::Rectangle(DrawRectangle::new(
            0.0,
            0.0,
            100.0,
            100.0,
            Style::default(),
        ))],
    );
    let mut root = DrawGroup::new();
    root.push(Shape::Group(geometry));
    root.push(Shape::Group(annotations));

    let layout = bare_layout(root, BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    let document = compose_plan_document(&a4(), &layout, &ComposeOptions::default());
    let fitted = document.layer(LayerRole::Annotations).expect("annotations");
    let Shape::Text(projected) = &fitted.children[0] else {
        panic!("expected text");
    };
    let rotation = projected.rotation.expect("rotation kept");
    assert_eq!(rotation.angle_deg, -90.0);
    assert_eq!(rotation.pivot, document.fit.project(label.position));
    assert_eq!(projected.position, rotation.pivot);
    // authored size survives the fit
    assert_eq!(projected.font_size, 10.0);
    assert_eq!(projected.style, label.style);
}

#[test]
fn test_degenerate_geometry_falls_back_to_declared_extent() {
    let mut root = DrawGroup::new();
    root.push(Shape::Group(DrawGroup::layer(LayerRole::Geometry, Vec::new())));
    root.push(Shape::Group(DrawGroup::layer(LayerRole::Annotations, Vec::new())));
    let layout = bare_layout(root, BoundingBox::new(5.0, 5.0, 5.0, 5.0));

    let document = compose_plan_document(&a4(), &layout, &ComposeOptions::default());
    assert!(document.fit.scale.is_finite());
    assert!(document.fit.scale > 0.0);
    assert!(document.warnings.iter().any(|w| w.contains("degenerate")));

    let region = document.regions.content;
    let expected = ComposeOptions::default().fill_ratio
        * (region.raw_width() / 500.0).min(region.raw_height() / 250.0);
    assert!((document.fit.scale - expected).abs() < 1e-9);
}

#[test]
fn test_missing_layers_transform_whole_drawing() {
    let mut root = DrawGroup::new().with_id("drawing");
    root.push(Shape::Rectangle(DrawRectangle::new(
        0.0,
        0.0,
        400.0,
        200.0,
        Style::default(),
    )));
    let layout = bare_layout(root, BoundingBox::new(0.0, 0.0, 400.0, 200.0));

    let document = compose_plan_document(&a4(), &layout, &ComposeOptions::default());
    assert!(document.warnings.iter().any(|w| w.contains("missing")));
    let wrapped = document
        .root
        .children
        .iter()
        .find_map(|c| match c {
            Shape::Group(g) if g.id.as_deref() == Some("drawing") => Some(g),
            _ => None,
        })
        .expect("wrapped drawing");
    assert!(wrapped.transform.is_some());
}

#[test]
fn test_low_coverage_is_advisory() {
    let layout = layout_plan(&StructuralConfig::default(), &LayoutOptions::default());
    let options = ComposeOptions {
        fill_ratio: 0.2,
        ..ComposeOptions::default()
    };
    let document = compose_plan_document(&a4(), &layout, &options);
    assert!(document.coverage < options.min_dominant_coverage);
    assert!(document.warnings.iter().any(|w| w.contains("covers")));
    assert!(!document.root.children.is_empty());
}

#[test]
fn test_furniture_contents() {
    let layout = layout_plan(&StructuralConfig::default(), &LayoutOptions::default());
    let options = ComposeOptions {
        title: Some("Tank T-101".to_string()),
        notes: vec!["Concrete C25/30".to_string()],
        ..ComposeOptions::default()
    };
    let document = compose_plan_document(&a4(), &layout, &options);
    let furniture = document.layer(LayerRole::Furniture).expect("furniture");

    let mut labels = Vec::new();
    for child in &furniture.children {
        child.for_each_leaf(&mut |leaf| {
            if let Shape::Text(t) = leaf {
                labels.push(t.content.clone());
            }
        });
    }
    assert!(labels.contains(&"Tank T-101".to_string()));
    assert!(labels.contains(&"Concrete C25/30".to_string()));
    assert!(labels.contains(&"All dimensions in cm".to_string()));
    let scale = format!("Scale 1:{:.0}", document.scale_denominator);
    assert!(labels.contains(&scale));
}

#[test]
fn test_regions_for_every_template() {
    for template in TemplateRegistry::builtin().list_templates() {
        let regions = PageRegions::from_template(template);
        assert!(regions.content.is_valid(), "{}", template.id);
        assert!(regions.frame.contains(&regions.content, 1e-9));
        assert!(regions.page.contains(&regions.frame, 1e-9));
    }
}

#[test]
fn test_full_fill_ratio_keeps_content_off_region_edges() {
    let options = ComposeOptions {
        fill_ratio: 1.0,
        ..ComposeOptions::default()
    };
    let rendered = render_plan(
        &StructuralConfig::default(),
        &a4(),
        &LayoutOptions::default(),
        &options,
    );
    let document = &rendered.document;
    assert!(document.warnings.iter().any(|w| w.contains("fill ratio")));

    let layout = &rendered.layout;
    let source = layout.geometry_bounds.union(&layout.annotation_bounds);
    let placed = document.fit.project_bounds(&source);
    let region = document.regions.content;
    assert!(placed.min_x > region.min_x);
    assert!(placed.max_x < region.max_x);
    assert!(placed.min_y > region.min_y);
    assert!(placed.max_y < region.max_y);
}
