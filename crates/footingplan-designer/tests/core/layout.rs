use footingplan_core::StructuralConfig;
use footingplan_designer::{
    layout_plan, DrawingShape, LayerRole, LayoutOptions, PlanLayout, Shape, Side,
};

fn texts(layout: &PlanLayout, role: LayerRole) -> Vec<(String, footingplan_designer::BoundingBox)> {
    let mut out = Vec::new();
    if let Some(layer) = layout.document.layer(role) {
        for child in &layer.children {
            child.for_each_leaf(&mut |leaf| {
                if let Shape::Text(t) = leaf {
                    out.push((t.content.clone(), t.bounds()));
                }
            });
        }
    }
    out
}

fn count(labels: &[(String, footingplan_designer::BoundingBox)], label: &str) -> usize {
    labels.iter().filter(|(l, _)| l == label).count()
}

#[test]
fn test_reference_configuration() {
    let config = StructuralConfig {
        main_body_length: 220.0,
        main_body_width: 210.0,
        foot_width: 200.0,
        foot_thickness: 8.0,
        foundation_width: 40.0,
        foundation_depth: 0.0,
        foot_gaps: vec![79.0, 100.0, 79.0],
    };
    let layout = layout_plan(&config, &LayoutOptions::default());

    assert_eq!(layout.metrics.foot_count, 4);
    assert!((layout.metrics.first_to_last - 282.0).abs() < 1e-9);
    assert!((layout.metrics.total_foot_span - 290.0).abs() < 1e-9);
    assert!(layout.warnings.is_empty(), "{:?}", layout.warnings);

    let labels = texts(&layout, LayerRole::Annotations);
    // foot centers from the first foot
    for center in ["0", "87", "195"] {
        assert_eq!(count(&labels, center), 1, "center label {}", center);
    }
    // last center and the center-to-center span share a value
    assert_eq!(count(&labels, "282"), 2);
    // gaps
    assert_eq!(count(&labels, "79"), 2);
    assert_eq!(count(&labels, "100"), 1);
    // overall span
    assert_eq!(count(&labels, "290"), 1);

    for (label, bounds) in &labels {
        assert!(
            layout.annotation_bounds.contains(bounds, 1e-9),
            "label {} escapes the annotation bounds",
            label
        );
    }
}

#[test]
fn test_per_foot_dimensions_on_configured_side() {
    let layout = layout_plan(&StructuralConfig::default(), &LayoutOptions::default());
    let labels = texts(&layout, LayerRole::Annotations);
    let structure = layout.structure_bounds;

    // foundation margin (40 - 8) / 2 = 16, twice per foot
    let margins: Vec<_> = labels.iter().filter(|(l, _)| l == "16").collect();
    assert_eq!(margins.len(), 8);
    for (_, bounds) in margins {
        assert!(bounds.max_x < structure.min_x);
    }

    let mut options = LayoutOptions::default();
    options.policy.per_foot_side = Side::Right;
    let flipped = layout_plan(&StructuralConfig::default(), &options);
    for (label, bounds) in texts(&flipped, LayerRole::Annotations) {
        if label == "16" {
            assert!(bounds.min_x > flipped.structure_bounds.max_x);
        }
    }
}

#[test]
fn test_cross_axis_dimensions_largest_outermost() {
    let config = StructuralConfig {
        foundation_depth: 240.0,
        ..StructuralConfig::default()
    };
    let layout = layout_plan(&config, &LayoutOptions::default());
    let labels = texts(&layout, LayerRole::Annotations);
    let y_of = |value: &str| {
        labels
            .iter()
            .find(|(l, b)| l == value && b.min_y > layout.structure_bounds.max_y)
            .map(|(_, b)| b.center().y)
            .unwrap_or_else(|| panic!("missing cross-axis label {}", value))
    };
    let foot = y_of("200");
    let body = y_of("210");
    let foundation = y_of("240");
    assert!(foot < body);
    assert!(body < foundation);
}

#[test]
fn test_single_foot_still_renders() {
    let config = StructuralConfig {
        foot_gaps: Vec::new(),
        ..StructuralConfig::default()
    };
    let layout = layout_plan(&config, &LayoutOptions::default());
    assert_eq!(layout.metrics.foot_count, 1);
    assert_eq!(layout.metrics.first_to_last, 0.0);
    assert!(layout.warnings.iter().any(|w| w.contains("recommended")));
    assert!(layout.geometry_bounds.is_valid());
}

#[test]
fn test_zero_gap_is_still_dimensioned() {
    let config = StructuralConfig {
        foot_gaps: vec![0.0, 50.0],
        ..StructuralConfig::default()
    };
    let layout = layout_plan(&config, &LayoutOptions::default());
    let labels = texts(&layout, LayerRole::Annotations);
    assert!(count(&labels, "0") >= 2, "gap label and first center label");
}

#[test]
fn test_compact_policy_uses_fewer_tiers() {
    let stacked = layout_plan(&StructuralConfig::default(), &LayoutOptions::default());
    let mut options = LayoutOptions::default();
    options.policy.stack_per_foot = false;
    let compact = layout_plan(&StructuralConfig::default(), &options);
    assert!(compact.annotation_bounds.min_x > stacked.annotation_bounds.min_x);
}

#[test]
fn test_annotation_scale_grows_annotations_only() {
    let base = layout_plan(&StructuralConfig::default(), &LayoutOptions::default());
    let scaled = layout_plan(
        &StructuralConfig::default(),
        &LayoutOptions::default().with_annotation_scale(4.0),
    );
    assert_eq!(base.structure_bounds, scaled.structure_bounds);
    assert!(scaled.annotation_bounds.raw_width() > base.annotation_bounds.raw_width());
}

#[test]
fn test_geometry_layer_holds_every_structure_shape() {
    let layout = layout_plan(&StructuralConfig::default(), &LayoutOptions::default());
    let geometry = layout
        .document
        .layer(LayerRole::Geometry)
        .expect("geometry layer");
    // 4 foundations, 4 feet, body, centerline
    assert_eq!(geometry.children.len(), 10);
    assert!(texts(&layout, LayerRole::Geometry).is_empty());
}
