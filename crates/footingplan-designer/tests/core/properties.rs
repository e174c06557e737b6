//! Property tests for the layout engine.

use footingplan_core::StructuralConfig;
use footingplan_designer::{
    foot_centers, layout_plan, DrawingShape, LayerRole, LayoutOptions, PlanLayout, PlanMetrics,
};
use proptest::prelude::*;

fn gap_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(prop_oneof![Just(0.0), 0.0..500.0f64], 0..8)
}

fn config_strategy() -> impl Strategy<Value = StructuralConfig> {
    (
        (1.0..2000.0f64, 1.0..800.0f64),
        (1.0..600.0f64, 0.5..60.0f64),
        (0.0..200.0f64, prop_oneof![Just(0.0), 1.0..900.0f64]),
        gap_strategy(),
    )
        .prop_map(
            |((length, width), (foot_width, thickness), (strip, depth), gaps)| {
                StructuralConfig {
                    main_body_length: length,
                    main_body_width: width,
                    foot_width,
                    foot_thickness: thickness,
                    foundation_width: strip,
                    foundation_depth: depth,
                    foot_gaps: gaps,
                }
            },
        )
}

fn assert_layer_contained(layout: &PlanLayout, role: LayerRole) -> Result<(), TestCaseError> {
    let bounds = match role {
        LayerRole::Geometry => layout.geometry_bounds,
        _ => layout.annotation_bounds,
    };
    if let Some(layer) = layout.document.layer(role) {
        for child in &layer.children {
            let mut escaped = None;
            child.for_each_leaf(&mut |leaf| {
                if escaped.is_none() && !bounds.contains(&leaf.bounds(), 1e-6) {
                    escaped = Some(leaf.bounds());
                }
            });
            prop_assert!(escaped.is_none(), "{:?} leaf {:?} escapes {:?}", role, escaped, bounds);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_centers_increase_by_thickness_plus_gap(
        thickness in 0.5..60.0f64,
        gaps in gap_strategy(),
    ) {
        let centers = foot_centers(thickness, &gaps);
        prop_assert_eq!(centers.len(), gaps.len() + 1);
        prop_assert!((centers[0] - thickness / 2.0).abs() < 1e-9);
        for (i, pair) in centers.windows(2).enumerate() {
            prop_assert!(pair[1] > pair[0]);
            prop_assert!((pair[1] - pair[0] - (thickness + gaps[i])).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_span_identity(config in config_strategy()) {
        let (sanitized, _) = config.sanitize();
        let metrics = PlanMetrics::compute(&sanitized);
        let gap_sum: f64 = sanitized.foot_gaps.iter().sum();
        let expected = gap_sum + metrics.foot_count as f64 * sanitized.foot_thickness;
        prop_assert!((metrics.total_foot_span - expected).abs() < 1e-6);
        prop_assert!(
            (metrics.total_foot_span - metrics.first_to_last - sanitized.foot_thickness).abs()
                < 1e-6
        );
        let last = metrics.foot_centers[metrics.foot_count - 1];
        prop_assert!((last - metrics.foot_centers[0] - metrics.first_to_last).abs() < 1e-6);
    }

    #[test]
    fn prop_layout_bounds_contain_everything(config in config_strategy()) {
        let layout = layout_plan(&config, &LayoutOptions::default());
        prop_assert!(layout.geometry_bounds.is_valid());
        prop_assert!(layout.annotation_bounds.is_valid());
        prop_assert!(layout.geometry_bounds.contains(&layout.structure_bounds, 1e-9));
        for foot in &layout.feet {
            prop_assert!(layout.structure_bounds.contains(&foot.foot, 1e-6));
            prop_assert!(layout.structure_bounds.contains(&foot.foundation, 1e-6));
        }
        assert_layer_contained(&layout, LayerRole::Geometry)?;
        assert_layer_contained(&layout, LayerRole::Annotations)?;
    }

    #[test]
    fn prop_layout_is_idempotent(config in config_strategy()) {
        let first = layout_plan(&config, &LayoutOptions::default());
        let second = layout_plan(&config, &LayoutOptions::default());
        prop_assert_eq!(first.geometry_bounds, second.geometry_bounds);
        prop_assert_eq!(first.annotation_bounds, second.annotation_bounds);
        prop_assert_eq!(&first.metrics, &second.metrics);
        prop_assert_eq!(&first.document.root, &second.document.root);
    }
}

#[test]
fn test_span_identity_without_gaps() {
    let config = StructuralConfig {
        foot_gaps: Vec::new(),
        foot_thickness: 12.0,
        ..StructuralConfig::default()
    };
    let (sanitized, _) = config.sanitize();
    let metrics = PlanMetrics::compute(&sanitized);
    assert_eq!(metrics.total_foot_span, 12.0);
    assert_eq!(metrics.first_to_last, 0.0);
}

#[test]
fn test_invalid_values_never_break_bounds() {
    let config = StructuralConfig {
        main_body_length: f64::NAN,
        main_body_width: -5.0,
        foot_width: 0.0,
        foot_thickness: f64::INFINITY,
        foundation_width: 0.0,
        foundation_depth: -1.0,
        foot_gaps: vec![-3.0, f64::NAN, 1.0e6],
    };
    let layout = layout_plan(&config, &LayoutOptions::default());
    assert!(layout.warnings.len() >= 6);
    assert!(layout.document.view_box.is_valid());
    assert!(layout.metrics.total_foot_span.is_finite());
}
