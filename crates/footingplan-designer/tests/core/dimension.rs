use footingplan_designer::{
    compute_dimension, compute_ordinate, draw_dimension, draw_ordinate, DimensionAxis,
    DimensionSpec, DimensionStyle, DrawingShape, LayerRole, OrdinateSpec, Point, SceneBuilder,
    Shape, TextAnchor,
};

fn horizontal(offset: f64) -> DimensionSpec {
    DimensionSpec::new(
        Point::new(-100.0, 50.0),
        Point::new(100.0, 50.0),
        DimensionAxis::Horizontal,
        offset,
        "20",
    )
}

#[test]
fn test_measured_length() {
    assert_eq!(horizontal(30.0).measured(), 200.0);
}

#[test]
fn test_horizontal_dimension_below() {
    let style = DimensionStyle::default();
    let geometry = compute_dimension(&horizontal(30.0), &style);
    assert_eq!(geometry.dimension_line.start.y, 80.0);
    assert_eq!(geometry.dimension_line.end.y, 80.0);
    assert!(geometry.label.rotation.is_none());
    assert_eq!(geometry.label.anchor, TextAnchor::Middle);
    assert!(geometry.label.position.y > 80.0);
    // arrows face away from each other
    assert_eq!(geometry.arrows[0].angle_deg, 180.0);
    assert_eq!(geometry.arrows[1].angle_deg, 0.0);
}

#[test]
fn test_extension_lines_run_past_dimension_line() {
    let style = DimensionStyle::default();
    let geometry = compute_dimension(&horizontal(-40.0), &style);
    for ext in &geometry.extension_lines {
        assert!(ext.start.y < 50.0);
        assert!(ext.end.y < geometry.dimension_line.start.y);
    }
}

#[test]
fn test_zero_length_dimension_has_finite_bounds() {
    let spec = DimensionSpec::new(
        Point::new(0.0, 10.0),
        Point::new(0.0, 10.0),
        DimensionAxis::Vertical,
        25.0,
        "0",
    );
    let geometry = compute_dimension(&spec, &DimensionStyle::default());
    assert!(geometry.bounds.is_valid());
}

#[test]
fn test_ordinate_along_horizontal_axis() {
    let spec = OrdinateSpec {
        reference: Point::new(40.0, 0.0),
        axis: DimensionAxis::Horizontal,
        offset: -30.0,
        label: "4".to_string(),
        font_size: 10.0,
    };
    let geometry = compute_ordinate(&spec, &DimensionStyle::default());
    assert_eq!(geometry.tick.position, Point::new(40.0, -30.0));
    assert!(geometry.label.position.y < -30.0);
}

#[test]
fn test_draw_helpers_add_annotation_groups() {
    let style = DimensionStyle::default();
    let mut builder = SceneBuilder::new();
    let dim_bounds = draw_dimension(&mut builder, &horizontal(30.0), &style);
    let ord_bounds = draw_ordinate(
        &mut builder,
        &OrdinateSpec {
            reference: Point::new(0.0, 0.0),
            axis: DimensionAxis::Vertical,
            offset: 20.0,
            label: "0".to_string(),
            font_size: 12.0,
        },
        &style,
    );
    assert!(builder.geometry_bounds().is_empty());
    let annotations = builder.annotation_bounds();
    assert!(annotations.contains(&dim_bounds, 1e-9));
    assert!(annotations.contains(&ord_bounds, 1e-9));

    let scene = builder.finish();
    let layer = scene
        .document
        .layer(LayerRole::Annotations)
        .expect("annotation layer");
    assert_eq!(layer.children.len(), 2);
    for child in &layer.children {
        match child {
            Shape::Group(group) => {
                assert!(group.id.is_some());
                assert!(annotations.contains(&group.bounds(), 1e-9));
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }
}
