use std::sync::Arc;

use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use geoprim::{
    Crs, Curve, CurveBoundary, GeometryError, IdentityTransform, OrientedCurve, Position,
    PrimitiveFactory, Ring, SurfacePatch,
};

fn factory() -> PrimitiveFactory {
    PrimitiveFactory::with_crs(Crs::local(2))
}

fn unit_square_ring(factory: &PrimitiveFactory) -> Ring {
    let curve = factory
        .create_curve_from_positions(vec![
            Position::new_2d(0.0, 0.0),
            Position::new_2d(1.0, 0.0),
            Position::new_2d(1.0, 1.0),
            Position::new_2d(0.0, 1.0),
            Position::new_2d(0.0, 0.0),
        ])
        .expect("valid closed curve");
    Ring::from_curve(curve).expect("valid ring")
}

#[test]
fn surface_from_unit_square() {
    let factory = factory();
    let ring = unit_square_ring(&factory);
    let boundary = factory
        .create_surface_boundary(ring, vec![])
        .expect("rings share the factory CRS");
    let surface = factory
        .create_surface_from_boundary(boundary)
        .expect("boundary has an exterior");

    assert_eq!(surface.envelope().mins(), &[0.0, 0.0]);
    assert_eq!(surface.envelope().maxs(), &[1.0, 1.0]);
    assert_abs_diff_eq!(surface.area(), 1.0);
    assert!(surface.is_simple());
}

#[test]
fn closed_curve_boundary_is_empty() {
    let factory = factory();
    let closed = factory
        .create_curve_from_positions(vec![
            Position::new_2d(0.0, 0.0),
            Position::new_2d(2.0, 0.0),
            Position::new_2d(1.0, 1.0),
            Position::new_2d(0.0, 0.0),
        ])
        .expect("valid closed curve");
    assert_eq!(closed.boundary(), &CurveBoundary::Closed);

    let open = factory
        .create_curve_from_positions(vec![
            Position::new_2d(0.0, 0.0),
            Position::new_2d(2.0, 0.0),
        ])
        .expect("valid open curve");
    let ends = open.boundary().ends().expect("open curve has two ends");
    assert_eq!(ends.start().position(), &Position::new_2d(0.0, 0.0));
    assert_eq!(ends.end().position(), &Position::new_2d(2.0, 0.0));
}

#[test]
fn double_reversal_restores_the_view() {
    let curve = Arc::new(
        Curve::from_positions(
            Crs::local(2),
            vec![
                Position::new_2d(0.0, 0.0),
                Position::new_2d(3.0, 0.0),
                Position::new_2d(3.0, 4.0),
            ],
        )
        .expect("valid curve"),
    );

    let forward = OrientedCurve::forward(curve.clone());
    let twice = forward.reversed().reversed();
    assert_eq!(twice, forward);
    assert_eq!(
        forward.reversed().start_position(),
        forward.end_position()
    );
    assert!(Arc::ptr_eq(twice.curve(), &curve));
}

#[test]
fn merged_curves_preserve_length() {
    let crs = Crs::local(2);
    let first = Curve::from_positions(
        crs.clone(),
        vec![Position::new_2d(0.0, 0.0), Position::new_2d(3.0, 0.0)],
    )
    .expect("valid curve");
    let second = Curve::from_positions(
        crs,
        vec![Position::new_2d(3.0, 0.0), Position::new_2d(3.0, 4.0)],
    )
    .expect("valid curve");

    let merged = first.merge(&second).expect("curves meet end to start");
    assert_abs_diff_eq!(merged.length(), first.length() + second.length());
    assert_eq!(merged.start_param(), 0.0);
    assert_abs_diff_eq!(merged.end_param(), 7.0);
}

#[test]
fn self_intersecting_ring_is_rejected() {
    let factory = factory();
    let bowtie = factory
        .create_curve_from_positions(vec![
            Position::new_2d(0.0, 0.0),
            Position::new_2d(1.0, 1.0),
            Position::new_2d(1.0, 0.0),
            Position::new_2d(0.0, 1.0),
            Position::new_2d(0.0, 0.0),
        ])
        .expect("closed but crossing curve");

    assert_matches!(
        Ring::from_curve(bowtie),
        Err(GeometryError::InvalidArgument(message)) => {
            assert!(message.contains("not simple"));
        }
    );
}

#[test]
fn identity_transform_preserves_geometry() {
    let factory = factory();
    let ring = unit_square_ring(&factory);
    let transformed = ring
        .transform(Crs::local(2), &IdentityTransform)
        .expect("identity cannot fail");

    assert_eq!(transformed.positions(), ring.positions());
    assert_eq!(transformed.envelope(), ring.envelope());
    // the transform merges the generators into one curve
    assert_eq!(transformed.generators().len(), 1);
}

#[test]
fn multi_patch_surface_unions_adjacent_patches() {
    let factory = factory();
    let left = unit_square_ring(&factory);
    let right = Ring::from_curve(
        factory
            .create_curve_from_positions(vec![
                Position::new_2d(1.0, 0.0),
                Position::new_2d(2.0, 0.0),
                Position::new_2d(2.0, 1.0),
                Position::new_2d(1.0, 1.0),
                Position::new_2d(1.0, 0.0),
            ])
            .expect("valid closed curve"),
    )
    .expect("valid ring");

    let surface = factory
        .create_surface(vec![
            SurfacePatch::from_exterior(left).expect("exterior present"),
            SurfacePatch::from_exterior(right).expect("exterior present"),
        ])
        .expect("patches share an edge");

    assert_abs_diff_eq!(surface.area(), 2.0, epsilon = 1e-9);
    assert_eq!(surface.envelope().maxs(), &[2.0, 1.0]);
}
