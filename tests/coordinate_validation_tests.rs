use chart_doc::chart::{
    Axis, AxisClaim, AxisSlot, CoordinateKind, CoordinateSystem, ValidationState,
};
use chart_doc::core::{Data, DataType, IdRegistry, Part};
use chart_doc::ChartError;

#[test]
fn rectangular_requires_first_x_and_y() {
    let x = Axis::new(DataType::Number).into_ref();
    let grid = CoordinateSystem::rectangular().with_axis(AxisSlot::X(0), &x);

    let err = grid.validate().expect_err("y[0] missing");
    assert!(matches!(err, ChartError::MissingRequiredPart(_)));
    assert!(err.reason().contains("y[0]"), "reason: {}", err.reason());
    assert_eq!(grid.state(), ValidationState::Rejected(err));
}

#[test]
fn extra_rectangular_axes_are_accepted() {
    let registry = IdRegistry::new();
    let x = Axis::new_in(DataType::Number, &registry).into_ref();
    let y = Axis::new_in(DataType::Number, &registry).into_ref();
    let y2 = Axis::new_in(DataType::Logarithmic, &registry).into_ref();
    let grid = CoordinateSystem::new_in(CoordinateKind::Rectangular, &registry)
        .with_axis(AxisSlot::X(0), &x)
        .with_axis(AxisSlot::Y(0), &y)
        .with_axis(AxisSlot::Y(1), &y2);

    grid.validate().expect("valid grid");
    assert!(grid.is_valid());
    assert_eq!(y2.claim(), AxisClaim::Owned(grid.id()));
}

#[test]
fn polar_rejects_rectangular_slots() {
    let radius = Axis::new(DataType::Number).into_ref();
    let angle = Axis::new(DataType::Number).into_ref();
    let x = Axis::new(DataType::Number).into_ref();
    let polar = CoordinateSystem::polar()
        .with_axis(AxisSlot::Radius, &radius)
        .with_axis(AxisSlot::Angle, &angle)
        .with_axis(AxisSlot::X(0), &x);

    let err = polar.validate().expect_err("x slot on polar");
    assert!(matches!(err, ChartError::StructuralConflict(_)));
}

#[test]
fn rejection_is_sticky_until_slots_change() {
    let radius = Axis::new(DataType::Number).into_ref();
    let angle = Axis::new(DataType::Number).into_ref();
    let polar = CoordinateSystem::polar()
        .with_axis(AxisSlot::Radius, &radius)
        .into_ref();

    let first = polar.validate().expect_err("angle missing");
    let second = polar.validate().expect_err("still missing");
    assert_eq!(first, second);

    polar.set_axis(AxisSlot::Angle, &angle);
    assert_eq!(polar.state(), ValidationState::Unvalidated);
    polar.validate().expect("complete now");
    assert_eq!(polar.state(), ValidationState::Valid);
}

#[test]
fn owned_axis_cannot_join_a_shared_one() {
    let axis = Axis::new(DataType::Number).into_ref();
    let angle = Axis::new(DataType::Number).into_ref();
    let y = Axis::new(DataType::Number).into_ref();
    let polar = CoordinateSystem::polar()
        .with_shared_axis(AxisSlot::Radius, &axis)
        .with_axis(AxisSlot::Angle, &angle);
    let grid = CoordinateSystem::rectangular()
        .with_axis(AxisSlot::X(0), &axis)
        .with_axis(AxisSlot::Y(0), &y);

    polar.validate().expect("shared claim");
    assert_eq!(axis.claim(), AxisClaim::Shared);
    let err = grid.validate().expect_err("owned after shared");
    assert!(matches!(err, ChartError::StructuralConflict(_)));
}

#[test]
fn axis_data_must_fit_the_axis_type() {
    let numbers = Data::numbers([1.0, 2.0]).into_ref();
    let x = Axis::new(DataType::Category).with_data(&numbers).into_ref();
    let y = Axis::new(DataType::Number).into_ref();
    let grid = CoordinateSystem::rectangular()
        .with_axis(AxisSlot::X(0), &x)
        .with_axis(AxisSlot::Y(0), &y);

    let err = grid.validate().expect_err("numbers on a category axis");
    assert!(matches!(err, ChartError::StructuralConflict(_)));
}

#[test]
fn removing_a_required_axis_invalidates() {
    let radius = Axis::new(DataType::Number).into_ref();
    let angle = Axis::new(DataType::Number).into_ref();
    let polar = CoordinateSystem::polar()
        .with_axis(AxisSlot::Radius, &radius)
        .with_axis(AxisSlot::Angle, &angle)
        .into_ref();
    polar.validate().expect("valid");

    let removed = polar.remove_axis(AxisSlot::Angle).expect("was attached");
    assert!(!removed.is_shared());
    assert!(!polar.is_valid());
    assert!(matches!(
        polar.validate(),
        Err(ChartError::MissingRequiredPart(_))
    ));
}

#[test]
fn one_axis_cannot_fill_two_slots_of_one_system() {
    let x = Axis::new(DataType::Number).into_ref();
    let y = Axis::new(DataType::Number).into_ref();
    let grid = CoordinateSystem::rectangular()
        .with_axis(AxisSlot::X(0), &x)
        .with_axis(AxisSlot::Y(0), &y)
        .with_axis(AxisSlot::X(1), &x);

    let err = grid.validate().expect_err("x in two slots");
    assert!(matches!(err, ChartError::StructuralConflict(_)));
    assert!(err.reason().contains("x[0]") && err.reason().contains("x[1]"));

    grid.remove_axis(AxisSlot::X(1));
    grid.validate().expect("single placement");
}
