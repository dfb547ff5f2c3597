use std::rc::Rc;

use chart_doc::api::{AssemblyConfig, ChartDocument, DEFAULT_MAX_DATA_POINTS, DataRegistry};
use chart_doc::chart::{Axis, AxisSlot, CoordinateSystem, PartNode, Series};
use chart_doc::core::{Data, DataRef, DataType, DataValue, LazyData, OnceData};
use serde_json::json;

fn grid_with_categories(categories: &DataRef) -> chart_doc::chart::CoordinateRef {
    let x = Axis::new(DataType::Category).with_data(categories).into_ref();
    let y = Axis::new(DataType::Number).into_ref();
    CoordinateSystem::rectangular()
        .with_axis(AxisSlot::X(0), &x)
        .with_axis(AxisSlot::Y(0), &y)
        .into_ref()
}

#[test]
fn equal_values_in_distinct_instances_stay_distinct() {
    let first = Data::numbers([1.0, 2.0]).into_ref();
    let second = Data::numbers([1.0, 2.0]).into_ref();
    let roots = vec![
        PartNode::from(Series::pie().with_data(&first)),
        PartNode::from(Series::pie().with_data(&second)),
    ];
    let table = DataRegistry::collect(&roots);
    assert_eq!(table.len(), 2);
    assert_eq!(table.serial_of(&first), Some(0));
    assert_eq!(table.serial_of(&second), Some(1));
}

#[test]
fn first_seen_order_spans_axes_and_series() {
    let categories = Data::categories(["a", "b"]).into_ref();
    let values = Data::numbers([3.0, 4.0]).into_ref();
    let grid = grid_with_categories(&categories);
    let roots = vec![PartNode::from(
        Series::bar().with_data(&values).with_data(&categories).on(&grid),
    )];

    let table = DataRegistry::collect(&roots);
    assert_eq!(table.len(), 2);
    assert_eq!(table.serial_of(&values), Some(0));
    assert_eq!(table.serial_of(&categories), Some(1));
    assert_eq!(
        table.entry(1).map(|entry| entry.values().to_vec()),
        Some(vec![DataValue::from("a"), DataValue::from("b")])
    );
}

#[test]
fn empty_provider_still_occupies_a_slot() {
    let empty = Data::new(DataType::Number).into_ref();
    let full = Data::numbers([7.0]).into_ref();
    let document = ChartDocument::new()
        .with_part(Series::pie().with_data(&empty))
        .with_part(Series::pie().with_data(&full))
        .build()
        .expect("build");
    let value = document.to_value().expect("valid json");
    assert_eq!(value["sharedData"], json!([[], [7]]));
}

#[test]
fn changed_graph_gets_fresh_serials() {
    let a = Data::numbers([1.0]).into_ref();
    let b = Data::numbers([2.0]).into_ref();

    let before = DataRegistry::collect(&[
        PartNode::from(Series::pie().with_data(&a)),
        PartNode::from(Series::pie().with_data(&b)),
    ]);
    assert_eq!(before.serial_of(&a), Some(0));
    assert_eq!(before.serial_of(&b), Some(1));

    let after = DataRegistry::collect(&[PartNode::from(Series::pie().with_data(&b))]);
    assert_eq!(after.len(), 1);
    assert_eq!(after.serial_of(&b), Some(0));
    assert_eq!(after.serial_of(&a), None);

    // The earlier table keeps its own numbering.
    assert_eq!(before.serial_of(&a), Some(0));
    assert_eq!(before.serial_of(&b), Some(1));
}

#[test]
fn dropped_provider_has_no_serial_in_the_next_build() {
    let a = Data::numbers([1.0]).into_ref();
    let b = Data::numbers([2.0]).into_ref();
    let mut document = ChartDocument::new();
    document.add(Series::pie().with_data(&a)).add(Series::pie().with_data(&b));
    let first = document.assemble().expect("first assembly");
    assert_eq!(first.data_table().serial_of(&a), Some(0));

    let document = ChartDocument::new().with_part(Series::pie().with_data(&b));
    let second = document.assemble().expect("second assembly");
    assert_eq!(second.data_table().serial_of(&b), Some(0));
    assert_eq!(second.data_table().serial_of(&a), None);

    let value = second.encode().expect("encode").to_value().expect("valid json");
    assert_eq!(value["sharedData"], json!([[2]]));
}

#[test]
fn no_providers_yields_an_empty_table() {
    let table = DataRegistry::collect(&[]);
    assert!(table.is_empty());
}

#[test]
fn unbounded_lazy_data_is_capped_by_config() {
    let endless = LazyData::new(DataType::Number, || {
        (0..).map(|step| DataValue::from(f64::from(step) * 0.5))
    })
    .into_ref();
    let config = AssemblyConfig::new().with_max_data_points(4);
    let document = ChartDocument::with_config(config)
        .expect("valid config")
        .with_part(Series::pie().with_data(&endless))
        .build()
        .expect("build");
    let value = document.to_value().expect("valid json");
    assert_eq!(value["sharedData"], json!([[0, 0.5, 1, 1.5]]));
}

#[test]
fn unbounded_lazy_data_terminates_with_the_default_config() {
    let endless =
        LazyData::new(DataType::Number, || (0..).map(|_| DataValue::from(1.0))).into_ref();
    let document = ChartDocument::new()
        .with_part(Series::pie().with_data(&endless))
        .build()
        .expect("build");
    let value = document.to_value().expect("valid json");
    assert_eq!(
        value["sharedData"][0].as_array().map(Vec::len),
        Some(DEFAULT_MAX_DATA_POINTS)
    );

    let table = DataRegistry::collect(&[PartNode::from(Series::pie().with_data(&endless))]);
    assert_eq!(
        table.entry(0).map(|entry| entry.values().len()),
        Some(DEFAULT_MAX_DATA_POINTS)
    );
}

#[test]
fn single_pass_data_is_read_once_and_reused() {
    let once = OnceData::new(
        DataType::Category,
        vec![DataValue::from("x"), DataValue::from("y")],
    )
    .into_ref();
    let document = ChartDocument::new().with_part(Series::pie().with_data(&once));
    let first = document.build().expect("first build");
    let second = document.build().expect("second build");
    assert_eq!(first.as_str(), second.as_str());
    let value = second.to_value().expect("valid json");
    assert_eq!(value["sharedData"], json!([["x", "y"]]));
}

#[test]
fn mutated_data_is_picked_up_on_rebuild() {
    let data = Rc::new(Data::numbers([1.0]));
    let provider: DataRef = data.clone();
    let document = ChartDocument::new().with_part(Series::pie().with_data(&provider));
    let before = document.build().expect("build");
    assert_eq!(before.to_value().expect("json")["sharedData"], json!([[1]]));

    data.push(2.5);
    let after = document.build().expect("rebuild");
    assert_eq!(after.to_value().expect("json")["sharedData"], json!([[1, 2.5]]));
}
