use chart_doc::api::ChartDocument;
use chart_doc::chart::{Axis, AxisSlot, CoordinateSystem, Series};
use chart_doc::core::{Data, DataRef, DataType, Part};
use chart_doc::ChartError;
use proptest::prelude::*;
use serde_json::Value;

fn first_seen(picks: &[usize]) -> Vec<usize> {
    let mut seen = Vec::new();
    for pick in picks {
        if !seen.contains(pick) {
            seen.push(*pick);
        }
    }
    seen
}

proptest! {
    #[test]
    fn shared_table_holds_each_instance_once(
        lengths in prop::collection::vec(0usize..6, 1..5),
        raw_picks in prop::collection::vec(0usize..64, 1..10)
    ) {
        let providers: Vec<DataRef> = lengths
            .iter()
            .map(|len| Data::numbers((0..*len).map(|i| i as f64)).into_ref())
            .collect();
        let picks: Vec<usize> = raw_picks.iter().map(|pick| pick % providers.len()).collect();
        let series: Vec<_> = picks
            .iter()
            .map(|pick| Series::pie().with_data(&providers[*pick]).into_ref())
            .collect();

        let mut document = ChartDocument::new();
        for part in &series {
            document.add(part);
        }
        let built = document.build().expect("build");
        let value: Value = built.to_value().expect("valid json");

        let order = first_seen(&picks);
        prop_assert_eq!(built.data_count(), order.len());
        let table = value["sharedData"].as_array().expect("shared data");
        prop_assert_eq!(table.len(), order.len());

        for (part, pick) in series.iter().zip(&picks) {
            let serial = order.iter().position(|seen| seen == pick).expect("seen");
            let encoded = value["parts"]
                .as_array()
                .expect("parts")
                .iter()
                .find(|candidate| candidate["id"] == Value::from(part.id().raw()))
                .expect("series part");
            prop_assert_eq!(&encoded["data"], &Value::from(vec![serial]));
            prop_assert_eq!(table[serial].as_array().map(Vec::len), Some(lengths[*pick]));
        }
    }

    #[test]
    fn repeated_encoding_is_byte_identical(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 0..32),
        share_radius in any::<bool>()
    ) {
        let data = Data::numbers(values).into_ref();
        let radius = Axis::new(DataType::Number).into_ref();
        let angle = Axis::new(DataType::Number).into_ref();
        let mut polar = CoordinateSystem::polar().with_axis(AxisSlot::Angle, &angle);
        polar = if share_radius {
            polar.with_shared_axis(AxisSlot::Radius, &radius)
        } else {
            polar.with_axis(AxisSlot::Radius, &radius)
        };
        let polar = polar.into_ref();
        let document = ChartDocument::new()
            .with_part(Series::line().with_data(&data).on(&polar))
            .with_part(Series::bar().with_data(&data).on(&polar));

        let assembly = document.assemble().expect("assemble");
        let first = assembly.encode().expect("encode");
        let second = assembly.encode().expect("encode again");
        prop_assert_eq!(first.as_str(), second.as_str());
        prop_assert!(first.to_value().is_ok());
    }

    #[test]
    fn failed_builds_report_the_first_broken_part(
        has_angle in any::<bool>(),
        has_data in any::<bool>(),
        pie in any::<bool>()
    ) {
        let data = Data::numbers([1.0, 2.0]).into_ref();
        let radius = Axis::new(DataType::Number).into_ref();
        let angle = Axis::new(DataType::Number).into_ref();
        let mut polar = CoordinateSystem::polar().with_axis(AxisSlot::Radius, &radius);
        if has_angle {
            polar = polar.with_axis(AxisSlot::Angle, &angle);
        }
        let polar = polar.into_ref();
        let mut series = if pie { Series::pie() } else { Series::bar() };
        if has_data {
            series = series.with_data(&data);
        }
        let result = ChartDocument::new().with_part(series.on(&polar)).build();

        match result {
            Ok(document) => {
                prop_assert!(has_angle && has_data && !pie);
                prop_assert!(document.to_value().is_ok());
            }
            Err(ChartError::EmptyData(_)) => prop_assert!(!has_data),
            Err(ChartError::StructuralConflict(_)) => prop_assert!(has_data && pie),
            Err(ChartError::MissingRequiredPart(reason)) => {
                prop_assert!(has_data && !pie && !has_angle);
                prop_assert!(reason.contains("angle"));
            }
            Err(ChartError::InvalidData(reason)) => {
                prop_assert!(false, "unexpected invalid data: {}", reason);
            }
        }
    }
}
