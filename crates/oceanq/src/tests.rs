use crate::prelude::*;
use oceanq_core::{
    error::ConstraintError,
    estimate::CountStrategy,
    model::GeoPoint,
    plot::SectionError,
};
use chrono::{DateTime, TimeZone, Utc};

fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

// One platform, two parameters, two co-located readings.
fn dataset() -> Dataset {
    Dataset::builder()
        .platform(Platform {
            id: 1,
            name: "dorado".into(),
            color: "ffeda0".into(),
        })
        .parameter(Parameter {
            id: 1,
            name: "temperature".into(),
            standard_name: Some("sea_water_temperature".into()),
            units: Some("Celsius".into()),
        })
        .parameter(Parameter {
            id: 2,
            name: "salinity".into(),
            standard_name: None,
            units: None,
        })
        .activity(Activity {
            id: 1,
            name: "Dorado389 survey".into(),
            platform_id: 1,
            startdate: ts(2012, 1, 5, 0),
            enddate: ts(2012, 1, 8, 0),
            mindepth: 0.0,
            maxdepth: 100.0,
            campaign: None,
        })
        .instantpoint(InstantPoint {
            id: 1,
            activity_id: 1,
            timevalue: ts(2012, 1, 5, 6),
        })
        .instantpoint(InstantPoint {
            id: 2,
            activity_id: 1,
            timevalue: ts(2012, 1, 6, 6),
        })
        .measurement(Measurement {
            id: 1,
            instantpoint_id: 1,
            depth: 5.0,
            geom: GeoPoint {
                lon: -122.1,
                lat: 36.8,
            },
        })
        .measurement(Measurement {
            id: 2,
            instantpoint_id: 2,
            depth: 50.0,
            geom: GeoPoint {
                lon: -122.2,
                lat: 36.7,
            },
        })
        .measured_parameter(MeasuredParameter {
            id: 1,
            measurement_id: 1,
            parameter_id: 1,
            datavalue: 12.5,
        })
        .measured_parameter(MeasuredParameter {
            id: 2,
            measurement_id: 1,
            parameter_id: 2,
            datavalue: 33.5,
        })
        .measured_parameter(MeasuredParameter {
            id: 3,
            measurement_id: 2,
            parameter_id: 1,
            datavalue: 16.0,
        })
        .activity_parameter(ActivityParameter {
            id: 1,
            activity_id: 1,
            parameter_id: 1,
            number: 250,
            p025: 10.0,
            p975: 17.0,
        })
        .build()
        .unwrap()
}

fn session(data: &Dataset, constraints: ConstraintMap) -> QuerySession<'_> {
    QuerySession::new(data, "stoqs_january2012", "s1", constraints).unwrap()
}

#[test]
fn session_serves_rows_counts_and_sql_from_one_compilation() {
    let data = dataset();
    let s = session(
        &data,
        ConstraintMap {
            parameter_name: vec!["temperature".into()],
            parameter_values: vec![ValueConstraint::new("temperature", 10.0, 15.0)],
            get_actual_count: true,
            ..ConstraintMap::new()
        },
    );

    let records: Vec<MeasuredRecord> = s.records().iter().collect();
    assert_eq!(records.len(), 1);
    assert!((records[0].datavalue - 12.5).abs() < f64::EPSILON);

    let count = s.count();
    assert_eq!(count.strategy, CountStrategy::Exact);
    assert_eq!(count.value, 1);

    let sql = s.sql().unwrap();
    assert!(sql.starts_with("\\c stoqs_january2012\n"));
    assert!(sql.contains("INNER JOIN measuredparameter mp_1"));
    assert!(sql.contains("(p_1.name = 'temperature')"));
}

#[test]
fn hostile_literals_are_rejected_at_session_construction() {
    let data = dataset();
    let err = QuerySession::new(
        &data,
        "db",
        "s1",
        ConstraintMap {
            parameter_values: vec![ValueConstraint::new("temp'; DROP TABLE x; --", 0.0, 1.0)],
            ..ConstraintMap::new()
        },
    )
    .unwrap_err();

    assert!(matches!(err, ConstraintError::InvalidLiteral { .. }));
}

#[test]
fn approximate_count_is_the_default() {
    let data = dataset();
    let s = session(&data, ConstraintMap::new());

    let count = s.count();
    assert_eq!(count.strategy, CountStrategy::Approximate);
    assert_eq!(count.value, 250);
    assert_eq!(count.localized(), "250");
}

#[test]
fn geo_queries_wrap_a_mapserver_subquery() {
    let data = dataset();
    let s = session(
        &data,
        ConstraintMap {
            platforms: vec!["dorado".into()],
            ..ConstraintMap::new()
        },
    );

    let layer = s.activity_geo_query().unwrap();
    assert!(layer.starts_with("geom from ("));
    assert!(layer.ends_with(") as subquery using unique gid using srid=4326"));
}

#[test]
fn summary_panels_follow_the_constraints() {
    let data = dataset();
    let s = session(&data, ConstraintMap::new());

    assert_eq!(s.platforms().len(), 1);
    assert_eq!(s.parameters().len(), 1);
    assert_eq!(s.time_extent().map(|e| e.end), Some(ts(2012, 1, 8, 0)));
    assert_eq!(s.geo_extent().as_deref(), Some("LINESTRING (-122.2 36.7, -122.1 36.8)"));
}

#[test]
fn section_file_names_embed_the_session_id() {
    let data = dataset();
    let s = session(
        &data,
        ConstraintMap {
            parameter_name: vec!["temperature".into()],
            platforms: vec!["dorado".into()],
            time: (Some(ts(2012, 1, 5, 0)), Some(ts(2012, 1, 8, 0))),
            depth: (Some(0.0), Some(100.0)),
            ..ConstraintMap::new()
        },
    );

    let (image, colorbar) = s.section_file_names().unwrap();
    assert_eq!(image, "temperature_dorado_s1.png");
    assert_eq!(colorbar, "temperature_dorado_colorbar_s1.png");
}

#[test]
fn underconstrained_section_is_an_error() {
    let data = dataset();
    let s = session(&data, ConstraintMap::new());

    assert_eq!(s.section().unwrap_err(), SectionError::Underconstrained);
}

#[test]
fn records_serialize_for_the_json_surface() {
    let data = dataset();
    let s = session(&data, ConstraintMap::new());
    let records: Vec<MeasuredRecord> = s.records().iter().collect();

    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["parameter_name"], "temperature");
    assert_eq!(json["geom"], "POINT (-122.1 36.8)");
}
