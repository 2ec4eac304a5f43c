use crate::{
    constraint::{ConstraintMap, ValueConstraint},
    dataset::{Dataset, DatasetError},
    model::{Activity, InstantPoint, Platform},
    query::QueryContext,
    test_fixtures::{campaign, ts},
};

fn ctx(constraints: ConstraintMap) -> QueryContext {
    QueryContext::new(constraints).unwrap()
}

#[test]
fn empty_constraints_match_whole_store() {
    let data = campaign();
    let q = ctx(ConstraintMap::new());

    assert_eq!(data.activities(&q.activities()).len(), 2);
    assert_eq!(data.samples(&q.samples()).len(), 2);
    assert_eq!(data.measured(&q.compile_measured()).count(), 7);
}

#[test]
fn platform_filter_narrows_every_target() {
    let data = campaign();
    let q = ctx(ConstraintMap {
        platforms: vec!["tethys".into()],
        ..ConstraintMap::new()
    });

    let activities = data.activities(&q.activities());
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].name, "tethys_20120201");

    let samples = data.samples(&q.samples());
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].name, "ESP 1");

    // only the single tethys temperature reading
    let compiled = q.compile_measured();
    let rows: Vec<_> = data.measured(&compiled).collect();
    assert_eq!(rows.len(), 1);
    assert!((rows[0].datavalue - 11.0).abs() < f64::EPSILON);
}

#[test]
fn activity_parameter_name_filter_is_multi_valued() {
    // dorado measured salinity, tethys did not; the activity-level
    // parameter_name field resolves to the list of measured parameters
    let data = campaign();
    let q = ctx(ConstraintMap {
        parameter_name: vec!["salinity".into()],
        ..ConstraintMap::new()
    });

    let activities = data.activities(&q.activities());
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].platform_id, 1);
}

#[test]
fn standard_name_filter_reaches_activity_parameters() {
    let data = campaign();
    let q = ctx(ConstraintMap {
        parameter_standard_name: vec!["sea_water_temperature".into()],
        ..ConstraintMap::new()
    });

    let aps = data.activity_parameters(&q.activity_parameters());
    assert_eq!(aps.len(), 2);
    assert!(aps.iter().all(|ap| ap.parameter_id == 1));
}

#[test]
fn time_window_is_interval_overlap_for_activities_point_for_rows() {
    let data = campaign();
    // window clips the tail of the dorado survey only
    let q = ctx(ConstraintMap {
        time: (Some(ts(2012, 1, 7, 0)), Some(ts(2012, 1, 20, 0))),
        ..ConstraintMap::new()
    });

    // the activity interval overlaps the window, so it matches whole
    assert_eq!(data.activities(&q.activities()).len(), 1);

    // measurement rows are points: only the Jan 7 readings survive
    let compiled = q.compile_measured();
    let rows: Vec<_> = data.measured(&compiled).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|mp| mp.measurement_id == 3));
}

#[test]
fn depth_window_uses_point_semantics_for_samples() {
    let data = campaign();
    let q = ctx(ConstraintMap {
        depth: (Some(40.0), Some(60.0)),
        ..ConstraintMap::new()
    });

    let samples = data.samples(&q.samples());
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].name, "Gulper 1");
}

#[test]
fn one_value_constraint_keeps_strictly_inside_rows() {
    let data = campaign();
    let q = ctx(ConstraintMap {
        parameter_name: vec!["temperature".into()],
        parameter_values: vec![ValueConstraint::new("temperature", 10.0, 15.0)],
        ..ConstraintMap::new()
    });

    // temp readings: 12.5, 14.0, 8.0, 11.0 -> 8.0 excluded
    let values: Vec<f64> = data
        .measured(&q.compile_measured())
        .map(|mp| mp.datavalue)
        .collect();
    assert_eq!(values, vec![12.5, 14.0, 11.0]);
}

#[test]
fn value_constraint_bounds_are_exclusive() {
    let data = campaign();
    let q = ctx(ConstraintMap {
        parameter_values: vec![ValueConstraint::new("temperature", 11.0, 14.0)],
        ..ConstraintMap::new()
    });

    // 11.0 and 14.0 sit on the bounds and are excluded; only the
    // measurement with temp 12.5 qualifies, carrying both its rows
    let compiled = q.compile_measured();
    let rows: Vec<_> = data.measured(&compiled).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|mp| mp.measurement_id == 1));
}

#[test]
fn conjoined_value_constraints_require_one_measurement_to_satisfy_all() {
    let data = campaign();
    let q = ctx(ConstraintMap {
        parameter_name: vec!["temperature".into()],
        parameter_values: vec![
            ValueConstraint::new("temperature", 10.0, 15.0),
            ValueConstraint::new("salinity", 33.0, 34.0),
        ],
        ..ConstraintMap::new()
    });

    // measurement 1: temp 12.5 in range, sal 33.5 in range -> qualifies
    // measurement 2: temp 14.0 in range, sal 34.5 out -> dropped
    // measurement 4: temp 11.0 in range, no salinity at all -> dropped
    let compiled = q.compile_measured();
    let rows: Vec<_> = data.measured(&compiled).collect();
    assert_eq!(rows.len(), 1);
    assert!((rows[0].datavalue - 12.5).abs() < f64::EPSILON);
}

#[test]
fn inverted_value_range_yields_empty_set_not_error() {
    let data = campaign();
    let q = ctx(ConstraintMap {
        parameter_values: vec![ValueConstraint::new("temperature", 15.0, 10.0)],
        ..ConstraintMap::new()
    });

    assert_eq!(data.measured_count(&q.compile_measured()), 0);
}

#[test]
fn histograms_follow_activity_parameter_predicates() {
    let data = campaign();
    let q = ctx(ConstraintMap {
        platforms: vec!["dorado".into()],
        parameter_name: vec!["temperature".into()],
        ..ConstraintMap::new()
    });

    let bins = data.histograms(&q.histograms());
    assert_eq!(bins.len(), 4);
    assert_eq!(bins.iter().map(|b| b.bincount).sum::<u64>(), 500);
}

#[test]
fn model_entities_load_from_ingestion_json() {
    let activity: Activity = serde_json::from_str(
        r#"{
            "id": 5,
            "name": "Dorado389_2012_027_01_027_01.nc",
            "platform_id": 1,
            "startdate": "2012-01-27T00:00:00Z",
            "enddate": "2012-01-28T00:00:00Z",
            "mindepth": 0.0,
            "maxdepth": 100.0,
            "campaign": null
        }"#,
    )
    .unwrap();

    assert_eq!(activity.startdate, ts(2012, 1, 27, 0));

    let data = Dataset::builder()
        .platform(Platform {
            id: 1,
            name: "dorado".into(),
            color: "ffeda0".into(),
        })
        .activity(activity)
        .build()
        .unwrap();
    assert_eq!(data.activities(&ctx(ConstraintMap::new()).activities()).len(), 1);
}

#[test]
fn builder_rejects_missing_relations() {
    let err = Dataset::builder()
        .instantpoint(InstantPoint {
            id: 1,
            activity_id: 99,
            timevalue: ts(2012, 1, 1, 0),
        })
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        DatasetError::MissingRelation {
            entity: "instantpoint",
            id: 1,
            relation: "activity",
            target: 99,
        }
    );
}

#[test]
fn builder_rejects_inverted_activity_intervals() {
    let err = Dataset::builder()
        .platform(Platform {
            id: 1,
            name: "dorado".into(),
            color: "ffeda0".into(),
        })
        .activity(Activity {
            id: 7,
            name: "backwards".into(),
            platform_id: 1,
            startdate: ts(2012, 1, 2, 0),
            enddate: ts(2012, 1, 1, 0),
            mindepth: 0.0,
            maxdepth: 10.0,
            campaign: None,
        })
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        DatasetError::InvertedInterval {
            id: 7,
            interval: "time",
        }
    );
}

#[test]
fn builder_rejects_duplicate_ids() {
    let p = Platform {
        id: 1,
        name: "dorado".into(),
        color: "ffeda0".into(),
    };
    let err = Dataset::builder()
        .platform(p.clone())
        .platform(p)
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        DatasetError::DuplicateId {
            entity: "platform",
            id: 1,
        }
    );
}
