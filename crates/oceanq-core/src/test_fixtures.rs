//! Shared dataset fixtures for unit tests.
//!
//! One small campaign: two platforms, two parameters, a handful of
//! measurements with known values so every test can assert exact rows.

use crate::{
    dataset::Dataset,
    model::{
        Activity, ActivityParameter, ActivityParameterHistogram, GeoPoint, InstantPoint,
        Measurement, MeasuredParameter, Parameter, Platform, Sample,
    },
};
use chrono::{DateTime, TimeZone, Utc};

pub(crate) fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Dorado survey (3 measurements, temperature + salinity) and a Tethys
/// deployment (1 measurement, temperature only). Stated counts in the
/// ActivityParameter rows deliberately disagree with the actual row
/// counts so estimator tests can tell the two tiers apart.
pub(crate) fn campaign() -> Dataset {
    let geom = |lon, lat| GeoPoint { lon, lat };

    Dataset::builder()
        .platform(Platform {
            id: 1,
            name: "dorado".into(),
            color: "ffeda0".into(),
        })
        .platform(Platform {
            id: 2,
            name: "tethys".into(),
            color: "2c7fb8".into(),
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
            standard_name: Some("sea_water_salinity".into()),
            units: None,
        })
        .activity(Activity {
            id: 1,
            name: "Dorado389_2012_027_01_027_01.nc (stride=1)".into(),
            platform_id: 1,
            startdate: ts(2012, 1, 5, 0),
            enddate: ts(2012, 1, 8, 0),
            mindepth: 0.0,
            maxdepth: 100.0,
            campaign: Some("CANON January 2012".into()),
        })
        .activity(Activity {
            id: 2,
            name: "tethys_20120201".into(),
            platform_id: 2,
            startdate: ts(2012, 2, 1, 0),
            enddate: ts(2012, 2, 5, 0),
            mindepth: 0.0,
            maxdepth: 30.0,
            campaign: Some("CANON January 2012".into()),
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
        .instantpoint(InstantPoint {
            id: 3,
            activity_id: 1,
            timevalue: ts(2012, 1, 7, 6),
        })
        .instantpoint(InstantPoint {
            id: 4,
            activity_id: 2,
            timevalue: ts(2012, 2, 2, 12),
        })
        .measurement(Measurement {
            id: 1,
            instantpoint_id: 1,
            depth: 5.0,
            geom: geom(-122.1, 36.8),
        })
        .measurement(Measurement {
            id: 2,
            instantpoint_id: 2,
            depth: 50.0,
            geom: geom(-122.2, 36.7),
        })
        .measurement(Measurement {
            id: 3,
            instantpoint_id: 3,
            depth: 95.0,
            geom: geom(-122.3, 36.6),
        })
        .measurement(Measurement {
            id: 4,
            instantpoint_id: 4,
            depth: 10.0,
            geom: geom(-121.9, 36.9),
        })
        .measured_parameter(mp(1, 1, 1, 12.5))
        .measured_parameter(mp(2, 1, 2, 33.5))
        .measured_parameter(mp(3, 2, 1, 14.0))
        .measured_parameter(mp(4, 2, 2, 34.5))
        .measured_parameter(mp(5, 3, 1, 8.0))
        .measured_parameter(mp(6, 3, 2, 33.9))
        .measured_parameter(mp(7, 4, 1, 11.0))
        .activity_parameter(ActivityParameter {
            id: 1,
            activity_id: 1,
            parameter_id: 1,
            number: 500,
            p025: 8.2,
            p975: 15.6,
        })
        .activity_parameter(ActivityParameter {
            id: 2,
            activity_id: 1,
            parameter_id: 2,
            number: 480,
            p025: 33.1,
            p975: 34.6,
        })
        .activity_parameter(ActivityParameter {
            id: 3,
            activity_id: 2,
            parameter_id: 1,
            number: 120,
            p025: 10.0,
            p975: 12.0,
        })
        .histogram(bin(1, 8.0, 10.0, 40))
        .histogram(bin(1, 10.0, 12.0, 160))
        .histogram(bin(1, 12.0, 14.0, 220))
        .histogram(bin(1, 14.0, 16.0, 80))
        .histogram(bin(3, 10.0, 11.0, 60))
        .histogram(bin(3, 11.0, 12.0, 60))
        .sample(Sample {
            id: 1,
            instantpoint_id: 2,
            name: "Gulper 1".into(),
            depth: 48.0,
            geom: geom(-122.2, 36.7),
        })
        .sample(Sample {
            id: 2,
            instantpoint_id: 4,
            name: "ESP 1".into(),
            depth: 9.5,
            geom: geom(-121.9, 36.9),
        })
        .build()
        .unwrap()
}

/// One activity with `rows` temperature readings, for cap tests.
pub(crate) fn bulk(rows: usize) -> Dataset {
    let mut b = Dataset::builder()
        .platform(Platform {
            id: 1,
            name: "dorado".into(),
            color: "ffeda0".into(),
        })
        .parameter(Parameter {
            id: 1,
            name: "temperature".into(),
            standard_name: None,
            units: None,
        })
        .activity(Activity {
            id: 1,
            name: "bulk".into(),
            platform_id: 1,
            startdate: ts(2012, 1, 1, 0),
            enddate: ts(2012, 1, 2, 0),
            mindepth: 0.0,
            maxdepth: 10.0,
            campaign: None,
        });

    for i in 0..rows {
        let id = i64::try_from(i).unwrap() + 1;
        b = b
            .instantpoint(InstantPoint {
                id,
                activity_id: 1,
                timevalue: ts(2012, 1, 1, 0),
            })
            .measurement(Measurement {
                id,
                instantpoint_id: id,
                depth: 1.0,
                geom: GeoPoint { lon: 0.0, lat: 0.0 },
            })
            .measured_parameter(mp(id, id, 1, 10.0));
    }

    b.build().unwrap()
}

fn mp(id: i64, measurement_id: i64, parameter_id: i64, datavalue: f64) -> MeasuredParameter {
    MeasuredParameter {
        id,
        measurement_id,
        parameter_id,
        datavalue,
    }
}

fn bin(ap: i64, binlo: f64, binhi: f64, bincount: u64) -> ActivityParameterHistogram {
    ActivityParameterHistogram {
        activityparameter_id: ap,
        binlo,
        binhi,
        bincount,
    }
}
