use crate::model::{ActivityId, ParameterId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type InstantPointId = i64;
pub type MeasurementId = i64;
pub type MeasuredParameterId = i64;

///
/// GeoPoint
///
/// 2D lon/lat geometry of a measurement, SRID 4326.
///

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl fmt::Display for GeoPoint {
    /// WKT point form, lon first: `POINT (lon lat)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POINT ({} {})", self.lon, self.lat)
    }
}

///
/// InstantPoint
///
/// One timestamp within an Activity. Measurements hang off instant points;
/// this is how a Measurement belongs to exactly one Activity.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct InstantPoint {
    pub id: InstantPointId,
    pub activity_id: ActivityId,
    pub timevalue: DateTime<Utc>,
}

///
/// Measurement
///
/// One spatio-temporal sample point: depth and geometry at an instant.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Measurement {
    pub id: MeasurementId,
    pub instantpoint_id: InstantPointId,
    pub depth: f64,
    pub geom: GeoPoint,
}

///
/// MeasuredParameter
///
/// One (Measurement, Parameter) pair with a numeric value. The largest
/// table; all value-constrained queries operate here, and value-constraint
/// joins rely on `measurement_id` equality across self-joined copies.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MeasuredParameter {
    pub id: MeasuredParameterId,
    pub measurement_id: MeasurementId,
    pub parameter_id: ParameterId,
    pub datavalue: f64,
}
