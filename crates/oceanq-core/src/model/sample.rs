use crate::model::{GeoPoint, InstantPointId};
use serde::{Deserialize, Serialize};

pub type SampleId = i64;

///
/// Sample
///
/// A physical specimen taken at a measurement's time and place.
/// Independent of the value-query path, but filtered with the same
/// time/depth/platform vocabulary. Samples are not typed by Parameter.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Sample {
    pub id: SampleId,
    pub instantpoint_id: InstantPointId,
    pub name: String,
    pub depth: f64,
    pub geom: GeoPoint,
}
