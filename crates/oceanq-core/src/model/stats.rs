use crate::model::{ActivityId, ParameterId};
use serde::{Deserialize, Serialize};

pub type ActivityParameterId = i64;

///
/// ActivityParameter
///
/// Precomputed per-(Activity, Parameter) summary row: measured-parameter
/// row count plus 2.5/97.5 percentile bounds. This is what makes fast
/// approximate cardinality possible without scanning MeasuredParameter.
///
/// Stats are computed at load time and may be stale relative to live data;
/// the estimator treats disagreement as best-effort, not an error.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ActivityParameter {
    pub id: ActivityParameterId,
    pub activity_id: ActivityId,
    pub parameter_id: ParameterId,
    /// Number of MeasuredParameter rows summarized here.
    pub number: u64,
    /// 2.5 percentile of datavalue.
    pub p025: f64,
    /// 97.5 percentile of datavalue.
    pub p975: f64,
}

///
/// ActivityParameterHistogram
///
/// One (binlo, binhi, bincount) triple of a precomputed histogram over an
/// ActivityParameter, for UI bar charts.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ActivityParameterHistogram {
    pub activityparameter_id: ActivityParameterId,
    pub binlo: f64,
    pub binhi: f64,
    pub bincount: u64,
}
