//! In-memory read-only dataset.
//!
//! The "already-loaded store" the compiler reads. Holds every entity plus
//! the id indexes needed to resolve relation field paths during predicate
//! evaluation. Built once by [`DatasetBuilder`], immutable afterward;
//! concurrent requests share it freely.

mod eval;
mod execute;

#[cfg(test)]
mod tests;

use crate::model::{
    Activity, ActivityId, ActivityParameter, ActivityParameterHistogram, ActivityParameterId,
    InstantPoint, InstantPointId, Measurement, MeasuredParameter, MeasurementId, Parameter,
    ParameterId, Platform, PlatformId, Sample,
};
use std::collections::HashMap;
use thiserror::Error as ThisError;

///
/// DatasetError
///
/// Referential-integrity and invariant failures caught while building.
/// The ingestion pipeline owns correctness; the builder just refuses to
/// hand the compiler a store that would make relation chasing lossy.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DatasetError {
    #[error("{entity} {id} references missing {relation} {target}")]
    MissingRelation {
        entity: &'static str,
        id: i64,
        relation: &'static str,
        target: i64,
    },

    #[error("activity {id} has an inverted {interval} interval")]
    InvertedInterval { id: ActivityId, interval: &'static str },

    #[error("duplicate {entity} id {id}")]
    DuplicateId { entity: &'static str, id: i64 },
}

///
/// Dataset
///

#[derive(Debug, Default)]
pub struct Dataset {
    pub(crate) platforms: Vec<Platform>,
    pub(crate) activities: Vec<Activity>,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) instantpoints: Vec<InstantPoint>,
    pub(crate) measurements: Vec<Measurement>,
    pub(crate) measured_parameters: Vec<MeasuredParameter>,
    pub(crate) activity_parameters: Vec<ActivityParameter>,
    pub(crate) histograms: Vec<ActivityParameterHistogram>,
    pub(crate) samples: Vec<Sample>,

    // id -> vec index
    pub(crate) platform_by_id: HashMap<PlatformId, usize>,
    pub(crate) activity_by_id: HashMap<ActivityId, usize>,
    pub(crate) parameter_by_id: HashMap<ParameterId, usize>,
    pub(crate) instantpoint_by_id: HashMap<InstantPointId, usize>,
    pub(crate) measurement_by_id: HashMap<MeasurementId, usize>,
    pub(crate) activity_parameter_by_id: HashMap<ActivityParameterId, usize>,

    // relation fan-out used by self-join evaluation and multi-valued fields
    pub(crate) measured_by_measurement: HashMap<MeasurementId, Vec<usize>>,
    pub(crate) parameters_by_activity: HashMap<ActivityId, Vec<usize>>,
}

impl Dataset {
    #[must_use]
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }
}

///
/// DatasetBuilder
///

#[derive(Debug, Default)]
pub struct DatasetBuilder {
    dataset: Dataset,
}

impl DatasetBuilder {
    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.dataset.platforms.push(platform);
        self
    }

    #[must_use]
    pub fn activity(mut self, activity: Activity) -> Self {
        self.dataset.activities.push(activity);
        self
    }

    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.dataset.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn instantpoint(mut self, point: InstantPoint) -> Self {
        self.dataset.instantpoints.push(point);
        self
    }

    #[must_use]
    pub fn measurement(mut self, measurement: Measurement) -> Self {
        self.dataset.measurements.push(measurement);
        self
    }

    #[must_use]
    pub fn measured_parameter(mut self, mp: MeasuredParameter) -> Self {
        self.dataset.measured_parameters.push(mp);
        self
    }

    #[must_use]
    pub fn activity_parameter(mut self, ap: ActivityParameter) -> Self {
        self.dataset.activity_parameters.push(ap);
        self
    }

    #[must_use]
    pub fn histogram(mut self, histogram: ActivityParameterHistogram) -> Self {
        self.dataset.histograms.push(histogram);
        self
    }

    #[must_use]
    pub fn sample(mut self, sample: Sample) -> Self {
        self.dataset.samples.push(sample);
        self
    }

    /// Verify invariants, build the id indexes, and freeze the dataset.
    pub fn build(self) -> Result<Dataset, DatasetError> {
        let mut d = self.dataset;

        d.platform_by_id = index_ids("platform", d.platforms.iter().map(|p| p.id))?;
        d.activity_by_id = index_ids("activity", d.activities.iter().map(|a| a.id))?;
        d.parameter_by_id = index_ids("parameter", d.parameters.iter().map(|p| p.id))?;
        d.instantpoint_by_id = index_ids("instantpoint", d.instantpoints.iter().map(|p| p.id))?;
        d.measurement_by_id = index_ids("measurement", d.measurements.iter().map(|m| m.id))?;
        d.activity_parameter_by_id =
            index_ids("activityparameter", d.activity_parameters.iter().map(|ap| ap.id))?;

        for a in &d.activities {
            if a.startdate > a.enddate {
                return Err(DatasetError::InvertedInterval {
                    id: a.id,
                    interval: "time",
                });
            }
            if a.mindepth > a.maxdepth {
                return Err(DatasetError::InvertedInterval {
                    id: a.id,
                    interval: "depth",
                });
            }
            require(&d.platform_by_id, "activity", a.id, "platform", a.platform_id)?;
        }
        for p in &d.instantpoints {
            require(&d.activity_by_id, "instantpoint", p.id, "activity", p.activity_id)?;
        }
        for m in &d.measurements {
            require(
                &d.instantpoint_by_id,
                "measurement",
                m.id,
                "instantpoint",
                m.instantpoint_id,
            )?;
        }
        for mp in &d.measured_parameters {
            require(
                &d.measurement_by_id,
                "measuredparameter",
                mp.id,
                "measurement",
                mp.measurement_id,
            )?;
            require(
                &d.parameter_by_id,
                "measuredparameter",
                mp.id,
                "parameter",
                mp.parameter_id,
            )?;
        }
        for ap in &d.activity_parameters {
            require(&d.activity_by_id, "activityparameter", ap.id, "activity", ap.activity_id)?;
            require(&d.parameter_by_id, "activityparameter", ap.id, "parameter", ap.parameter_id)?;
        }
        for h in &d.histograms {
            require(
                &d.activity_parameter_by_id,
                "activityparameterhistogram",
                h.activityparameter_id,
                "activityparameter",
                h.activityparameter_id,
            )?;
        }
        for s in &d.samples {
            require(&d.instantpoint_by_id, "sample", s.id, "instantpoint", s.instantpoint_id)?;
        }

        for (idx, mp) in d.measured_parameters.iter().enumerate() {
            d.measured_by_measurement
                .entry(mp.measurement_id)
                .or_default()
                .push(idx);
        }
        for ap in &d.activity_parameters {
            if let Some(&pidx) = d.parameter_by_id.get(&ap.parameter_id) {
                let slot = d.parameters_by_activity.entry(ap.activity_id).or_default();
                if !slot.contains(&pidx) {
                    slot.push(pidx);
                }
            }
        }

        Ok(d)
    }
}

fn index_ids(
    entity: &'static str,
    ids: impl Iterator<Item = i64>,
) -> Result<HashMap<i64, usize>, DatasetError> {
    let mut map = HashMap::new();
    for (idx, id) in ids.enumerate() {
        if map.insert(id, idx).is_some() {
            return Err(DatasetError::DuplicateId { entity, id });
        }
    }

    Ok(map)
}

fn require(
    index: &HashMap<i64, usize>,
    entity: &'static str,
    id: i64,
    relation: &'static str,
    target: i64,
) -> Result<(), DatasetError> {
    if index.contains_key(&target) {
        Ok(())
    } else {
        Err(DatasetError::MissingRelation {
            entity,
            id,
            relation,
            target,
        })
    }
}
