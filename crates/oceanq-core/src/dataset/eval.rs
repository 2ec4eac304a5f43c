//! Field resolution for in-memory predicate evaluation.
//!
//! Resolvers turn the vocabulary's field paths into [`Value`]s by chasing
//! the same relation chains the SQL lowering walks with joins. A path that
//! cannot be resolved (unknown name, NULL standard_name, broken relation)
//! yields `None`, which the predicate treats as matching nothing.

use crate::{
    constraint::{
        Value,
        vocabulary::{
            DEPTH, ENDDATE, MAXDEPTH, MINDEPTH, PARAMETER_NAME, PARAMETER_STANDARD_NAME,
            PLATFORM_NAME, STARTDATE, TIMEVALUE,
        },
    },
    dataset::Dataset,
    model::{
        Activity, ActivityParameter, ActivityParameterHistogram, InstantPoint, Measurement,
        MeasuredParameter, Parameter, Platform, Sample,
    },
};

impl Dataset {
    pub(crate) fn resolve_activity(&self, activity: &Activity, field: &str) -> Option<Value> {
        match field {
            STARTDATE => Some(Value::Time(activity.startdate)),
            ENDDATE => Some(Value::Time(activity.enddate)),
            MINDEPTH => Some(Value::Float(activity.mindepth)),
            MAXDEPTH => Some(Value::Float(activity.maxdepth)),
            PLATFORM_NAME => self
                .platform_of(activity)
                .map(|p| Value::Text(p.name.clone())),
            PARAMETER_NAME => Some(Value::List(
                self.parameters_of(activity)
                    .map(|p| Value::Text(p.name.clone()))
                    .collect(),
            )),
            PARAMETER_STANDARD_NAME => Some(Value::List(
                self.parameters_of(activity)
                    .filter_map(|p| p.standard_name.clone())
                    .map(Value::Text)
                    .collect(),
            )),
            _ => None,
        }
    }

    pub(crate) fn resolve_activity_parameter(
        &self,
        ap: &ActivityParameter,
        field: &str,
    ) -> Option<Value> {
        match field {
            PARAMETER_NAME => self
                .parameter_row(ap.parameter_id)
                .map(|p| Value::Text(p.name.clone())),
            PARAMETER_STANDARD_NAME => self
                .parameter_row(ap.parameter_id)
                .and_then(|p| p.standard_name.clone())
                .map(Value::Text),
            _ => {
                let activity = self.activity_row(ap.activity_id)?;
                self.resolve_activity(activity, field)
            }
        }
    }

    pub(crate) fn resolve_histogram(
        &self,
        histogram: &ActivityParameterHistogram,
        field: &str,
    ) -> Option<Value> {
        let ap = self
            .activity_parameter_by_id
            .get(&histogram.activityparameter_id)
            .map(|&idx| &self.activity_parameters[idx])?;

        self.resolve_activity_parameter(ap, field)
    }

    pub(crate) fn resolve_sample(&self, sample: &Sample, field: &str) -> Option<Value> {
        match field {
            DEPTH => Some(Value::Float(sample.depth)),
            TIMEVALUE => self
                .instantpoint_by_id
                .get(&sample.instantpoint_id)
                .map(|&idx| Value::Time(self.instantpoints[idx].timevalue)),
            PLATFORM_NAME => self
                .sample_platform(sample)
                .map(|p| Value::Text(p.name.clone())),
            _ => None,
        }
    }

    pub(crate) fn resolve_measured(&self, mp: &MeasuredParameter, field: &str) -> Option<Value> {
        match field {
            PARAMETER_NAME => self
                .parameter_row(mp.parameter_id)
                .map(|p| Value::Text(p.name.clone())),
            PARAMETER_STANDARD_NAME => self
                .parameter_row(mp.parameter_id)
                .and_then(|p| p.standard_name.clone())
                .map(Value::Text),
            DEPTH => self.measurement_row(mp.measurement_id).map(|m| Value::Float(m.depth)),
            TIMEVALUE => {
                let m = self.measurement_row(mp.measurement_id)?;
                self.instantpoint_by_id
                    .get(&m.instantpoint_id)
                    .map(|&idx| Value::Time(self.instantpoints[idx].timevalue))
            }
            PLATFORM_NAME => {
                let m = self.measurement_row(mp.measurement_id)?;
                let point = self
                    .instantpoint_by_id
                    .get(&m.instantpoint_id)
                    .map(|&idx| &self.instantpoints[idx])?;
                let activity = self.activity_row(point.activity_id)?;

                self.platform_of(activity).map(|p| Value::Text(p.name.clone()))
            }
            _ => None,
        }
    }

    //
    // relation chasing
    //

    pub(crate) fn activity_row(&self, id: i64) -> Option<&Activity> {
        self.activity_by_id.get(&id).map(|&idx| &self.activities[idx])
    }

    pub(crate) fn parameter_row(&self, id: i64) -> Option<&Parameter> {
        self.parameter_by_id.get(&id).map(|&idx| &self.parameters[idx])
    }

    pub(crate) fn instantpoint_row(&self, id: i64) -> Option<&InstantPoint> {
        self.instantpoint_by_id.get(&id).map(|&idx| &self.instantpoints[idx])
    }

    pub(crate) fn measurement_row(&self, id: i64) -> Option<&Measurement> {
        self.measurement_by_id.get(&id).map(|&idx| &self.measurements[idx])
    }

    pub(crate) fn histogram_rows(
        &self,
        activityparameter_id: i64,
    ) -> impl Iterator<Item = &ActivityParameterHistogram> {
        self.histograms
            .iter()
            .filter(move |h| h.activityparameter_id == activityparameter_id)
    }

    pub(crate) fn platform_of(&self, activity: &Activity) -> Option<&Platform> {
        self.platform_by_id
            .get(&activity.platform_id)
            .map(|&idx| &self.platforms[idx])
    }

    fn parameters_of<'a>(&'a self, activity: &Activity) -> impl Iterator<Item = &'a Parameter> {
        self.parameters_by_activity
            .get(&activity.id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.parameters[idx])
    }

    fn sample_platform(&self, sample: &Sample) -> Option<&Platform> {
        let point = self
            .instantpoint_by_id
            .get(&sample.instantpoint_id)
            .map(|&idx| &self.instantpoints[idx])?;
        let activity = self.activity_row(point.activity_id)?;

        self.platform_of(activity)
    }
}
