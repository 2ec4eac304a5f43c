//! Query execution against the in-memory store.
//!
//! Declarative specs filter one entity vector through the predicate and
//! the dataset's resolver for that target. The self-join path mirrors the
//! generated SQL: a base-qualifying row survives only when its measurement
//! carries, for every value constraint, some reading of that parameter
//! strictly inside the bounds.

use crate::{
    constraint::ValueConstraint,
    dataset::Dataset,
    model::{
        Activity, ActivityParameter, ActivityParameterHistogram, MeasuredParameter, Sample,
    },
    query::{
        Activities, ActivityParameters, CompiledQuery, Histograms, MeasuredParameters, QuerySpec,
        Samples,
    },
};

impl Dataset {
    #[must_use]
    pub fn activities(&self, spec: &QuerySpec<Activities>) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| spec.predicate().matches(&|field| self.resolve_activity(a, field)))
            .collect()
    }

    #[must_use]
    pub fn activity_parameters(
        &self,
        spec: &QuerySpec<ActivityParameters>,
    ) -> Vec<&ActivityParameter> {
        self.activity_parameters
            .iter()
            .filter(|ap| {
                spec.predicate()
                    .matches(&|field| self.resolve_activity_parameter(ap, field))
            })
            .collect()
    }

    #[must_use]
    pub fn histograms(&self, spec: &QuerySpec<Histograms>) -> Vec<&ActivityParameterHistogram> {
        self.histograms
            .iter()
            .filter(|h| spec.predicate().matches(&|field| self.resolve_histogram(h, field)))
            .collect()
    }

    #[must_use]
    pub fn samples(&self, spec: &QuerySpec<Samples>) -> Vec<&Sample> {
        self.samples
            .iter()
            .filter(|s| spec.predicate().matches(&|field| self.resolve_sample(s, field)))
            .collect()
    }

    /// Measurement-level rows matching a compiled query, in storage order.
    /// Uncapped; callers that serve clients go through the record layer,
    /// which applies the iteration cap.
    pub fn measured<'a>(
        &'a self,
        compiled: &'a CompiledQuery,
    ) -> impl Iterator<Item = &'a MeasuredParameter> {
        let base = compiled.base_predicate();
        let constraints = compiled.value_constraints();

        self.measured_parameters.iter().filter(move |mp| {
            base.matches(&|field| self.resolve_measured(mp, field))
                && constraints
                    .iter()
                    .all(|vc| self.measurement_satisfies(mp.measurement_id, vc))
        })
    }

    /// Exact row count for a compiled query. Never capped.
    #[must_use]
    pub fn measured_count(&self, compiled: &CompiledQuery) -> u64 {
        self.measured(compiled).count() as u64
    }

    // True when the measurement has some reading of the constrained
    // parameter strictly inside (lo, hi). Same semantics as one
    // `p_i`/`mp_i` alias pair in the generated SQL.
    fn measurement_satisfies(&self, measurement_id: i64, vc: &ValueConstraint) -> bool {
        self.measured_by_measurement
            .get(&measurement_id)
            .is_some_and(|rows| {
                rows.iter().any(|&idx| {
                    let mp = &self.measured_parameters[idx];

                    mp.datavalue > vc.lo
                        && mp.datavalue < vc.hi
                        && self
                            .parameter_row(mp.parameter_id)
                            .is_some_and(|p| p.name == vc.parameter_name)
                })
            })
    }
}
