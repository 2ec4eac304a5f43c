//! Declarative query assembly.
//!
//! [`QueryContext`] is the immutable per-request compilation context:
//! constructed once from a validated [`ConstraintMap`], never mutated
//! afterward. It hands out lazy, re-filterable [`QuerySpec`] handles per
//! entity target; nothing executes until a dataset materializes a spec.

#[cfg(test)]
mod tests;

use crate::{
    constraint::{ConstraintMap, Predicate, ValueConstraint, vocabulary},
    error::ConstraintError,
};
use std::marker::PhantomData;

///
/// QueryTarget
///
/// Marker trait for the entity a spec selects over.
///

pub trait QueryTarget {
    const NAME: &'static str;
}

macro_rules! target {
    ($ty:ident, $name:literal) => {
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        pub struct $ty;

        impl QueryTarget for $ty {
            const NAME: &'static str = $name;
        }
    };
}

target!(Activities, "activity");
target!(ActivityParameters, "activityparameter");
target!(Histograms, "activityparameterhistogram");
target!(Samples, "sample");
target!(MeasuredParameters, "measuredparameter");

///
/// QuerySpec
///
/// Lazy query handle over one target: a predicate and nothing else.
/// Re-filterable; combining is always AND.
///

#[derive(Clone, Debug, PartialEq)]
pub struct QuerySpec<T: QueryTarget> {
    predicate: Predicate,
    _marker: PhantomData<T>,
}

impl<T: QueryTarget> QuerySpec<T> {
    pub(crate) const fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// AND an additional predicate onto this spec.
    #[must_use]
    pub fn filter(self, extra: Predicate) -> Self {
        Self::new(Predicate::and_all(vec![self.predicate, extra]))
    }
}

///
/// SelfJoinPlan
///
/// Measurement-level query plus the ordered value constraints that require
/// self-joined copies of the measurement table. Constraint order is
/// preserved: alias numbering `p_1, mp_1, p_2, ...` follows it, so the
/// compiled text is deterministic and reproducible.
///

#[derive(Clone, Debug, PartialEq)]
pub struct SelfJoinPlan {
    pub base: QuerySpec<MeasuredParameters>,
    pub constraints: Vec<ValueConstraint>,
}

///
/// CompiledQuery
///
/// The uniform output contract for measurement-level queries: either a
/// plain declarative spec or a self-join plan. All three consumer paths
/// (table/CSV, map geometry, plotting) treat both identically through the
/// record layer.
///

#[derive(Clone, Debug, PartialEq)]
pub enum CompiledQuery {
    Declarative(QuerySpec<MeasuredParameters>),
    SelfJoin(SelfJoinPlan),
}

impl CompiledQuery {
    /// The measurement-level predicate common to both paths.
    #[must_use]
    pub const fn base_predicate(&self) -> &Predicate {
        match self {
            Self::Declarative(spec) => spec.predicate(),
            Self::SelfJoin(plan) => plan.base.predicate(),
        }
    }

    /// Value constraints, empty on the declarative path.
    #[must_use]
    pub fn value_constraints(&self) -> &[ValueConstraint] {
        match self {
            Self::Declarative(_) => &[],
            Self::SelfJoin(plan) => &plan.constraints,
        }
    }
}

///
/// QueryContext
///
/// Immutable compilation context for one request. Construction validates
/// every value-constraint literal, so all later compilation and rendering
/// is infallible with respect to client input.
///

#[derive(Clone, Debug, PartialEq)]
pub struct QueryContext {
    constraints: ConstraintMap,
}

impl QueryContext {
    pub fn new(constraints: ConstraintMap) -> Result<Self, ConstraintError> {
        constraints.validate()?;

        Ok(Self { constraints })
    }

    #[must_use]
    pub const fn constraints(&self) -> &ConstraintMap {
        &self.constraints
    }

    /// Activities matching all non-value predicates.
    #[must_use]
    pub fn activities(&self) -> QuerySpec<Activities> {
        QuerySpec::new(vocabulary::activities(&self.constraints))
    }

    /// Precomputed per-(Activity, Parameter) summary rows under the same
    /// predicates, projected through the Activity relation.
    #[must_use]
    pub fn activity_parameters(&self) -> QuerySpec<ActivityParameters> {
        QuerySpec::new(vocabulary::activity_parameters(&self.constraints))
    }

    /// Histogram bins under the activity-parameter predicates.
    #[must_use]
    pub fn histograms(&self) -> QuerySpec<Histograms> {
        QuerySpec::new(vocabulary::activity_parameters(&self.constraints))
    }

    /// Samples under the time/depth/platform predicates only.
    #[must_use]
    pub fn samples(&self) -> QuerySpec<Samples> {
        QuerySpec::new(vocabulary::samples(&self.constraints))
    }

    /// Measurement-level rows under the non-value predicates.
    #[must_use]
    pub fn measured_parameters(&self) -> QuerySpec<MeasuredParameters> {
        QuerySpec::new(vocabulary::measured_parameters(&self.constraints))
    }

    /// Compile the measurement-level query.
    ///
    /// With zero value constraints this is the plain declarative spec and
    /// the self-join compiler is bypassed entirely.
    #[must_use]
    pub fn compile_measured(&self) -> CompiledQuery {
        let base = self.measured_parameters();

        if self.constraints.has_value_constraints() {
            CompiledQuery::SelfJoin(SelfJoinPlan {
                base,
                constraints: self.constraints.parameter_values.clone(),
            })
        } else {
            CompiledQuery::Declarative(base)
        }
    }
}
