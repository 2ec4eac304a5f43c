//! Core runtime for oceanq: the constraint-to-query compiler behind the
//! interactive measurement-query UI.
//!
//! A caller supplies a [`constraint::ConstraintMap`] describing UI-level
//! selections (parameter names, platforms, time/depth windows, and
//! per-parameter value ranges). The [`query::QueryContext`] compiles that
//! map into lazy per-entity query specs and, when value-range constraints
//! are present, a self-join plan that lowers to literal SQL through the
//! [`sql`] module. Cardinality lives in [`estimate`]; all row output is
//! normalized through [`record`].
//!
//! The compiler never writes: every entity in [`model`] is produced by an
//! external ingestion pipeline and read through a [`dataset::Dataset`].

pub mod constraint;
pub mod dataset;
pub mod error;
pub mod estimate;
pub mod model;
pub mod plot;
pub mod query;
pub mod record;
pub mod sql;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Hard cap on any single row materialization.
///
/// Bounds memory and response latency for every consumer; callers needing
/// more rows must narrow their time/depth constraints and page.
pub const ITER_HARD_LIMIT: usize = 10_000;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, renderers, or dataset internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        constraint::{ConstraintMap, ConstraintValue, DepthWindow, TimeWindow, ValueConstraint},
        dataset::Dataset,
        model::{
            Activity, ActivityParameter, ActivityParameterHistogram, GeoPoint, InstantPoint,
            Measurement, MeasuredParameter, Parameter, Platform, Sample,
        },
        query::QueryContext,
        record::MeasuredRecord,
    };
}
