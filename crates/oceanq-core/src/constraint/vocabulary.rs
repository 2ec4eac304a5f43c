//! Per-entity field vocabularies.
//!
//! Each query target understands a fixed set of field paths, and each
//! constraint key maps onto different paths per target: `time` is an
//! interval-overlap against an Activity's own start/end, but a point
//! comparison against a Measurement's timestamp. These builders are the
//! single source of that mapping for both in-memory evaluation and SQL
//! lowering.

use crate::constraint::{ConstraintMap, DepthWindow, Predicate, TimeWindow};

///
/// Field paths
///

// Shared by interval-filtered targets (Activity rows, directly or through
// a relation prefix).
pub(crate) const STARTDATE: &str = "startdate";
pub(crate) const ENDDATE: &str = "enddate";
pub(crate) const MINDEPTH: &str = "mindepth";
pub(crate) const MAXDEPTH: &str = "maxdepth";
pub(crate) const PLATFORM_NAME: &str = "platform.name";
pub(crate) const PARAMETER_NAME: &str = "parameter.name";
pub(crate) const PARAMETER_STANDARD_NAME: &str = "parameter.standard_name";

// Point-filtered targets (Measurement and Sample rows).
pub(crate) const TIMEVALUE: &str = "timevalue";
pub(crate) const DEPTH: &str = "depth";

/// Predicate over Activity rows. Time and depth use interval overlap:
/// activities are intervals, so any overlap matches, not containment.
pub(crate) fn activities(c: &ConstraintMap) -> Predicate {
    Predicate::and_all(vec![
        name_set(PARAMETER_NAME, &c.parameter_name),
        name_set(PARAMETER_STANDARD_NAME, &c.parameter_standard_name),
        name_set(PLATFORM_NAME, &c.platforms),
        time_overlap(STARTDATE, ENDDATE, c.time),
        depth_overlap(MINDEPTH, MAXDEPTH, c.depth),
    ])
}

/// Predicate over ActivityParameter (and histogram) rows: the same
/// constraints projected through the owning Activity.
pub(crate) fn activity_parameters(c: &ConstraintMap) -> Predicate {
    Predicate::and_all(vec![
        name_set(PARAMETER_NAME, &c.parameter_name),
        name_set(PARAMETER_STANDARD_NAME, &c.parameter_standard_name),
        name_set(PLATFORM_NAME, &c.platforms),
        time_overlap(STARTDATE, ENDDATE, c.time),
        depth_overlap(MINDEPTH, MAXDEPTH, c.depth),
    ])
}

/// Predicate over Sample rows. Samples are not typed by Parameter, so only
/// the time/depth/platform vocabulary applies, with point semantics.
pub(crate) fn samples(c: &ConstraintMap) -> Predicate {
    Predicate::and_all(vec![
        name_set(PLATFORM_NAME, &c.platforms),
        time_point(c.time),
        depth_point(c.depth),
    ])
}

/// Predicate over MeasuredParameter rows, point semantics for time/depth.
/// Value-range constraints are deliberately absent here; they cannot be
/// expressed as a single-table predicate and are compiled separately.
pub(crate) fn measured_parameters(c: &ConstraintMap) -> Predicate {
    Predicate::and_all(vec![
        name_set(PARAMETER_NAME, &c.parameter_name),
        name_set(PARAMETER_STANDARD_NAME, &c.parameter_standard_name),
        name_set(PLATFORM_NAME, &c.platforms),
        time_point(c.time),
        depth_point(c.depth),
    ])
}

fn name_set(field: &'static str, names: &[String]) -> Predicate {
    if names.is_empty() {
        Predicate::True
    } else {
        Predicate::in_(field, names.to_vec())
    }
}

fn time_overlap(start_field: &'static str, end_field: &'static str, window: TimeWindow) -> Predicate {
    let (lo, hi) = window;
    Predicate::and_all(vec![
        lo.map_or(Predicate::True, |lo| Predicate::gte(end_field, lo)),
        hi.map_or(Predicate::True, |hi| Predicate::lte(start_field, hi)),
    ])
}

fn depth_overlap(min_field: &'static str, max_field: &'static str, window: DepthWindow) -> Predicate {
    let (lo, hi) = window;
    Predicate::and_all(vec![
        lo.map_or(Predicate::True, |lo| Predicate::gte(max_field, lo)),
        hi.map_or(Predicate::True, |hi| Predicate::lte(min_field, hi)),
    ])
}

fn time_point(window: TimeWindow) -> Predicate {
    let (lo, hi) = window;
    Predicate::and_all(vec![
        lo.map_or(Predicate::True, |lo| Predicate::gte(TIMEVALUE, lo)),
        hi.map_or(Predicate::True, |hi| Predicate::lte(TIMEVALUE, hi)),
    ])
}

fn depth_point(window: DepthWindow) -> Predicate {
    let (lo, hi) = window;
    Predicate::and_all(vec![
        lo.map_or(Predicate::True, |lo| Predicate::gte(DEPTH, lo)),
        hi.map_or(Predicate::True, |hi| Predicate::lte(DEPTH, hi)),
    ])
}
