//! UI-level constraints and their translation into predicates.
//!
//! A [`ConstraintMap`] is one request's worth of selections. Each
//! recognized key translates into a composable predicate over the
//! appropriate entity; absent or empty inputs are no-ops that match
//! everything, and unrecognized keys are ignored for forward
//! compatibility.

mod predicate;
pub(crate) mod vocabulary;


pub use predicate::{CompareOp, ComparePredicate, Predicate, Value};

use crate::error::ConstraintError;
use chrono::{DateTime, Utc};

/// Requested time window: `(start | null, end | null)`, null = unbounded.
pub type TimeWindow = (Option<DateTime<Utc>>, Option<DateTime<Utc>>);

/// Requested depth window: `(min | null, max | null)`, null = unbounded.
pub type DepthWindow = (Option<f64>, Option<f64>);

///
/// ValueConstraint
///
/// "Parameter `parameter_name`'s value is strictly between `lo` and `hi`"
/// — at the same Measurement as every other value constraint in the list.
/// Bounds are exclusive by construction, matching the UI's "value strictly
/// between" semantics.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ValueConstraint {
    pub parameter_name: String,
    pub lo: f64,
    pub hi: f64,
}

impl ValueConstraint {
    #[must_use]
    pub fn new(parameter_name: impl Into<String>, lo: f64, hi: f64) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            lo,
            hi,
        }
    }

    /// Reject literals that cannot be substituted into SQL text.
    ///
    /// This is the sole injection defense: names must carry no quote or
    /// semicolon, bounds must have a plain numeric-text form. Checked
    /// before any SQL assembly; invalid input is rejected, never
    /// sanitized.
    pub fn validate(&self) -> Result<(), ConstraintError> {
        if self.parameter_name.contains('\'') || self.parameter_name.contains(';') {
            return Err(ConstraintError::InvalidLiteral {
                literal: self.parameter_name.clone(),
            });
        }
        if !self.lo.is_finite() || !self.hi.is_finite() {
            return Err(ConstraintError::NonFiniteBound {
                parameter: self.parameter_name.clone(),
            });
        }

        Ok(())
    }
}

///
/// ConstraintValue
///
/// The shape of one constraint entry as it arrives from the request layer.
///

#[derive(Clone, Debug, PartialEq)]
pub enum ConstraintValue {
    Names(Vec<String>),
    Time(TimeWindow),
    Depth(DepthWindow),
    /// Ordered list, never a map: alias numbering in compiled SQL follows
    /// input order and must be reproducible.
    ValueRanges(Vec<ValueConstraint>),
    Flag(bool),
}

///
/// ConstraintMap
///
/// One request's constraints. Every field is optional; `Default` matches
/// the whole store.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstraintMap {
    pub parameter_name: Vec<String>,
    pub parameter_standard_name: Vec<String>,
    pub platforms: Vec<String>,
    pub time: TimeWindow,
    pub depth: DepthWindow,
    pub parameter_values: Vec<ValueConstraint>,
    pub get_actual_count: bool,
}

impl ConstraintMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one keyed constraint. Unknown keys are ignored, as are
    /// mismatched shapes for known keys; the request layer is free to send
    /// newer keys this version does not understand.
    pub fn apply(&mut self, key: &str, value: ConstraintValue) {
        match (key, value) {
            ("parameter_name", ConstraintValue::Names(names)) => self.parameter_name = names,
            ("parameter_standard_name", ConstraintValue::Names(names)) => {
                self.parameter_standard_name = names;
            }
            ("platforms", ConstraintValue::Names(names)) => self.platforms = names,
            ("time", ConstraintValue::Time(window)) => self.time = window,
            ("depth", ConstraintValue::Depth(window)) => self.depth = window,
            ("parametervalues", ConstraintValue::ValueRanges(ranges)) => {
                self.parameter_values = ranges;
            }
            ("get_actual_count", ConstraintValue::Flag(flag)) => self.get_actual_count = flag,
            _ => {}
        }
    }

    /// True when at least one parameter-value range constraint is present.
    #[must_use]
    pub fn has_value_constraints(&self) -> bool {
        !self.parameter_values.is_empty()
    }

    /// Validate every value constraint's literals before compilation.
    pub fn validate(&self) -> Result<(), ConstraintError> {
        for vc in &self.parameter_values {
            vc.validate()?;
        }

        Ok(())
    }
}
