use thiserror::Error as ThisError;

///
/// ConstraintError
///
/// Client-input validation failures, raised synchronously before any SQL
/// text is assembled or any query executes. Invalid literals are rejected,
/// never sanitized.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConstraintError {
    /// A value-constraint parameter name contains a quote or semicolon.
    /// These arrive as structured data, never as free SQL.
    #[error("invalid parameter-value constraint literal: {literal:?}")]
    InvalidLiteral { literal: String },

    /// A value-constraint bound is NaN or infinite and has no SQL
    /// numeric-text form.
    #[error("non-finite bound for parameter-value constraint on '{parameter}'")]
    NonFiniteBound { parameter: String },
}

///
/// SqlError
///
/// Failures lowering a compiled query to SQL text. These indicate a
/// predicate shape the lowering pass does not accept; constraint-derived
/// predicates never produce them.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SqlError {
    #[error("predicate shape not expressible in SQL lowering: {detail}")]
    UnsupportedPredicate { detail: String },

    #[error("no column mapping for field path '{field}'")]
    UnknownField { field: String },
}

///
/// Error
///
/// Top-level error surface for the compiler. Execution of rendered SQL is
/// an external responsibility; failures there are the executing caller's
/// to surface, alongside the compiled text obtained from this crate.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Sql(#[from] SqlError),
}
