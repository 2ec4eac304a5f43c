//! SQL compilation: structured AST construction and text rendering.
//!
//! The self-join compiler lives in [`lower`]: when value-range constraints
//! are present it builds the join graph that binds N aliased copies of the
//! measurement table to the base query by shared measurement identity.
//! Rendering is the last step and the only place text exists.

pub mod ast;
mod geo;
mod lower;
mod render;


pub use geo::{activity_geo_query, sample_geo_query};
pub use lower::{SelectList, lower};
pub use render::{render, render_compact, render_with_directive};

use crate::{error::SqlError, query::CompiledQuery};
use tracing::debug;

/// Compile a measurement-level query to executable SQL text under the
/// given select list, prefixed with the database-selection directive.
///
/// Execution is the caller's responsibility; a store failure there should
/// be reported alongside this text, which is safe to display (all literals
/// were validated or quoted before rendering).
pub fn sql_text(
    compiled: &CompiledQuery,
    select: SelectList,
    dbname: &str,
) -> Result<String, SqlError> {
    let statement = lower(compiled, select)?;
    let text = render_with_directive(&statement, dbname);
    debug!(%dbname, chars = text.len(), "compiled measurement query to SQL");

    Ok(text)
}
