//! Result normalization.
//!
//! Every measurement-level consumer (table, CSV, map, plots) reads rows
//! through [`RecordSet`], so the declarative and self-join paths are
//! indistinguishable past compilation. Geometry is normalized to WKT text
//! here, mirroring the `ST_AsText` projection in the generated SQL.


use crate::{
    ITER_HARD_LIMIT,
    dataset::Dataset,
    model::{MeasuredParameter, MeasuredParameterId},
    query::CompiledQuery,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

///
/// MeasuredRecord
///
/// One fully-denormalized measurement row, field order matching the
/// generated SQL's select list.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeasuredRecord {
    pub id: MeasuredParameterId,
    pub parameter_name: String,
    pub parameter_standard_name: Option<String>,
    pub depth: f64,
    /// `POINT (lon lat)` WKT text.
    pub geom: String,
    pub timevalue: DateTime<Utc>,
    pub platform_name: String,
    pub datavalue: f64,
    pub units: Option<String>,
}

///
/// RecordSet
///
/// Restartable view over one compiled query's rows. Holds the query, not
/// results: every `iter` call re-runs the query, so a set can be walked
/// once for a count estimate check and again for materialization.
///

pub struct RecordSet<'a> {
    dataset: &'a Dataset,
    query: CompiledQuery,
}

impl<'a> RecordSet<'a> {
    #[must_use]
    pub const fn new(dataset: &'a Dataset, query: CompiledQuery) -> Self {
        Self { dataset, query }
    }

    #[must_use]
    pub const fn query(&self) -> &CompiledQuery {
        &self.query
    }

    /// Normalized rows, capped at [`ITER_HARD_LIMIT`].
    pub fn iter(&self) -> impl Iterator<Item = MeasuredRecord> + '_ {
        self.dataset
            .measured(&self.query)
            .filter_map(|mp| denormalize(self.dataset, mp))
            .take(ITER_HARD_LIMIT)
    }

    /// Exact matching-row count. Never capped; counting does not
    /// materialize records.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.dataset.measured_count(&self.query)
    }
}

// Relation chasing is infallible on a built dataset; a row whose chain
// breaks anyway is dropped rather than invented.
fn denormalize(dataset: &Dataset, mp: &MeasuredParameter) -> Option<MeasuredRecord> {
    let parameter = dataset.parameter_row(mp.parameter_id)?;
    let measurement = dataset.measurement_row(mp.measurement_id)?;
    let point = dataset.instantpoint_row(measurement.instantpoint_id)?;
    let activity = dataset.activity_row(point.activity_id)?;
    let platform = dataset.platform_of(activity)?;

    Some(MeasuredRecord {
        id: mp.id,
        parameter_name: parameter.name.clone(),
        parameter_standard_name: parameter.standard_name.clone(),
        depth: measurement.depth,
        geom: measurement.geom.to_string(),
        timevalue: point.timevalue,
        platform_name: platform.name.clone(),
        datavalue: mp.datavalue,
        units: parameter.units.clone(),
    })
}
