//! Per-request query session.
//!
//! One session per UI request: the constraints arrive, compile once into
//! an immutable [`QueryContext`], and every consumer surface (table/CSV,
//! map layers, summary panels, section plots) reads through the same
//! handle. Sessions share the dataset read-only, so any number can run
//! concurrently; the session id only scopes generated image file names.

use oceanq_core::{
    constraint::ConstraintMap,
    dataset::Dataset,
    error::{ConstraintError, SqlError},
    estimate::{self, Cardinality},
    plot::{SectionError, SectionPlot, section},
    query::QueryContext,
    record::RecordSet,
    sql::{self, SelectList},
    summary::{
        self, DepthExtent, HistogramSeries, ParameterRange, ParameterSummary, PlatformSummary,
        SamplePoint, TimeExtent,
    },
};

///
/// QuerySession
///

#[derive(Debug)]
pub struct QuerySession<'a> {
    dataset: &'a Dataset,
    dbname: String,
    session_id: String,
    ctx: QueryContext,
}

impl<'a> QuerySession<'a> {
    /// Compile one request's constraints against a dataset.
    ///
    /// Fails only on invalid value-constraint literals; everything past
    /// construction is infallible with respect to client input.
    pub fn new(
        dataset: &'a Dataset,
        dbname: impl Into<String>,
        session_id: impl Into<String>,
        constraints: ConstraintMap,
    ) -> Result<Self, ConstraintError> {
        Ok(Self {
            dataset,
            dbname: dbname.into(),
            session_id: session_id.into(),
            ctx: QueryContext::new(constraints)?,
        })
    }

    #[must_use]
    pub const fn context(&self) -> &QueryContext {
        &self.ctx
    }

    //
    // rows and counts
    //

    /// Normalized measurement rows for the table/CSV surface.
    #[must_use]
    pub fn records(&self) -> RecordSet<'a> {
        RecordSet::new(self.dataset, self.ctx.compile_measured())
    }

    /// Row cardinality under the session's count-strategy toggle.
    #[must_use]
    pub fn count(&self) -> Cardinality {
        estimate::count(self.dataset, &self.ctx)
    }

    //
    // compiled SQL surfaces
    //

    /// The literal SQL for the full row shape, for display and for the
    /// store to execute.
    pub fn sql(&self) -> Result<String, SqlError> {
        sql::sql_text(&self.ctx.compile_measured(), SelectList::Rest, &self.dbname)
    }

    /// The literal SQL projecting only the x/y/z plotting columns.
    pub fn plot_sql(&self) -> Result<String, SqlError> {
        sql::sql_text(&self.ctx.compile_measured(), SelectList::Plot, &self.dbname)
    }

    /// Mapserver layer definition selecting matching activity tracks.
    pub fn activity_geo_query(&self) -> Result<String, SqlError> {
        sql::activity_geo_query(&self.ctx)
    }

    /// Mapserver layer definition selecting matching sample positions.
    pub fn sample_geo_query(&self) -> Result<String, SqlError> {
        sql::sample_geo_query(&self.ctx)
    }

    //
    // summary panels
    //

    #[must_use]
    pub fn platforms(&self) -> Vec<PlatformSummary> {
        summary::platforms(self.dataset, &self.ctx)
    }

    #[must_use]
    pub fn parameters(&self) -> Vec<ParameterSummary> {
        summary::parameters(self.dataset, &self.ctx)
    }

    #[must_use]
    pub fn time_extent(&self) -> Option<TimeExtent> {
        summary::time_extent(self.dataset, &self.ctx)
    }

    #[must_use]
    pub fn depth_extent(&self) -> Option<DepthExtent> {
        summary::depth_extent(self.dataset, &self.ctx)
    }

    #[must_use]
    pub fn parameter_range(&self) -> Option<ParameterRange> {
        summary::parameter_range(self.dataset, &self.ctx)
    }

    #[must_use]
    pub fn histograms(&self) -> Vec<HistogramSeries> {
        summary::histograms(self.dataset, &self.ctx)
    }

    #[must_use]
    pub fn sample_points(&self) -> Vec<SamplePoint> {
        summary::sample_points(self.dataset, &self.ctx)
    }

    #[must_use]
    pub fn geo_extent(&self) -> Option<String> {
        summary::geo_extent(self.dataset, &self.ctx)
    }

    //
    // plotting
    //

    /// Section-plot input for a fully-pinned selection.
    pub fn section(&self) -> Result<SectionPlot, SectionError> {
        section(self.dataset, &self.ctx)
    }

    /// Session-scoped (image, colorbar) file names for the rendered
    /// section.
    pub fn section_file_names(&self) -> Result<(String, String), SectionError> {
        let plot = self.section()?;

        Ok((
            plot.image_file_name(&self.session_id),
            plot.colorbar_file_name(&self.session_id),
        ))
    }
}
