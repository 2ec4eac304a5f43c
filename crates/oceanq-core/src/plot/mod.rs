//! Section-plot preparation.
//!
//! Turns the normalized rows of a single-parameter, single-platform
//! selection into the raw x/y/z arrays and grid axes a contour renderer
//! consumes. No imagery is produced here; the renderer owns rasterization
//! and writes to the per-session file names computed below, which is the
//! only cross-request naming discipline concurrent sessions need.

use crate::{dataset::Dataset, query::QueryContext, record::RecordSet};
use serde::Serialize;
use thiserror::Error as ThisError;

/// Upper bound on time-axis grid points.
pub const TGRID_MAX: usize = 1000;

/// Upper bound on depth-axis grid points.
pub const DGRID_MAX: usize = 100;

/// Preferred depth-axis grid step, in meters. Widened when the depth
/// window would otherwise exceed [`DGRID_MAX`] points.
pub const DINC: f64 = 0.5;

///
/// SectionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SectionError {
    #[error("section plots require exactly one parameter and one platform")]
    Underconstrained,

    #[error("section plots require closed time and depth windows")]
    OpenWindow,

    #[error("no rows match the section constraints")]
    NoData,
}

///
/// SectionData
///
/// Scatter input for gridding: epoch seconds, depth in meters, and the
/// measured value, index-aligned.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SectionData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

///
/// SectionGrid
///
/// Regular axes to interpolate the scatter onto, plus the aspect scale
/// that keeps time and depth distances comparable during interpolation.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SectionGrid {
    pub xi: Vec<f64>,
    pub yi: Vec<f64>,
    pub scale_factor: f64,
}

///
/// SectionPlot
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SectionPlot {
    pub parameter_name: String,
    pub platform_name: String,
    pub data: SectionData,
    pub grid: SectionGrid,
}

impl SectionPlot {
    /// File name for the rendered section image, scoped by session so
    /// concurrent users never collide.
    #[must_use]
    pub fn image_file_name(&self, session: &str) -> String {
        format!("{}_{}_{session}.png", self.parameter_name, self.platform_name)
    }

    /// File name for the matching colorbar image.
    #[must_use]
    pub fn colorbar_file_name(&self, session: &str) -> String {
        format!(
            "{}_{}_colorbar_{session}.png",
            self.parameter_name, self.platform_name
        )
    }
}

/// Assemble section-plot input for the current constraints.
///
/// Demands a fully-pinned selection: exactly one parameter name, exactly
/// one platform, and closed time and depth windows, since the grid axes
/// come from the windows rather than the data.
pub fn section(dataset: &Dataset, ctx: &QueryContext) -> Result<SectionPlot, SectionError> {
    let constraints = ctx.constraints();
    let ([parameter_name], [platform_name]) =
        (&constraints.parameter_name[..], &constraints.platforms[..])
    else {
        return Err(SectionError::Underconstrained);
    };
    let ((Some(tlo), Some(thi)), (Some(dlo), Some(dhi))) = (constraints.time, constraints.depth)
    else {
        return Err(SectionError::OpenWindow);
    };

    let set = RecordSet::new(dataset, ctx.compile_measured());
    let mut data = SectionData {
        x: Vec::new(),
        y: Vec::new(),
        z: Vec::new(),
    };
    for record in set.iter() {
        data.x.push(record.timevalue.timestamp() as f64);
        data.y.push(record.depth);
        data.z.push(record.datavalue);
    }
    if data.x.is_empty() {
        return Err(SectionError::NoData);
    }

    let tspan = (thi - tlo).num_seconds() as f64;
    let dspan = dhi - dlo;
    let grid = SectionGrid {
        xi: linspace(tlo.timestamp() as f64, thi.timestamp() as f64, TGRID_MAX),
        yi: depth_axis(dlo, dhi),
        scale_factor: if dspan > 0.0 { tspan / dspan / 3.0 } else { 0.0 },
    };

    Ok(SectionPlot {
        parameter_name: parameter_name.clone(),
        platform_name: platform_name.clone(),
        data,
        grid,
    })
}

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let step = (hi - lo) / (n - 1) as f64;

    (0..n).map(|i| lo + step * i as f64).collect()
}

// DINC-stepped axis, widened to stay under DGRID_MAX points.
fn depth_axis(lo: f64, hi: f64) -> Vec<f64> {
    let span = hi - lo;
    let inc = DINC.max(span / DGRID_MAX as f64);
    let n = (span / inc).floor() as usize + 1;

    (0..n).map(|i| lo + inc * i as f64).collect()
}
