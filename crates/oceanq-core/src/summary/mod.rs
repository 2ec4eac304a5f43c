//! Derived summaries for the query UI.
//!
//! Everything here is computed from the same per-entity query specs the
//! compiler hands out, so summaries always agree with the row results for
//! the same constraints: the selectors feed the UI's option lists, the
//! extents drive axis ranges, and the histogram series back the bar
//! charts next to each parameter.


use crate::{dataset::Dataset, query::QueryContext};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// PlatformSummary
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlatformSummary {
    pub name: String,
    pub color: String,
}

///
/// ParameterSummary
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ParameterSummary {
    pub name: String,
    pub standard_name: Option<String>,
}

///
/// TimeExtent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TimeExtent {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

///
/// DepthExtent
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DepthExtent {
    pub min: f64,
    pub max: f64,
}

///
/// ParameterRange
///
/// Percentile-derived plotting range for a single selected parameter,
/// averaged over the matching per-activity summary rows.
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ParameterRange {
    pub lo: f64,
    pub hi: f64,
}

///
/// HistogramSeries
///
/// Precomputed bins for one (parameter, platform, activity) triple.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramSeries {
    pub parameter_name: String,
    pub platform_name: String,
    pub activity_name: String,
    pub binwidth: f64,
    pub bins: Vec<HistogramBin>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: u64,
}

///
/// SamplePoint
///
/// One sample positioned on the depth-time plot, labeled by the owning
/// activity's leading name token plus the sample name.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SamplePoint {
    pub label: String,
    pub timevalue: DateTime<Utc>,
    pub depth: f64,
}

/// Distinct platforms among matching activities, sorted by name.
#[must_use]
pub fn platforms(dataset: &Dataset, ctx: &QueryContext) -> Vec<PlatformSummary> {
    let mut out = BTreeMap::new();

    for activity in dataset.activities(&ctx.activities()) {
        if let Some(platform) = dataset.platform_of(activity) {
            out.entry(platform.name.clone()).or_insert_with(|| PlatformSummary {
                name: platform.name.clone(),
                color: platform.color.clone(),
            });
        }
    }

    out.into_values().collect()
}

/// Distinct parameters among matching summary rows, sorted by name.
#[must_use]
pub fn parameters(dataset: &Dataset, ctx: &QueryContext) -> Vec<ParameterSummary> {
    let mut out = BTreeMap::new();

    for ap in dataset.activity_parameters(&ctx.activity_parameters()) {
        if let Some(parameter) = dataset.parameter_row(ap.parameter_id) {
            out.entry(parameter.name.clone()).or_insert_with(|| ParameterSummary {
                name: parameter.name.clone(),
                standard_name: parameter.standard_name.clone(),
            });
        }
    }

    out.into_values().collect()
}

/// Overall time coverage of the matching activities, `None` when nothing
/// matches.
#[must_use]
pub fn time_extent(dataset: &Dataset, ctx: &QueryContext) -> Option<TimeExtent> {
    let activities = dataset.activities(&ctx.activities());
    let start = activities.iter().map(|a| a.startdate).min()?;
    let end = activities.iter().map(|a| a.enddate).max()?;

    Some(TimeExtent { start, end })
}

/// Overall depth coverage of the matching activities.
#[must_use]
pub fn depth_extent(dataset: &Dataset, ctx: &QueryContext) -> Option<DepthExtent> {
    let activities = dataset.activities(&ctx.activities());
    let min = activities
        .iter()
        .map(|a| a.mindepth)
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.min(d))))?;
    let max = activities
        .iter()
        .map(|a| a.maxdepth)
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.max(d))))?;

    Some(DepthExtent { min, max })
}

/// Plotting range for the selection, defined only when the matching
/// summary rows cover exactly one distinct parameter: the 2.5/97.5
/// percentile bounds averaged over those rows.
#[must_use]
pub fn parameter_range(dataset: &Dataset, ctx: &QueryContext) -> Option<ParameterRange> {
    let aps = dataset.activity_parameters(&ctx.activity_parameters());
    let first = aps.first()?.parameter_id;
    if aps.iter().any(|ap| ap.parameter_id != first) {
        return None;
    }

    let n = aps.len() as f64;
    let lo = aps.iter().map(|ap| ap.p025).sum::<f64>() / n;
    let hi = aps.iter().map(|ap| ap.p975).sum::<f64>() / n;

    Some(ParameterRange { lo, hi })
}

/// Histogram series for every matching (parameter, platform, activity)
/// triple, in (parameter, platform, activity) name order. Series with no
/// precomputed bins are omitted.
#[must_use]
pub fn histograms(dataset: &Dataset, ctx: &QueryContext) -> Vec<HistogramSeries> {
    let mut out = Vec::new();

    for ap in dataset.activity_parameters(&ctx.activity_parameters()) {
        let bins: Vec<HistogramBin> = dataset
            .histogram_rows(ap.id)
            .map(|h| HistogramBin {
                lo: h.binlo,
                hi: h.binhi,
                count: h.bincount,
            })
            .collect();
        if bins.is_empty() {
            continue;
        }

        let (Some(parameter), Some(activity)) = (
            dataset.parameter_row(ap.parameter_id),
            dataset.activity_row(ap.activity_id),
        ) else {
            continue;
        };
        let Some(platform) = dataset.platform_of(activity) else {
            continue;
        };

        out.push(HistogramSeries {
            parameter_name: parameter.name.clone(),
            platform_name: platform.name.clone(),
            activity_name: activity.name.clone(),
            binwidth: bins[0].hi - bins[0].lo,
            bins,
        });
    }

    out.sort_by(|a, b| {
        (&a.parameter_name, &a.platform_name, &a.activity_name)
            .cmp(&(&b.parameter_name, &b.platform_name, &b.activity_name))
    });

    out
}

/// Matching samples positioned for the depth-time plot.
#[must_use]
pub fn sample_points(dataset: &Dataset, ctx: &QueryContext) -> Vec<SamplePoint> {
    let mut out = Vec::new();

    for sample in dataset.samples(&ctx.samples()) {
        let Some(point) = dataset.instantpoint_row(sample.instantpoint_id) else {
            continue;
        };
        let label = dataset
            .activity_row(point.activity_id)
            .map(|a| a.name.split(' ').next().unwrap_or(&a.name).to_string())
            .map_or_else(|| sample.name.clone(), |stem| format!("{stem} {}", sample.name));

        out.push(SamplePoint {
            label,
            timevalue: point.timevalue,
            depth: sample.depth,
        });
    }

    out
}

/// Bounding box of the matching measurement positions as WKT, the corner
/// form the map layer zooms to. `None` when no rows match.
#[must_use]
pub fn geo_extent(dataset: &Dataset, ctx: &QueryContext) -> Option<String> {
    let compiled = ctx.compile_measured();
    let mut bounds: Option<(f64, f64, f64, f64)> = None;

    for mp in dataset.measured(&compiled) {
        let Some(m) = dataset.measurement_row(mp.measurement_id) else {
            continue;
        };
        let (lon, lat) = (m.geom.lon, m.geom.lat);
        bounds = Some(bounds.map_or((lon, lat, lon, lat), |(lo_x, lo_y, hi_x, hi_y)| {
            (lo_x.min(lon), lo_y.min(lat), hi_x.max(lon), hi_y.max(lat))
        }));
    }

    bounds.map(|(lo_x, lo_y, hi_x, hi_y)| {
        format!("LINESTRING ({lo_x} {lo_y}, {hi_x} {hi_y})")
    })
}
