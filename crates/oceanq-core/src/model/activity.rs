use crate::model::PlatformId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ActivityId = i64;

///
/// Activity
///
/// One continuous deployment or survey by one Platform.
///
/// Invariants (enforced when a dataset is built):
/// - `startdate <= enddate`
/// - `mindepth <= maxdepth`
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub platform_id: PlatformId,
    pub startdate: DateTime<Utc>,
    pub enddate: DateTime<Utc>,
    pub mindepth: f64,
    pub maxdepth: f64,
    /// Owning campaign name, when the loader recorded one.
    pub campaign: Option<String>,
}

impl Activity {
    /// True when this activity's time interval intersects `[lo, hi]`.
    /// Activities are intervals, not points: any overlap matches.
    #[must_use]
    pub fn overlaps_time(&self, lo: Option<DateTime<Utc>>, hi: Option<DateTime<Utc>>) -> bool {
        lo.is_none_or(|lo| self.enddate >= lo) && hi.is_none_or(|hi| self.startdate <= hi)
    }

    /// True when this activity's depth interval intersects `[lo, hi]`.
    #[must_use]
    pub fn overlaps_depth(&self, lo: Option<f64>, hi: Option<f64>) -> bool {
        lo.is_none_or(|lo| self.maxdepth >= lo) && hi.is_none_or(|hi| self.mindepth <= hi)
    }
}
