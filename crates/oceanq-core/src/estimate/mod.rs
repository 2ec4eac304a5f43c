//! Two-tier cardinality estimation.
//!
//! Approximate counts come from the precomputed ActivityParameter summary
//! rows and cost one pass over matching activities; exact counts
//! materialize the compiled measurement-level query. The caller picks the
//! tier through the `get_actual_count` toggle and nothing else — the two
//! tiers can disagree when stats are stale, and that disagreement is
//! surfaced as a warning, never reconciled silently.

use crate::{dataset::Dataset, query::QueryContext};
use serde::Serialize;
use tracing::warn;

///
/// CountStrategy
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum CountStrategy {
    Approximate,
    Exact,
}

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Cardinality {
    pub value: u64,
    pub strategy: CountStrategy,
}

impl Cardinality {
    /// Thousands-grouped display form for the UI count badge.
    #[must_use]
    pub fn localized(&self) -> String {
        let digits = self.value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }

        out
    }
}

/// Count the rows the measurement-level query would return.
///
/// Approximate is the default: the sum of precomputed row counts over
/// every (Activity, Parameter) pair matching the non-value predicates,
/// without touching MeasuredParameter. A zero here usually means the
/// filter matches nothing, but can also mean stale stats, so it is logged
/// and returned as-is.
#[must_use]
pub fn count(dataset: &Dataset, ctx: &QueryContext) -> Cardinality {
    if ctx.constraints().get_actual_count {
        return Cardinality {
            value: dataset.measured_count(&ctx.compile_measured()),
            strategy: CountStrategy::Exact,
        };
    }

    let value = dataset
        .activity_parameters(&ctx.activity_parameters())
        .iter()
        .map(|ap| ap.number)
        .sum();

    if value == 0 {
        warn!("approximate count is zero; no matching activities or stale summary stats");
    }

    Cardinality {
        value,
        strategy: CountStrategy::Approximate,
    }
}
