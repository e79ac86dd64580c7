//! Per-site aggregation of classified candidates.

use std::cmp::Ordering;

use washscout_core::{SiteSummary, SummarySlot};

use crate::cascade::CandidateEvaluation;

/// Counts the competitors among `evaluations` and fills `slots` slots with
/// the nearest ones. Unknown distances sort last; ties keep input order.
#[must_use]
pub fn summarize(address: &str, evaluations: &[CandidateEvaluation], slots: usize) -> SiteSummary {
    let mut competitors: Vec<SummarySlot> = evaluations
        .iter()
        .filter(|e| e.is_competitor())
        .map(|e| SummarySlot {
            distance_miles: e.place.distance_miles,
            rating: e.place.rating,
            rating_count: e.place.rating_count,
        })
        .collect();
    competitors.sort_by(|a, b| nearest_first(a.distance_miles, b.distance_miles));

    let count = competitors.len();
    let mut filled: Vec<Option<SummarySlot>> =
        competitors.into_iter().take(slots).map(Some).collect();
    filled.resize(slots, None);

    SiteSummary {
        address: address.to_string(),
        competitor_count: Some(count),
        slots: filled,
        note: None,
    }
}

fn nearest_first(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
