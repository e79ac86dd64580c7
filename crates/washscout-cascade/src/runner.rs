//! Per-site survey: nearby search, per-candidate cascade, summary.
//!
//! Sites are processed through a bounded pool; reports come back in input
//! order so output files line up with the input rows.

use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt};
use washscout_core::{AppConfig, CandidateRecord, OriginSite, SiteSummary};
use washscout_maps::{NearbyQuery, NearbySearch};

use crate::cascade::{CandidateEvaluation, Cascade};
use crate::summary::summarize;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub search_radius_miles: f64,
    pub max_candidates: u32,
    /// The search is centred on the site itself, so the first result is
    /// usually the site's own business.
    pub skip_first_result: bool,
    pub summary_slots: usize,
    pub max_concurrent_sites: usize,
}

impl RunSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            search_radius_miles: config.search_radius_miles,
            max_candidates: config.max_candidates,
            skip_first_result: config.skip_first_result,
            summary_slots: config.summary_slots,
            max_concurrent_sites: config.max_concurrent_sites,
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            search_radius_miles: 1.0,
            max_candidates: 20,
            skip_first_result: true,
            summary_slots: 6,
            max_concurrent_sites: 1,
        }
    }
}

/// Everything produced for one input row.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteReport {
    pub site: OriginSite,
    pub candidates: Vec<CandidateRecord>,
    pub summary: SiteSummary,
}

impl SiteReport {
    fn placeholder(site: &OriginSite, slots: usize, note: String) -> Self {
        Self {
            site: site.clone(),
            candidates: Vec::new(),
            summary: SiteSummary::placeholder(site.address_text().unwrap_or_default(), slots, note),
        }
    }
}

pub struct SiteRunner {
    search: Arc<dyn NearbySearch>,
    cascade: Cascade,
    settings: RunSettings,
}

impl SiteRunner {
    pub fn new(search: Arc<dyn NearbySearch>, cascade: Cascade, settings: RunSettings) -> Self {
        Self {
            search,
            cascade,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Surveys one site. Never fails: unusable sites and failed searches
    /// yield a placeholder summary and no candidate rows.
    pub async fn process_site(&self, site: &OriginSite) -> SiteReport {
        let slots = self.settings.summary_slots;

        let (address, origin) = match site.require_searchable() {
            Ok(searchable) => searchable,
            Err(reason) => {
                tracing::warn!(row = site.row, %reason, "skipping site");
                return SiteReport::placeholder(site, slots, reason.to_string());
            }
        };

        let query = NearbyQuery::car_washes(
            origin,
            self.settings.search_radius_miles,
            self.settings.max_candidates,
        );
        let mut places = match self.search.search_nearby(&query).await {
            Ok(places) => places,
            Err(e) => {
                tracing::error!(row = site.row, address, error = %e, "nearby search failed");
                return SiteReport::placeholder(site, slots, format!("nearby search failed: {e}"));
            }
        };

        if self.settings.skip_first_result && !places.is_empty() {
            let own = places.remove(0);
            tracing::debug!(row = site.row, skipped = %own.name, "dropping the site's own listing");
        }
        tracing::info!(row = site.row, address, candidates = places.len(), "surveying site");

        let mut evaluations: Vec<CandidateEvaluation> = Vec::with_capacity(places.len());
        for place in places {
            let place = place.measured_from(origin);
            evaluations.push(self.cascade.evaluate(address, &place).await);
        }

        let candidates = evaluations.iter().map(|e| e.to_record(site)).collect();
        let summary = summarize(address, &evaluations, slots);
        tracing::info!(
            row = site.row,
            address,
            competitors = summary.competitor_count.unwrap_or_default(),
            "site complete"
        );

        SiteReport {
            site: site.clone(),
            candidates,
            summary,
        }
    }

    /// Reports for `sites`, in input order, with at most
    /// `max_concurrent_sites` sites in flight.
    pub fn reports<'a>(&'a self, sites: &'a [OriginSite]) -> impl Stream<Item = SiteReport> + 'a {
        stream::iter(sites)
            .map(move |site| self.process_site(site))
            .buffered(self.settings.max_concurrent_sites.max(1))
    }

    pub async fn run_sites(&self, sites: &[OriginSite]) -> Vec<SiteReport> {
        self.reports(sites).collect().await
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
