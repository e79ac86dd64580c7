//! The escalation policy for a single candidate place.
//!
//! ```text
//! NameCheck ──member──────────────────────────────▶ Done(NameMatch)
//!     │
//!     ▼
//! KeywordCheck ──Competitor / Not Competitor──────▶ Done(Keyword)
//!     │  └──────error─────────────────────────────▶ Done(Failed)
//!     ▼ Can't say
//! VisionCheck ──no images─────────────────────────▶ Done(Indeterminate)
//!     ├──────label────────────────────────────────▶ Done(Vision)
//!     └──────error────────────────────────────────▶ Done(Failed)
//! ```
//!
//! Each stage runs at most once per candidate and a later stage only runs
//! when the earlier one could not decide.

use std::path::PathBuf;
use std::sync::Arc;

use washscout_classify::{
    load_images, KeywordClassifier, KeywordLabel, KeywordResult, RateGate, VisionClassifier,
    VisionLabel, VisionResult,
};
use washscout_core::{CandidatePlace, CandidateRecord, MissingData, OriginSite};
use washscout_maps::AssetCache;
use washscout_names::ReferenceRegistry;

/// Label recorded when a classifier call fails.
const ERROR_LABEL: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    IsCompetitor,
    NotCompetitor,
    Indeterminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    Keyword,
    Vision,
}

/// How a candidate was decided. Produced once and never revised.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The name is in the reference registry.
    NameMatch { canonical: Option<String> },
    /// The keyword classifier was decisive.
    Keyword(KeywordResult),
    /// Keyword was inconclusive; the vision classifier decided.
    Vision {
        keyword: KeywordResult,
        vision: VisionResult,
    },
    /// Keyword was inconclusive and there were no images to look at.
    Indeterminate { keyword: KeywordResult },
    /// A classifier call failed after retries.
    Failed {
        stage: FailedStage,
        keyword: Option<KeywordResult>,
        message: String,
    },
}

impl Verdict {
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self {
            Verdict::NameMatch { .. } => Outcome::IsCompetitor,
            Verdict::Keyword(k) => match k.label {
                KeywordLabel::Competitor => Outcome::IsCompetitor,
                KeywordLabel::NotCompetitor => Outcome::NotCompetitor,
                KeywordLabel::CantSay => Outcome::Indeterminate,
            },
            Verdict::Vision { vision, .. } => match vision.label {
                VisionLabel::Competitor => Outcome::IsCompetitor,
                VisionLabel::NotCompetitor => Outcome::NotCompetitor,
            },
            Verdict::Indeterminate { .. } | Verdict::Failed { .. } => Outcome::Indeterminate,
        }
    }

    #[must_use]
    pub fn is_competitor(&self) -> bool {
        self.outcome() == Outcome::IsCompetitor
    }

    fn keyword(&self) -> Option<&KeywordResult> {
        match self {
            Verdict::Keyword(k)
            | Verdict::Vision { keyword: k, .. }
            | Verdict::Indeterminate { keyword: k } => Some(k),
            Verdict::Failed { keyword, .. } => keyword.as_ref(),
            Verdict::NameMatch { .. } => None,
        }
    }
}

/// A candidate together with its verdict and the image evidence gathered
/// on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEvaluation {
    pub place: CandidatePlace,
    pub verdict: Verdict,
    /// File name of the satellite tile, when one was available.
    pub satellite_image: Option<String>,
    /// Place photos on disk; `None` when photos were never looked up.
    pub place_image_count: Option<usize>,
}

impl CandidateEvaluation {
    #[must_use]
    pub fn is_competitor(&self) -> bool {
        self.verdict.is_competitor()
    }

    /// Flattens the evaluation into an output row for `origin`.
    #[must_use]
    pub fn to_record(&self, origin: &OriginSite) -> CandidateRecord {
        let (keyword_classification, keyword_explanation) = match &self.verdict {
            Verdict::Failed {
                stage: FailedStage::Keyword,
                message,
                ..
            } => (Some(ERROR_LABEL.to_string()), Some(message.clone())),
            verdict => match verdict.keyword() {
                Some(k) => (Some(k.raw_label.clone()), k.explanation.clone()),
                None => (None, None),
            },
        };

        let (image_classification, image_justification) = match &self.verdict {
            Verdict::Vision { vision, .. } => {
                (Some(vision.raw_label.clone()), vision.justification.clone())
            }
            Verdict::Failed {
                stage: FailedStage::Vision,
                message,
                ..
            } => (Some(ERROR_LABEL.to_string()), Some(message.clone())),
            _ => (None, None),
        };

        CandidateRecord {
            origin_address: origin.address_text().unwrap_or_default().to_string(),
            origin_latitude: origin.latitude,
            origin_longitude: origin.longitude,
            found_name: self.place.name.clone(),
            distance_miles: self.place.distance_miles,
            rating: self.place.rating,
            rating_count: self.place.rating_count,
            found_in_competitor_list: matches!(self.verdict, Verdict::NameMatch { .. }),
            keyword_classification,
            keyword_explanation,
            place_image_count: self.place_image_count,
            satellite_image: self.satellite_image.clone(),
            image_classification,
            image_justification,
            is_competitor: self.is_competitor(),
        }
    }
}

enum Stage {
    NameCheck,
    KeywordCheck,
    VisionCheck(KeywordResult),
    Done(Verdict),
}

#[derive(Default)]
struct VisionEvidence {
    satellite: Option<PathBuf>,
    photos: Vec<PathBuf>,
    photo_count: Option<usize>,
}

/// Runs the name → keyword → vision escalation for candidate places.
pub struct Cascade {
    registry: Arc<ReferenceRegistry>,
    keyword: Arc<dyn KeywordClassifier>,
    vision: Arc<dyn VisionClassifier>,
    assets: Arc<AssetCache>,
    gate: Arc<RateGate>,
}

impl Cascade {
    pub fn new(
        registry: Arc<ReferenceRegistry>,
        keyword: Arc<dyn KeywordClassifier>,
        vision: Arc<dyn VisionClassifier>,
        assets: Arc<AssetCache>,
        gate: Arc<RateGate>,
    ) -> Self {
        Self {
            registry,
            keyword,
            vision,
            assets,
            gate,
        }
    }

    /// Classifies `place`, found near the site at `origin_address`.
    pub async fn evaluate(
        &self,
        origin_address: &str,
        place: &CandidatePlace,
    ) -> CandidateEvaluation {
        let mut evidence = VisionEvidence::default();
        let mut stage = Stage::NameCheck;

        let verdict = loop {
            stage = match stage {
                Stage::NameCheck => self.name_check(place),
                Stage::KeywordCheck => self.keyword_check(place).await,
                Stage::VisionCheck(keyword) => {
                    evidence = self.gather_images(origin_address, place).await;
                    self.vision_check(keyword, &evidence).await
                }
                Stage::Done(verdict) => break verdict,
            };
        };

        tracing::info!(
            found = %place.name,
            outcome = ?verdict.outcome(),
            "candidate classified"
        );

        CandidateEvaluation {
            place: place.clone(),
            verdict,
            satellite_image: evidence
                .satellite
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned()),
            place_image_count: evidence.photo_count,
        }
    }

    fn name_check(&self, place: &CandidatePlace) -> Stage {
        if self.registry.is_member(&place.name) {
            let canonical = self.registry.canonical_name(&place.name).map(str::to_owned);
            tracing::debug!(found = %place.name, ?canonical, "name is a known competitor");
            Stage::Done(Verdict::NameMatch { canonical })
        } else {
            Stage::KeywordCheck
        }
    }

    async fn keyword_check(&self, place: &CandidatePlace) -> Stage {
        self.gate.wait().await;
        match self.keyword.classify_name(&place.name).await {
            Ok(result) if result.label == KeywordLabel::CantSay => Stage::VisionCheck(result),
            Ok(result) => Stage::Done(Verdict::Keyword(result)),
            Err(e) => {
                tracing::warn!(found = %place.name, error = %e, "keyword classification failed");
                Stage::Done(Verdict::Failed {
                    stage: FailedStage::Keyword,
                    keyword: None,
                    message: e.to_string(),
                })
            }
        }
    }

    async fn gather_images(&self, origin_address: &str, place: &CandidatePlace) -> VisionEvidence {
        let Some(place_id) = place.id() else {
            tracing::debug!(
                found = %place.name,
                reason = %MissingData::PlaceId,
                "no images to gather"
            );
            return VisionEvidence::default();
        };

        let satellite = match place.location {
            Some(center) => self.assets.fetch_satellite(place_id, center).await,
            None => {
                tracing::debug!(
                    found = %place.name,
                    reason = %MissingData::PlaceLocation,
                    "using cached satellite tile only"
                );
                self.assets.get_satellite(place_id).await
            }
        };
        let photos = self
            .assets
            .ensure_photos(origin_address, &place.name, place_id)
            .await;

        VisionEvidence {
            satellite,
            photo_count: Some(photos.len()),
            photos,
        }
    }

    async fn vision_check(&self, keyword: KeywordResult, evidence: &VisionEvidence) -> Stage {
        if evidence.satellite.is_none() && evidence.photos.is_empty() {
            return Stage::Done(Verdict::Indeterminate { keyword });
        }

        let images = load_images(evidence.satellite.as_deref(), &evidence.photos).await;
        if images.is_empty() {
            return Stage::Done(Verdict::Indeterminate { keyword });
        }

        self.gate.wait().await;
        match self.vision.classify_images(&images).await {
            Ok(vision) => Stage::Done(Verdict::Vision { keyword, vision }),
            Err(e) => {
                tracing::warn!(error = %e, "vision classification failed");
                Stage::Done(Verdict::Failed {
                    stage: FailedStage::Vision,
                    keyword: Some(keyword),
                    message: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "cascade_test.rs"]
mod tests;
