//! Output rows: one [`CandidateRecord`] per classified place and one
//! [`SiteSummary`] per input site.

use serde::Serialize;

/// Per-candidate output row. Column names match the historical CSV layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    #[serde(rename = "Original_Name_Address")]
    pub origin_address: String,
    #[serde(rename = "Original_Latitude")]
    pub origin_latitude: Option<f64>,
    #[serde(rename = "Original_Longitude")]
    pub origin_longitude: Option<f64>,
    #[serde(rename = "Found_Car_Wash_Name")]
    pub found_name: String,
    #[serde(rename = "distance")]
    pub distance_miles: Option<f64>,
    pub rating: Option<f64>,
    #[serde(rename = "userRatingCount")]
    pub rating_count: Option<u32>,
    #[serde(rename = "FoundInCompetitorList")]
    pub found_in_competitor_list: bool,
    #[serde(rename = "keywordClassification")]
    pub keyword_classification: Option<String>,
    #[serde(rename = "keywordClassificationExplanation")]
    pub keyword_explanation: Option<String>,
    #[serde(rename = "number of place images")]
    pub place_image_count: Option<usize>,
    #[serde(rename = "satellite image")]
    pub satellite_image: Option<String>,
    #[serde(rename = "imageClassification")]
    pub image_classification: Option<String>,
    #[serde(rename = "imageClassificationJustification")]
    pub image_justification: Option<String>,
    pub is_competitor: bool,
}

/// One filled summary slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummarySlot {
    pub distance_miles: Option<f64>,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
}

/// Per-site summary: count plus the `N` nearest competitors.
///
/// `slots.len()` is always the configured width; unfilled slots are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub address: String,
    /// `None` for placeholder rows (site skipped or search failed).
    pub competitor_count: Option<usize>,
    pub slots: Vec<Option<SummarySlot>>,
    /// Skip or failure reason for placeholder rows.
    pub note: Option<String>,
}

impl SiteSummary {
    /// Placeholder row for a site that could not be surveyed.
    #[must_use]
    pub fn placeholder(address: impl Into<String>, width: usize, note: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            competitor_count: None,
            slots: vec![None; width],
            note: Some(note.into()),
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.competitor_count.is_none()
    }

    /// CSV header for a summary of the given width.
    #[must_use]
    pub fn header(width: usize) -> Vec<String> {
        let mut header = vec!["original_address".to_string(), "competitors_count".to_string()];
        for i in 1..=width {
            header.push(format!("distance_{i}"));
            header.push(format!("rating_{i}"));
            header.push(format!("userRatingCount_{i}"));
        }
        header.push("note".to_string());
        header
    }

    /// Flattens the summary into CSV fields aligned with [`SiteSummary::header`].
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(3 + self.slots.len() * 3);
        row.push(self.address.clone());
        row.push(opt_field(self.competitor_count));
        for slot in &self.slots {
            match slot {
                Some(s) => {
                    row.push(opt_field(s.distance_miles));
                    row.push(opt_field(s.rating));
                    row.push(opt_field(s.rating_count));
                }
                None => row.extend([String::new(), String::new(), String::new()]),
            }
        }
        row.push(self.note.clone().unwrap_or_default());
        row
    }
}

fn opt_field<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
