//! Name-only classification.

use async_trait::async_trait;

use crate::error::ClassifyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordLabel {
    Competitor,
    NotCompetitor,
    CantSay,
}

impl KeywordLabel {
    /// Lenient label parsing: case, surrounding punctuation, curly
    /// apostrophes and the "Not a Competitor" wording are all accepted.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = raw
            .trim()
            .trim_matches(|c: char| c == '.' || c == '"')
            .replace(['\u{2019}', '\u{2018}'], "'")
            .to_lowercase();
        match cleaned.as_str() {
            "competitor" => Some(Self::Competitor),
            "not competitor" | "not a competitor" | "non competitor" | "non-competitor" => {
                Some(Self::NotCompetitor)
            }
            "can't say" | "cant say" | "cannot say" | "can not say" => Some(Self::CantSay),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Competitor => "Competitor",
            Self::NotCompetitor => "Not Competitor",
            Self::CantSay => "Can't say",
        }
    }
}

impl std::fmt::Display for KeywordLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordResult {
    pub label: KeywordLabel,
    /// Label exactly as the service returned it.
    pub raw_label: String,
    pub explanation: Option<String>,
}

/// Classifies a business from its display name alone.
#[async_trait]
pub trait KeywordClassifier: Send + Sync {
    async fn classify_name(&self, name: &str) -> Result<KeywordResult, ClassifyError>;
}
