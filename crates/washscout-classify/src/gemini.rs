//! Keyword classifier backed by the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use washscout_core::RetryPolicy;

use crate::error::{checked_text, join, parse_base, ClassifyError};
use crate::keyword::{KeywordClassifier, KeywordLabel, KeywordResult};
use crate::prompts::keyword_prompt;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

pub struct GeminiKeywordClassifier {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
    retry: RetryPolicy,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct KeywordAnswer {
    classification: String,
    #[serde(default)]
    explanation: Option<String>,
}

impl GeminiKeywordClassifier {
    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClassifyError> {
        Self::with_base_url(api_key, model, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a classifier with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ClassifyError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ClassifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: parse_base(base_url)?,
            retry: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn request_body(name: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(keyword_prompt(name)),
                }],
            }],
            generation_config: json!({
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "required": ["classification", "explanation"],
                    "properties": {
                        "classification": {
                            "type": "STRING",
                            "enum": ["Competitor", "Not Competitor", "Can't say"],
                            "description": "The classification of the car wash business."
                        },
                        "explanation": {
                            "type": "STRING",
                            "description": "A brief explanation for the classification, mentioning the keywords found."
                        }
                    }
                }
            }),
        }
    }

    async fn send_once(&self, url: &Url, body: &GenerateRequest) -> Result<String, ClassifyError> {
        let response = self
            .client
            .post(url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;
        checked_text(response).await
    }
}

/// Extracts the model's JSON answer from a `generateContent` response body.
fn parse_answer(body: &str) -> Result<KeywordResult, ClassifyError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ClassifyError::MalformedResponse(format!("generateContent envelope: {e}")))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ClassifyError::MalformedResponse(
            "response has no candidate text".to_string(),
        ));
    }

    let answer: KeywordAnswer = serde_json::from_str(text.trim())
        .map_err(|e| ClassifyError::MalformedResponse(format!("JSON decoding error: {e}")))?;
    let label = KeywordLabel::parse(&answer.classification).ok_or_else(|| {
        ClassifyError::MalformedResponse(format!(
            "unknown classification '{}'",
            answer.classification
        ))
    })?;

    Ok(KeywordResult {
        label,
        raw_label: answer.classification,
        explanation: answer.explanation,
    })
}

#[async_trait]
impl KeywordClassifier for GeminiKeywordClassifier {
    async fn classify_name(&self, name: &str) -> Result<KeywordResult, ClassifyError> {
        let url = join(
            &self.base_url,
            &format!("v1beta/models/{}:generateContent", self.model),
        )?;
        let body = Self::request_body(name);

        let text = self
            .retry
            .run("gemini generateContent", || self.send_once(&url, &body))
            .await?;
        let result = parse_answer(&text)?;
        tracing::debug!(name, label = %result.label, "keyword classification");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(text: &str) -> String {
        json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": text }] } }
            ]
        })
        .to_string()
    }

    #[test]
    fn parses_structured_answer() {
        let body =
            envelope(r#"{"classification": "Can't say", "explanation": "Contains 'Lube'."}"#);
        let result = parse_answer(&body).unwrap();
        assert_eq!(result.label, KeywordLabel::CantSay);
        assert_eq!(result.raw_label, "Can't say");
        assert_eq!(result.explanation.as_deref(), Some("Contains 'Lube'."));
    }

    #[test]
    fn joins_split_parts() {
        let body = json!({
            "candidates": [{ "content": { "parts": [
                { "text": "{\"classification\": \"Compet" },
                { "text": "itor\", \"explanation\": \"Express\"}" }
            ] } }]
        })
        .to_string();
        assert_eq!(parse_answer(&body).unwrap().label, KeywordLabel::Competitor);
    }

    #[test]
    fn non_json_text_is_malformed() {
        let err = parse_answer(&envelope("Competitor")).unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedResponse(_)));
    }

    #[test]
    fn empty_candidates_are_malformed() {
        let err = parse_answer(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedResponse(_)));
    }

    #[test]
    fn unknown_label_is_malformed() {
        let body = envelope(r#"{"classification": "Maybe", "explanation": ""}"#);
        assert!(matches!(
            parse_answer(&body),
            Err(ClassifyError::MalformedResponse(_))
        ));
    }

    #[test]
    fn request_carries_prompt_and_schema() {
        let body =
            serde_json::to_value(GeminiKeywordClassifier::request_body("Quick Lube")).unwrap();
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.ends_with("{Quick Lube}"));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["classification"]["enum"][2],
            "Can't say"
        );
    }
}
