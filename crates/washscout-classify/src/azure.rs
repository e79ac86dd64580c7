//! Vision classifier backed by an Azure OpenAI chat-completions deployment.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use washscout_core::RetryPolicy;

use crate::error::{checked_text, join, parse_base, ClassifyError};
use crate::prompts::{VISION_RUBRIC, VISION_USER_QUERY};
use crate::vision::{ImageInput, VisionClassifier, VisionLabel, VisionResult};

const MAX_TOKENS: u32 = 1500;

pub struct AzureVisionClassifier {
    client: Client,
    endpoint: Url,
    api_key: String,
    deployment: String,
    api_version: String,
    retry: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VisionAnswer {
    classification: String,
    #[serde(default)]
    justification: Option<String>,
}

impl AzureVisionClassifier {
    /// `endpoint` is the resource URL, e.g. `https://my-resource.openai.azure.com/`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ClassifyError::InvalidBaseUrl`] if `endpoint` does not parse.
    pub fn new(
        endpoint: &str,
        api_key: &str,
        deployment: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClassifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: parse_base(endpoint)?,
            api_key: api_key.to_owned(),
            deployment: deployment.to_owned(),
            api_version: api_version.to_owned(),
            retry: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn completions_url(&self) -> Result<Url, ClassifyError> {
        let mut url = join(
            &self.endpoint,
            &format!("openai/deployments/{}/chat/completions", self.deployment),
        )?;
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    fn request_body(images: &[ImageInput]) -> Value {
        let mut user_content = vec![json!({ "type": "text", "text": VISION_USER_QUERY })];
        user_content.extend(images.iter().map(|image| {
            json!({
                "type": "image_url",
                "image_url": { "url": image.data_url(), "detail": "high" }
            })
        }));

        json!({
            "messages": [
                { "role": "system", "content": VISION_RUBRIC },
                { "role": "user", "content": user_content }
            ],
            "max_tokens": MAX_TOKENS,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "CarWashClassification",
                    "strict": true,
                    "schema": {
                        "type": "object",
                        "properties": {
                            "classification": {
                                "type": "string",
                                "enum": ["Competitor", "Not a Competitor"],
                                "description": "Classification of the car wash location."
                            },
                            "justification": {
                                "type": "string",
                                "description": "Visible features supporting the classification, or the evidence that was missing or ambiguous."
                            }
                        },
                        "required": ["classification", "justification"],
                        "additionalProperties": false
                    }
                }
            }
        })
    }

    async fn send_once(&self, url: &Url, body: &Value) -> Result<String, ClassifyError> {
        let response = self
            .client
            .post(url.clone())
            .header("api-key", &self.api_key)
            .json(body)
            .send()
            .await?;
        checked_text(response).await
    }
}

fn parse_answer(body: &str) -> Result<VisionResult, ClassifyError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ClassifyError::MalformedResponse(format!("chat completion envelope: {e}")))?;
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| ClassifyError::MalformedResponse("response has no choices".to_string()))?;

    if let Some(refusal) = message.refusal.filter(|r| !r.trim().is_empty()) {
        return Err(ClassifyError::MalformedResponse(format!(
            "model refused: {refusal}"
        )));
    }
    let content = message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ClassifyError::MalformedResponse("empty message content".to_string()))?;

    let answer: VisionAnswer = serde_json::from_str(content.trim())
        .map_err(|e| ClassifyError::MalformedResponse(format!("JSON decoding error: {e}")))?;
    let label = VisionLabel::parse(&answer.classification).ok_or_else(|| {
        ClassifyError::MalformedResponse(format!(
            "unknown classification '{}'",
            answer.classification
        ))
    })?;

    Ok(VisionResult {
        label,
        raw_label: answer.classification,
        justification: answer.justification,
    })
}

#[async_trait]
impl VisionClassifier for AzureVisionClassifier {
    async fn classify_images(&self, images: &[ImageInput]) -> Result<VisionResult, ClassifyError> {
        if images.is_empty() {
            return Err(ClassifyError::NoImages);
        }
        let url = self.completions_url()?;
        let body = Self::request_body(images);

        tracing::debug!(
            images = images.len(),
            deployment = %self.deployment,
            "sending vision request"
        );
        let text = self
            .retry
            .run("azure chat completions", || self.send_once(&url, &body))
            .await?;
        let result = parse_answer(&text)?;
        tracing::debug!(label = %result.label, "vision classification");
        Ok(result)
    }
}
