use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

#[derive(Clone)]
pub struct AppConfig {
    pub google_maps_api_key: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub azure_openai_endpoint: String,
    pub azure_openai_api_key: String,
    pub azure_openai_api_version: String,
    pub azure_openai_deployment: String,
    pub log_level: String,
    pub cache_dir: PathBuf,
    pub reference_csv: Option<PathBuf>,
    pub search_radius_miles: f64,
    pub max_candidates: u32,
    pub skip_first_result: bool,
    pub summary_slots: usize,
    pub llm_cooldown_ms: u64,
    pub max_concurrent_sites: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_attempts: u32,
    pub retry_backoff_base_secs: u64,
}

impl AppConfig {
    /// Retry policy shared by every network-calling component.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff_base: Duration::from_secs(self.retry_backoff_base_secs),
            attempt_timeout: Some(Duration::from_secs(self.request_timeout_secs)),
        }
    }

    #[must_use]
    pub fn llm_cooldown(&self) -> Duration {
        Duration::from_millis(self.llm_cooldown_ms)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_maps_api_key", &"[redacted]")
            .field("gemini_api_key", &"[redacted]")
            .field("gemini_model", &self.gemini_model)
            .field("azure_openai_endpoint", &self.azure_openai_endpoint)
            .field("azure_openai_api_key", &"[redacted]")
            .field("azure_openai_api_version", &self.azure_openai_api_version)
            .field("azure_openai_deployment", &self.azure_openai_deployment)
            .field("log_level", &self.log_level)
            .field("cache_dir", &self.cache_dir)
            .field("reference_csv", &self.reference_csv)
            .field("search_radius_miles", &self.search_radius_miles)
            .field("max_candidates", &self.max_candidates)
            .field("skip_first_result", &self.skip_first_result)
            .field("summary_slots", &self.summary_slots)
            .field("llm_cooldown_ms", &self.llm_cooldown_ms)
            .field("max_concurrent_sites", &self.max_concurrent_sites)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_attempts", &self.max_attempts)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .finish()
    }
}
