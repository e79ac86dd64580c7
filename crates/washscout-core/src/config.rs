use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::AppConfig;
use crate::geo::{MAX_RADIUS_METERS, METERS_PER_MILE};

/// Startup configuration failures. These are the only fatal errors in a run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a pure
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        parse_flag(&or_default(var, default))
            .ok_or_else(|| invalid(var, "expected true/false".to_string()))
    };

    let google_maps_api_key = require("GOOGLE_MAPS_API_KEY")?;
    let gemini_api_key = require("GEMINI_API_KEY")?;
    let azure_openai_endpoint = require("AZURE_OPENAI_ENDPOINT")?;
    let azure_openai_api_key = require("AZURE_OPENAI_API_KEY")?;

    let azure_openai_api_version = or_default("AZURE_OPENAI_API_VERSION", "2025-01-01-preview");
    let azure_openai_deployment = or_default("AZURE_OPENAI_MODEL_DEPLOYMENT_NAME", "gpt-4o");
    let gemini_model = or_default("WASHSCOUT_GEMINI_MODEL", "gemini-2.5-flash");

    let log_level = or_default("WASHSCOUT_LOG_LEVEL", "info");
    let cache_dir = PathBuf::from(or_default("WASHSCOUT_CACHE_DIR", "."));
    let reference_csv = lookup("WASHSCOUT_REFERENCE_CSV")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    let search_radius_miles = parse_f64("WASHSCOUT_SEARCH_RADIUS_MILES", "1.0")?;
    // Same bound the Places request enforces.
    let radius_meters = search_radius_miles * METERS_PER_MILE;
    if !(radius_meters.is_finite() && radius_meters > 0.0 && radius_meters <= MAX_RADIUS_METERS) {
        return Err(invalid(
            "WASHSCOUT_SEARCH_RADIUS_MILES",
            format!(
                "radius must be in (0, {:.2}] miles, got {search_radius_miles}",
                MAX_RADIUS_METERS / METERS_PER_MILE
            ),
        ));
    }

    let max_candidates = parse_u32("WASHSCOUT_MAX_CANDIDATES", "20")?;
    let skip_first_result = parse_bool("WASHSCOUT_SKIP_FIRST_RESULT", "true")?;

    let summary_slots = parse_usize("WASHSCOUT_SUMMARY_SLOTS", "6")?;
    if summary_slots == 0 {
        return Err(invalid(
            "WASHSCOUT_SUMMARY_SLOTS",
            "at least one summary slot is required".to_string(),
        ));
    }

    let llm_cooldown_ms = parse_u64("WASHSCOUT_LLM_COOLDOWN_MS", "1000")?;
    let max_concurrent_sites = parse_usize("WASHSCOUT_MAX_CONCURRENT_SITES", "1")?;
    let request_timeout_secs = parse_u64("WASHSCOUT_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("WASHSCOUT_USER_AGENT", "washscout/0.1 (competitor-analysis)");

    let max_attempts = parse_u32("WASHSCOUT_MAX_ATTEMPTS", "3")?;
    if max_attempts == 0 {
        return Err(invalid(
            "WASHSCOUT_MAX_ATTEMPTS",
            "at least one attempt is required".to_string(),
        ));
    }
    let retry_backoff_base_secs = parse_u64("WASHSCOUT_RETRY_BACKOFF_BASE_SECS", "2")?;

    Ok(AppConfig {
        google_maps_api_key,
        gemini_api_key,
        gemini_model,
        azure_openai_endpoint,
        azure_openai_api_key,
        azure_openai_api_version,
        azure_openai_deployment,
        log_level,
        cache_dir,
        reference_csv,
        search_radius_miles,
        max_candidates,
        skip_first_result,
        summary_slots,
        llm_cooldown_ms,
        max_concurrent_sites,
        request_timeout_secs,
        user_agent,
        max_attempts,
        retry_backoff_base_secs,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
