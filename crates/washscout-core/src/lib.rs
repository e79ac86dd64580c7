//! Shared domain types, configuration, and retry policy for washscout.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod places;
pub mod records;
pub mod retry;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use geo::{haversine_miles, GeoPoint, EARTH_RADIUS_MILES, MAX_RADIUS_METERS, METERS_PER_MILE};
pub use places::{CandidatePlace, MissingData, OriginSite};
pub use records::{CandidateRecord, SiteSummary, SummarySlot};
pub use retry::{RetryPolicy, RetryableError};
