//! HTTP client for the Google Places API (New) and the Static Maps API.
//!
//! [`GoogleMapsClient`] implements both collaborator traits used by the rest
//! of the workspace: [`NearbySearch`] for candidate discovery and
//! [`ImageSource`] for the raw bytes behind the asset cache. Nearby search is
//! retried here; image calls are single attempts because the asset cache
//! wraps them in its own retry loop.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use washscout_core::{CandidatePlace, GeoPoint, RetryPolicy};

use crate::error::MapsError;
use crate::types::{NearbyQuery, PlacePhotosResponse, SearchNearbyResponse};

const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com/";
const DEFAULT_STATIC_MAPS_BASE_URL: &str = "https://maps.googleapis.com/";

const NEARBY_FIELD_MASK: &str =
    "places.id,places.displayName,places.location,places.rating,places.userRatingCount";
const PHOTOS_FIELD_MASK: &str = "id,displayName,photos";

const SATELLITE_ZOOM: u8 = 20;
const SATELLITE_SIZE: &str = "640x640";
const PHOTO_MAX_HEIGHT_PX: u32 = 800;

/// Finds places around a point.
#[async_trait]
pub trait NearbySearch: Send + Sync {
    async fn search_nearby(&self, query: &NearbyQuery) -> Result<Vec<CandidatePlace>, MapsError>;
}

/// Raw image bytes for the asset cache. Each call is a single attempt.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// JPEG satellite tile centred on `center`.
    async fn satellite_tile(&self, center: GeoPoint) -> Result<Vec<u8>, MapsError>;

    /// Photo resource names (`places/{id}/photos/{ref}`) for a place.
    async fn photo_references(&self, place_id: &str) -> Result<Vec<String>, MapsError>;

    /// Image bytes for one photo resource name.
    async fn photo_media(&self, photo_ref: &str) -> Result<Vec<u8>, MapsError>;
}

/// Client for the Places API (New) and Static Maps.
///
/// Use [`GoogleMapsClient::new`] for production or
/// [`GoogleMapsClient::with_base_urls`] to point at a mock server in tests.
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    places_base: Url,
    static_maps_base: Url,
    retry: RetryPolicy,
}

impl GoogleMapsClient {
    /// Creates a client pointed at the production Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, MapsError> {
        Self::with_base_urls(
            api_key,
            timeout_secs,
            user_agent,
            DEFAULT_PLACES_BASE_URL,
            DEFAULT_STATIC_MAPS_BASE_URL,
        )
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`MapsError::InvalidBaseUrl`] if either URL does not parse.
    pub fn with_base_urls(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        places_base: &str,
        static_maps_base: &str,
    ) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            places_base: parse_base(places_base)?,
            static_maps_base: parse_base(static_maps_base)?,
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy used for nearby searches.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn search_once(&self, query: &NearbyQuery) -> Result<Vec<CandidatePlace>, MapsError> {
        let url = join(&self.places_base, "v1/places:searchNearby")?;
        let body = query.to_request()?;

        let response = self
            .client
            .post(url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", NEARBY_FIELD_MASK)
            .json(&body)
            .send()
            .await?;
        let text = checked_text(response).await?;

        let parsed: SearchNearbyResponse =
            serde_json::from_str(&text).map_err(|source| MapsError::Deserialize {
                context: "places:searchNearby".to_string(),
                source,
            })?;
        Ok(parsed.places.into_iter().map(CandidatePlace::from).collect())
    }

    fn satellite_url(&self, center: GeoPoint) -> Result<Url, MapsError> {
        let mut url = join(&self.static_maps_base, "maps/api/staticmap")?;
        url.query_pairs_mut()
            .append_pair("center", &format!("{},{}", center.lat, center.lon))
            .append_pair("zoom", &SATELLITE_ZOOM.to_string())
            .append_pair("size", SATELLITE_SIZE)
            .append_pair("maptype", "hybrid")
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    fn photo_media_url(&self, photo_ref: &str) -> Result<Url, MapsError> {
        let mut url = join(&self.places_base, &format!("v1/{photo_ref}/media"))?;
        url.query_pairs_mut()
            .append_pair("maxHeightPx", &PHOTO_MAX_HEIGHT_PX.to_string())
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, MapsError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl NearbySearch for GoogleMapsClient {
    async fn search_nearby(&self, query: &NearbyQuery) -> Result<Vec<CandidatePlace>, MapsError> {
        let places = self
            .retry
            .run("places:searchNearby", || self.search_once(query))
            .await?;
        tracing::debug!(
            lat = query.center.lat,
            lon = query.center.lon,
            found = places.len(),
            "nearby search complete"
        );
        Ok(places)
    }
}

#[async_trait]
impl ImageSource for GoogleMapsClient {
    async fn satellite_tile(&self, center: GeoPoint) -> Result<Vec<u8>, MapsError> {
        let url = self.satellite_url(center)?;
        self.get_bytes(url).await
    }

    async fn photo_references(&self, place_id: &str) -> Result<Vec<String>, MapsError> {
        let url = join(&self.places_base, &format!("v1/places/{place_id}"))?;
        let response = self
            .client
            .get(url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", PHOTOS_FIELD_MASK)
            .send()
            .await?;
        let text = checked_text(response).await?;

        let parsed: PlacePhotosResponse =
            serde_json::from_str(&text).map_err(|source| MapsError::Deserialize {
                context: format!("places/{place_id}"),
                source,
            })?;
        Ok(parsed.photos.into_iter().map(|p| p.name).collect())
    }

    async fn photo_media(&self, photo_ref: &str) -> Result<Vec<u8>, MapsError> {
        let url = self.photo_media_url(photo_ref)?;
        self.get_bytes(url).await
    }
}

/// Ensures the base URL ends with exactly one slash so that `join` appends
/// rather than replacing the last path segment.
fn parse_base(base: &str) -> Result<Url, MapsError> {
    let normalised = format!("{}/", base.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| MapsError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

fn join(base: &Url, path: &str) -> Result<Url, MapsError> {
    base.join(path).map_err(|e| MapsError::InvalidBaseUrl {
        url: format!("{base}{path}"),
        reason: e.to_string(),
    })
}

async fn checked_text(response: reqwest::Response) -> Result<String, MapsError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        Ok(text)
    } else {
        Err(MapsError::Status {
            status: status.as_u16(),
            body: text,
        })
    }
}
