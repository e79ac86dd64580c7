//! Nearby-search query and the Places API (New) wire types.

use serde::{Deserialize, Serialize};
use washscout_core::{CandidatePlace, GeoPoint};

use crate::error::MapsError;

pub use washscout_core::{MAX_RADIUS_METERS, METERS_PER_MILE};

const MAX_RESULT_COUNT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankPreference {
    #[default]
    Distance,
    Popularity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    pub radius_miles: f64,
    pub included_types: Vec<String>,
    pub max_results: u32,
    pub rank_preference: RankPreference,
}

impl NearbyQuery {
    /// Car washes around `center`, nearest first.
    #[must_use]
    pub fn car_washes(center: GeoPoint, radius_miles: f64, max_results: u32) -> Self {
        Self {
            center,
            radius_miles,
            included_types: vec!["car_wash".to_string()],
            max_results,
            rank_preference: RankPreference::Distance,
        }
    }

    /// Radius in metres.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::InvalidQuery`] unless the radius lies in
    /// `(0, 50000]` metres.
    pub fn radius_meters(&self) -> Result<f64, MapsError> {
        let meters = self.radius_miles * METERS_PER_MILE;
        if meters.is_finite() && meters > 0.0 && meters <= MAX_RADIUS_METERS {
            Ok(meters)
        } else {
            Err(MapsError::InvalidQuery(format!(
                "radius of {} miles is outside (0, {MAX_RADIUS_METERS}] metres",
                self.radius_miles
            )))
        }
    }

    #[must_use]
    pub fn clamped_max_results(&self) -> u32 {
        self.max_results.clamp(1, MAX_RESULT_COUNT)
    }

    pub(crate) fn to_request(&self) -> Result<SearchNearbyRequest, MapsError> {
        if !self.center.is_finite() {
            return Err(MapsError::InvalidQuery(
                "search centre has non-finite coordinates".to_string(),
            ));
        }
        Ok(SearchNearbyRequest {
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: LatLng {
                        latitude: self.center.lat,
                        longitude: self.center.lon,
                    },
                    radius: self.radius_meters()?,
                },
            },
            max_result_count: self.clamped_max_results(),
            included_types: self.included_types.clone(),
            rank_preference: self.rank_preference,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchNearbyRequest {
    location_restriction: LocationRestriction,
    max_result_count: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    included_types: Vec<String>,
    rank_preference: RankPreference,
}

#[derive(Debug, Serialize)]
struct LocationRestriction {
    circle: Circle,
}

#[derive(Debug, Serialize)]
struct Circle {
    center: LatLng,
    radius: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LatLng {
    latitude: f64,
    longitude: f64,
}

/// `places:searchNearby` response. An empty result set comes back as `{}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchNearbyResponse {
    #[serde(default)]
    pub places: Vec<PlaceDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaceDto {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub location: Option<LatLng>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocalizedText {
    pub text: Option<String>,
}

impl From<PlaceDto> for CandidatePlace {
    fn from(dto: PlaceDto) -> Self {
        let name = dto
            .display_name
            .and_then(|n| n.text)
            .unwrap_or_default();
        let mut place = CandidatePlace::new(name);
        place.place_id = dto.id;
        place.location = dto
            .location
            .and_then(|l| GeoPoint::from_parts(Some(l.latitude), Some(l.longitude)));
        place.rating = dto.rating;
        place.rating_count = dto.user_rating_count;
        place
    }
}

/// Place details restricted to the `photos` field.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlacePhotosResponse {
    #[serde(default)]
    pub photos: Vec<PhotoDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhotoDto {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(radius_miles: f64, max_results: u32) -> NearbyQuery {
        NearbyQuery::car_washes(GeoPoint::new(34.05, -118.24), radius_miles, max_results)
    }

    #[test]
    fn one_mile_converts_to_metres() {
        let meters = query(1.0, 20).radius_meters().unwrap();
        assert!((meters - 1609.34).abs() < 1e-9);
    }

    #[test]
    fn radius_bounds_are_enforced() {
        assert!(query(0.0, 20).radius_meters().is_err());
        assert!(query(-1.0, 20).radius_meters().is_err());
        assert!(query(32.0, 20).radius_meters().is_err());
        assert!(query(f64::NAN, 20).radius_meters().is_err());
        assert!(query(31.06, 20).radius_meters().is_ok());
    }

    #[test]
    fn max_results_is_clamped() {
        assert_eq!(query(1.0, 0).clamped_max_results(), 1);
        assert_eq!(query(1.0, 7).clamped_max_results(), 7);
        assert_eq!(query(1.0, 50).clamped_max_results(), 20);
    }

    #[test]
    fn request_body_uses_api_field_names() {
        let body = serde_json::to_value(query(1.0, 20).to_request().unwrap()).unwrap();
        assert_eq!(body["maxResultCount"], 20);
        assert_eq!(body["includedTypes"][0], "car_wash");
        assert_eq!(body["rankPreference"], "DISTANCE");
        assert_eq!(body["locationRestriction"]["circle"]["center"]["latitude"], 34.05);
    }

    #[test]
    fn place_without_location_has_no_point() {
        let dto: PlaceDto = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "displayName": { "text": "Quick Lube" }
        }))
        .unwrap();
        let place = CandidatePlace::from(dto);
        assert_eq!(place.name, "Quick Lube");
        assert_eq!(place.id(), Some("abc"));
        assert!(place.location.is_none());
        assert!(place.rating.is_none());
    }
}
