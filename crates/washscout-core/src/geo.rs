//! Great-circle distance between origin sites and candidate places.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for every distance in the output, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

pub const METERS_PER_MILE: f64 = 1609.34;

/// Largest search circle the Places API accepts.
pub const MAX_RADIUS_METERS: f64 = 50_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds a point only when both coordinates are present and finite.
    #[must_use]
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(Self::new(lat, lon))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Haversine distance in miles. `None` if any coordinate is NaN or infinite.
#[must_use]
pub fn haversine_miles(from: GeoPoint, to: GeoPoint) -> Option<f64> {
    if !from.is_finite() || !to.is_finite() {
        return None;
    }

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (to.lon - from.lon).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Some(EARTH_RADIUS_MILES * c)
}
