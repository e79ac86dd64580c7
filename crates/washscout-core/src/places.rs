use thiserror::Error;

use crate::geo::{haversine_miles, GeoPoint};

/// One input row: the site whose surroundings are being surveyed.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginSite {
    /// Zero-based data row index in the input file.
    pub row: usize,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Reasons a site (or a candidate) cannot be processed. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingData {
    #[error("missing or empty site address")]
    Address,

    #[error("missing or invalid site coordinates")]
    Coordinates,

    #[error("candidate has no place id")]
    PlaceId,

    #[error("candidate has no location")]
    PlaceLocation,
}

impl OriginSite {
    /// Address with surrounding whitespace removed, `None` when blank.
    #[must_use]
    pub fn address_text(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    #[must_use]
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }

    /// Returns the address and coordinates, or the first missing piece.
    ///
    /// # Errors
    ///
    /// Returns [`MissingData::Address`] or [`MissingData::Coordinates`].
    pub fn require_searchable(&self) -> Result<(&str, GeoPoint), MissingData> {
        let address = self.address_text().ok_or(MissingData::Address)?;
        let location = self.location().ok_or(MissingData::Coordinates)?;
        Ok((address, location))
    }
}

/// A business returned by the nearby-places search.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePlace {
    pub place_id: Option<String>,
    pub name: String,
    pub location: Option<GeoPoint>,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    /// Miles from the origin site; set by [`CandidatePlace::measured_from`].
    pub distance_miles: Option<f64>,
}

impl CandidatePlace {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            place_id: None,
            name: name.into(),
            location: None,
            rating: None,
            rating_count: None,
            distance_miles: None,
        }
    }

    #[must_use]
    pub fn measured_from(mut self, origin: GeoPoint) -> Self {
        self.distance_miles = self.location.and_then(|loc| haversine_miles(origin, loc));
        self
    }

    /// Place id, ignoring empty strings returned by the provider.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.place_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(address: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> OriginSite {
        OriginSite {
            row: 0,
            address: address.map(str::to_owned),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn searchable_site() {
        let s = site(Some(" 1 Main St "), Some(34.05), Some(-118.24));
        let (address, loc) = s.require_searchable().unwrap();
        assert_eq!(address, "1 Main St");
        assert_eq!(loc, GeoPoint::new(34.05, -118.24));
    }

    #[test]
    fn blank_address_is_missing() {
        let s = site(Some("   "), Some(34.05), Some(-118.24));
        assert_eq!(s.require_searchable(), Err(MissingData::Address));
    }

    #[test]
    fn nan_latitude_is_missing() {
        let s = site(Some("1 Main St"), Some(f64::NAN), Some(-118.24));
        assert_eq!(s.require_searchable(), Err(MissingData::Coordinates));
    }

    #[test]
    fn distance_is_left_empty_without_location() {
        let place = CandidatePlace::new("Quick Lube").measured_from(GeoPoint::new(34.05, -118.24));
        assert!(place.distance_miles.is_none());
    }

    #[test]
    fn empty_place_id_is_ignored() {
        let mut place = CandidatePlace::new("Quick Lube");
        place.place_id = Some(String::new());
        assert!(place.id().is_none());
    }
}
