//! Google Places / Static Maps access and the on-disk image asset cache.

pub mod assets;
pub mod client;
pub mod error;
pub mod types;

pub use assets::{sanitize_path_segment, AssetCache};
pub use client::{GoogleMapsClient, ImageSource, NearbySearch};
pub use error::MapsError;
pub use types::{NearbyQuery, RankPreference, MAX_RADIUS_METERS, METERS_PER_MILE};
