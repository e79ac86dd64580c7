//! Integration tests for `GoogleMapsClient` using wiremock HTTP mocks.

use std::time::Duration;

use washscout_core::{GeoPoint, RetryPolicy};
use washscout_maps::{GoogleMapsClient, ImageSource, MapsError, NearbyQuery, NearbySearch};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GoogleMapsClient {
    GoogleMapsClient::with_base_urls("test-key", 30, "washscout-test", base_url, base_url)
        .expect("client construction should not fail")
        .with_retry(RetryPolicy {
            max_attempts: 3,
            backoff_base: Duration::ZERO,
            attempt_timeout: None,
        })
}

fn query() -> NearbyQuery {
    NearbyQuery::car_washes(GeoPoint::new(34.05, -118.24), 1.0, 20)
}

#[tokio::test]
async fn search_nearby_returns_parsed_places() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "places": [
            {
                "id": "origin",
                "displayName": { "text": "Our Own Wash", "languageCode": "en" },
                "location": { "latitude": 34.05, "longitude": -118.24 }
            },
            {
                "id": "ChIJ-mister",
                "displayName": { "text": "Mister Car Wash", "languageCode": "en" },
                "location": { "latitude": 34.06, "longitude": -118.25 },
                "rating": 4.4,
                "userRatingCount": 812
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(header("X-Goog-Api-Key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "includedTypes": ["car_wash"],
            "rankPreference": "DISTANCE",
            "maxResultCount": 20
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let places = test_client(&server.uri())
        .search_nearby(&query())
        .await
        .expect("should parse places");

    assert_eq!(places.len(), 2);
    assert_eq!(places[1].name, "Mister Car Wash");
    assert_eq!(places[1].id(), Some("ChIJ-mister"));
    assert_eq!(places[1].rating, Some(4.4));
    assert_eq!(places[1].rating_count, Some(812));
    assert_eq!(places[1].location, Some(GeoPoint::new(34.06, -118.25)));
    assert!(places[1].distance_miles.is_none());
}

#[tokio::test]
async fn empty_response_means_no_places() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let places = test_client(&server.uri())
        .search_nearby(&query())
        .await
        .expect("empty body is a valid response");
    assert!(places.is_empty());
}

#[tokio::test]
async fn server_error_is_retried_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .search_nearby(&query())
        .await
        .unwrap_err();
    assert!(matches!(err, MapsError::Status { status: 503, .. }));
}

#[tokio::test]
async fn forbidden_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .search_nearby(&query())
        .await
        .unwrap_err();
    assert!(matches!(err, MapsError::Status { status: 403, .. }));
}

#[tokio::test]
async fn out_of_range_radius_never_reaches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut q = query();
    q.radius_miles = 40.0;
    let err = test_client(&server.uri()).search_nearby(&q).await.unwrap_err();
    assert!(matches!(err, MapsError::InvalidQuery(_)));
}

#[tokio::test]
async fn photo_references_lists_photo_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/places/abc"))
        .and(header("X-Goog-FieldMask", "id,displayName,photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "abc",
            "displayName": { "text": "Quick Lube" },
            "photos": [
                { "name": "places/abc/photos/p1", "widthPx": 800 },
                { "name": "places/abc/photos/p2", "widthPx": 800 }
            ]
        })))
        .mount(&server)
        .await;

    let refs = test_client(&server.uri())
        .photo_references("abc")
        .await
        .expect("should parse photos");
    assert_eq!(refs, vec!["places/abc/photos/p1", "places/abc/photos/p2"]);
}

#[tokio::test]
async fn place_without_photos_has_no_references() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/places/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "abc",
            "displayName": { "text": "Quick Lube" }
        })))
        .mount(&server)
        .await;

    let refs = test_client(&server.uri()).photo_references("abc").await.unwrap();
    assert!(refs.is_empty());
}

#[tokio::test]
async fn photo_media_returns_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/places/abc/photos/p1/media"))
        .and(query_param("maxHeightPx", "800"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg-bytes".to_vec()))
        .mount(&server)
        .await;

    let bytes = test_client(&server.uri())
        .photo_media("places/abc/photos/p1")
        .await
        .unwrap();
    assert_eq!(bytes, b"jpeg-bytes");
}

#[tokio::test]
async fn satellite_tile_requests_hybrid_zoom_20() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/staticmap"))
        .and(query_param("center", "34.05,-118.24"))
        .and(query_param("zoom", "20"))
        .and(query_param("size", "640x640"))
        .and(query_param("maptype", "hybrid"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"tile".to_vec()))
        .mount(&server)
        .await;

    let bytes = test_client(&server.uri())
        .satellite_tile(GeoPoint::new(34.05, -118.24))
        .await
        .unwrap();
    assert_eq!(bytes, b"tile");
}

#[tokio::test]
async fn satellite_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/staticmap"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .satellite_tile(GeoPoint::new(34.05, -118.24))
        .await
        .unwrap_err();
    assert!(matches!(err, MapsError::Status { status: 500, .. }));
}
