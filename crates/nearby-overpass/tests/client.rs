//! Integration tests for `OverpassClient` using wiremock HTTP mocks.
//!
//! The scenario tests at the bottom drive a full `DiscoverySession` against
//! the mock interpreter, so no real network traffic is made.

use std::cell::Cell;
use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use nearby_core::{
    Coordinate, DiscoverySession, GeoFailure, ListProjection, ListRow, LocationProvider,
    MapProjection, MemoryStorage, PermissionState, PlaceId, PlaceSummary, PositionOptions, RawFix,
    ViewState,
};
use nearby_overpass::{OverpassClient, OverpassError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> OverpassClient {
    OverpassClient::with_endpoint(&format!("{}/api/interpreter", server.uri()), 5, "nearby-test/0.1")
        .expect("client construction should not fail")
}

fn zocalo() -> Coordinate {
    Coordinate::new(19.4326, -99.1332).unwrap()
}

/// Three named elements and two unnamed ones, interleaved.
fn mixed_elements() -> serde_json::Value {
    json!({
        "version": 0.6,
        "generator": "Overpass API",
        "elements": [
            { "type": "node", "id": 101, "lat": 19.4330, "lon": -99.1330,
              "tags": { "amenity": "restaurant", "name": "Café de Tacuba", "cuisine": "mexican" } },
            { "type": "node", "id": 102, "lat": 19.4331, "lon": -99.1335,
              "tags": { "amenity": "fast_food" } },
            { "type": "node", "id": 103, "lat": 19.4340, "lon": -99.1340,
              "tags": { "amenity": "bar", "name": "La Opera" } },
            { "type": "node", "id": 104, "lat": 19.4310, "lon": -99.1320,
              "tags": { "amenity": "cafe" } },
            { "type": "node", "id": 105, "lat": 19.4320, "lon": -99.1310,
              "tags": { "amenity": "pub", "name": "El Gallo de Oro",
                        "addr:street": "Venustiano Carranza", "addr:housenumber": "35" } }
        ]
    })
}

#[tokio::test]
async fn fetch_nearby_posts_query_and_filters_unnamed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(header("content-type", "text/plain; charset=utf-8"))
        .and(body_string_contains("(around:2000,19.4326,-99.1332)"))
        .and(body_string_contains("fast_food|restaurant|cafe|bar|pub"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed_elements()))
        .expect(1)
        .mount(&server)
        .await;

    let places = test_client(&server)
        .fetch_nearby(zocalo(), 2000)
        .await
        .expect("should parse elements");

    let ids: Vec<_> = places.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["101", "103", "105"]);
    assert_eq!(places[0].name(), Some("Café de Tacuba"));
    assert_eq!(
        places[2].summary().address.as_deref(),
        Some("Venustiano Carranza 35")
    );
}

#[tokio::test]
async fn fetch_nearby_empty_elements() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "elements": [] })))
        .mount(&server)
        .await;

    let places = test_client(&server).fetch_nearby(zocalo(), 2000).await.unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn fetch_nearby_non_success_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(504).set_body_string("Gateway Timeout"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_nearby(zocalo(), 2000)
        .await
        .unwrap_err();
    assert!(
        matches!(err, OverpassError::UnexpectedStatus { status: 504, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn fetch_nearby_rate_limited_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_nearby(zocalo(), 2000)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OverpassError::UnexpectedStatus { status: 429, .. }
    ));
}

#[tokio::test]
async fn fetch_nearby_malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_nearby(zocalo(), 2000)
        .await
        .unwrap_err();
    assert!(matches!(err, OverpassError::Deserialize { .. }), "got {err:?}");
}

// ---------------------------------------------------------------------------
// Session scenarios against the mock interpreter
// ---------------------------------------------------------------------------

struct FixedProvider {
    fix: Result<RawFix, GeoFailure>,
    permission: Option<PermissionState>,
    calls: Cell<u32>,
}

impl FixedProvider {
    fn at(c: Coordinate) -> Self {
        Self {
            fix: Ok(RawFix {
                latitude: c.lat,
                longitude: c.lng,
            }),
            permission: Some(PermissionState::Granted),
            calls: Cell::new(0),
        }
    }
}

impl LocationProvider for FixedProvider {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<RawFix, GeoFailure> {
        self.calls.set(self.calls.get() + 1);
        self.fix.clone()
    }

    async fn permission_state(&self) -> Option<PermissionState> {
        self.permission
    }
}

#[derive(Default)]
struct Markers(HashSet<PlaceId>);

impl MapProjection for Markers {
    fn add_marker(&mut self, id: &PlaceId, _coordinate: Coordinate, _content: &PlaceSummary) {
        self.0.insert(id.clone());
    }

    fn remove_all_markers(&mut self) {
        self.0.clear();
    }

    fn focus(&mut self, _coordinate: Coordinate, _zoom: u8) {}

    fn open_detail(&mut self, _id: &PlaceId) {}

    fn close_detail(&mut self, _id: &PlaceId) {}
}

#[derive(Default)]
struct Rows(Vec<ListRow>);

impl ListProjection for Rows {
    fn render_rows(&mut self, rows: &[ListRow]) {
        self.0 = rows.to_vec();
    }

    fn highlight_row(&mut self, _id: &PlaceId) {}

    fn unhighlight_row(&mut self, _id: &PlaceId) {}

    fn scroll_row_into_view(&mut self, _id: &PlaceId) {}
}

type Session = DiscoverySession<FixedProvider, OverpassClient, MemoryStorage, Markers, Rows>;

fn session(server: &MockServer, provider: FixedProvider) -> Session {
    DiscoverySession::new(
        provider,
        test_client(server),
        MemoryStorage::default(),
        Markers::default(),
        Rows::default(),
    )
}

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[tokio::test]
async fn scenario_three_named_of_five() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed_elements()))
        .mount(&server)
        .await;

    let mut session = session(&server, FixedProvider::at(zocalo()));
    let count = session.discover_at(t0()).await.unwrap();

    assert_eq!(count, 3);
    assert_eq!(session.places().len(), 3);
    assert_eq!(session.sync().list().0.len(), 3);
    assert_eq!(session.sync().map().0.len(), 3);
    assert_eq!(session.status_line(), "3 found");
}

#[tokio::test]
async fn scenario_cache_hit_after_four_minutes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed_elements()))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session(&server, FixedProvider::at(zocalo()));
    session.discover_at(t0()).await.unwrap();
    let first = session.places().to_vec();

    session
        .discover_at(t0() + TimeDelta::minutes(4))
        .await
        .unwrap();

    assert_eq!(session.places(), first.as_slice());
    // `expect(1)` is verified when the server drops.
}

#[tokio::test]
async fn scenario_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "elements": [] })))
        .mount(&server)
        .await;

    let mut session = session(&server, FixedProvider::at(zocalo()));
    session.discover_at(t0()).await.unwrap();

    assert!(session.places().is_empty());
    assert_eq!(session.state(), &ViewState::Empty);
    assert_eq!(session.status_line(), "No places found nearby");
}

#[tokio::test]
async fn scenario_server_error_then_manual_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("(around:2000,19.4326,-99.1332)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed_elements()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = FixedProvider::at(zocalo());
    let mut session = session(&server, provider);

    assert!(session.discover_at(t0()).await.is_err());
    assert!(matches!(
        session.state(),
        ViewState::Failed {
            retryable: true,
            ..
        }
    ));

    let count = session
        .retry_at(t0() + TimeDelta::seconds(10))
        .await
        .unwrap();
    assert_eq!(count, 3);
}
