//! HTTP API routes
//!
//! Defines all REST API endpoints for the server. Every endpoint accepts
//! cross-origin requests from any origin.

use crate::error::Error;
use crate::gateway::PointOfInterest;
use crate::geo::Coordinates;
use crate::safety::SafetyAssessment;
use crate::server::state::AppState;
use crate::tracking::LocationReport;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/calculate_score", post(calculate_score_handler))
        .route("/track", post(track_handler))
        .route("/get_nearby_attractions", post(nearby_attractions_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Safety check request body
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// When both destination fields are set, the destination is scored
    pub destination_lat: Option<f64>,
    pub destination_lon: Option<f64>,
}

/// Location report request body
#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    pub tourist_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub destination_lat: Option<f64>,
    pub destination_lon: Option<f64>,
}

/// Attraction search request body
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Location report response
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackResponse {
    pub status: String,
    pub anomalies: Vec<String>,
}

/// API error body, shared by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

/// API error response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::InvalidCoordinates(_) => (StatusCode::BAD_REQUEST, "INVALID_COORDINATES"),
            Error::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            Error::MissingCredential("poi") => (StatusCode::SERVICE_UNAVAILABLE, "POI_UNAVAILABLE"),
            Error::MissingCredential(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        if status.is_server_error() {
            warn!(error = %err, code, "Request failed");
        }
        ApiError {
            status,
            body: ErrorBody {
                error: err.to_string(),
                code: code.to_string(),
            },
        }
    }
}

/// Validate a position and an optional destination
fn parse_coordinates(
    latitude: f64,
    longitude: f64,
    destination_lat: Option<f64>,
    destination_lon: Option<f64>,
) -> Result<(Coordinates, Option<Coordinates>), Error> {
    let position = Coordinates::new(latitude, longitude);
    position.validate()?;

    let destination = Coordinates::from_parts(destination_lat, destination_lon);
    if let Some(destination) = &destination {
        destination.validate()?;
    }

    Ok((position, destination))
}

/// Score the safety of a location
///
/// POST /calculate_score
async fn calculate_score_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<SafetyAssessment>, ApiError> {
    let (position, destination) = parse_coordinates(
        req.latitude,
        req.longitude,
        req.destination_lat,
        req.destination_lon,
    )?;

    Ok(Json(state.scorer.assess_now(position, destination).await))
}

/// Record a tourist's location and report anomalies
///
/// POST /track
///
/// A staleness sweep is spawned once the response is ready.
async fn track_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrackRequest>,
) -> Result<Json<TrackResponse>, ApiError> {
    if req.tourist_id.trim().is_empty() {
        return Err(Error::InvalidRequest("tourist_id must not be empty".to_string()).into());
    }

    let (position, destination) = parse_coordinates(
        req.latitude,
        req.longitude,
        req.destination_lat,
        req.destination_lon,
    )?;

    let report = LocationReport {
        tourist_id: req.tourist_id,
        position,
        destination,
    };

    let anomalies = state.tracker.report(&report, Utc::now()).await?;

    let response = TrackResponse {
        status: "location updated".to_string(),
        anomalies: anomalies.iter().map(ToString::to_string).collect(),
    };

    let tracker = Arc::clone(&state.tracker);
    tokio::spawn(async move {
        if let Err(e) = tracker.sweep(Utc::now()).await {
            warn!(error = %e, "Staleness sweep failed");
        }
    });

    Ok(Json(response))
}

/// Find attractions near a location
///
/// POST /get_nearby_attractions
async fn nearby_attractions_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NearbyRequest>,
) -> Result<Json<Vec<PointOfInterest>>, ApiError> {
    let (position, _) = parse_coordinates(req.latitude, req.longitude, None, None)?;

    Ok(Json(state.attractions.nearby(position).await?))
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub running: bool,
    pub version: String,
    pub uptime_secs: u64,
    pub tracked_tourists: usize,
    pub weather_configured: bool,
    pub poi_configured: bool,
}

/// Server health endpoint
///
/// GET /health
async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        tracked_tourists: state.tracker.tracked_count()?,
        weather_configured: state.scorer.weather_configured(),
        poi_configured: state.attractions.is_configured(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gateway::fixtures::{poi, FixedWeather, FixturePoi};
    use crate::tracking::{MemoryStore, StateStore, TouristRecord};
    use axum::body::{Body, Bytes};
    use axum::http::{header, Request, StatusCode};
    use chrono::Duration;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn create_test_state(weather: FixedWeather, poi: FixturePoi) -> (Arc<AppState>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_parts(
            &Config::default(),
            Arc::new(weather),
            Arc::new(poi),
            store.clone(),
        )
        .unwrap();
        (Arc::new(state), store)
    }

    fn default_state() -> (Arc<AppState>, Arc<MemoryStore>) {
        create_test_state(FixedWeather::unavailable(), FixturePoi::default())
    }

    async fn post_json(
        state: &Arc<AppState>,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, Bytes) {
        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    #[tokio::test]
    async fn test_calculate_score_without_weather() {
        let (state, _) = default_state();

        let (status, body) = post_json(
            &state,
            "/calculate_score",
            serde_json::json!({"latitude": 15.49, "longitude": 73.82}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let assessment: SafetyAssessment = serde_json::from_slice(&body).unwrap();
        assert_eq!(assessment.district, "N/A");
        assert!(assessment.score == 100 || assessment.score == 70);
        assert!(assessment.reasons.len() <= 1);
    }

    #[tokio::test]
    async fn test_calculate_score_with_weather() {
        let (state, _) =
            create_test_state(FixedWeather::report("Thunderstorm", 30.0, "Mumbai"), FixturePoi::default());

        let (status, body) = post_json(
            &state,
            "/calculate_score",
            serde_json::json!({
                "latitude": 19.07,
                "longitude": 72.87,
                "destination_lat": 19.10,
                "destination_lon": 72.90
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["district"], "Mumbai");
        assert_eq!(json["reasons"][0], "Adverse weather predicted: Thunderstorm.");
        let score = json["score"].as_u64().unwrap();
        assert!(score == 75 || score == 45);
    }

    #[tokio::test]
    async fn test_calculate_score_invalid_coordinates() {
        let (state, _) = default_state();

        let (status, body) = post_json(
            &state,
            "/calculate_score",
            serde_json::json!({"latitude": 91.0, "longitude": 0.0}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_calculate_score_rejects_malformed_body() {
        let (state, _) = default_state();

        let (status, _) = post_json(
            &state,
            "/calculate_score",
            serde_json::json!({"latitude": "north"}),
        )
        .await;

        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_track_first_report() {
        let (state, store) = default_state();

        let (status, body) = post_json(
            &state,
            "/track",
            serde_json::json!({"tourist_id": "t-100", "latitude": 27.17, "longitude": 78.04}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: TrackResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.status, "location updated");
        assert!(response.anomalies.is_empty());
        assert!(store.get("t-100").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_track_reports_inactivity() {
        let (state, store) = default_state();
        store
            .put(
                "t-7",
                TouristRecord {
                    position: Coordinates::new(27.17, 78.04),
                    timestamp: Utc::now() - Duration::minutes(25),
                    destination: None,
                },
            )
            .unwrap();

        let (status, body) = post_json(
            &state,
            "/track",
            serde_json::json!({"tourist_id": "t-7", "latitude": 27.17, "longitude": 78.04}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: TrackResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            response.anomalies,
            vec!["Prolonged inactivity detected for tourist t-7.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_track_rejects_blank_id() {
        let (state, _) = default_state();

        let (status, body) = post_json(
            &state,
            "/track",
            serde_json::json!({"tourist_id": "  ", "latitude": 0.0, "longitude": 0.0}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_track_keys_on_exact_id() {
        let (state, store) = default_state();

        for id in ["t1", " t1 "] {
            let (status, _) = post_json(
                &state,
                "/track",
                serde_json::json!({"tourist_id": id, "latitude": 27.17, "longitude": 78.04}),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        assert_eq!(store.len().unwrap(), 2);
        assert!(store.get("t1").unwrap().is_some());
        assert!(store.get(" t1 ").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_track_triggers_sweep() {
        let (state, store) = default_state();
        store
            .put(
                "gone",
                TouristRecord {
                    position: Coordinates::new(0.0, 0.0),
                    timestamp: Utc::now() - Duration::minutes(16),
                    destination: None,
                },
            )
            .unwrap();

        let (status, _) = post_json(
            &state,
            "/track",
            serde_json::json!({"tourist_id": "active", "latitude": 1.0, "longitude": 1.0}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let mut removed = false;
        for _ in 0..100 {
            if store.get("gone").unwrap().is_none() {
                removed = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        assert!(removed, "stale record was not swept");
        assert!(store.get("active").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_nearby_attractions() {
        let poi_gateway = FixturePoi::new()
            .with("park", vec![poi("Nehru Park", 900.0), poi("Lodhi Garden", 1500.0)])
            .with("garden", vec![poi("Lodhi Garden", 100.0)])
            .with("monument", vec![poi("India Gate", 300.0)]);
        let (state, _) = create_test_state(FixedWeather::unavailable(), poi_gateway);

        let (status, body) = post_json(
            &state,
            "/get_nearby_attractions",
            serde_json::json!({"latitude": 28.61, "longitude": 77.21}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let pois: Vec<PointOfInterest> = serde_json::from_slice(&body).unwrap();
        let names: Vec<&str> = pois.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["India Gate", "Nehru Park", "Lodhi Garden"]);
        assert_eq!(pois[2].distance, Some(1500.0));
    }

    #[tokio::test]
    async fn test_nearby_attractions_without_key() {
        let (state, _) = default_state();

        let (status, body) = post_json(
            &state,
            "/get_nearby_attractions",
            serde_json::json!({"latitude": 28.61, "longitude": 77.21}),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let err: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "POI_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (state, store) = default_state();
        store
            .put(
                "t-1",
                TouristRecord {
                    position: Coordinates::new(0.0, 0.0),
                    timestamp: Utc::now(),
                    destination: None,
                },
            )
            .unwrap();

        let response = create_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();

        assert!(health.running);
        assert_eq!(health.tracked_tourists, 1);
        assert!(!health.weather_configured);
        assert!(!health.poi_configured);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let (state, _) = default_state();

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/track")
                    .header(header::ORIGIN, "http://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
