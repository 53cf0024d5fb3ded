//! HTTP API routes

use crate::coord::binning::bin_json;
use crate::coord::distance::haversine_km_json;
use crate::coord::numeric_or;
use crate::error::Error;
use crate::heatmap::{available_formats, get_renderer, plot, FormatInfo};
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/distance", post(distance_handler))
        .route("/api/bin", post(bin_handler))
        .route("/api/plot", post(plot_handler))
        .route("/api/formats", get(formats_handler))
        .route("/api/status", get(status_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::NotNumeric { .. } => "NOT_NUMERIC",
            Error::OutOfRange { .. } => "OUT_OF_RANGE",
            Error::InvalidGrid => "INVALID_GRID",
            Error::InvalidBin(_) => "INVALID_BIN",
            Error::EmptyInput => "EMPTY_INPUT",
            Error::InvalidFigure(_) => "INVALID_FIGURE",
            Error::UnknownFormat(_) => "UNKNOWN_FORMAT",
            _ => "INTERNAL_ERROR",
        };
        warn!(code, "rejected request: {}", err);
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Distance request body
///
/// Fields are kept as raw JSON so non-numbers surface as `NOT_NUMERIC`
/// rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    #[serde(default)]
    pub lat1: Value,
    #[serde(default)]
    pub lon1: Value,
    #[serde(default)]
    pub lat2: Value,
    #[serde(default)]
    pub lon2: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
}

/// Great-circle distance endpoint
///
/// POST /api/distance
async fn distance_handler(
    Json(req): Json<DistanceRequest>,
) -> Result<Json<DistanceResponse>, ApiError> {
    let distance_km = haversine_km_json(&req.lat1, &req.lon1, &req.lat2, &req.lon2)?;
    Ok(Json(DistanceResponse { distance_km }))
}

/// Bin request body
#[derive(Debug, Deserialize)]
pub struct BinRequest {
    #[serde(default)]
    pub lat: Value,
    #[serde(default)]
    pub lng: Value,
    pub grid_lat: Option<Value>,
    pub grid_lng: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BinResponse {
    pub bin: String,
}

/// Binning endpoint; omitted grid sizes come from the server config
///
/// POST /api/bin
async fn bin_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BinRequest>,
) -> Result<Json<BinResponse>, ApiError> {
    let grid = state.config.grid();
    let grid_lat = req.grid_lat.unwrap_or_else(|| grid.lat.into());
    let grid_lng = req.grid_lng.unwrap_or_else(|| grid.lng.into());

    let id = bin_json(&req.lat, &req.lng, Some(&grid_lat), Some(&grid_lng))?;
    Ok(Json(BinResponse { bin: id.to_string() }))
}

/// Plot request body
#[derive(Debug, Deserialize)]
pub struct PlotRequest {
    pub bins: Vec<String>,
    pub width: Option<Value>,
    pub height: Option<Value>,
    pub format: Option<String>,
}

/// Heatmap endpoint; responds with the rendered body and its content type
///
/// POST /api/plot
async fn plot_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlotRequest>,
) -> Result<Response, ApiError> {
    let defaults = &state.config.plot;
    let width = numeric_or("width", req.width.as_ref(), defaults.width)?;
    let height = numeric_or("height", req.height.as_ref(), defaults.height)?;
    let format = req.format.unwrap_or_else(|| defaults.format.clone());

    let renderer = get_renderer(&format).ok_or(Error::UnknownFormat(format))?;
    let heatmap = plot(&req.bins, width, height)?;
    let body = renderer.render(&heatmap)?;

    Ok((
        [(header::CONTENT_TYPE, renderer.content_type().to_string())],
        body,
    )
        .into_response())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
    pub default: String,
}

/// List available heatmap formats
///
/// GET /api/formats
async fn formats_handler(State(state): State<Arc<AppState>>) -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
        default: state.config.plot.format.clone(),
    })
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub running: bool,
    pub version: String,
    pub uptime_secs: u64,
    pub grid_lat: f64,
    pub grid_lng: f64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let grid = state.config.grid();
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        grid_lat: grid.lat,
        grid_lng: grid.lng,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn create_test_app() -> Router {
        create_router(Arc::new(AppState::new(Config::default())))
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, body.to_vec())
    }

    async fn expect_error(uri: &str, body: Value, code: &str) -> ApiError {
        let (status, _, body) = post_json(uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, code, "{}", err.error);
        err
    }

    #[tokio::test]
    async fn test_distance_endpoint() {
        let (status, _, body) = post_json(
            "/api/distance",
            json!({"lat1": 40.7128, "lon1": -74.0060, "lat2": 34.0522, "lon2": -118.2437}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let resp: DistanceResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!((resp.distance_km * 100.0).round() / 100.0, 3935.75);
    }

    #[tokio::test]
    async fn test_distance_errors() {
        let err = expect_error(
            "/api/distance",
            json!({"lat1": "40.7128", "lon1": -74.0, "lat2": 34.0, "lon2": -118.0}),
            "NOT_NUMERIC",
        )
        .await;
        assert!(err.error.contains("must be numeric"));

        expect_error("/api/distance", json!({"lat1": 0, "lon1": 0, "lat2": 0}), "NOT_NUMERIC").await;

        let err = expect_error(
            "/api/distance",
            json!({"lat1": 0, "lon1": 0, "lat2": 91, "lon2": 0}),
            "OUT_OF_RANGE",
        )
        .await;
        assert!(err.error.contains("must be between"));
    }

    #[tokio::test]
    async fn test_bin_endpoint() {
        let (status, _, body) = post_json("/api/bin", json!({"lat": 49.2593, "lng": -123.2475})).await;
        assert_eq!(status, StatusCode::OK);
        let resp: BinResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp.bin, "49.25_-123.25");

        let (_, _, body) = post_json(
            "/api/bin",
            json!({"lat": 90.0, "lng": 180.0, "grid_lat": 0.5, "grid_lng": 0.5}),
        )
        .await;
        let resp: BinResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp.bin, "90.0_180.0");
    }

    #[tokio::test]
    async fn test_bin_errors() {
        expect_error("/api/bin", json!({"lat": "49", "lng": -123.0}), "NOT_NUMERIC").await;
        expect_error(
            "/api/bin",
            json!({"lat": 49.0, "lng": -123.0, "grid_lat": "0.01"}),
            "NOT_NUMERIC",
        )
        .await;
        expect_error("/api/bin", json!({"lat": 90.00001, "lng": 0}), "OUT_OF_RANGE").await;
        let err = expect_error(
            "/api/bin",
            json!({"lat": 0, "lng": 0, "grid_lat": 0, "grid_lng": 0.01}),
            "INVALID_GRID",
        )
        .await;
        assert_eq!(err.error, "grid sizes must be > 0");
    }

    #[tokio::test]
    async fn test_plot_endpoint() {
        let (status, content_type, body) = post_json(
            "/api/plot",
            json!({"bins": ["50.00_-100.00", "50.00_-100.00", "50.00_-100.00"], "format": "json"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));

        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["counts"], json!([[3]]));
    }

    #[tokio::test]
    async fn test_plot_default_svg() {
        let (status, content_type, body) =
            post_json("/api/plot", json!({"bins": ["49.25_-123.25"], "width": 15, "height": 8})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("image/svg+xml"));

        let svg = String::from_utf8(body).unwrap();
        assert!(svg.contains(r#"width="1500" height="800""#));
    }

    #[tokio::test]
    async fn test_plot_errors() {
        expect_error("/api/plot", json!({"bins": []}), "EMPTY_INPUT").await;
        expect_error("/api/plot", json!({"bins": ["nope"]}), "INVALID_BIN").await;
        expect_error("/api/plot", json!({"bins": ["1.0_2.0"], "format": "png"}), "UNKNOWN_FORMAT").await;
        expect_error("/api/plot", json!({"bins": ["1.0_2.0"], "width": "wide"}), "NOT_NUMERIC").await;
        expect_error("/api/plot", json!({"bins": ["1.0_2.0"], "height": 0}), "INVALID_FIGURE").await;
    }

    #[tokio::test]
    async fn test_formats_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/formats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let formats: FormatsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(formats.formats.len(), 3);
        assert_eq!(formats.default, "svg");
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let status: StatusResponse = serde_json::from_slice(&body).unwrap();
        assert!(status.running);
        assert_eq!(status.grid_lat, 0.01);
    }
}
