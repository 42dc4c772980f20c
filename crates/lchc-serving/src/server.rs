//! HTTP surface of the prediction service.
//!
//! Routes:
//!
//! - `GET /predict?size_m2=&location=&budget_level=` -- material and cost
//!   prediction as JSON.
//!
//! Bad parameters answer `400` with a fixed error body; everything else
//! that goes wrong answers `500` with the error message.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tracing::{error, info};

use crate::error::{Result, ServingError};
use crate::predictor::{predict, PredictRequest};

/// Shared state for request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directory the model bundle is loaded from on each request.
    pub model_dir: PathBuf,
}

impl AppState {
    /// Create state pointing at a bundle directory.
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
        }
    }
}

impl IntoResponse for ServingError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid or missing parameters" })),
            )
                .into_response()
        } else {
            error!(error = %self, "Prediction request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response()
        }
    }
}

/// Build the service router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/predict", get(predict_handler))
        .with_state(state)
}

async fn predict_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<crate::predictor::Prediction>> {
    let request = PredictRequest::from_parts(
        params.get("size_m2").map(String::as_str),
        params.get("location").map(String::as_str),
        params.get("budget_level").map(String::as_str),
    )?;
    let prediction = predict(&state.model_dir, &request)?;
    Ok(Json(prediction))
}

/// Bind `addr` and serve predictions until the task is cancelled.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state.clone());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %addr,
        model_dir = %state.model_dir.display(),
        "Prediction service listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
