//! HTTP boundary
//!
//! Two JSON endpoints over the pipeline plus static asset serving and
//! permissive CORS. Internal error details are logged here and converted to
//! generic client-facing messages; nothing internal crosses the boundary.

use crate::config::AppConfig;
use crate::error::{CriticError, Result};
use crate::pipeline::Pipeline;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info};

/// Category name used for ad-hoc `/analyze` requests.
const ADHOC_CATEGORY: &str = "Custom Category";

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
}

#[derive(Deserialize)]
struct AnalyzeWebsiteRequest {
    url: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeCssResponse {
    analysis: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

pub fn build_router(pipeline: Arc<Pipeline>, static_dir: &str) -> Router {
    Router::new()
        .route("/analyze-website", post(analyze_website))
        .route("/analyze", post(analyze_css))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(AppState { pipeline })
}

/// Bind and run the server until shutdown.
pub async fn run(config: &AppConfig, pipeline: Arc<Pipeline>) -> Result<()> {
    let app = build_router(pipeline, &config.static_dir);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on port {}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn analyze_website(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeWebsiteRequest>,
) -> Response {
    let Some(url) = request.url.filter(|u| !u.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "URL is required.");
    };

    match state.pipeline.analyze_website(&url).await {
        Ok(result) => Json(result).into_response(),
        Err(CriticError::InvalidUrl(url)) => {
            info!("Rejected invalid URL: {}", url);
            error_response(StatusCode::BAD_REQUEST, "Invalid or missing URL.")
        }
        Err(e) => {
            error!("Error analyzing website {}: {}", url, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error analyzing website.")
        }
    }
}

async fn analyze_css(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    // The body is taken as raw JSON so that a non-string cssData value gets
    // the same 400 as a missing one instead of an extractor rejection.
    let Some(css_data) = body
        .get("cssData")
        .and_then(Value::as_str)
        .filter(|css| !css.is_empty())
    else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid CSS data provided.");
    };

    match state.pipeline.analyze_css(css_data, ADHOC_CATEGORY).await {
        Ok(result) => Json(AnalyzeCssResponse {
            analysis: result.analysis,
        })
        .into_response(),
        Err(e) => {
            error!("Error during CSS analysis: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to analyze the CSS data. Please try again later.",
            )
        }
    }
}
