use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use tripai_recommend::RecommendError;

use crate::models::{RecommendRequest, RecommendResponse};
use crate::state::AppState;

/// Recommend Endpoint
// Handler: POST /api/recommend
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, (StatusCode, String)> {
    let start = Instant::now();
    info!(region = %req.region, days = req.days, "Recommend request");

    let query = req.into_query();
    let outcome = state.engine.recommend(&query).await.map_err(error_status)?;

    let elapsed = start.elapsed().as_millis();
    info!(
        products = outcome.products.len(),
        has_report = outcome.report.is_some(),
        time_ms = elapsed,
        "Recommend complete"
    );

    Ok(Json(RecommendResponse::from(outcome)))
}

// upstream collaborator failures are transient (502), everything else is on us
fn error_status(e: RecommendError) -> (StatusCode, String) {
    let status = match &e {
        RecommendError::Embed(_) | RecommendError::Report(_) | RecommendError::Groq(_) => {
            StatusCode::BAD_GATEWAY
        }
        RecommendError::Rank(_) | RecommendError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}
