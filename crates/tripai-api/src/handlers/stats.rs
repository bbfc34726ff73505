use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::info;

use crate::models::StatsResponse;
use crate::state::AppState;

/// Stats Endpoint - corpus and index statistics.
/// partial_coverage is the operator-facing flag that the embedding corpus
/// was capped at build time, so ranking does not see every log.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    info!("Stats request");

    let snapshot = state.engine.snapshot();

    Json(StatsResponse {
        log_count: state.store.log_count(),
        product_count: state.store.product_count(),
        price_count: state.store.price_count(),
        embedded_count: snapshot.len(),
        dimension: snapshot.dimension,
        partial_coverage: snapshot.partial_coverage,
        snapshot_built_at: snapshot.built_at.to_rfc3339(),
    })
}
