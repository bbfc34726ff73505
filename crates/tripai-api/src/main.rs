// TripAI API - travel product recommendation service for kiosks

mod dataset;
mod handlers;
mod models;
mod state;

use axum::{
    Router,
    routing::{get, post},
};
use std::env;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tripai_recommend::{
    Embedder, FastembedEmbedder, LlmProvider, RecommendConfig, RecommendEngine, SnapshotStore,
    TravelStore,
};

use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    //logging setup
    tracing_subscriber::fmt::init();

    // Load dataset into the in-memory store
    let data_dir = env::var("TRIPAI_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    info!("Loading dataset from {}...", data_dir);
    let store = Arc::new(dataset::load_dir(Path::new(&data_dir))?);
    info!(
        logs = store.log_count(),
        products = store.product_count(),
        prices = store.price_count(),
        "Dataset loaded"
    );

    // Load embedding model
    info!("Loading embedding model...");
    let embedder: Arc<dyn Embedder> = Arc::new(FastembedEmbedder::try_default()?);
    info!("Model loaded!");

    // Engine configuration from environment
    let mut config = RecommendConfig::default();
    if let Ok(cap) = env::var("TRIPAI_MAX_EMBED_LOGS") {
        config.max_embed_logs = cap.parse().ok();
    }
    match env::var("TRIPAI_REPORT_PROVIDER").as_deref() {
        Ok("groq") => config.provider = LlmProvider::Groq,
        Ok("none") => config.generate_report = false,
        _ => {} // ollama default
    }

    // Load-or-build the embedding snapshot BEFORE accepting traffic.
    // Absent -> one-time build; corrupt -> fatal, the service cannot rank.
    let snapshot_path =
        env::var("TRIPAI_SNAPSHOT_PATH").unwrap_or_else(|_| "embeddings.json".to_string());
    info!("Loading embedding snapshot from {}...", snapshot_path);
    let snapshots = SnapshotStore::new(&snapshot_path);
    let snapshot = snapshots
        .ensure_loaded(store.as_ref(), embedder.as_ref(), config.max_embed_logs)
        .await?;
    info!(embedded = snapshot.len(), "Snapshot ready!");

    // Setup recommendation engine
    let store_handle: Arc<dyn TravelStore> = store.clone();
    let engine = RecommendEngine::new(config, store_handle, embedder, snapshot)?;
    info!("Recommendation engine ready!");

    let app_state = Arc::new(AppState { engine, store });

    //routes - the kiosk frontend runs on another origin, allow all
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/recommend", post(handlers::recommend))
        .route("/api/stats", get(handlers::get_stats))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Server start
    let addr = env::var("TRIPAI_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
