use std::sync::Arc;
use tripai_recommend::{MemoryStore, RecommendEngine};

// App state - Shared across handlers.
// The engine owns the loaded snapshot and the embedding provider; the store
// handle is kept alongside for the stats surface.
pub struct AppState {
    pub engine: RecommendEngine,
    pub store: Arc<MemoryStore>,
}
