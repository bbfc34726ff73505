// TripAI Recommendation Engine - semantic travel product matching over historical logs

pub mod aggregator;
pub mod assembler;
pub mod embedder;
pub mod engine;
pub mod groq_client;
pub mod llm_client;
pub mod ranker;
pub mod report;
pub mod snapshot;
pub mod store;

pub use aggregator::{rank_products, ProductScore};
pub use assembler::assemble;
pub use embedder::{EmbedError, Embedder, FastembedEmbedder};
pub use engine::{LlmProvider, Recommendation, RecommendConfig, RecommendEngine, RecommendError};
pub use groq_client::GroqClient;
pub use llm_client::{LlmClient, LlmError, OllamaClient};
pub use ranker::{top_k, RankError};
pub use report::{ReportError, ReportGenerator};
pub use snapshot::{EmbeddingSnapshot, SnapshotError, SnapshotStore};
pub use store::{MemoryStore, ProductWithPrices, StoreError, TravelStore};
