// Recommendation engine
// Orchestrates: Intent sentence -> Embed -> Top-K similarity -> Row lookup
//               -> Region filter + aggregate -> Assemble -> Report
//
// Built once at startup with its snapshot and collaborators, then passed
// into handlers - no process-wide state.

use crate::aggregator;
use crate::assembler;
use crate::embedder::{EmbedError, Embedder};
use crate::groq_client::{GroqClient, GroqError};
use crate::llm_client::{LlmClient, OllamaClient};
use crate::ranker::{self, RankError};
use crate::report::{ReportError, ReportGenerator};
use crate::snapshot::EmbeddingSnapshot;
use crate::store::{StoreError, TravelStore};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tripai_core::format::intent_sentence;
use tripai_core::{RankedProduct, RecommendationQuery};

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Embedding error: {0}")]
    Embed(#[from] EmbedError),

    #[error("Ranking error: {0}")]
    Rank(#[from] RankError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Groq error: {0}")]
    Groq(#[from] GroqError),
}

/// LLM provider selection for report generation
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LlmProvider {
    #[default]
    Ollama,
    Groq,
}

// engine configuration
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// how many historical logs similarity search keeps
    pub top_k: usize,
    /// how many products the final ranking returns
    pub top_products: usize,
    /// optional cap on how many logs get embedded at build time.
    /// Capping silently excludes logs from ranking - coverage is partial.
    pub max_embed_logs: Option<usize>,
    pub generate_report: bool,
    pub provider: LlmProvider,
    pub ollama_url: String,
    pub ollama_model: String,
    pub groq_model: String,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_k: 50,
            top_products: 5,
            max_embed_logs: None,
            generate_report: true,
            provider: LlmProvider::Ollama,
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "qwen3:8b".to_string(),
            groq_model: "llama-3.3-70b-versatile".to_string(),
        }
    }
}

impl RecommendConfig {
    /// Create config for Groq provider
    pub fn with_groq() -> Self {
        Self {
            provider: LlmProvider::Groq,
            ..Default::default()
        }
    }

    /// Create config with report generation disabled
    pub fn without_report() -> Self {
        Self {
            generate_report: false,
            ..Default::default()
        }
    }
}

// recommendation response with products and optional report
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub products: Vec<RankedProduct>,
    pub report: Option<String>,
}

// main recommendation engine
pub struct RecommendEngine {
    config: RecommendConfig,
    store: Arc<dyn TravelStore>,
    embedder: Arc<dyn Embedder>,
    snapshot: EmbeddingSnapshot,
    reporter: Option<ReportGenerator>,
}

impl RecommendEngine {
    pub fn new(
        config: RecommendConfig,
        store: Arc<dyn TravelStore>,
        embedder: Arc<dyn Embedder>,
        snapshot: EmbeddingSnapshot,
    ) -> Result<Self, RecommendError> {
        let reporter = if config.generate_report {
            let client: Box<dyn LlmClient> = match &config.provider {
                LlmProvider::Ollama => Box::new(OllamaClient::new(
                    &config.ollama_url,
                    &config.ollama_model,
                )),
                LlmProvider::Groq => Box::new(GroqClient::from_env(&config.groq_model)?),
            };
            Some(ReportGenerator::new(client))
        } else {
            None
        };

        Ok(Self {
            config,
            store,
            embedder,
            snapshot,
            reporter,
        })
    }

    pub fn snapshot(&self) -> &EmbeddingSnapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    // process one kiosk query end to end
    pub async fn recommend(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Recommendation, RecommendError> {
        // Step 1: render the intent sentence and embed it
        let text = intent_sentence(query);
        let query_vector = self.embedder.embed(&text).await?;

        // Step 2: top-K similar historical logs
        let trip_ids = ranker::top_k(&query_vector, &self.snapshot, self.config.top_k)?;
        info!(candidates = trip_ids.len(), "Similar logs ranked");

        // Step 3: fetch the matched rows
        let logs = self.store.get_logs_by_ids(&trip_ids).await?;

        // Step 4: region filter + per-product satisfaction ranking.
        // The filter runs AFTER similarity narrowed to top-K, so a sparse
        // region can come back empty even when matching logs exist outside
        // the window.
        let ranked =
            aggregator::rank_products(&logs, &query.region, self.config.top_products);

        if ranked.is_empty() {
            info!(region = %query.region, "No logs left after region filter - empty recommendation");
            return Ok(Recommendation {
                products: Vec::new(),
                report: None,
            });
        }

        // Step 5: nested product/option/price output
        let products = assembler::assemble(&ranked, self.store.as_ref()).await?;
        info!(products = products.len(), "Products assembled");

        // Step 6: optional report over the assembled list
        let report = match &self.reporter {
            Some(reporter) if !products.is_empty() => {
                let report = reporter.generate(&products).await?;
                info!(provider = reporter.provider(), "Report generated");
                Some(report)
            }
            _ => None,
        };

        Ok(Recommendation { products, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::Utc;
    use tripai_core::{PriceOption, Product, TravelLog};

    /// Always returns the same unit vector - the test controls ranking
    /// through the snapshot vectors instead
    struct FixedEmbedder(Vec<f32>);

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
            Ok(self.0.clone())
        }

        fn provider(&self) -> &str {
            "fixed"
        }
    }

    fn log(trip_id: &str, place: &str, product_id: &str, score: Option<f64>) -> TravelLog {
        TravelLog {
            trip_id: trip_id.to_string(),
            place: place.to_string(),
            days: "2".to_string(),
            companion_relation: "친구".to_string(),
            companion_age_group: "20대".to_string(),
            gender: "여성".to_string(),
            age: "20".to_string(),
            product_id: product_id.to_string(),
            satisfaction_score: score,
            category: "맛집".to_string(),
        }
    }

    fn query(region: &str) -> RecommendationQuery {
        RecommendationQuery {
            region: region.to_string(),
            categories: vec!["맛집".to_string()],
            gender: "여성".to_string(),
            age: "20".to_string(),
            days: 2,
            companion_relations: vec!["친구".to_string()],
            companion_age_groups: vec!["20대".to_string()],
        }
    }

    /// 3 logs: two Seoul rows on P1 (scores 5 and 3), one Busan row on P2.
    /// The Seoul rows are the top-2 by similarity.
    fn fixture() -> (MemoryStore, EmbeddingSnapshot) {
        let store = MemoryStore::new(
            vec![
                log("T1", "서울", "P1", Some(5.0)),
                log("T2", "서울", "P1", Some(3.0)),
                log("T3", "부산", "P2", Some(5.0)),
            ],
            vec![
                Product {
                    product_id: "P1".to_string(),
                    region: "서울".to_string(),
                    product_name: "시티투어".to_string(),
                    place_type: "투어".to_string(),
                    category: "관광".to_string(),
                },
                Product {
                    product_id: "P2".to_string(),
                    region: "부산".to_string(),
                    product_name: "해변투어".to_string(),
                    place_type: "투어".to_string(),
                    category: "관광".to_string(),
                },
            ],
            vec![PriceOption {
                product_id: "P1".to_string(),
                option_name: "성인권".to_string(),
                option_name_en: String::new(),
                age_type: "성인".to_string(),
                price_text: "20,000원".to_string(),
            }],
        );

        let snapshot = EmbeddingSnapshot {
            trip_ids: vec!["T1".to_string(), "T2".to_string(), "T3".to_string()],
            texts: vec!["t1".to_string(), "t2".to_string(), "t3".to_string()],
            vectors: vec![
                vec![1.0, 0.0, 0.0],
                vec![0.98, 0.199, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
            dimension: 3,
            built_at: Utc::now(),
            partial_coverage: false,
        };

        (store, snapshot)
    }

    fn engine(store: MemoryStore, snapshot: EmbeddingSnapshot) -> RecommendEngine {
        let mut config = RecommendConfig::without_report();
        config.top_k = 2;

        RecommendEngine::new(
            config,
            Arc::new(store),
            Arc::new(FixedEmbedder(vec![1.0, 0.0, 0.0])),
            snapshot,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_seoul_scenario() {
        let (store, snapshot) = fixture();
        let engine = engine(store, snapshot);

        let result = engine.recommend(&query("서울")).await.unwrap();

        // only P1 survives: P2's log is outside the region filter
        assert_eq!(result.products.len(), 1);
        assert_eq!(result.products[0].product_id, "P1");
        assert_eq!(result.products[0].options.len(), 1);
        assert!(result.report.is_none());
    }

    #[tokio::test]
    async fn test_no_region_match_is_empty_not_error() {
        let (store, snapshot) = fixture();
        let engine = engine(store, snapshot);

        let result = engine.recommend(&query("제주")).await.unwrap();

        assert!(result.products.is_empty());
        assert!(result.report.is_none());
    }

    #[tokio::test]
    async fn test_query_dimension_mismatch_is_fatal() {
        let (store, snapshot) = fixture();

        let mut config = RecommendConfig::without_report();
        config.top_k = 2;
        let engine = RecommendEngine::new(
            config,
            Arc::new(store),
            Arc::new(FixedEmbedder(vec![1.0, 0.0])), // wrong dimension
            snapshot,
        )
        .unwrap();

        let result = engine.recommend(&query("서울")).await;
        assert!(matches!(result, Err(RecommendError::Rank(_))));
    }
}
