// Embedding snapshot - the persisted vector index over travel logs
//
// Built once from the full log corpus: every log is rendered into its
// historical sentence, embedded, and the (trip_ids, texts, vectors) triple
// is persisted as one blob. Reload must reconstruct exact index alignment,
// the ranker depends on it. There is no incremental update path - a rebuild
// replaces the whole snapshot.

use crate::embedder::{EmbedError, Embedder};
use crate::store::{StoreError, TravelStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use tripai_core::format::historical_sentence;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is corrupt: {0}")]
    Corrupt(String),

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parallel (trip_ids, texts, vectors) index plus build metadata.
/// Invariant: all three sequences have the same length and every vector
/// has `dimension` entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSnapshot {
    pub trip_ids: Vec<String>,
    pub texts: Vec<String>,
    pub vectors: Vec<Vec<f32>>,
    pub dimension: usize,
    pub built_at: DateTime<Utc>,

    /// true when a max_logs cap truncated the corpus at build time.
    /// Logs beyond the cap are silently absent from ranking - operators
    /// need to see this flag.
    #[serde(default)]
    pub partial_coverage: bool,
}

impl EmbeddingSnapshot {
    pub fn len(&self) -> usize {
        self.trip_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trip_ids.is_empty()
    }
}

/// Snapshot persistence, bound to one filesystem path
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, building it first if the file does not exist.
    /// A file that exists but cannot be decoded is fatal - the pipeline
    /// cannot serve without a trustworthy index.
    pub async fn ensure_loaded(
        &self,
        store: &dyn TravelStore,
        embedder: &dyn Embedder,
        max_logs: Option<usize>,
    ) -> Result<EmbeddingSnapshot, SnapshotError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "No embedding snapshot, building");
            return self.build(store, embedder, max_logs).await;
        }
        self.load()
    }

    /// Full rebuild: embed every log and atomically overwrite the snapshot
    pub async fn build(
        &self,
        store: &dyn TravelStore,
        embedder: &dyn Embedder,
        max_logs: Option<usize>,
    ) -> Result<EmbeddingSnapshot, SnapshotError> {
        let logs = store.get_all_logs().await?;
        let total = logs.len();

        let (logs, partial_coverage) = match max_logs {
            Some(cap) if cap < total => {
                warn!(
                    cap,
                    total, "Embedding corpus capped - ranking coverage is partial"
                );
                (&logs[..cap], true)
            }
            _ => (&logs[..], false),
        };

        let mut trip_ids = Vec::with_capacity(logs.len());
        let mut texts = Vec::with_capacity(logs.len());
        let mut vectors = Vec::with_capacity(logs.len());
        let mut dimension = 0usize;

        for log in logs {
            let text = historical_sentence(log);
            let vector = embedder.embed(&text).await?;

            if dimension == 0 {
                dimension = vector.len();
            } else if vector.len() != dimension {
                // one bad vector poisons the whole index - fail the build
                return Err(SnapshotError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }

            trip_ids.push(log.trip_id.clone());
            texts.push(text);
            vectors.push(vector);
        }

        let snapshot = EmbeddingSnapshot {
            trip_ids,
            texts,
            vectors,
            dimension,
            built_at: Utc::now(),
            partial_coverage,
        };

        self.persist(&snapshot)?;
        info!(
            embedded = snapshot.len(),
            dimension, partial_coverage, "Embedding snapshot built"
        );

        Ok(snapshot)
    }

    /// Read the persisted snapshot and re-check the alignment invariant
    pub fn load(&self) -> Result<EmbeddingSnapshot, SnapshotError> {
        let bytes = fs::read(&self.path)?;
        let snapshot: EmbeddingSnapshot =
            serde_json::from_slice(&bytes).map_err(|e| SnapshotError::Corrupt(e.to_string()))?;

        if snapshot.trip_ids.len() != snapshot.texts.len()
            || snapshot.trip_ids.len() != snapshot.vectors.len()
        {
            return Err(SnapshotError::Corrupt(format!(
                "parallel sequences out of alignment: {} ids, {} texts, {} vectors",
                snapshot.trip_ids.len(),
                snapshot.texts.len(),
                snapshot.vectors.len()
            )));
        }

        info!(
            embedded = snapshot.len(),
            dimension = snapshot.dimension,
            "Embedding snapshot loaded"
        );
        Ok(snapshot)
    }

    // write-to-temp then rename, so readers never see a half-written file
    fn persist(&self, snapshot: &EmbeddingSnapshot) -> Result<(), SnapshotError> {
        let bytes = serde_json::to_vec(snapshot).map_err(|e| SnapshotError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tripai_core::TravelLog;

    /// Deterministic stand-in for the embedding model
    struct StubEmbedder;

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
            // vary by text length so vectors differ but stay deterministic
            let x = (text.chars().count() % 7) as f32 + 1.0;
            Ok(crate::embedder::normalize(&[x, 1.0, 0.5]))
        }

        fn provider(&self) -> &str {
            "stub"
        }
    }

    fn log(trip_id: &str) -> TravelLog {
        TravelLog {
            trip_id: trip_id.to_string(),
            place: "서울".to_string(),
            days: "2".to_string(),
            companion_relation: "친구".to_string(),
            companion_age_group: "20대".to_string(),
            gender: "여성".to_string(),
            age: "20".to_string(),
            product_id: "P1".to_string(),
            satisfaction_score: Some(4.0),
            category: "맛집".to_string(),
        }
    }

    fn temp_path(tag: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "tripai-snapshot-{}-{}-{}.json",
            tag,
            std::process::id(),
            n
        ))
    }

    fn store_with(n: usize) -> MemoryStore {
        let logs = (0..n).map(|i| log(&format!("T{}", i))).collect();
        MemoryStore::new(logs, vec![], vec![])
    }

    #[tokio::test]
    async fn test_build_keeps_sequences_parallel() {
        let path = temp_path("parallel");
        let snapshots = SnapshotStore::new(&path);

        let snapshot = snapshots
            .build(&store_with(3), &StubEmbedder, None)
            .await
            .unwrap();

        assert_eq!(snapshot.trip_ids.len(), 3);
        assert_eq!(snapshot.texts.len(), 3);
        assert_eq!(snapshot.vectors.len(), 3);
        assert_eq!(snapshot.dimension, 3);
        assert!(!snapshot.partial_coverage);

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_reload_reconstructs_alignment() {
        let path = temp_path("reload");
        let snapshots = SnapshotStore::new(&path);

        let built = snapshots
            .build(&store_with(4), &StubEmbedder, None)
            .await
            .unwrap();
        let loaded = snapshots.load().unwrap();

        assert_eq!(loaded.trip_ids, built.trip_ids);
        assert_eq!(loaded.texts, built.texts);
        assert_eq!(loaded.vectors.len(), built.vectors.len());
        assert_eq!(loaded.dimension, built.dimension);

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_ensure_loaded_builds_when_absent() {
        let path = temp_path("absent");
        let snapshots = SnapshotStore::new(&path);

        let snapshot = snapshots
            .ensure_loaded(&store_with(2), &StubEmbedder, None)
            .await
            .unwrap();

        assert_eq!(snapshot.len(), 2);
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_fatal() {
        let path = temp_path("corrupt");
        fs::write(&path, b"not json at all").unwrap();

        let snapshots = SnapshotStore::new(&path);
        let result = snapshots
            .ensure_loaded(&store_with(1), &StubEmbedder, None)
            .await;

        assert!(matches!(result, Err(SnapshotError::Corrupt(_))));

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_cap_sets_partial_coverage() {
        let path = temp_path("cap");
        let snapshots = SnapshotStore::new(&path);

        let snapshot = snapshots
            .build(&store_with(5), &StubEmbedder, Some(2))
            .await
            .unwrap();

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.partial_coverage);

        let _ = fs::remove_file(&path);
    }
}
