// Embedding provider interface
//
// The model is an external collaborator: text in, fixed-length unit-norm
// vector out. FastembedEmbedder runs a local fastembed model; the Mutex is
// there because fastembed's embed call needs &mut.

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("embedding provider failed: {0}")]
    Provider(String),

    #[error("provider returned no embedding")]
    Empty,
}

#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one text into a unit-norm vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    fn provider(&self) -> &str;
}

/// Local fastembed model. Multilingual, so the Korean sentence templates
/// embed without an external API.
pub struct FastembedEmbedder {
    model: Mutex<TextEmbedding>,
}

impl FastembedEmbedder {
    pub fn try_default() -> Result<Self, EmbedError> {
        let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::MultilingualE5Small))
            .map_err(|e| EmbedError::Provider(e.to_string()))?;

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

#[async_trait]
impl Embedder for FastembedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let vector = {
            let mut model = self.model.lock().unwrap();
            let embeddings = model
                .embed(vec![text.to_string()], None)
                .map_err(|e| EmbedError::Provider(e.to_string()))?;

            embeddings.into_iter().next().ok_or(EmbedError::Empty)?
        };

        // unit-norm is the ranker's precondition (dot product = cosine),
        // so normalize here rather than trusting the model config
        Ok(normalize(&vector))
    }

    fn provider(&self) -> &str {
        "fastembed"
    }
}

/// L2-normalize a vector. Zero vectors pass through unchanged.
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}
