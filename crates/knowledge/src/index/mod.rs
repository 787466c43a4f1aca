//! Read-only evidence index over pre-built passage embeddings.
//!
//! The index is produced by an offline ingestion job. Two on-disk layouts
//! are supported under the configured index directory:
//! - `lancedb`: a LanceDB table named `passages` (`text`, `source`,
//!   `embedding` columns)
//! - `jsonl`: a `passages.jsonl` file, one `{text, source, embedding}`
//!   object per line
//!
//! Both open lazily on first search.

mod jsonl;
mod lance;

pub use jsonl::{JsonlEvidenceIndex, StoredPassage};
pub use lance::LanceEvidenceIndex;

use crate::embeddings::EmbeddingProvider;
use crate::types::Passage;
use assist_core::{AppConfig, AppError, AppResult};
use async_trait::async_trait;
use std::sync::Arc;

/// LanceDB table holding the passages.
pub const PASSAGES_TABLE: &str = "passages";

/// Passage file used by the JSONL backend.
pub const PASSAGES_FILE: &str = "passages.jsonl";

/// Similarity search over the passage corpus.
#[async_trait]
pub trait EvidenceIndex: Send + Sync {
    fn backend_name(&self) -> &str;

    /// Up to `k` passages nearest to `query`, closest first, each carrying
    /// its distance as `score`.
    async fn similarity_search_with_score(&self, query: &str, k: usize) -> AppResult<Vec<Passage>>;

    /// Number of passages in the index.
    async fn count(&self) -> AppResult<usize>;
}

/// Open the configured index backend.
pub fn open_index(
    config: &AppConfig,
    embedder: Arc<dyn EmbeddingProvider>,
) -> AppResult<Arc<dyn EvidenceIndex>> {
    let dir = config.index_dir();

    match config.data.index_backend.as_str() {
        "lancedb" => Ok(Arc::new(LanceEvidenceIndex::new(dir, embedder))),
        "jsonl" => Ok(Arc::new(JsonlEvidenceIndex::new(dir.join(PASSAGES_FILE), embedder))),
        other => Err(AppError::Config(format!(
            "Unknown index backend: '{}'. Supported backends: lancedb, jsonl",
            other
        ))),
    }
}

/// Squared Euclidean distance, the metric LanceDB reports by default.
pub(crate) fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::MockProvider;

    #[test]
    fn test_open_index_backends() {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(MockProvider::new(16));
        let mut config = AppConfig::default();

        let index = open_index(&config, embedder.clone()).unwrap();
        assert_eq!(index.backend_name(), "lancedb");

        config.data.index_backend = "jsonl".to_string();
        let index = open_index(&config, embedder.clone()).unwrap();
        assert_eq!(index.backend_name(), "jsonl");

        config.data.index_backend = "faiss".to_string();
        assert!(matches!(
            open_index(&config, embedder),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_l2_distance() {
        assert_eq!(l2_distance(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(l2_distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }
}
