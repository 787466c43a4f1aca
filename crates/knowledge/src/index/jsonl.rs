//! In-memory index loaded from a JSONL passage file.

use super::{l2_distance, EvidenceIndex};
use crate::embeddings::EmbeddingProvider;
use crate::types::Passage;
use assist_core::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// One line of `passages.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPassage {
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
    pub embedding: Vec<f32>,
}

/// Brute-force nearest-neighbour search over a small passage set.
pub struct JsonlEvidenceIndex {
    path: PathBuf,
    embedder: Arc<dyn EmbeddingProvider>,
    passages: OnceCell<Vec<StoredPassage>>,
}

impl JsonlEvidenceIndex {
    pub fn new(path: PathBuf, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            path,
            embedder,
            passages: OnceCell::new(),
        }
    }

    async fn passages(&self) -> AppResult<&[StoredPassage]> {
        let passages = self
            .passages
            .get_or_try_init(|| load_passages(&self.path))
            .await?;
        Ok(passages.as_slice())
    }
}

async fn load_passages(path: &Path) -> AppResult<Vec<StoredPassage>> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Index(format!("Failed to read passage file {:?}: {}", path, e))
    })?;

    let mut passages = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let passage: StoredPassage = serde_json::from_str(line).map_err(|e| {
            AppError::Index(format!("{:?} line {}: {}", path, line_no + 1, e))
        })?;
        passages.push(passage);
    }

    tracing::info!("Loaded {} passages from {:?}", passages.len(), path);
    Ok(passages)
}

#[async_trait]
impl EvidenceIndex for JsonlEvidenceIndex {
    fn backend_name(&self) -> &str {
        "jsonl"
    }

    async fn similarity_search_with_score(&self, query: &str, k: usize) -> AppResult<Vec<Passage>> {
        let passages = self.passages().await?;
        let query_vec = self.embedder.embed(query).await?;

        let mut scored = Vec::with_capacity(passages.len());
        for stored in passages {
            if stored.embedding.len() != query_vec.len() {
                return Err(AppError::Index(format!(
                    "Embedding dimension mismatch: index has {}, query has {}",
                    stored.embedding.len(),
                    query_vec.len()
                )));
            }
            scored.push((stored, l2_distance(&query_vec, &stored.embedding)));
        }

        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(stored, distance)| {
                Passage::new(stored.text.clone(), stored.source.clone(), distance)
            })
            .collect())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.passages().await?.len())
    }
}
