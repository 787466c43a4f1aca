//! Evidence retrieval with the empty-result and distance gates.

use crate::index::EvidenceIndex;
use crate::types::Passage;
use assist_core::config::RetrievalSettings;
use assist_core::AppResult;
use std::sync::Arc;

/// Fetches candidate passages for a query.
///
/// An empty result means "no grounding"; callers degrade to the general
/// reply rather than treating it as a failure.
#[derive(Clone)]
pub struct Retriever {
    index: Arc<dyn EvidenceIndex>,
    k: usize,
    max_distance: Option<f32>,
}

impl Retriever {
    pub fn new(index: Arc<dyn EvidenceIndex>, k: usize) -> Self {
        Self {
            index,
            k,
            max_distance: None,
        }
    }

    pub fn from_settings(index: Arc<dyn EvidenceIndex>, settings: &RetrievalSettings) -> Self {
        Self::new(index, settings.retrieve_k).with_max_distance(settings.max_distance)
    }

    pub fn with_max_distance(mut self, max_distance: Option<f32>) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn index(&self) -> &Arc<dyn EvidenceIndex> {
        &self.index
    }

    /// Up to `k` passages in index order, minus any beyond the distance gate.
    pub async fn retrieve(&self, query: &str) -> AppResult<Vec<Passage>> {
        let mut passages = self.index.similarity_search_with_score(query, self.k).await?;
        let found = passages.len();

        if let Some(limit) = self.max_distance {
            passages.retain(|p| p.score <= limit);
        }

        tracing::debug!(
            "Retrieved {} passages ({} before distance gate) via {}",
            passages.len(),
            found,
            self.index.backend_name()
        );

        Ok(passages)
    }
}
