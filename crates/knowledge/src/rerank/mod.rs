//! Relevance reranking of retrieved passages.
//!
//! A pairwise scorer rates every `(query, passage)` pair; the reranker sorts
//! by that score and keeps the top few.

mod http;
mod lexical;

pub use http::HttpCrossEncoder;
pub use lexical::LexicalScorer;

use crate::types::Passage;
use assist_core::config::RetrievalSettings;
use assist_core::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Scores query/passage pairs; higher is more relevant.
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    fn scorer_name(&self) -> &str;

    /// One score per pair, in input order.
    async fn predict(&self, pairs: &[(String, String)]) -> AppResult<Vec<f32>>;
}

/// Reorders passages by pairwise relevance and truncates to `top_k`.
#[derive(Clone)]
pub struct Reranker {
    scorer: Arc<dyn RelevanceScorer>,
    top_k: usize,
}

impl Reranker {
    pub fn new(scorer: Arc<dyn RelevanceScorer>, top_k: usize) -> Self {
        Self { scorer, top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Sort `passages` by descending score. Ties keep retrieval order.
    pub async fn rerank(&self, query: &str, passages: Vec<Passage>) -> AppResult<Vec<Passage>> {
        if passages.is_empty() {
            return Ok(passages);
        }

        let pairs: Vec<(String, String)> = passages
            .iter()
            .map(|p| (query.to_string(), p.text.clone()))
            .collect();

        let scores = self.scorer.predict(&pairs).await?;
        if scores.len() != passages.len() {
            return Err(AppError::Rerank(format!(
                "Scorer '{}' returned {} scores for {} passages",
                self.scorer.scorer_name(),
                scores.len(),
                passages.len()
            )));
        }

        // NaN ranks last
        let scores = scores
            .into_iter()
            .map(|s| if s.is_nan() { f32::NEG_INFINITY } else { s });
        let mut scored: Vec<(Passage, f32)> = passages.into_iter().zip(scores).collect();
        // sort_by is stable
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        tracing::debug!(
            "Rerank scores: {:?}",
            scored.iter().map(|(_, s)| *s).collect::<Vec<_>>()
        );

        Ok(scored
            .into_iter()
            .take(self.top_k)
            .map(|(passage, _)| passage)
            .collect())
    }
}

/// Create the configured scorer.
pub fn create_scorer(settings: &RetrievalSettings) -> AppResult<Arc<dyn RelevanceScorer>> {
    match settings.reranker.as_str() {
        "lexical" => Ok(Arc::new(LexicalScorer::new())),
        "http" => {
            let endpoint = settings.reranker_endpoint.as_deref().ok_or_else(|| {
                AppError::Config("The http reranker requires rerankerEndpoint".to_string())
            })?;
            Ok(Arc::new(HttpCrossEncoder::new(
                endpoint,
                settings.reranker_model.clone(),
            )?))
        }
        other => Err(AppError::Config(format!(
            "Unknown reranker: '{}'. Supported rerankers: lexical, http",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScores(Vec<f32>);

    #[async_trait]
    impl RelevanceScorer for FixedScores {
        fn scorer_name(&self) -> &str {
            "fixed"
        }

        async fn predict(&self, _pairs: &[(String, String)]) -> AppResult<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    fn passages(texts: &[&str]) -> Vec<Passage> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Passage::new(*t, Some(format!("doc{}.pdf", i)), i as f32))
            .collect()
    }

    fn texts(passages: &[Passage]) -> Vec<&str> {
        passages.iter().map(|p| p.text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_descending_and_truncated() {
        let reranker = Reranker::new(Arc::new(FixedScores(vec![0.1, 0.9, 0.5])), 2);
        let out = reranker
            .rerank("q", passages(&["a", "b", "c"]))
            .await
            .unwrap();
        assert_eq!(texts(&out), vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_nan_scores_rank_last() {
        let reranker = Reranker::new(
            Arc::new(FixedScores(vec![0.2, f32::NAN, 0.8, f32::NAN])),
            4,
        );
        let out = reranker
            .rerank("q", passages(&["a", "b", "c", "d"]))
            .await
            .unwrap();
        assert_eq!(texts(&out), vec!["c", "a", "b", "d"]);
    }

    #[tokio::test]
    async fn test_ties_keep_retrieval_order() {
        let reranker = Reranker::new(Arc::new(FixedScores(vec![0.5, 0.7, 0.5, 0.5])), 4);
        let out = reranker
            .rerank("q", passages(&["a", "b", "c", "d"]))
            .await
            .unwrap();
        assert_eq!(texts(&out), vec!["b", "a", "c", "d"]);
    }

    #[tokio::test]
    async fn test_score_count_mismatch_is_an_error() {
        let reranker = Reranker::new(Arc::new(FixedScores(vec![0.5])), 2);
        let result = reranker.rerank("q", passages(&["a", "b"])).await;
        assert!(matches!(result, Err(AppError::Rerank(_))));
    }

    #[tokio::test]
    async fn test_empty_input_skips_scorer() {
        let reranker = Reranker::new(Arc::new(FixedScores(vec![1.0])), 2);
        assert!(reranker.rerank("q", Vec::new()).await.unwrap().is_empty());
    }

    #[test]
    fn test_create_scorer() {
        let mut settings = RetrievalSettings::default();
        assert_eq!(create_scorer(&settings).unwrap().scorer_name(), "lexical");

        settings.reranker = "http".to_string();
        assert!(matches!(create_scorer(&settings), Err(AppError::Config(_))));

        settings.reranker_endpoint = Some("http://localhost:8080".to_string());
        assert_eq!(create_scorer(&settings).unwrap().scorer_name(), "http");

        settings.reranker = "colbert".to_string();
        assert!(create_scorer(&settings).is_err());
    }
}
