//! Cross-encoder scoring over HTTP.
//!
//! Talks to a reranking service exposing `POST /rerank` with
//! `{"query": ..., "texts": [...]}` and answering `[{"index": i, "score": s}]`
//! in any order.

use super::RelevanceScorer;
use assist_core::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct HttpCrossEncoder {
    client: Client,
    endpoint: String,
    model: Option<String>,
}

#[derive(Debug, Serialize)]
struct RerankRequest<'a> {
    query: &'a str,
    texts: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct RankedText {
    index: usize,
    score: f32,
}

impl HttpCrossEncoder {
    pub fn new(endpoint: &str, model: Option<String>) -> AppResult<Self> {
        let client = Client::builder().build().map_err(|e| {
            AppError::Rerank(format!("Failed to create HTTP client for reranker: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
        })
    }

    /// Score one query against many texts.
    async fn score_group(&self, query: &str, texts: Vec<&str>) -> AppResult<Vec<f32>> {
        let url = format!("{}/rerank", self.endpoint);
        let count = texts.len();
        let request = RerankRequest {
            query,
            texts,
            model: self.model.as_deref(),
        };

        tracing::debug!("Sending {} texts to reranker at {}", count, url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Rerank(format!("Failed to reach reranker: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Rerank(format!(
                "Reranker returned {}: {}",
                status, body
            )));
        }

        let ranked: Vec<RankedText> = response
            .json()
            .await
            .map_err(|e| AppError::Rerank(format!("Failed to parse reranker response: {}", e)))?;

        scores_in_input_order(ranked, count)
    }
}

/// Place each ranked score back at its input index.
fn scores_in_input_order(ranked: Vec<RankedText>, count: usize) -> AppResult<Vec<f32>> {
    let mut scores: Vec<Option<f32>> = vec![None; count];
    for item in ranked {
        let slot = scores.get_mut(item.index).ok_or_else(|| {
            AppError::Rerank(format!(
                "Reranker returned index {} for {} texts",
                item.index, count
            ))
        })?;
        *slot = Some(item.score);
    }

    scores
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            s.ok_or_else(|| AppError::Rerank(format!("Reranker returned no score for text {}", i)))
        })
        .collect()
}

#[async_trait]
impl RelevanceScorer for HttpCrossEncoder {
    fn scorer_name(&self) -> &str {
        "http"
    }

    async fn predict(&self, pairs: &[(String, String)]) -> AppResult<Vec<f32>> {
        let mut scores = Vec::with_capacity(pairs.len());

        // Consecutive pairs sharing a query go out in one request
        let mut start = 0;
        while start < pairs.len() {
            let query = &pairs[start].0;
            let end = pairs[start..]
                .iter()
                .position(|(q, _)| q != query)
                .map_or(pairs.len(), |offset| start + offset);

            let texts = pairs[start..end].iter().map(|(_, t)| t.as_str()).collect();
            scores.extend(self.score_group(query, texts).await?);
            start = end;
        }

        Ok(scores)
    }
}
