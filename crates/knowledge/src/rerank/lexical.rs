use super::RelevanceScorer;
use assist_core::AppResult;
use async_trait::async_trait;
use std::collections::HashSet;

/// Offline scorer: fraction of distinct query terms found in the passage.
#[derive(Debug, Default)]
pub struct LexicalScorer;

impl LexicalScorer {
    pub fn new() -> Self {
        Self
    }

    fn score(query: &str, passage: &str) -> f32 {
        let query_terms = terms(query);
        if query_terms.is_empty() {
            return 0.0;
        }
        let passage_terms = terms(passage);
        let hits = query_terms.intersection(&passage_terms).count();
        hits as f32 / query_terms.len() as f32
    }
}

fn terms(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 1)
        .map(String::from)
        .collect()
}

#[async_trait]
impl RelevanceScorer for LexicalScorer {
    fn scorer_name(&self) -> &str {
        "lexical"
    }

    async fn predict(&self, pairs: &[(String, String)]) -> AppResult<Vec<f32>> {
        Ok(pairs
            .iter()
            .map(|(query, passage)| Self::score(query, passage))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_overlap_scores() {
        let pairs = vec![
            ("calibration fee".to_string(), "The calibration fee is 500.".to_string()),
            ("calibration fee".to_string(), "Calibration takes 3 days.".to_string()),
            ("calibration fee".to_string(), "Scholarship grants".to_string()),
        ];
        let scores = LexicalScorer::new().predict(&pairs).await.unwrap();
        assert_eq!(scores, vec![1.0, 0.5, 0.0]);
    }

    #[tokio::test]
    async fn test_query_without_terms() {
        let pairs = vec![("?".to_string(), "anything".to_string())];
        assert_eq!(LexicalScorer::new().predict(&pairs).await.unwrap(), vec![0.0]);
    }
}
