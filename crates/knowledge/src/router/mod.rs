//! Hybrid router: official store first for official-seeking queries,
//! retrieval pipeline otherwise.

mod placeholder;

pub use placeholder::{is_placeholder, PLACEHOLDER_MARKERS};

use crate::intent::{classify, Intent};
use crate::official::OfficialStore;
use crate::pipeline::RetrievalPipeline;
use crate::types::Answer;
use assist_core::AppResult;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Which knowledge source a query is sent to first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "intent", rename_all = "lowercase")]
pub enum Route {
    Official(Intent),
    Open,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Official(intent) => write!(f, "official ({})", intent),
            Route::Open => f.write_str("open-ended"),
        }
    }
}

/// Official-store view of a query, without generation.
#[derive(Debug, Clone, Serialize)]
pub struct OfficialCheck {
    pub route: Route,
    pub answer: Answer,
    pub placeholder: bool,
}

#[derive(Clone)]
pub struct HybridRouter {
    store: Arc<OfficialStore>,
    pipeline: RetrievalPipeline,
}

impl HybridRouter {
    pub fn new(store: Arc<OfficialStore>, pipeline: RetrievalPipeline) -> Self {
        Self { store, pipeline }
    }

    pub fn route(&self, query: &str) -> Route {
        classify(query).map_or(Route::Open, Route::Official)
    }

    /// Route, look up, and fall back.
    ///
    /// An official answer wins whenever it is non-empty and free of
    /// placeholder text; otherwise the retrieval pipeline answers.
    pub async fn resolve(&self, query: &str) -> AppResult<Answer> {
        let route = self.route(query);
        tracing::info!("Route: {}", route);

        if let Route::Official(_) = route {
            let answer = self.store.lookup(query);
            if answer.is_empty() {
                tracing::info!("No official record matched; falling back to retrieval");
            } else if is_placeholder(&answer.text) {
                tracing::info!("Official answer contains placeholder text; falling back to retrieval");
            } else {
                return Ok(answer);
            }
        }

        self.pipeline.answer(query).await
    }

    /// Display-ready answer: body followed by the sources block.
    pub async fn answer(&self, query: &str) -> AppResult<String> {
        Ok(self.resolve(query).await?.render())
    }

    /// Route decision and official lookup for diagnostics.
    pub fn check_official(&self, query: &str) -> OfficialCheck {
        let answer = self.store.lookup(query);
        OfficialCheck {
            route: self.route(query),
            placeholder: is_placeholder(&answer.text),
            answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_display() {
        assert_eq!(Route::Official(Intent::Fee).to_string(), "official (fee)");
        assert_eq!(Route::Open.to_string(), "open-ended");
    }

    #[test]
    fn test_route_serializes_with_intent() {
        let json = serde_json::to_value(Route::Official(Intent::Contact)).unwrap();
        assert_eq!(json, serde_json::json!({"route": "official", "intent": "contact"}));
        let json = serde_json::to_value(Route::Open).unwrap();
        assert_eq!(json, serde_json::json!({"route": "open"}));
    }
}
