//! Stats command handler.
//!
//! Shows official record counts and the configured providers.

use assist_core::{config::AppConfig, AppResult};
use assist_knowledge::embeddings::EmbeddingProvider;
use assist_knowledge::index::EvidenceIndex;
use assist_knowledge::rerank::RelevanceScorer;
use assist_knowledge::Services;
use assist_llm::LlmClient;
use clap::Args;

/// Show official record counts and configured backends
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Also open the evidence index and count its passages
    #[arg(long)]
    pub index: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");
        tracing::debug!("Stats options: {:?}", self);

        let services = Services::from_config(config)?;
        let collections = services.store.stats();

        let passages = if self.index {
            match services.index.count().await {
                Ok(count) => Some(count),
                Err(e) => {
                    tracing::warn!("Evidence index unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        if self.json {
            let output = serde_json::json!({
                "official": {
                    "directory": config.official_dir(),
                    "collections": collections,
                    "total": services.store.total_records(),
                },
                "backends": {
                    "llm": format!("{}/{}", services.llm.provider_name(), config.llm.model),
                    "embeddings": format!("{}/{}", services.embedder.provider_name(), services.embedder.model_name()),
                    "index": services.index.backend_name(),
                    "reranker": services.scorer.scorer_name(),
                },
                "passages": passages,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Official records ({})", config.official_dir().display());
        for stat in &collections {
            println!("  {:<14}{}", stat.collection.name(), stat.records);
        }
        println!("  {:<14}{}", "total", services.store.total_records());
        println!();
        println!("Backends");
        println!("  {:<14}{}/{}", "llm", services.llm.provider_name(), config.llm.model);
        println!(
            "  {:<14}{}/{}",
            "embeddings",
            services.embedder.provider_name(),
            services.embedder.model_name()
        );
        println!("  {:<14}{}", "index", services.index.backend_name());
        println!("  {:<14}{}", "reranker", services.scorer.scorer_name());
        if let Some(count) = passages {
            println!("  {:<14}{}", "passages", count);
        }

        Ok(())
    }
}
