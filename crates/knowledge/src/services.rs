//! Process-wide providers, built once and shared by every query.

use crate::embeddings::{create_provider, EmbeddingProvider};
use crate::generator::TextGenerator;
use crate::index::{open_index, EvidenceIndex};
use crate::official::OfficialStore;
use crate::pipeline::RetrievalPipeline;
use crate::rerank::{create_scorer, RelevanceScorer, Reranker};
use crate::retrieval::Retriever;
use crate::router::HybridRouter;
use crate::synthesis::Synthesizer;
use assist_core::config::{GenerationSettings, LlmSettings, RetrievalSettings};
use assist_core::{AppConfig, AppResult};
use assist_llm::{create_client, LlmClient};
use assist_prompt::PromptLibrary;
use std::sync::Arc;
use std::time::Duration;

/// Dependency container for the answering pipeline.
///
/// Nothing in here is mutated after construction; clones share the same
/// providers.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<OfficialStore>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub index: Arc<dyn EvidenceIndex>,
    pub scorer: Arc<dyn RelevanceScorer>,
    pub llm: Arc<dyn LlmClient>,
    pub prompts: Arc<PromptLibrary>,
    pub llm_settings: LlmSettings,
    pub retrieval: RetrievalSettings,
    pub generation: GenerationSettings,
}

impl Services {
    /// Build every provider from configuration.
    ///
    /// The official records are read here; the evidence index opens on the
    /// first search.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let store = OfficialStore::load(&config.official_dir())?;
        let embedder = create_provider(&config.embeddings)?;
        let index = open_index(config, embedder.clone())?;
        let scorer = create_scorer(&config.retrieval)?;
        let llm = create_client(
            &config.llm.provider,
            Some(&config.llm.endpoint),
            config.llm.timeout.map(Duration::from_secs),
        )?;
        let prompts = PromptLibrary::load(&config.workspace)?;

        tracing::debug!(
            "Services ready: llm={} embeddings={} index={} reranker={}",
            llm.provider_name(),
            embedder.provider_name(),
            index.backend_name(),
            scorer.scorer_name()
        );

        Ok(Self {
            store: Arc::new(store),
            embedder,
            index,
            scorer,
            llm,
            prompts: Arc::new(prompts),
            llm_settings: config.llm.clone(),
            retrieval: config.retrieval.clone(),
            generation: config.generation.clone(),
        })
    }

    pub fn retriever(&self) -> Retriever {
        Retriever::from_settings(self.index.clone(), &self.retrieval)
    }

    pub fn reranker(&self) -> Reranker {
        Reranker::new(self.scorer.clone(), self.retrieval.rerank_top_k)
    }

    pub fn synthesizer(&self) -> Synthesizer {
        let generator = TextGenerator::from_settings(self.llm.clone(), &self.llm_settings);
        Synthesizer::new(generator, self.prompts.clone(), &self.generation.agency_name)
            .with_verify(self.generation.enable_verify)
    }

    pub fn pipeline(&self) -> RetrievalPipeline {
        RetrievalPipeline::new(self.retriever(), self.reranker(), self.synthesizer())
    }
}

impl HybridRouter {
    pub fn from_services(services: &Services) -> Self {
        HybridRouter::new(services.store.clone(), services.pipeline())
    }
}
