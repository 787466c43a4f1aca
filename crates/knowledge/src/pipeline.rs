use crate::rerank::Reranker;
use crate::retrieval::Retriever;
use crate::synthesis::Synthesizer;
use crate::types::Answer;
use assist_core::AppResult;

/// Retriever, reranker and synthesizer run in sequence for one query.
#[derive(Clone)]
pub struct RetrievalPipeline {
    retriever: Retriever,
    reranker: Reranker,
    synthesizer: Synthesizer,
}

impl RetrievalPipeline {
    pub fn new(retriever: Retriever, reranker: Reranker, synthesizer: Synthesizer) -> Self {
        Self {
            retriever,
            reranker,
            synthesizer,
        }
    }

    /// Answer from the document corpus.
    ///
    /// With no candidates the query gets the ungrounded general reply and no
    /// citations. Provider failures propagate.
    pub async fn answer(&self, query: &str) -> AppResult<Answer> {
        let candidates = self.retriever.retrieve(query).await?;

        if candidates.is_empty() {
            tracing::info!("No grounding retrieved; using general reply");
            return self.synthesizer.general_reply(query).await;
        }

        let top = self.reranker.rerank(query, candidates).await?;
        tracing::debug!(
            "Synthesizing from {} passages: {:?}",
            top.len(),
            top.iter().map(|p| p.source_label()).collect::<Vec<_>>()
        );

        self.synthesizer.synthesize(query, &top).await
    }
}
