//! Answer synthesis: grounding context, constrained generation and
//! post-processing.

pub mod postprocess;

use crate::formatters::emphasize_units;
use crate::generator::TextGenerator;
use crate::types::{Answer, Citation, Passage};
use assist_core::AppResult;
use assist_prompt::{PromptLibrary, GENERAL_REPLY, GROUNDED_ANSWER, SUPPORT_CHECK};
use postprocess::{clean_answer, is_unsupported, REFUSAL};
use std::collections::HashMap;
use std::sync::Arc;

/// Grounding context plus one citation per passage, in passage order.
pub fn build_context(passages: &[Passage]) -> (String, Vec<Citation>) {
    let blocks: Vec<String> = passages
        .iter()
        .map(|p| format!("[Source: {}]\n{}", p.source_label(), p.text))
        .collect();
    let citations = passages.iter().map(Passage::citation).collect();
    (blocks.join("\n\n"), citations)
}

/// Turns reranked passages into a client-facing answer.
#[derive(Clone)]
pub struct Synthesizer {
    generator: TextGenerator,
    prompts: Arc<PromptLibrary>,
    agency: String,
    enable_verify: bool,
}

impl Synthesizer {
    pub fn new(
        generator: TextGenerator,
        prompts: Arc<PromptLibrary>,
        agency: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            prompts,
            agency: agency.into(),
            enable_verify: false,
        }
    }

    /// Enable the second-pass support check.
    pub fn with_verify(mut self, enable: bool) -> Self {
        self.enable_verify = enable;
        self
    }

    /// Grounded answer over `passages`.
    ///
    /// When verification is enabled and the verifier rejects the answer, the
    /// text becomes a fixed refusal but the citations are kept.
    pub async fn synthesize(&self, query: &str, passages: &[Passage]) -> AppResult<Answer> {
        let (context, citations) = build_context(passages);

        let prompt = self.prompts.render(
            GROUNDED_ANSWER,
            &vars(&[
                ("agency", self.agency.as_str()),
                ("context", context.as_str()),
                ("question", query),
            ]),
        )?;

        let raw = self.generator.invoke(&prompt).await?;
        let answer = emphasize_units(&clean_answer(&raw));

        if self.enable_verify {
            let check = self.prompts.render(
                SUPPORT_CHECK,
                &vars(&[("context", context.as_str()), ("answer", answer.as_str())]),
            )?;
            let verdict = self.generator.invoke(&check).await?;
            if is_unsupported(&verdict) {
                tracing::info!("Verifier rejected the synthesized answer");
                return Ok(Answer::new(REFUSAL, citations));
            }
        }

        Ok(Answer::new(answer, citations))
    }

    /// Conversational reply used when retrieval found nothing. No citations.
    pub async fn general_reply(&self, query: &str) -> AppResult<Answer> {
        let prompt = self.prompts.render(
            GENERAL_REPLY,
            &vars(&[("agency", self.agency.as_str()), ("query", query)]),
        )?;
        let raw = self.generator.invoke(&prompt).await?;
        Ok(Answer::new(emphasize_units(&raw), Vec::new()))
    }
}

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fakes::ScriptedLlm;

    fn synthesizer(llm: Arc<ScriptedLlm>, verify: bool) -> Synthesizer {
        let generator = TextGenerator::new(llm, "mistral", 0.1);
        let prompts = Arc::new(PromptLibrary::builtin().unwrap());
        Synthesizer::new(generator, prompts, "the Regional Office").with_verify(verify)
    }

    fn passages() -> Vec<Passage> {
        vec![
            Passage::new("Rice testing costs ₱120 per kg.", Some("lab_fees.pdf".into()), 0.3),
            Passage::new("Results are released in 5 days.", None, 0.5),
        ]
    }

    #[test]
    fn test_build_context() {
        let (context, citations) = build_context(&passages());
        assert_eq!(
            context,
            "[Source: lab_fees.pdf]\nRice testing costs ₱120 per kg.\n\n[Source: unknown]\nResults are released in 5 days."
        );
        assert_eq!(
            citations,
            vec![Citation::new("lab_fees.pdf"), Citation { source: None }]
        );
    }

    #[tokio::test]
    async fn test_synthesize_cleans_and_emphasizes() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            "Answer: According to the context testing costs ₱120 per kg.\nSources: lab_fees.pdf",
        ]));
        let answer = synthesizer(llm.clone(), false)
            .synthesize("How much is rice testing?", &passages())
            .await
            .unwrap();

        assert_eq!(answer.text, "testing costs ₱120 *per kg*.");
        assert_eq!(answer.citations.len(), 2);

        let requests = llm.requests();
        let prompt = &requests[0].prompt;
        assert!(prompt.contains("[Source: lab_fees.pdf]"));
        assert!(prompt.contains("Question: How much is rice testing?"));
        assert!(prompt.contains("the Regional Office"));
    }

    #[tokio::test]
    async fn test_verifier_rejection_keeps_citations() {
        let llm = Arc::new(ScriptedLlm::new(vec!["Answer: It is free.", "unsupported"]));
        let answer = synthesizer(llm.clone(), true)
            .synthesize("Is rice testing free?", &passages())
            .await
            .unwrap();

        assert_eq!(answer.text, REFUSAL);
        assert_eq!(answer.citations.len(), 2);

        let requests = llm.requests();
        let check = &requests[1].prompt;
        assert!(check.contains("ANSWER:\nIt is free."));
    }

    #[tokio::test]
    async fn test_verifier_acceptance() {
        let llm = Arc::new(ScriptedLlm::new(vec!["Answer: Five days.", "SUPPORTED"]));
        let answer = synthesizer(llm, true)
            .synthesize("How long?", &passages())
            .await
            .unwrap();
        assert_eq!(answer.text, "Five days.");
    }

    #[tokio::test]
    async fn test_general_reply_has_no_citations() {
        let llm = Arc::new(ScriptedLlm::new(vec!["Hello! How can I help you today?"]));
        let answer = synthesizer(llm.clone(), true).general_reply("hi").await.unwrap();

        assert_eq!(answer.text, "Hello! How can I help you today?");
        assert!(answer.citations.is_empty());
        // No verification pass on the ungrounded path
        assert_eq!(llm.requests().len(), 1);
        assert!(llm.requests()[0].prompt.contains("User message: hi"));
    }
}
