use assist_core::config::LlmSettings;
use assist_core::AppResult;
use assist_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

/// Single-shot text generation with fixed model settings.
#[derive(Clone)]
pub struct TextGenerator {
    client: Arc<dyn LlmClient>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl TextGenerator {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    pub fn from_settings(client: Arc<dyn LlmClient>, settings: &LlmSettings) -> Self {
        let mut generator = Self::new(client, settings.model.clone(), settings.temperature);
        generator.max_tokens = settings.max_tokens;
        generator
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for a fully rendered prompt.
    pub async fn invoke(&self, prompt: &str) -> AppResult<String> {
        let mut request =
            LlmRequest::new(prompt, self.model.clone()).with_temperature(self.temperature);
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = self.client.complete(&request).await?;
        tracing::debug!(
            "Generated {} chars with {} ({} tokens)",
            response.content.len(),
            response.model,
            response.usage.total_tokens
        );
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fakes::ScriptedLlm;

    #[tokio::test]
    async fn test_invoke_passes_model_settings() {
        let llm = Arc::new(ScriptedLlm::new(vec!["Answer: Yes."]));
        let settings = LlmSettings {
            max_tokens: Some(256),
            ..Default::default()
        };
        let generator = TextGenerator::from_settings(llm.clone(), &settings);

        let text = generator.invoke("Question: hours?").await.unwrap();
        assert_eq!(text, "Answer: Yes.");

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "mistral");
        assert_eq!(requests[0].temperature, Some(0.1));
        assert_eq!(requests[0].max_tokens, Some(256));
        assert_eq!(requests[0].prompt, "Question: hours?");
    }

    #[tokio::test]
    async fn test_client_error_propagates() {
        let generator = TextGenerator::new(Arc::new(ScriptedLlm::failing()), "mistral", 0.1);
        assert!(generator.invoke("hi").await.is_err());
    }
}
