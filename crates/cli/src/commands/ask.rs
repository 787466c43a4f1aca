//! Ask command handler.
//!
//! Answers a single question through the hybrid router.

use super::ERROR_REPLY;
use assist_core::{config::AppConfig, AppResult};
use assist_knowledge::{Answer, HybridRouter, Route, Services};
use clap::Args;

/// Answer a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let question = self.question.trim();
        if question.is_empty() {
            tracing::debug!("Blank question, nothing to answer");
            return Ok(());
        }

        let services = Services::from_config(config)?;
        let router = HybridRouter::from_services(&services);
        let reply = Reply::answer(&router, question).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reply.to_json())?);
        } else {
            println!("{}", reply.to_text());
        }

        Ok(())
    }
}

/// Outcome of answering one question.
///
/// Provider failures are logged and kept as `None` so callers print the
/// error reply instead of aborting.
pub(crate) struct Reply {
    pub question: String,
    pub route: Route,
    pub answer: Option<Answer>,
}

impl Reply {
    pub async fn answer(router: &HybridRouter, question: &str) -> Self {
        let route = router.route(question);
        let answer = match router.resolve(question).await {
            Ok(answer) => Some(answer),
            Err(e) => {
                tracing::error!("Failed to answer {:?}: {}", question, e);
                None
            }
        };

        Self {
            question: question.to_string(),
            route,
            answer,
        }
    }

    pub fn to_text(&self) -> String {
        match &self.answer {
            Some(answer) => answer.render(),
            None => ERROR_REPLY.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match &self.answer {
            Some(answer) => serde_json::json!({
                "question": self.question,
                "route": self.route,
                "answer": answer.text,
                "citations": answer.citations,
            }),
            None => serde_json::json!({
                "question": self.question,
                "route": self.route,
                "error": ERROR_REPLY,
            }),
        }
    }
}
