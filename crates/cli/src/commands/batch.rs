//! Batch command handler.
//!
//! Answers every non-blank line of a file, several at a time, over one set
//! of shared providers.

use super::ask::Reply;
use assist_core::{config::AppConfig, AppError, AppResult};
use assist_knowledge::{HybridRouter, Services};
use clap::Args;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;

/// Answer one question per line of a file
#[derive(Args, Debug)]
pub struct BatchCommand {
    /// File with one question per line
    #[arg(short, long)]
    pub file: PathBuf,

    /// Questions answered at the same time
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl BatchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing batch command");
        tracing::debug!("Batch options: {:?}", self);

        let contents = tokio::fs::read_to_string(&self.file).await.map_err(|e| {
            AppError::Config(format!("Failed to read questions file {:?}: {}", self.file, e))
        })?;
        let questions = parse_questions(&contents);
        tracing::info!("Answering {} questions", questions.len());

        let services = Services::from_config(config)?;
        let router = HybridRouter::from_services(&services);
        let replies = answer_all(&router, &questions, self.concurrency).await;

        if self.json {
            let output: Vec<_> = replies.iter().map(Reply::to_json).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            for reply in &replies {
                println!("Q: {}", reply.question);
                println!("{}", reply.to_text());
                println!();
            }
        }

        Ok(())
    }
}

fn parse_questions(contents: &str) -> Vec<&str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Answer all questions with at most `concurrency` in flight, in input order.
async fn answer_all(router: &HybridRouter, questions: &[&str], concurrency: usize) -> Vec<Reply> {
    stream::iter(questions.iter().map(|question| Reply::answer(router, question)))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_questions_skips_blank_lines() {
        let contents = "How much is calibration?\n\n   \n  Where is the office?  \n";
        assert_eq!(
            parse_questions(contents),
            vec!["How much is calibration?", "Where is the office?"]
        );
    }

    #[test]
    fn test_parse_questions_empty_file() {
        assert!(parse_questions("").is_empty());
    }
}
