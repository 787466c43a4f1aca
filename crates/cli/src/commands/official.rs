//! Official command handler.
//!
//! Prints what the official store would answer, without falling back to
//! generation.

use assist_core::{config::AppConfig, AppResult};
use assist_knowledge::{HybridRouter, Services};
use clap::Args;

/// Show the official-store decision for a question
#[derive(Args, Debug)]
pub struct OfficialCommand {
    /// The question to check
    pub question: String,
}

impl OfficialCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing official command");

        let services = Services::from_config(config)?;
        let router = HybridRouter::from_services(&services);
        let check = router.check_official(self.question.trim());

        println!("Route: {}", check.route);
        println!("Placeholder: {}", if check.placeholder { "yes" } else { "no" });
        println!();
        if check.answer.is_empty() {
            println!("(no official record matched)");
        } else {
            println!("{}", check.answer.render());
        }

        Ok(())
    }
}
