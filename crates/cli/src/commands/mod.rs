//! Command handlers for the Agency Assist CLI.

pub mod ask;
pub mod batch;
pub mod official;
pub mod stats;

pub use ask::AskCommand;
pub use batch::BatchCommand;
pub use official::OfficialCommand;
pub use stats::StatsCommand;

/// Shown in place of an answer when a provider fails.
pub const ERROR_REPLY: &str = "Sorry, an error occurred.";
