//! Prompt system for Agency Assist.
//!
//! This crate provides structured prompt management with:
//! - Built-in templates for grounded answers, general replies and verification
//! - YAML-based overrides under `.assist/prompts/`
//! - Handlebars template rendering

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::PromptLibrary;
pub use defaults::{GENERAL_REPLY, GROUNDED_ANSWER, SUPPORT_CHECK};
pub use loader::{list_prompts, load_prompt};
pub use types::PromptDefinition;
