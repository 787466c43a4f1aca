//! Hybrid answering for a regional agency assistant.
//!
//! Official-seeking questions are answered from curated records; everything
//! else, and any official lookup that comes up empty or unpopulated, goes
//! through retrieval, reranking and grounded generation.
//!
//! ```no_run
//! use assist_core::AppConfig;
//! use assist_knowledge::{HybridRouter, Services};
//!
//! # async fn example() -> assist_core::AppResult<()> {
//! let config = AppConfig::load()?;
//! let services = Services::from_config(&config)?;
//! let router = HybridRouter::from_services(&services);
//! println!("{}", router.answer("How much does calibration cost?").await?);
//! # Ok(())
//! # }
//! ```

pub mod embeddings;
pub mod formatters;
pub mod generator;
pub mod index;
pub mod intent;
pub mod official;
pub mod pipeline;
pub mod rerank;
pub mod retrieval;
pub mod router;
pub mod services;
pub mod synthesis;
pub mod types;


pub use intent::{classify, Intent};
pub use official::{Collection, CollectionStats, OfficialStore};
pub use pipeline::RetrievalPipeline;
pub use router::{HybridRouter, OfficialCheck, Route};
pub use services::Services;
pub use types::{Answer, Citation, Passage};
