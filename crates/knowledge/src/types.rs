//! Core types shared by the answering pipeline.

use serde::{Deserialize, Serialize};

/// A unit of retrieved text.
///
/// Produced by the evidence index at query time and never mutated
/// afterwards; reranking only reorders passages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Passage text
    pub text: String,

    /// Originating document name, from index metadata
    #[serde(default)]
    pub source: Option<String>,

    /// Distance assigned by the index (lower is closer)
    pub score: f32,
}

impl Passage {
    /// Create a passage.
    pub fn new(text: impl Into<String>, source: Option<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            source,
            score,
        }
    }

    /// Source name used when tagging grounding context.
    pub fn source_label(&self) -> &str {
        self.source.as_deref().unwrap_or("unknown")
    }

    /// Citation pointing at this passage's document.
    pub fn citation(&self) -> Citation {
        Citation {
            source: self.source.clone(),
        }
    }
}

/// Reference to the document or record backing an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub source: Option<String>,
}

impl Citation {
    /// Citation for a named source.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }
}

/// An answer body plus its ordered citations.
///
/// Citations are not deduplicated: two passages from the same document
/// produce two entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub citations: Vec<Citation>,
}

impl Answer {
    /// Create an answer.
    pub fn new(text: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            text: text.into(),
            citations,
        }
    }

    /// The empty answer returned when nothing matched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the answer has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Display form: body, newline, then the sources block.
    pub fn render(&self) -> String {
        format!(
            "{}\n{}",
            self.text,
            crate::formatters::format_sources(&self.citations)
        )
    }
}
