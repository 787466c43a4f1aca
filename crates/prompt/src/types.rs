//! Prompt types for Agency Assist.

use serde::{Deserialize, Serialize};

/// A prompt definition, either built in or loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier (e.g., "answer.grounded")
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,

    /// Free-form description shown by diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Variables the template expects
    #[serde(default)]
    pub variables: Vec<String>,

    /// Template string with Handlebars syntax
    pub template: String,
}

fn default_api_version() -> String {
    "1.0".to_string()
}

impl PromptDefinition {
    /// Create a definition with the default API version.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        variables: &[&str],
        template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            api_version: default_api_version(),
            description: None,
            variables: variables.iter().map(|v| v.to_string()).collect(),
            template: template.into(),
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
