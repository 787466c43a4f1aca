//! Prompt library: registered templates rendered with Handlebars.

use crate::defaults::builtin_definitions;
use crate::loader::{list_prompts, load_prompt, validate_prompt};
use crate::types::PromptDefinition;
use assist_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;
use std::path::Path;

/// Registry of compiled prompt templates.
///
/// Built once at startup and shared read-only between concurrent queries.
pub struct PromptLibrary {
    registry: Handlebars<'static>,
    definitions: HashMap<String, PromptDefinition>,
}

impl std::fmt::Debug for PromptLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.ids();
        ids.sort_unstable();
        f.debug_struct("PromptLibrary").field("prompts", &ids).finish()
    }
}

impl PromptLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();

        // Prompts are plain text, never HTML
        registry.register_escape_fn(handlebars::no_escape);
        // A missing variable is a bug in the caller, not an empty string
        registry.set_strict_mode(true);

        Self {
            registry,
            definitions: HashMap::new(),
        }
    }

    /// Create a library holding only the built-in templates.
    pub fn builtin() -> AppResult<Self> {
        let mut library = Self::new();
        for definition in builtin_definitions() {
            library.register(definition)?;
        }
        Ok(library)
    }

    /// Built-in templates overridden by any YAML prompts in the workspace.
    pub fn load(workspace_path: &Path) -> AppResult<Self> {
        let mut library = Self::builtin()?;

        for id in list_prompts(workspace_path)? {
            let definition = load_prompt(workspace_path, &id)?;
            if library.definitions.contains_key(&id) {
                tracing::info!("Overriding built-in prompt '{}'", id);
            }
            library.register(definition)?;
        }

        Ok(library)
    }

    /// Compile and register a definition, replacing any with the same id.
    pub fn register(&mut self, definition: PromptDefinition) -> AppResult<()> {
        validate_prompt(&definition)?;

        self.registry
            .register_template_string(&definition.id, &definition.template)
            .map_err(|e| {
                AppError::Prompt(format!(
                    "Failed to register template '{}': {}",
                    definition.id, e
                ))
            })?;

        tracing::debug!("Registered prompt: {}", definition.id);
        self.definitions.insert(definition.id.clone(), definition);
        Ok(())
    }

    /// Look up a registered definition.
    pub fn get(&self, id: &str) -> Option<&PromptDefinition> {
        self.definitions.get(id)
    }

    /// Registered prompt ids, in no particular order.
    pub fn ids(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    /// Render a registered template with variables.
    ///
    /// # Example
    /// ```
    /// use assist_prompt::{PromptLibrary, SUPPORT_CHECK};
    /// use std::collections::HashMap;
    ///
    /// let library = PromptLibrary::builtin().unwrap();
    /// let mut vars = HashMap::new();
    /// vars.insert("context".to_string(), "Office hours are 8-5.".to_string());
    /// vars.insert("answer".to_string(), "We open at 8.".to_string());
    ///
    /// let prompt = library.render(SUPPORT_CHECK, &vars).unwrap();
    /// assert!(prompt.contains("We open at 8."));
    /// ```
    pub fn render(&self, id: &str, variables: &HashMap<String, String>) -> AppResult<String> {
        if !self.definitions.contains_key(id) {
            return Err(AppError::Prompt(format!("Unknown prompt: {}", id)));
        }

        self.registry
            .render(id, variables)
            .map_err(|e| AppError::Prompt(format!("Failed to render prompt '{}': {}", id, e)))
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{GENERAL_REPLY, GROUNDED_ANSWER, SUPPORT_CHECK};
    use crate::loader::prompts_dir;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_builtin_prompts_registered() {
        let library = PromptLibrary::builtin().unwrap();
        assert!(library.get(GROUNDED_ANSWER).is_some());
        assert!(library.get(GENERAL_REPLY).is_some());
        assert!(library.get(SUPPORT_CHECK).is_some());
    }

    #[test]
    fn test_grounded_prompt_renders_context_and_question() {
        let library = PromptLibrary::builtin().unwrap();
        let prompt = library
            .render(
                GROUNDED_ANSWER,
                &vars(&[
                    ("agency", "the Regional Office"),
                    ("context", "[Source: faq.pdf]\nCalibration takes 3 days."),
                    ("question", "How long is calibration?"),
                ]),
            )
            .unwrap();

        assert!(prompt.contains("[Source: faq.pdf]\nCalibration takes 3 days."));
        assert!(prompt.contains("Question: How long is calibration?"));
        assert!(prompt.contains("Start your reply with \"Answer: \""));
    }

    #[test]
    fn test_values_are_not_html_escaped() {
        let library = PromptLibrary::builtin().unwrap();
        let prompt = library
            .render(
                GENERAL_REPLY,
                &vars(&[("agency", "R&D Office"), ("query", "<hi> & \"hello\"")]),
            )
            .unwrap();

        assert!(prompt.contains("User message: <hi> & \"hello\""));
        assert!(prompt.contains("R&D Office"));
        assert!(prompt.contains("Do NOT include \"Answer:\""));
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let library = PromptLibrary::builtin().unwrap();
        let result = library.render(SUPPORT_CHECK, &vars(&[("context", "x")]));
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }

    #[test]
    fn test_unknown_prompt() {
        let library = PromptLibrary::builtin().unwrap();
        assert!(library.render("nope", &HashMap::new()).is_err());
    }

    #[test]
    fn test_workspace_override_replaces_builtin() {
        let temp = TempDir::new().unwrap();
        let dir = prompts_dir(temp.path());
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("answer.general.yml"),
            "id: answer.general\ntitle: Short greeting\ntemplate: \"Say hello to {{query}}\"\n",
        )
        .unwrap();

        let library = PromptLibrary::load(temp.path()).unwrap();
        let prompt = library
            .render(GENERAL_REPLY, &vars(&[("query", "Ana"), ("agency", "x")]))
            .unwrap();

        assert_eq!(prompt, "Say hello to Ana");
        assert_eq!(library.get(GENERAL_REPLY).unwrap().title, "Short greeting");
    }
}
