//! Built-in prompt templates.
//!
//! Every template can be replaced by a YAML file with the same id under
//! `.assist/prompts/`.

use crate::types::PromptDefinition;

/// Grounded answer over reranked passages. Variables: `agency`, `context`, `question`.
pub const GROUNDED_ANSWER: &str = "answer.grounded";

/// Ungrounded conversational reply used when retrieval finds nothing.
/// Variables: `agency`, `query`.
pub const GENERAL_REPLY: &str = "answer.general";

/// Strict support check of an answer against its context.
/// Variables: `context`, `answer`.
pub const SUPPORT_CHECK: &str = "answer.verify";

const GROUNDED_TEMPLATE: &str = r#"You are {{agency}}'s AI Assistant speaking directly to clients.
Answer naturally and conversationally, as a member of {{agency}}'s staff would.

IMPORTANT RULES:
1) NEVER say "according to the FAQs", "according to the context", "based on the documents",
   or refer to internal documents or sources in any way. You are talking to the client directly.
2) Answer directly. When you have the information, state it with confidence.
3) When the context has nothing relevant, say you do not have that specific information
   and suggest contacting {{agency}} directly.
4) Treat the context as your own knowledge and present it that way.
5) Stay helpful and professional.

Start your reply with "Answer: " followed by your response.
Keep it concise, clear, and client-friendly.

Context:
{{context}}

Question: {{question}}
"#;

const GENERAL_TEMPLATE: &str = r#"You are {{agency}}'s helpful AI assistant.
Reply briefly and conversationally to the user message below.
- If it is a greeting (like "hi", "hello", or "how are you"), greet the user back naturally without mentioning Evidence or Sources.
- If it asks generally about {{agency}}'s services or programs, describe the kinds of
  support a regional science and technology office usually provides (technology programs,
  testing and calibration services, scholarships, and similar) and suggest contacting
  {{agency}} directly for specific, up-to-date details.

Reply naturally. Do NOT include "Answer:", "Evidence:", or "Sources:" sections.

User message: {{query}}
Assistant:"#;

const VERIFY_TEMPLATE: &str = r#"You are a strict verifier.
If ANY factual claim in ANSWER is NOT explicitly supported by CONTEXT, respond only: UNSUPPORTED
Otherwise respond only: SUPPORTED

CONTEXT:
{{context}}

ANSWER:
{{answer}}
"#;

/// All built-in definitions, in registration order.
pub fn builtin_definitions() -> Vec<PromptDefinition> {
    vec![
        PromptDefinition::new(
            GROUNDED_ANSWER,
            "Grounded answer",
            &["agency", "context", "question"],
            GROUNDED_TEMPLATE,
        )
        .with_description("Client-facing answer constrained to retrieved passages"),
        PromptDefinition::new(
            GENERAL_REPLY,
            "General reply",
            &["agency", "query"],
            GENERAL_TEMPLATE,
        )
        .with_description("Greeting-aware reply when no grounding is available"),
        PromptDefinition::new(
            SUPPORT_CHECK,
            "Support verifier",
            &["context", "answer"],
            VERIFY_TEMPLATE,
        ),
    ]
}
