//! Pure post-processing stages applied to generated answers.
//!
//! [`clean_answer`] chains extraction, the structured-section fallback and
//! meta-phrase scrubbing. Unit emphasis lives in [`crate::formatters`] since
//! the general reply path uses it too.

use once_cell::sync::Lazy;
use regex::Regex;

/// Replaces an answer the verifier rejected.
pub const REFUSAL: &str = "I don't have enough information to answer that.";

/// Section markers that end the answer body, in truncation order.
const SECTION_MARKERS: [&str; 3] = ["Evidence:", "Sources:", "Source:"];

/// Phrases that leak the existence of internal documents.
///
/// Longer variants precede their prefixes so alternation removes them whole.
const META_PHRASES: [&str; 17] = [
    "according to the faqs",
    "according to the faq",
    "according to the context",
    "according to the documents",
    "according to the provided context",
    "based on the faqs",
    "based on the faq",
    "based on the context",
    "based on the documents",
    "from the faqs",
    "from the faq",
    "from the context",
    "from the documents",
    "as mentioned in the faqs",
    "as mentioned in the context",
    "as stated in the faqs",
    "as stated in the context",
];

static META_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternation = META_PHRASES
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){}", alternation)).expect("meta phrase pattern is valid")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static DOUBLE_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*,").expect("comma pattern is valid"));
static DOUBLE_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\.\s*\.").expect("period pattern is valid"));

/// Body of the `Answer:` section.
///
/// Capture starts at the first line beginning with `answer:` (any case) and
/// stops at an `evidence:`, `sources:` or `source:` line. Lines mentioning
/// "not applicable" are dropped. Empty when there is no `Answer:` line.
pub fn extract_answer_section(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut in_answer = false;

    for line in text.split('\n') {
        let lower = line.trim().to_lowercase();

        if lower.starts_with("answer:") {
            in_answer = true;
            let rest = line.split_once(':').map_or("", |(_, rest)| rest.trim());
            if !rest.is_empty() {
                kept.push(rest);
            }
            continue;
        }

        if in_answer
            && (lower.starts_with("evidence:")
                || lower.starts_with("sources:")
                || lower.starts_with("source:"))
        {
            break;
        }

        if lower.contains("not applicable") {
            continue;
        }

        if in_answer {
            kept.push(line);
        }
    }

    kept.join("\n").trim().to_string()
}

/// Fallback when no `Answer:` section exists: cut trailing structured
/// sections and a leading `Answer:` label.
pub fn strip_structured_sections(text: &str) -> String {
    let mut result = text.to_string();
    for marker in SECTION_MARKERS {
        if let Some(pos) = result.find(marker) {
            result = result[..pos].trim().to_string();
        }
    }

    let trimmed = result.trim();
    trimmed
        .strip_prefix("Answer:")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Delete every meta phrase, case-insensitively.
///
/// Text is only re-spaced when something was removed; repeated until the
/// result contains no phrase, so a second pass is a no-op.
pub fn scrub_meta_phrases(text: &str) -> String {
    let mut result = text.to_string();

    while META_PATTERN.is_match(&result) {
        result = META_PATTERN.replace_all(&result, "").into_owned();
        result = WHITESPACE_RUN.replace_all(&result, " ").into_owned();
        result = DOUBLE_COMMA.replace_all(&result, ",").into_owned();
        result = DOUBLE_PERIOD.replace_all(&result, ".").into_owned();
        result = result.trim().to_string();
    }

    result
}

/// Extraction, fallback and scrubbing. Returns `raw` when nothing survives.
///
/// Re-cleaning the output is a no-op unless it still contains a section
/// marker mid-line, which the fallback truncates at.
pub fn clean_answer(raw: &str) -> String {
    let mut answer = extract_answer_section(raw);
    if answer.is_empty() {
        answer = strip_structured_sections(raw);
    }

    let answer = scrub_meta_phrases(&answer);
    if answer.is_empty() {
        raw.to_string()
    } else {
        answer
    }
}

/// Whether a verifier verdict rejects the answer.
pub fn is_unsupported(verdict: &str) -> bool {
    verdict.trim().to_uppercase().contains("UNSUPPORTED")
}
