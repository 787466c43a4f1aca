//! Display formatting shared by every answer path.

use crate::types::Citation;
use once_cell::sync::Lazy;
use regex::Regex;

static UNIT_PHRASES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\*?\b(per piece|per hour|per L|per kg|per ton)\b\*?")
        .expect("unit phrase pattern is valid")
});

/// Wrap billing unit phrases in emphasis markers.
///
/// Matching is case-insensitive and keeps the original casing; amounts are
/// left untouched. Phrases already wrapped stay single-wrapped.
pub fn emphasize_units(text: &str) -> String {
    UNIT_PHRASES.replace_all(text, "*$1*").into_owned()
}

/// Render citations as a trailing `Sources:` block.
///
/// Returns an empty string when there are no citations.
pub fn format_sources(citations: &[Citation]) -> String {
    if citations.is_empty() {
        return String::new();
    }

    let mut lines = vec!["\n**Sources:**".to_string()];
    for citation in citations {
        lines.push(format!(
            "- {}",
            citation.source.as_deref().unwrap_or("(unknown)")
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasize_per_kg_any_case() {
        assert_eq!(emphasize_units("₱120 per kg"), "₱120 *per kg*");
        assert_eq!(emphasize_units("₱120 PER KG"), "₱120 *PER KG*");
        assert_eq!(emphasize_units("₱120 Per Kg."), "₱120 *Per Kg*.");
    }

    #[test]
    fn test_emphasize_all_units() {
        let text = "50 per piece, 300 per hour, 10 per L, 2,000 per ton";
        assert_eq!(
            emphasize_units(text),
            "50 *per piece*, 300 *per hour*, 10 *per L*, 2,000 *per ton*"
        );
    }

    #[test]
    fn test_emphasis_requires_word_boundaries() {
        assert_eq!(emphasize_units("5 per kgs"), "5 per kgs");
        assert_eq!(emphasize_units("super kg"), "super kg");
        assert_eq!(emphasize_units("per device"), "per device");
    }

    #[test]
    fn test_emphasis_is_not_reapplied() {
        let once = emphasize_units("Testing costs 120 per kg, 300 Per Hour.");
        assert_eq!(once, "Testing costs 120 *per kg*, 300 *Per Hour*.");
        assert_eq!(emphasize_units(&once), once);
        assert_eq!(emphasize_units("**per ton**"), "**per ton**");
    }

    #[test]
    fn test_format_sources_empty() {
        assert_eq!(format_sources(&[]), "");
    }

    #[test]
    fn test_format_sources_unknown_literal() {
        let citations = vec![Citation::new("fees.pdf"), Citation { source: None }];
        assert_eq!(
            format_sources(&citations),
            "\n**Sources:**\n- fees.pdf\n- (unknown)"
        );
    }
}
