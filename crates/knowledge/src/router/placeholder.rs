/// Template artifacts that betray an unpopulated official record.
pub const PLACEHOLDER_MARKERS: [&str; 9] = [
    "REPLACE_ME",
    "Step 1",
    "Step 2",
    "Step 3",
    "Doc 1",
    "Doc 2",
    "YYYY-MM-DD",
    "Procedure memo / document title",
    "Requirements memo / document title",
];

/// Whether `text` contains any placeholder marker, ignoring case.
pub fn is_placeholder(text: &str) -> bool {
    let lower = text.to_lowercase();
    PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| lower.contains(&marker.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_one_in_any_case() {
        assert!(is_placeholder("  1. Step 1"));
        assert!(is_placeholder("STEP 1: fill out the form"));
        assert!(is_placeholder("see step 1"));
    }

    #[test]
    fn test_other_markers() {
        assert!(is_placeholder("Effective YYYY-MM-DD"));
        assert!(is_placeholder("- replace_me"));
        assert!(is_placeholder("  - Doc 2"));
        assert!(is_placeholder("Source: Requirements memo / document title"));
    }

    #[test]
    fn test_real_answers_pass() {
        assert!(!is_placeholder(""));
        assert!(!is_placeholder(
            "**Official Procedure:**\n- **Scholarship**:\n  1. Submit the form\n  2. Attend the exam"
        ));
    }
}
