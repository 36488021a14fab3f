//! Response sanitizer for model-generated text that will be displayed or
//! spoken. The upstream service is treated as unreliable in formatting:
//! questions come back wrapped in markdown emphasis, numbered, quoted, or
//! trailed by a parenthetical aside ("(This assesses...)"). Every call site
//! that shows or speaks generated text goes through `clean_spoken_text`.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_STARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static BOLD_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__([^_]+)__").unwrap());
static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());
static QUESTION_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Q\d+:\s*").unwrap());
static LIST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s*").unwrap());
static TRAILING_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)\s*$").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Cleans a generated question (or follow-up) for display and speech.
///
/// Transformation rules, in order:
/// 1. unwrap markdown emphasis (`**x**`, `*x*`, `__x__`, `_x_`)
/// 2. drop a leading `Q<n>:` or `<n>.` label
/// 3. drop one surrounding pair of double quotes
/// 4. drop a trailing parenthetical aside
/// 5. collapse runs of whitespace and trim
pub fn clean_spoken_text(raw: &str) -> String {
    let cleaned = BOLD_STARS.replace_all(raw, "$1");
    let cleaned = ITALIC_STAR.replace_all(&cleaned, "$1");
    let cleaned = BOLD_UNDERSCORES.replace_all(&cleaned, "$1");
    let cleaned = ITALIC_UNDERSCORE.replace_all(&cleaned, "$1");

    let cleaned = cleaned.trim();
    let cleaned = QUESTION_LABEL.replace(cleaned, "");
    let cleaned = LIST_NUMBER.replace(&cleaned, "");

    let cleaned = cleaned.trim();
    let cleaned = cleaned.strip_prefix('"').unwrap_or(cleaned);
    let cleaned = cleaned.strip_suffix('"').unwrap_or(cleaned);

    let cleaned = TRAILING_PAREN.replace(cleaned.trim(), "");

    WHITESPACE.replace_all(cleaned.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_bold_and_italic_markers() {
        assert_eq!(
            clean_spoken_text("Tell me about **distributed** *systems*."),
            "Tell me about distributed systems."
        );
        assert_eq!(
            clean_spoken_text("Explain __sharding__ and _replication_."),
            "Explain sharding and replication."
        );
    }

    #[test]
    fn test_strips_leading_question_label() {
        assert_eq!(
            clean_spoken_text("Q1: How would you scale this service?"),
            "How would you scale this service?"
        );
        assert_eq!(
            clean_spoken_text("Q12: How?"),
            "How?"
        );
    }

    #[test]
    fn test_strips_leading_list_number() {
        assert_eq!(
            clean_spoken_text("3. Describe your deployment pipeline."),
            "Describe your deployment pipeline."
        );
    }

    #[test]
    fn test_strips_surrounding_quotes() {
        assert_eq!(
            clean_spoken_text("\"What is your experience with Kafka?\""),
            "What is your experience with Kafka?"
        );
    }

    #[test]
    fn test_strips_trailing_parenthetical() {
        assert_eq!(
            clean_spoken_text("Walk me through a recent incident. (This assesses ownership)"),
            "Walk me through a recent incident."
        );
    }

    #[test]
    fn test_keeps_inner_parenthetical() {
        assert_eq!(
            clean_spoken_text("How would you design a CDN (content delivery network) for video?"),
            "How would you design a CDN (content delivery network) for video?"
        );
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            clean_spoken_text("  What\n  does   idempotency mean? "),
            "What does idempotency mean?"
        );
    }

    #[test]
    fn test_combined_formatting_noise() {
        assert_eq!(
            clean_spoken_text("Q2: \"**Describe** a time you _debugged_ a\nproduction outage. (tests incident response)\""),
            "Describe a time you debugged a production outage."
        );
    }

    #[test]
    fn test_already_clean_text_is_unchanged() {
        let text = "What trade-offs did you weigh when choosing PostgreSQL?";
        assert_eq!(clean_spoken_text(text), text);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(clean_spoken_text(""), "");
        assert_eq!(clean_spoken_text("   \n "), "");
    }
}
