//! Comment moderation - banned-word filtering.

use crate::error::DomainError;

/// Words that block a comment, matched case-insensitively as substrings.
pub const DEFAULT_BAD_WORDS: &[&str] = &["редиска", "негодяй"];

/// The warning attached to the text field when a banned word is found.
pub const DEFAULT_WARNING: &str = "Не ругайтесь!";

/// Substring blocklist applied to comment text before it is persisted.
///
/// The configured words are expected in lowercase; the submitted text is
/// lowercased before scanning, so matching is case-insensitive. The same
/// warning is reported no matter which word matched - the first hit wins.
#[derive(Debug, Clone)]
pub struct BannedWords {
    words: Vec<String>,
    warning: String,
}

impl BannedWords {
    pub fn new(words: Vec<String>, warning: String) -> Self {
        let words = words
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self { words, warning }
    }

    /// Check a comment body against the blocklist.
    ///
    /// Returns `DomainError::Validation` carrying the warning if any banned
    /// word appears in the text.
    pub fn check(&self, text: &str) -> Result<(), DomainError> {
        let lowered = text.to_lowercase();

        for word in &self.words {
            if lowered.contains(word.as_str()) {
                return Err(DomainError::Validation(self.warning.clone()));
            }
        }

        Ok(())
    }
}

impl Default for BannedWords {
    fn default() -> Self {
        Self::new(
            DEFAULT_BAD_WORDS.iter().map(|w| w.to_string()).collect(),
            DEFAULT_WARNING.to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes() {
        let filter = BannedWords::default();
        assert!(filter.check("Текст комментария").is_ok());
    }

    #[test]
    fn banned_word_is_rejected_with_warning() {
        let filter = BannedWords::default();
        let text = format!("Какой-то текст, {}, ещё текст", DEFAULT_BAD_WORDS[0]);

        let err = filter.check(&text).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert_eq!(msg, DEFAULT_WARNING),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let filter = BannedWords::default();
        assert!(filter.check("ты РЕДИСКА").is_err());
    }

    #[test]
    fn matches_inside_longer_words() {
        // Substring containment, not word-boundary matching.
        let filter = BannedWords::new(vec!["spam".into()], "no".into());
        assert!(filter.check("unspammable").is_err());
    }

    #[test]
    fn same_warning_regardless_of_word() {
        let filter = BannedWords::new(vec!["foo".into(), "bar".into()], "blocked".into());

        for text in ["has foo", "has bar", "foo and bar"] {
            match filter.check(text).unwrap_err() {
                DomainError::Validation(msg) => assert_eq!(msg, "blocked"),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn empty_entries_are_ignored() {
        // An empty word would match every text.
        let filter = BannedWords::new(vec!["".into(), "  ".into()], "blocked".into());
        assert!(filter.check("anything at all").is_ok());
    }
}
