//! Email address extraction from page text

use regex::Regex;

/// Extracts email addresses from already-decoded text
///
/// The pattern is compiled once at construction and reused for every page.
pub struct EmailExtractor {
    email_pattern: Regex,
}

impl EmailExtractor {
    pub fn new() -> Self {
        EmailExtractor {
            email_pattern: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .unwrap(),
        }
    }

    /// Returns every match in order of first appearance, case preserved
    ///
    /// Duplicates are NOT removed here; deduplication is the result store's
    /// job at finalize time.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.email_pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}
