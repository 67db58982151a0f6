//! Literal placeholder substitution
//!
//! The template language is a closed set of `{{name}}` spans. Substitution
//! is a single pass over the text; spans without a mapping are left in the
//! output verbatim. That pass-through is part of the template contract,
//! not an error.

use aho_corasick::AhoCorasick;
use tracing::warn;

/// A dashboard template held as raw text
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
}

impl Template {
    /// Create a template from its text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Get the raw template text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace every `{{name}}` span that has a value in one pass
    ///
    /// Matching is over the complete literal span including braces, so a
    /// name that prefixes another (`day` / `day+1`) cannot shadow it.
    #[must_use]
    pub fn substitute(&self, values: &[(String, String)]) -> String {
        let spans: Vec<String> = values
            .iter()
            .map(|(name, _)| format!("{{{{{name}}}}}"))
            .collect();
        let replacements: Vec<&str> = values.iter().map(|(_, value)| value.as_str()).collect();

        match AhoCorasick::new(&spans) {
            Ok(automaton) => automaton.replace_all(&self.text, &replacements),
            Err(error) => {
                // Only reachable with a degenerate pattern set; keep the
                // template untouched rather than fail the cycle.
                warn!(%error, "placeholder automaton construction failed");
                self.text.clone()
            }
        }
    }
}
