//! Customer name extraction for voice transcripts.

use tracing::debug;

use crate::models::invoice::Language;

use super::patterns::name_rules;
use super::{ExtractionMatch, FieldExtractor};

/// Customer name extractor.
///
/// Patterns are tried most specific first and the first pattern that matches
/// anywhere decides the outcome, even when its capture is blank.
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run the cascade and return the winning rule's first match, if any.
    fn first_match(&self, text: &str, language: Language) -> Option<ExtractionMatch<String>> {
        for rule in name_rules(language) {
            let Some(caps) = rule.regex.captures(text) else {
                continue;
            };
            let Some(name) = caps.get(1) else {
                continue;
            };

            debug!(rule = rule.name, "name pattern matched");
            return Some(
                ExtractionMatch::new(name.as_str().trim().to_string(), rule.name, name.as_str())
                    .with_position(name.start(), name.end()),
            );
        }

        None
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str, language: Language) -> Option<Self::Output> {
        self.first_match(text, language)
            .filter(|m| !m.value.is_empty())
    }

    /// All non-blank matches of the winning rule, left to right.
    fn extract_all(&self, text: &str, language: Language) -> Vec<Self::Output> {
        let Some(winner) = self.first_match(text, language) else {
            return Vec::new();
        };
        let Some(rule) = name_rules(language).iter().find(|r| r.name == winner.rule) else {
            return Vec::new();
        };

        rule.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| {
                ExtractionMatch::new(m.as_str().trim().to_string(), rule.name, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .filter(|m| !m.value.is_empty())
            .collect()
    }
}

/// Extract the candidate customer name from a transcript.
pub fn extract_name(text: &str, language: Language) -> Option<String> {
    NameExtractor::new().extract(text, language).map(|m| m.value)
}
