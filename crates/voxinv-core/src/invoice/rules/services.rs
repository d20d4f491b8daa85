//! Service phrase extraction for voice transcripts.

use tracing::debug;

use crate::models::invoice::Language;

use super::patterns::{service_fallbacks, service_vocabulary, SERVICE_FALLBACK_LIMIT};
use super::FieldExtractor;

/// Service phrase extractor.
pub struct ServiceExtractor;

impl ServiceExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Vocabulary entries contained in the text, in declaration order.
    fn scan_vocabulary(&self, text: &str, language: Language) -> Vec<String> {
        let haystack = text.to_lowercase();

        service_vocabulary(language)
            .iter()
            .filter(|phrase| haystack.contains(&phrase.to_lowercase()))
            .map(|phrase| phrase.to_string())
            .collect()
    }

    /// Generic "<phrase> service/work/project" captures.
    fn scan_fallbacks(&self, text: &str, language: Language) -> Vec<String> {
        let mut phrases = Vec::new();

        for rule in service_fallbacks(language) {
            for caps in rule.regex.captures_iter(text) {
                if phrases.len() == SERVICE_FALLBACK_LIMIT {
                    return phrases;
                }
                let Some(phrase) = caps.get(1).map(|m| m.as_str().trim()) else {
                    continue;
                };
                if !phrase.is_empty() {
                    debug!(rule = rule.name, phrase, "generic service pattern matched");
                    phrases.push(phrase.to_string());
                }
            }
        }

        phrases
    }
}

impl Default for ServiceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ServiceExtractor {
    type Output = String;

    fn extract(&self, text: &str, language: Language) -> Option<Self::Output> {
        self.extract_all(text, language).into_iter().next()
    }

    fn extract_all(&self, text: &str, language: Language) -> Vec<Self::Output> {
        let found = self.scan_vocabulary(text, language);
        if !found.is_empty() {
            return found;
        }
        self.scan_fallbacks(text, language)
    }
}

/// Extract service phrases from a transcript.
pub fn extract_services(text: &str, language: Language) -> Vec<String> {
    ServiceExtractor::new().extract_all(text, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vocabulary_order_and_overlap() {
        let services = extract_services("Need Web Design and SEO", Language::English);
        // "design" is a separate entry and matches inside "web design".
        assert_eq!(services, vec!["web design", "design", "seo"]);
    }

    #[test]
    fn test_declaration_order_not_text_order() {
        let services = extract_services("translation then consulting", Language::English);
        assert_eq!(services, vec!["consulting", "translation"]);
    }

    #[test]
    fn test_each_phrase_once() {
        let services = extract_services("seo, more seo, seo again", Language::English);
        assert_eq!(services, vec!["seo"]);
    }

    #[test]
    fn test_hindi_vocabulary() {
        let services = extract_services("वेबसाइट और अनुवाद 500 रुपए", Language::Hindi);
        assert_eq!(services, vec!["वेबसाइट", "अनुवाद"]);
    }

    #[test]
    fn test_english_fallback() {
        let services = extract_services("house cleaning service 200 dollars", Language::English);
        assert_eq!(services, vec!["house cleaning"]);
    }

    #[test]
    fn test_english_work_and_project_fallbacks() {
        let services = extract_services("roof repair work 150 dollars", Language::English);
        assert_eq!(services, vec!["roof repair"]);

        let services = extract_services("kitchen remodel project 900 dollars", Language::English);
        assert_eq!(services, vec!["kitchen remodel"]);
    }

    #[test]
    fn test_fallback_patterns_scanned_in_order() {
        let services = extract_services("tiling project, garden work", Language::English);
        assert_eq!(services, vec!["garden", "tiling"]);
    }

    #[test]
    fn test_fallback_capped_at_two() {
        let services = extract_services(
            "plumbing service, roofing service and painting work",
            Language::English,
        );
        assert_eq!(services.len(), 2);
        assert_eq!(services[0], "plumbing");
    }

    #[test]
    fn test_fallback_not_used_when_vocabulary_matches() {
        let services = extract_services("seo plus cleaning service", Language::English);
        assert_eq!(services, vec!["seo"]);
    }

    #[test]
    fn test_hindi_marker_words_are_vocabulary() {
        // "सेवा" is itself a vocabulary entry, so the scan wins over the generic pattern.
        let services = extract_services("सफाई की सेवा", Language::Hindi);
        assert_eq!(services, vec!["सेवा"]);
    }

    #[test]
    fn test_hindi_fallback_patterns() {
        let services = ServiceExtractor::new().scan_fallbacks("सफाई की सेवा", Language::Hindi);
        assert_eq!(services, vec!["सफाई"]);
    }

    #[test]
    fn test_nothing_found() {
        assert!(extract_services("", Language::English).is_empty());
        assert!(extract_services("500 dollars for John", Language::English).is_empty());
    }
}
