//! Rule-based field extractors for voice transcripts.

pub mod amounts;
pub mod language;
pub mod names;
pub mod numerals;
pub mod patterns;
pub mod services;

pub use amounts::{extract_amounts, parse_amount, AmountExtractor};
pub use language::detect_language;
pub use names::{extract_name, NameExtractor};
pub use numerals::normalize_digits;
pub use patterns::RULESET_VERSION;
pub use services::{extract_services, ServiceExtractor};

use crate::models::invoice::Language;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str, language: Language) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str, language: Language) -> Vec<Self::Output>;
}

/// A value together with the rule and text span that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the cascade rule that matched.
    pub rule: &'static str,
    /// Byte span in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
