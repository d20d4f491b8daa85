//! Transcript language detection.

use crate::models::invoice::Language;

use super::patterns::HINDI_CHAR_SET;

/// Classify a transcript as Hindi or English.
///
/// A single character from the Hindi detection set anywhere in the text
/// makes the whole transcript Hindi.
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(|c| HINDI_CHAR_SET.contains(&c)) {
        Language::Hindi
    } else {
        Language::English
    }
}
