//! Amount extraction for voice transcripts.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use crate::models::invoice::Language;

use super::numerals::normalize_digits;
use super::patterns::{AMOUNT_RULES, HUNDRED_WORD, THOUSAND_WORDS};
use super::{ExtractionMatch, FieldExtractor};

/// Amount field extractor.
///
/// Runs the whole amount cascade for every language: a Hindi transcript may
/// still say "$500", and an English one may carry a Devanagari numeral.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str, language: Language) -> Option<Self::Output> {
        self.extract_all(text, language).into_iter().next()
    }

    fn extract_all(&self, text: &str, _language: Language) -> Vec<Self::Output> {
        let magnitude = Magnitude::of(text);
        let mut results = Vec::new();

        for rule in AMOUNT_RULES.iter() {
            for caps in rule.regex.captures_iter(text) {
                let (Some(full_match), Some(numeral)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };

                let Some(amount) = parse_amount(numeral.as_str()) else {
                    trace!(rule = rule.name, fragment = numeral.as_str(), "skipping unparseable amount");
                    continue;
                };

                let amount = magnitude.apply(amount);
                if amount <= Decimal::ZERO {
                    trace!(rule = rule.name, fragment = numeral.as_str(), "skipping non-positive amount");
                    continue;
                }

                results.push(
                    ExtractionMatch::new(amount, rule.name, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

/// Magnitude words present anywhere in a transcript.
///
/// The multiplier is applied to every small amount in the text, not only to
/// the numeral next to the magnitude word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Magnitude {
    hundred: bool,
    thousand: bool,
}

impl Magnitude {
    fn of(text: &str) -> Self {
        Self {
            hundred: text.contains(HUNDRED_WORD),
            thousand: THOUSAND_WORDS.iter().any(|w| text.contains(w)),
        }
    }

    fn apply(self, amount: Decimal) -> Decimal {
        let hundred = Decimal::ONE_HUNDRED;
        if self.hundred && amount < hundred {
            amount * hundred
        } else if self.thousand && amount < hundred {
            amount * Decimal::ONE_THOUSAND
        } else {
            amount
        }
    }
}

/// Extract all amounts from a transcript, in rule order then match order.
pub fn extract_amounts(text: &str, language: Language) -> Vec<Decimal> {
    AmountExtractor::new()
        .extract_all(text, language)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// Parse a matched numeral (e.g. "1,000.50" or "५००") into a decimal.
///
/// Returns `None` for fragments that do not parse, are not positive, or
/// exceed the `Decimal` range.
pub fn parse_amount(fragment: &str) -> Option<Decimal> {
    let normalized = normalize_digits(fragment).replace(',', "");
    let normalized = normalized.strip_suffix('.').unwrap_or(&normalized);

    Decimal::from_str(normalized)
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}
