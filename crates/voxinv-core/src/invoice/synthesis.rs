//! Line-item synthesis from extracted services and amounts.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::invoice::{Language, LineItem};

/// Which synthesis branch applies to a pair of extraction outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisPolicy {
    /// Services and amounts both present: pair them index by index.
    Paired,
    /// Services without amounts: price each at the default unit price.
    DefaultPriced,
    /// Amounts without services: bill each under a generic description.
    Generic,
    /// Nothing to build from.
    Empty,
}

impl SynthesisPolicy {
    /// Decision table keyed on (services empty, amounts empty).
    pub fn select(services_empty: bool, amounts_empty: bool) -> Self {
        match (services_empty, amounts_empty) {
            (false, false) => SynthesisPolicy::Paired,
            (false, true) => SynthesisPolicy::DefaultPriced,
            (true, false) => SynthesisPolicy::Generic,
            (true, true) => SynthesisPolicy::Empty,
        }
    }
}

/// Builds invoice line items from services and amounts.
#[derive(Debug, Clone, Default)]
pub struct LineItemSynthesizer {
    config: ExtractionConfig,
}

impl LineItemSynthesizer {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn synthesize(
        &self,
        services: &[String],
        amounts: &[Decimal],
        language: Language,
    ) -> Vec<LineItem> {
        let policy = SynthesisPolicy::select(services.is_empty(), amounts.is_empty());
        debug!(?policy, services = services.len(), amounts = amounts.len(), "synthesizing line items");

        let cap = self.config.max_synthesized_items;

        match policy {
            SynthesisPolicy::Paired => services
                .iter()
                .zip(amounts)
                .map(|(service, amount)| LineItem::single(title_case(service), *amount))
                .collect(),
            SynthesisPolicy::DefaultPriced => services
                .iter()
                .take(cap)
                .map(|service| LineItem::single(title_case(service), self.config.default_unit_price))
                .collect(),
            SynthesisPolicy::Generic => {
                let description = self.generic_description(language);
                amounts
                    .iter()
                    .take(cap)
                    .map(|amount| LineItem::single(description, *amount))
                    .collect()
            }
            SynthesisPolicy::Empty => Vec::new(),
        }
    }

    fn generic_description(&self, language: Language) -> &str {
        match language {
            Language::English => &self.config.generic_description_en,
            Language::Hindi => &self.config.generic_description_hi,
        }
    }
}

/// Synthesize line items with the default configuration.
pub fn synthesize(services: &[String], amounts: &[Decimal], language: Language) -> Vec<LineItem> {
    LineItemSynthesizer::default().synthesize(services, amounts, language)
}

/// Title-case a phrase: the first cased letter after any uncased character
/// is upper-cased, the rest lower-cased ("ui/ux" becomes "Ui/Ux").
pub fn title_case(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut previous_cased = false;

    for c in phrase.chars() {
        if previous_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_cased = c.is_lowercase() || c.is_uppercase();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn assert_well_formed(items: &[LineItem]) {
        for item in items {
            assert_eq!(item.quantity, Decimal::ONE);
            assert_eq!(item.total, item.quantity * item.unit_price);
        }
    }

    #[test]
    fn test_policy_table() {
        assert_eq!(SynthesisPolicy::select(false, false), SynthesisPolicy::Paired);
        assert_eq!(SynthesisPolicy::select(false, true), SynthesisPolicy::DefaultPriced);
        assert_eq!(SynthesisPolicy::select(true, false), SynthesisPolicy::Generic);
        assert_eq!(SynthesisPolicy::select(true, true), SynthesisPolicy::Empty);
    }

    #[test]
    fn test_paired_drops_extra_services() {
        let items = synthesize(&strings(&["A", "B", "C"]), &[Decimal::new(10, 0)], Language::English);
        assert_eq!(items, vec![LineItem::single("A", Decimal::new(10, 0))]);
    }

    #[test]
    fn test_paired_keeps_pairs_in_order() {
        let amounts = [Decimal::new(100, 0), Decimal::new(250, 0), Decimal::new(75, 0)];
        let items = synthesize(&strings(&["web design", "seo"]), &amounts, Language::English);
        assert_eq!(
            items,
            vec![
                LineItem::single("Web Design", Decimal::new(100, 0)),
                LineItem::single("Seo", Decimal::new(250, 0)),
            ]
        );
        assert_well_formed(&items);
    }

    #[test]
    fn test_amounts_only() {
        let items = synthesize(&[], &[Decimal::new(20, 0), Decimal::new(30, 0)], Language::English);
        assert_eq!(
            items,
            vec![
                LineItem::single("Professional Services", Decimal::new(20, 0)),
                LineItem::single("Professional Services", Decimal::new(30, 0)),
            ]
        );
    }

    #[test]
    fn test_amounts_only_hindi_and_capped() {
        let amounts: Vec<_> = (1..=5).map(|n| Decimal::new(n * 100, 0)).collect();
        let items = synthesize(&[], &amounts, Language::Hindi);
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.description == "व्यावसायिक सेवा"));
        assert_eq!(items[2].unit_price, Decimal::new(300, 0));
        assert_well_formed(&items);
    }

    #[test]
    fn test_services_only() {
        let items = synthesize(&strings(&["Consulting"]), &[], Language::English);
        assert_eq!(items, vec![LineItem::single("Consulting", Decimal::new(5000, 1))]);
        assert_eq!(items[0].unit_price, Decimal::new(500, 0));
    }

    #[test]
    fn test_services_only_capped() {
        let services = strings(&["seo", "app", "website", "translation"]);
        let items = synthesize(&services, &[], Language::English);
        let descriptions: Vec<_> = items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Seo", "App", "Website"]);
        assert_well_formed(&items);
    }

    #[test]
    fn test_empty() {
        assert!(synthesize(&[], &[], Language::English).is_empty());
    }

    #[test]
    fn test_custom_config() {
        let config = ExtractionConfig {
            default_unit_price: Decimal::new(120, 0),
            max_synthesized_items: 1,
            ..Default::default()
        };
        let items = LineItemSynthesizer::new(config)
            .synthesize(&strings(&["seo", "app"]), &[], Language::English);
        assert_eq!(items, vec![LineItem::single("Seo", Decimal::new(120, 0))]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("web design"), "Web Design");
        assert_eq!(title_case("ui/ux"), "Ui/Ux");
        assert_eq!(title_case("e-commerce"), "E-Commerce");
        assert_eq!(title_case("SEO"), "Seo");
        assert_eq!(title_case("वेब डिज़ाइन"), "वेब डिज़ाइन");
        assert_eq!(title_case(""), "");
    }
}
