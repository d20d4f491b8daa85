//! Editor hints derived from an extraction result.

use crate::models::invoice::{ExtractionResult, Language};

/// Hints listing what was found, or localized defaults when nothing was.
pub fn suggestions(result: &ExtractionResult, customer_hint: &str) -> Vec<String> {
    let mut hints: Vec<String> = result
        .services
        .iter()
        .map(|service| format!("Service: {}", service))
        .chain(
            result
                .amounts
                .iter()
                .map(|amount| format!("Amount: ${}", amount.normalize())),
        )
        .collect();

    if hints.is_empty() {
        hints = match result.language {
            Language::English => vec![
                "Extracted service description from voice".to_string(),
                "Estimated price: $500".to_string(),
                format!("Customer: {}", customer_hint),
            ],
            Language::Hindi => vec![
                "आवाज़ से सेवा विवरण निकाला गया".to_string(),
                "अनुमानित मूल्य: $500".to_string(),
                format!("ग्राहक: {}", customer_hint),
            ],
        };
    }

    hints
}

/// Visual templates suited to the transcript content.
pub fn template_suggestions(text: &str) -> Vec<String> {
    let text = text.to_lowercase();

    let templates = if mentions(&text, &["web", "design", "development"]) {
        ["modern-blue", "creative-green"]
    } else if mentions(&text, &["consulting", "business", "strategy"]) {
        ["professional-blue", "elegant-purple"]
    } else {
        ["minimal-gray", "classic-black"]
    };

    templates.iter().map(|t| t.to_string()).collect()
}

fn mentions(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// One-line localized summary of an extraction.
pub fn summary_message(result: &ExtractionResult) -> String {
    let services = result.services.len();
    let amounts = result.amounts.len();

    match result.language {
        Language::English => format!(
            "Found {} services and {} amounts. Ready to create your invoice!",
            services, amounts
        ),
        Language::Hindi => format!(
            "{} सेवाएं और {} मूल्य मिले। चालान तैयार करने के लिए तैयार!",
            services, amounts
        ),
    }
}
