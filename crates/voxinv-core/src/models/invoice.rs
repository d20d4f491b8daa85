//! Invoice draft data models produced from voice transcripts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transcript language.
///
/// Serialized as the locale code used by the speech-to-text collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English (en-US).
    #[default]
    #[serde(rename = "en-US")]
    English,
    /// Hindi (hi-IN).
    #[serde(rename = "hi-IN")]
    Hindi,
}

impl Language {
    /// Map a locale code to a language. Anything starting with `hi` is Hindi.
    pub fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("hi") {
            Language::Hindi
        } else {
            Language::English
        }
    }

    /// Locale code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Hindi => "hi-IN",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A single billable line of an invoice draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Service description.
    pub description: String,

    /// Quantity. Synthesized items always carry 1.
    pub quantity: Decimal,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Line total (quantity * unit price).
    pub total: Decimal,
}

impl LineItem {
    /// Create a single-unit line item. The total equals the unit price.
    pub fn single(description: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity: Decimal::ONE,
            unit_price,
            total: unit_price,
        }
    }
}

/// Structured data extracted from one transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Language the cascades ran under.
    pub language: Language,

    /// Candidate customer name, if any pattern matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    /// Detected service phrases, in detection order.
    pub services: Vec<String>,

    /// Detected monetary amounts, in rule then match order.
    pub amounts: Vec<Decimal>,

    /// Synthesized line items.
    pub items: Vec<LineItem>,
}

impl ExtractionResult {
    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.services.is_empty()
            && self.amounts.is_empty()
            && self.items.is_empty()
    }
}

/// Editable invoice draft assembled around an extraction result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Final customer name (extracted, else the caller's hint).
    pub customer_name: String,

    /// Line items; never empty.
    pub items: Vec<LineItem>,

    /// Sum of line totals.
    pub subtotal: Decimal,

    /// Tax rate as a fraction (0.10 = 10%).
    pub tax_rate: Decimal,

    /// Tax on the subtotal.
    pub tax_amount: Decimal,

    /// Subtotal plus tax.
    pub total_amount: Decimal,

    /// Currency code.
    pub currency: String,

    /// Issue date.
    pub issue_date: NaiveDate,

    /// Payment due date.
    pub due_date: NaiveDate,

    /// Language detected or hinted.
    pub language: Language,

    /// The transcript the draft was built from.
    pub original_text: String,

    /// Services found in the transcript.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,

    /// Amounts found in the transcript.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amounts: Vec<Decimal>,

    /// Human-readable hints for the editor.
    #[serde(default)]
    pub suggestions: Vec<String>,

    /// Visual template names suited to the content.
    #[serde(default)]
    pub template_suggestions: Vec<String>,

    /// Localized summary message.
    pub message: String,

    /// Metadata about the extraction.
    pub metadata: DraftMetadata,
}

/// Metadata about the draft assembly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftMetadata {
    /// Version of the rule tables that produced the data.
    pub ruleset_version: String,

    /// Whether the placeholder item was substituted.
    pub placeholder_item: bool,

    /// Whether the customer name came from the caller's hint.
    pub name_from_hint: bool,

    /// Processing time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

impl InvoiceDraft {
    /// Check the draft for issues worth surfacing to the user.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.customer_name.trim().is_empty() {
            issues.push("Missing customer name".to_string());
        }

        if self.items.is_empty() {
            issues.push("No line items".to_string());
        }

        for item in &self.items {
            if item.total != item.quantity * item.unit_price {
                issues.push(format!(
                    "Line item '{}' total ({}) differs from quantity * unit price",
                    item.description, item.total
                ));
            }
        }

        let calculated: Decimal = self.items.iter().map(|i| i.total).sum();
        if (calculated - self.subtotal).abs() > Decimal::new(1, 2) {
            issues.push(format!(
                "Line item total ({}) differs from subtotal ({})",
                calculated, self.subtotal
            ));
        }

        if self.due_date < self.issue_date {
            issues.push("Due date precedes issue date".to_string());
        }

        issues
    }
}
