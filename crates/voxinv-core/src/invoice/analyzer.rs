//! Transcript analyzer combining language detection, the field extractors and
//! line-item synthesis.

use std::time::Instant;

use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::VoxConfig;
use crate::models::invoice::{DraftMetadata, ExtractionResult, InvoiceDraft, Language, LineItem};

use super::draft::VoiceRequest;
use super::rules::{
    detect_language, AmountExtractor, FieldExtractor, NameExtractor, ServiceExtractor,
    RULESET_VERSION,
};
use super::suggest::{suggestions, summary_message, template_suggestions};
use super::synthesis::LineItemSynthesizer;
use super::{InvoiceExtractor, Result};

/// Rule-based transcript analyzer.
///
/// Holds only read-only configuration, so one instance can serve any number
/// of threads.
#[derive(Debug, Clone, Default)]
pub struct TranscriptAnalyzer {
    config: VoxConfig,
}

impl TranscriptAnalyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with the given configuration.
    pub fn with_config(config: VoxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VoxConfig {
        &self.config
    }

    /// Build a draft with an explicit issue date.
    pub fn draft_on(&self, request: &VoiceRequest, issue_date: NaiveDate) -> Result<InvoiceDraft> {
        let start = Instant::now();
        request.validate()?;

        let result = self.analyze(&request.transcript, request.language);
        let draft_config = &self.config.draft;

        let customer_hint = request.customer_name.trim();
        let (customer_name, name_from_hint) = match &result.customer_name {
            Some(name) => (name.clone(), false),
            None => (customer_hint.to_string(), true),
        };

        let placeholder_item = result.items.is_empty();
        let items = if placeholder_item {
            debug!("no line items extracted, using placeholder");
            vec![LineItem::single(
                draft_config.placeholder_description.clone(),
                draft_config.placeholder_unit_price,
            )]
        } else {
            result.items.clone()
        };

        let overflow = |field: &str| ExtractionError::Validation {
            field: field.to_string(),
            reason: "amount exceeds the supported decimal range".to_string(),
        };

        let subtotal = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.total))
            .ok_or_else(|| overflow("subtotal"))?;
        let tax_rate = draft_config.default_tax_rate;
        let tax_amount = subtotal
            .checked_mul(tax_rate)
            .ok_or_else(|| overflow("tax_amount"))?
            .round_dp(2);
        let total_amount = subtotal
            .checked_add(tax_amount)
            .ok_or_else(|| overflow("total_amount"))?;

        let due_date = issue_date
            .checked_add_days(Days::new(u64::from(draft_config.due_in_days)))
            .ok_or_else(|| ExtractionError::Validation {
                field: "due_date".to_string(),
                reason: format!("{} days after {} is out of range", draft_config.due_in_days, issue_date),
            })?;

        Ok(InvoiceDraft {
            customer_name,
            items,
            subtotal,
            tax_rate,
            tax_amount,
            total_amount,
            currency: draft_config.currency.clone(),
            issue_date,
            due_date,
            language: result.language,
            original_text: request.transcript.clone(),
            suggestions: suggestions(&result, customer_hint),
            template_suggestions: template_suggestions(&request.transcript),
            message: summary_message(&result),
            services: result.services,
            amounts: result.amounts,
            metadata: DraftMetadata {
                ruleset_version: RULESET_VERSION.to_string(),
                placeholder_item,
                name_from_hint,
                processing_time_ms: Some(start.elapsed().as_millis() as u64),
            },
        })
    }
}

impl InvoiceExtractor for TranscriptAnalyzer {
    fn analyze(&self, text: &str, language_hint: Option<Language>) -> ExtractionResult {
        let start = Instant::now();

        let language = language_hint.unwrap_or_else(|| detect_language(text));
        debug!(%language, hinted = language_hint.is_some(), "analyzing transcript");

        let amounts: Vec<Decimal> = AmountExtractor::new()
            .extract_all(text, language)
            .into_iter()
            .map(|m| m.value)
            .collect();
        let customer_name = NameExtractor::new().extract(text, language).map(|m| m.value);
        let services = ServiceExtractor::new().extract_all(text, language);

        let items = LineItemSynthesizer::new(self.config.extraction.clone())
            .synthesize(&services, &amounts, language);

        info!(
            "Extracted {} services, {} amounts, {} items from {} characters in {:?}",
            services.len(),
            amounts.len(),
            items.len(),
            text.chars().count(),
            start.elapsed()
        );

        ExtractionResult {
            language,
            customer_name,
            services,
            amounts,
            items,
        }
    }

    fn draft(&self, request: &VoiceRequest) -> Result<InvoiceDraft> {
        self.draft_on(request, Utc::now().date_naive())
    }
}

/// Analyze a transcript with the default configuration.
pub fn analyze(text: &str, language_hint: Option<Language>) -> ExtractionResult {
    TranscriptAnalyzer::new().analyze(text, language_hint)
}
