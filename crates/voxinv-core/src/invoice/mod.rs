//! Transcript-to-invoice extraction module.

mod analyzer;
pub mod draft;
pub mod rules;
pub mod suggest;
pub mod synthesis;

pub use analyzer::{analyze, TranscriptAnalyzer};
pub use draft::VoiceRequest;
pub use synthesis::{synthesize, title_case, LineItemSynthesizer, SynthesisPolicy};

use crate::error::ExtractionError;
use crate::models::invoice::{ExtractionResult, InvoiceDraft, Language};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for transcript-to-invoice extractors.
pub trait InvoiceExtractor {
    /// Extract structured invoice data from a transcript.
    ///
    /// Never fails: fragments that cannot be interpreted are skipped. The
    /// hint, when given, selects the language-specific rules instead of
    /// detection.
    fn analyze(&self, text: &str, language_hint: Option<Language>) -> ExtractionResult;

    /// Build an editable invoice draft, rejecting blank transcripts.
    fn draft(&self, request: &VoiceRequest) -> Result<InvoiceDraft>;
}
