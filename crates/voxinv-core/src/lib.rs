//! Core library for turning voice transcripts into invoice drafts.
//!
//! This crate provides:
//! - Language detection for English and Hindi transcripts
//! - Devanagari numeral normalization
//! - Rule cascades for amounts, customer names and service phrases
//! - Line-item synthesis and invoice draft assembly

pub mod error;
pub mod models;
pub mod invoice;

pub use error::{ExtractionError, Result, VoxError};
pub use models::config::VoxConfig;
pub use models::invoice::{ExtractionResult, InvoiceDraft, Language, LineItem};
pub use invoice::{analyze, InvoiceExtractor, TranscriptAnalyzer, VoiceRequest};
pub use invoice::rules::{detect_language, extract_amounts, extract_name, extract_services, normalize_digits};
pub use invoice::synthesize;
