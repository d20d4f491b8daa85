//! Request boundary for building invoice drafts from transcripts.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::models::invoice::Language;

/// A transcript submitted for invoice drafting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRequest {
    /// Transcript text from speech-to-text or direct entry.
    pub transcript: String,

    /// Customer name supplied by the caller, used when none is extracted.
    #[serde(default)]
    pub customer_name: String,

    /// Language reported by the transcription service, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl VoiceRequest {
    pub fn new(transcript: impl Into<String>, customer_name: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            customer_name: customer_name.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Reject transcripts the engine should never see.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.transcript.trim().is_empty() {
            return Err(ExtractionError::EmptyTranscript);
        }
        Ok(())
    }
}
