//! Processing pipeline errors.

use thiserror::Error;

use crate::ports::AiError;

/// Errors from the text-processing pipeline.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The AI provider call failed.
    #[error("AI processing issue: {0}")]
    Provider(#[from] AiError),
}

impl ProcessingError {
    /// Human-readable message suitable for end users, mirroring the tone of
    /// the synchronous API's canned responses.
    pub fn user_message(&self) -> String {
        match self {
            ProcessingError::Provider(e) => {
                format!("I encountered an AI processing issue: {}", e)
            }
        }
    }
}
