// src/error.rs
use thiserror::Error;

use crate::types::SubmissionKind;

pub const VALIDATION_MESSAGE: &str = "Please enter some text to analyze";
pub const TEXT_FALLBACK_MESSAGE: &str = "Failed to analyze. Please try again.";
pub const FILE_FALLBACK_MESSAGE: &str = "Failed to upload file. Please try again.";

/// Failures of an analysis submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Empty or whitespace-only text, rejected before any request is made
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,

    /// Network failure or non-2xx response
    #[error("analysis request failed: {message}")]
    Transport {
        status: Option<u16>,
        detail: Option<String>,
        message: String,
    },

    /// 2xx response whose body is not an analysis result
    #[error("invalid analysis response: {message}")]
    Parse { message: String },
}

impl AnalysisError {
    pub fn transport(message: impl Into<String>) -> Self {
        AnalysisError::Transport {
            status: None,
            detail: None,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AnalysisError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// The single string shown to the user for this failure.
    pub fn user_message(&self, kind: SubmissionKind) -> String {
        match self {
            AnalysisError::Validation => VALIDATION_MESSAGE.to_string(),
            AnalysisError::Transport {
                detail: Some(detail),
                ..
            } => detail.clone(),
            AnalysisError::Transport { .. } | AnalysisError::Parse { .. } => {
                fallback_message(kind).to_string()
            }
        }
    }
}

pub fn fallback_message(kind: SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Text => TEXT_FALLBACK_MESSAGE,
        SubmissionKind::File => FILE_FALLBACK_MESSAGE,
    }
}
