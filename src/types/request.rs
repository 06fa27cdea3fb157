// src/types/request.rs
use serde::Serialize;

/// What the user handed over for analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Text(String),
    File(UploadFile),
}

impl AnalysisRequest {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            AnalysisRequest::Text(_) => SubmissionKind::Text,
            AnalysisRequest::File(_) => SubmissionKind::File,
        }
    }
}

/// A document selected for upload.
#[derive(Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content: Vec<u8>,
    pub mime_type: Option<String>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

// Keep file bytes out of logs
impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("size", &self.content.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Text,
    File,
}

/// JSON body of a text analysis request.
#[derive(Debug, Serialize)]
pub(crate) struct TextPayload<'a> {
    pub text: &'a str,
}
