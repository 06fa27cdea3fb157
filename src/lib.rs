//! Classmate: submit your background or a document to the analysis service
//! and get back skills, career matches, skill gaps and a learning path.

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod router;
pub mod types;
pub mod utils;
pub mod workflow;

pub use crate::core::{AnalysisBackend, AnalysisClient, Endpoint};
pub use error::AnalysisError;
pub use types::{AnalysisRequest, AnalysisResult, CareerMatch, UploadFile};
pub use workflow::{AnalysisWorkflow, Completion, Submission, ViewState};
