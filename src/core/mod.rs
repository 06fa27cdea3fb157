// src/core/mod.rs
//! Transport layer: the analysis backend seam and its implementations

pub mod mock;
pub mod service_client;

pub use mock::{MockBackend, MockReply, RecordedCall};
pub use service_client::{AnalysisBackend, AnalysisClient, Endpoint};
