// src/core/mock.rs
//! Scripted in-process backend for exercising the workflow without a server

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

use super::service_client::{AnalysisBackend, Endpoint};
use crate::error::AnalysisError;
use crate::types::{AnalysisRequest, AnalysisResult};

pub struct MockReply {
    outcome: Result<AnalysisResult, AnalysisError>,
    gate: Option<oneshot::Receiver<()>>,
}

impl MockReply {
    pub fn ok(result: AnalysisResult) -> Self {
        Self {
            outcome: Ok(result),
            gate: None,
        }
    }

    pub fn error(error: AnalysisError) -> Self {
        Self {
            outcome: Err(error),
            gate: None,
        }
    }

    /// Hold the reply until the returned sender fires (or is dropped).
    pub fn gated(self) -> (Self, oneshot::Sender<()>) {
        let (release, gate) = oneshot::channel();
        (
            Self {
                outcome: self.outcome,
                gate: Some(gate),
            },
            release,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub request: AnalysisRequest,
}

#[derive(Default)]
pub struct MockBackend {
    replies: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl AnalysisBackend for MockBackend {
    async fn analyze(
        &self,
        endpoint: Endpoint,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint,
            request: request.clone(),
        });

        let reply = self.replies.lock().unwrap().pop_front();
        let Some(reply) = reply else {
            return Err(AnalysisError::transport("no scripted reply"));
        };

        if let Some(gate) = reply.gate {
            let _ = gate.await;
        }
        reply.outcome
    }
}
