// src/workflow.rs
//! Analysis submission workflow
//!
//! Turns a text or document submission into published view state. Every
//! accepted submission gets the next sequence number and owns the state from
//! that moment on; a response that arrives for an older submission is dropped.
//! Starting a submission aborts the one still in flight.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error, info, warn};

use crate::core::{AnalysisBackend, Endpoint};
use crate::error::{AnalysisError, VALIDATION_MESSAGE};
use crate::types::{AnalysisRequest, AnalysisResult, UploadFile};
use crate::utils;

/// What the view shows right now.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    /// Sequence number of the submission owning this state, 0 before any.
    pub submission: u64,
    pub loading: bool,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome (result or error message) was published.
    Published,
    /// A newer submission took over before this one finished.
    Superseded,
    /// Cancelled with no newer submission; nothing was published.
    Cancelled,
    /// Rejected locally, no request was made.
    Rejected,
}

/// Handle to one in-flight submission.
pub struct Submission {
    id: u64,
    handle: JoinHandle<Completion>,
    state: watch::Receiver<ViewState>,
}

impl Submission {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub async fn wait(self) -> Completion {
        match self.handle.await {
            Ok(completion) => completion,
            Err(e) => {
                if e.is_panic() {
                    error!(submission = self.id, "Submission task panicked: {}", e);
                }
                if self.state.borrow().submission == self.id {
                    Completion::Cancelled
                } else {
                    Completion::Superseded
                }
            }
        }
    }
}

/// Clears the loading flag when a submission ends, however it ends.
struct PendingGuard {
    state: Arc<watch::Sender<ViewState>>,
    id: u64,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        clear_loading(&self.state, self.id);
    }
}

fn clear_loading(state: &watch::Sender<ViewState>, id: u64) -> bool {
    state.send_if_modified(|view| {
        if view.submission == id && view.loading {
            view.loading = false;
            true
        } else {
            false
        }
    })
}

pub struct AnalysisWorkflow {
    backend: Arc<dyn AnalysisBackend>,
    state: Arc<watch::Sender<ViewState>>,
    in_flight: Mutex<Option<(u64, AbortHandle)>>,
}

impl AnalysisWorkflow {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            backend,
            state: Arc::new(state),
            in_flight: Mutex::new(None),
        }
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Start analysing free text. Must be called inside a tokio runtime.
    pub fn start_text(&self, text: &str) -> Result<Submission, AnalysisError> {
        if text.trim().is_empty() {
            warn!("Rejected empty analysis text");
            self.state
                .send_modify(|view| view.error = Some(VALIDATION_MESSAGE.to_string()));
            return Err(AnalysisError::Validation);
        }

        Ok(self.start(AnalysisRequest::Text(text.to_string())))
    }

    /// Start analysing a document. Must be called inside a tokio runtime.
    pub fn start_file(&self, file: UploadFile) -> Submission {
        if !utils::has_accepted_extension(&file.name) {
            warn!(
                "{} is outside the accepted formats ({}), uploading anyway",
                file.name,
                utils::ACCEPTED_EXTENSIONS.join(",")
            );
        }

        self.start(AnalysisRequest::File(file))
    }

    pub async fn submit_text(&self, text: &str) -> Completion {
        match self.start_text(text) {
            Ok(submission) => submission.wait().await,
            Err(_) => Completion::Rejected,
        }
    }

    pub async fn submit_file(&self, file: UploadFile) -> Completion {
        self.start_file(file).wait().await
    }

    /// Abort the submission in flight, if any. Loading is cleared and nothing
    /// is published.
    pub fn cancel(&self) {
        if let Some((id, handle)) = self.lock_in_flight().take() {
            info!(submission = id, "Cancelling analysis submission");
            handle.abort();
            clear_loading(&self.state, id);
        }
    }

    fn start(&self, request: AnalysisRequest) -> Submission {
        let mut in_flight = self.lock_in_flight();
        if let Some((previous, handle)) = in_flight.take() {
            debug!(submission = previous, "Aborting superseded submission");
            handle.abort();
        }

        let mut id = 0;
        self.state.send_modify(|view| {
            view.submission += 1;
            id = view.submission;
            view.loading = true;
            view.result = None;
            view.error = None;
            view.completed_at = None;
        });

        let kind = request.kind();
        let endpoint = Endpoint::for_request(&request);
        info!(submission = id, endpoint = endpoint.path(), "Submitting analysis");

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        // Created outside the task so loading is cleared even if the task is
        // aborted before its first poll.
        let guard = PendingGuard {
            state: Arc::clone(&self.state),
            id,
        };

        let handle = tokio::spawn(async move {
            let _guard = guard;
            let outcome = backend.analyze(endpoint, &request).await;
            if let Err(e) = &outcome {
                error!(submission = id, "Analysis error: {}", e);
            }

            let published = state.send_if_modified(|view| {
                if view.submission != id {
                    return false;
                }
                match outcome {
                    Ok(result) => view.result = Some(result),
                    Err(e) => view.error = Some(e.user_message(kind)),
                }
                view.loading = false;
                view.completed_at = Some(Utc::now());
                true
            });

            if published {
                Completion::Published
            } else {
                debug!(submission = id, "Discarding stale analysis response");
                Completion::Superseded
            }
        });

        *in_flight = Some((id, handle.abort_handle()));
        Submission {
            id,
            handle,
            state: self.state.subscribe(),
        }
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Option<(u64, AbortHandle)>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for AnalysisWorkflow {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.lock_in_flight().take() {
            handle.abort();
        }
    }
}
