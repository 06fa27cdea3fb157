// src/core/service_client.rs
//! HTTP client for the Classmate analysis service

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, error, info, trace};
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::types::{
    request::TextPayload, AnalysisRequest, AnalysisResult, ErrorBody, UploadFile,
};

const ANALYZE_ENDPOINT: &str = "/api/analyze";
const ANALYZE_TRANSCRIPT_ENDPOINT: &str = "/api/analyze-transcript";

const FILE_FIELD: &str = "file";
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// The two analysis routes exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    AnalyzeTranscript,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Analyze => ANALYZE_ENDPOINT,
            Endpoint::AnalyzeTranscript => ANALYZE_TRANSCRIPT_ENDPOINT,
        }
    }

    /// Uploads whose name mentions "transcript" (any casing) go to the
    /// transcript route. The file content is never inspected.
    pub fn for_file_name(file_name: &str) -> Self {
        if file_name.to_lowercase().contains("transcript") {
            Endpoint::AnalyzeTranscript
        } else {
            Endpoint::Analyze
        }
    }

    pub fn for_request(request: &AnalysisRequest) -> Self {
        match request {
            AnalysisRequest::Text(_) => Endpoint::Analyze,
            AnalysisRequest::File(file) => Endpoint::for_file_name(&file.name),
        }
    }
}

/// Anything able to answer an analysis request.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(
        &self,
        endpoint: Endpoint,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError>;
}

pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create new analysis client. Without a timeout, requests wait for the
    /// server indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Free text analysis - sends `{"text": ...}` as JSON
    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let url = self.url_for(Endpoint::Analyze);
        let request_id = Uuid::new_v4();

        info!(%request_id, "Calling analysis service: {}", url);

        let response = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(&TextPayload { text })
            .send()
            .await
            .map_err(|e| {
                error!(%request_id, "Analysis request failed: {}", e);
                AnalysisError::transport(format!("Failed to POST to {}: {}", url, e))
            })?;

        Self::read_result(response, request_id).await
    }

    /// Document analysis - sends the file as multipart field `file`
    pub async fn analyze_file(
        &self,
        endpoint: Endpoint,
        file: &UploadFile,
    ) -> Result<AnalysisResult, AnalysisError> {
        let url = self.url_for(endpoint);
        let request_id = Uuid::new_v4();

        let mut part = Part::bytes(file.content.clone()).file_name(file.name.clone());
        if let Some(mime_type) = &file.mime_type {
            part = part.mime_str(mime_type).map_err(|e| {
                AnalysisError::transport(format!("Invalid MIME type {}: {}", mime_type, e))
            })?;
        }
        let form = Form::new().part(FILE_FIELD, part);

        info!(
            %request_id,
            file = %file.name,
            size = file.len(),
            "Uploading document to analysis service: {}",
            url
        );

        let response = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(%request_id, "File upload failed: {}", e);
                AnalysisError::transport(format!("Failed to POST to {}: {}", url, e))
            })?;

        Self::read_result(response, request_id).await
    }

    async fn read_result(
        response: reqwest::Response,
        request_id: Uuid,
    ) -> Result<AnalysisResult, AnalysisError> {
        let status = response.status();
        trace!(%request_id, "Response status: {}", status);

        if status.is_success() {
            let body = response.bytes().await.map_err(|e| {
                AnalysisError::transport(format!("Failed to read response body: {}", e))
            })?;

            // `null` carries no sections
            let result: Option<AnalysisResult> =
                serde_json::from_slice(&body).map_err(|e| {
                    error!(%request_id, "Failed to parse analysis response: {}", e);
                    AnalysisError::Parse {
                        message: e.to_string(),
                    }
                })?;

            debug!(%request_id, "Analysis response parsed");
            Ok(result.unwrap_or_default())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!(%request_id, "Analysis service error {}: {}", status, error_text);

            let detail = serde_json::from_str::<ErrorBody>(&error_text)
                .ok()
                .and_then(|body| body.detail_message());

            Err(AnalysisError::Transport {
                status: Some(status.as_u16()),
                detail,
                message: format!("HTTP {} error: {}", status, error_text),
            })
        }
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn analyze(
        &self,
        endpoint: Endpoint,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        match request {
            AnalysisRequest::Text(text) => self.analyze_text(text).await,
            AnalysisRequest::File(file) => self.analyze_file(endpoint, file).await,
        }
    }
}
