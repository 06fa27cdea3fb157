// tests/workflow_test.rs
mod support;

use classmate::error::VALIDATION_MESSAGE;
use classmate::render::render_state;
use classmate::{AnalysisClient, AnalysisWorkflow, Completion, UploadFile};
use serde_json::json;
use std::sync::Arc;
use support::{data_analyst_body, Hit, MockServer, Reply};

fn workflow_for(server: &MockServer) -> AnalysisWorkflow {
    let client = AnalysisClient::new(server.base_url.clone(), None).unwrap();
    AnalysisWorkflow::new(Arc::new(client))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_data_analyst_scenario() {
    let server = MockServer::start(Reply::json(200, data_analyst_body())).await;
    let workflow = workflow_for(&server);

    let completion = workflow
        .submit_text("I want to become a data analyst")
        .await;
    assert_eq!(completion, Completion::Published);

    let state = workflow.state();
    assert!(!state.loading);
    assert_eq!(state.error, None);
    let result = state.result.as_ref().unwrap();
    assert_eq!(
        result.skills,
        Some(vec!["SQL".to_string(), "Excel".to_string()])
    );

    let rendered = render_state(&state);
    assert!(rendered.contains("92%"));
    assert_eq!(server.hits().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_spaces_only_sends_nothing() {
    let server = MockServer::start(Reply::json(200, data_analyst_body())).await;
    let workflow = workflow_for(&server);

    assert_eq!(workflow.submit_text("   ").await, Completion::Rejected);

    let state = workflow.state();
    assert_eq!(state.error.as_deref(), Some(VALIDATION_MESSAGE));
    assert_eq!(state.result, None);
    assert!(server.hits().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_routing_by_file_name() {
    let server = MockServer::start(Reply::json(200, json!({"skills": ["Linear Algebra"]}))).await;
    let workflow = workflow_for(&server);

    workflow
        .submit_file(UploadFile::new("fall_transcript.pdf", b"%PDF".to_vec()))
        .await;
    workflow
        .submit_file(UploadFile::new("resume.pdf", b"%PDF".to_vec()))
        .await;

    let paths: Vec<String> = server
        .hits()
        .iter()
        .map(|hit| hit.path().to_string())
        .collect();
    assert_eq!(paths, vec!["/api/analyze-transcript", "/api/analyze"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_detail_reaches_the_view() {
    let server = MockServer::start(Reply::json(
        400,
        json!({"detail": "Please describe at least one course"}),
    ))
    .await;
    let workflow = workflow_for(&server);

    assert_eq!(
        workflow.submit_text("hello").await,
        Completion::Published
    );

    let state = workflow.state();
    assert_eq!(
        state.error.as_deref(),
        Some("Please describe at least one course")
    );
    assert_eq!(state.result, None);
    assert!(!state.loading);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_resubmitting_same_text_runs_two_cycles() {
    let server = MockServer::start(Reply::json(200, data_analyst_body())).await;
    let workflow = workflow_for(&server);

    workflow.submit_text("data analyst please").await;
    server.set_reply(Reply::json(200, json!({"learning_path": {"missing_skills_ordered": ["Statistics"]}})));
    workflow.submit_text("data analyst please").await;

    let hits = server.hits();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|hit| matches!(
        hit,
        Hit::Text { text, .. } if text == "data analyst please"
    )));

    let state = workflow.state();
    let result = state.result.unwrap();
    assert_eq!(result.skills, None);
    assert_eq!(result.careers, None);
    assert_eq!(
        result.learning_path.unwrap().missing_skills_ordered,
        Some(vec!["Statistics".to_string()])
    );
}
