// tests/support/mod.rs
//! Local HTTP stand-in for the analysis service, served by rocket.
#![allow(dead_code)]

use rocket::config::{LogLevel, Shutdown};
use rocket::form::{Form, FromForm};
use rocket::fs::TempFile;
use rocket::http::{ContentType, Status};
use rocket::serde::json::Json;
use rocket::{post, routes, State};
use std::net::{Ipv4Addr, TcpListener};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    Text {
        path: String,
        text: String,
    },
    File {
        path: String,
        name: Option<String>,
        size: u64,
        content_type: Option<String>,
    },
}

impl Hit {
    pub fn path(&self) -> &str {
        match self {
            Hit::Text { path, .. } | Hit::File { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

struct MockState {
    hits: Mutex<Vec<Hit>>,
    reply: Mutex<Reply>,
}

impl MockState {
    fn record(&self, hit: Hit) -> (Status, (ContentType, String)) {
        self.hits.lock().unwrap().push(hit);
        let reply = self.reply.lock().unwrap().clone();
        (Status::new(reply.status), (ContentType::JSON, reply.body))
    }

    fn record_file(&self, path: &str, file: &TempFile<'_>) -> (Status, (ContentType, String)) {
        self.record(Hit::File {
            path: path.to_string(),
            name: file
                .raw_name()
                .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string()),
            size: file.len(),
            content_type: file.content_type().map(|ct| ct.to_string()),
        })
    }
}

#[derive(serde::Deserialize)]
struct TextBody {
    text: String,
}

#[derive(FromForm)]
struct Upload<'r> {
    file: TempFile<'r>,
}

#[post("/api/analyze", format = "json", data = "<body>")]
fn analyze_text(
    body: Json<TextBody>,
    state: &State<Arc<MockState>>,
) -> (Status, (ContentType, String)) {
    state.record(Hit::Text {
        path: "/api/analyze".to_string(),
        text: body.into_inner().text,
    })
}

#[post("/api/analyze", format = "multipart/form-data", data = "<upload>", rank = 2)]
fn analyze_file(
    upload: Form<Upload<'_>>,
    state: &State<Arc<MockState>>,
) -> (Status, (ContentType, String)) {
    state.record_file("/api/analyze", &upload.file)
}

#[post("/api/analyze-transcript", format = "multipart/form-data", data = "<upload>")]
fn analyze_transcript(
    upload: Form<Upload<'_>>,
    state: &State<Arc<MockState>>,
) -> (Status, (ContentType, String)) {
    state.record_file("/api/analyze-transcript", &upload.file)
}

pub struct MockServer {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockServer {
    pub async fn start(reply: Reply) -> Self {
        let port = free_port();
        let state = Arc::new(MockState {
            hits: Mutex::new(Vec::new()),
            reply: Mutex::new(reply),
        });

        let config = rocket::Config {
            address: Ipv4Addr::LOCALHOST.into(),
            port,
            log_level: LogLevel::Off,
            shutdown: Shutdown {
                ctrlc: false,
                ..Default::default()
            },
            ..rocket::Config::debug_default()
        };

        let rocket = rocket::custom(config)
            .manage(Arc::clone(&state))
            .mount("/", routes![analyze_text, analyze_file, analyze_transcript]);

        tokio::spawn(async move {
            let _ = rocket.launch().await;
        });
        wait_until_listening(port).await;

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.state.reply.lock().unwrap() = reply;
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.state.hits.lock().unwrap().clone()
    }
}

/// Base URL nothing listens on.
pub fn closed_base_url() -> String {
    format!("http://127.0.0.1:{}", free_port())
}

fn free_port() -> u16 {
    TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("no free port")
}

async fn wait_until_listening(port: u16) {
    for _ in 0..200 {
        if tokio::net::TcpStream::connect((Ipv4Addr::LOCALHOST, port))
            .await
            .is_ok()
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("mock analysis server did not start on port {}", port);
}

pub fn data_analyst_body() -> serde_json::Value {
    serde_json::json!({
        "skills": ["SQL", "Excel"],
        "careers": [
            {"career_id": "career_data_analyst", "career_name": "Data Analyst", "match_score": 0.92}
        ]
    })
}
