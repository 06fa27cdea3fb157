// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{SessionStore, SessionUser};
use crate::config::ClientConfig;
use crate::core::AnalysisClient;
use crate::render::render_state;
use crate::router::{guard, Navigation, View};
use crate::utils::load_upload;
use crate::workflow::{AnalysisWorkflow, Completion};

#[derive(Parser)]
#[command(name = "classmate")]
#[command(about = "Build your skill graph and career path from your background")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Analysis service base URL
    #[arg(long, global = true, env = "CLASSMATE_BACKEND_API")]
    pub base_url: Option<String>,

    /// Configuration file (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze your goals and background, or a résumé / transcript
    Analyze {
        /// Goals, courses, projects, experience...
        text: Option<String>,
        /// Document to upload instead of text (.pdf, .docx, .txt)
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Print the view state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start a local session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// End the local session
    Logout,
    /// Show session and backend configuration
    Status,
}

/// Run one command. `Ok(false)` means it ran but the user-facing outcome
/// was a failure (error shown, sign-in required).
pub async fn handle_command(command: Command, config: ClientConfig) -> Result<bool> {
    let sessions = SessionStore::new(config.session_path.clone());

    match command {
        Command::Analyze { text, file, json } => {
            let auth = sessions.load().await?;
            match guard(View::Analyze, &auth) {
                Navigation::Render(_) => {}
                Navigation::Loading => {
                    println!("Loading...");
                    return Ok(false);
                }
                Navigation::Redirect(view) => {
                    warn!("No session, redirecting to {}", view.path());
                    println!("Sign in required: run `classmate login --email <EMAIL>`");
                    return Ok(false);
                }
            }

            let client = AnalysisClient::new(config.backend_api()?, config.timeout)?;
            let workflow = AnalysisWorkflow::new(Arc::new(client));

            let completion = match file {
                Some(path) => {
                    let upload = load_upload(&path).await?;
                    workflow.submit_file(upload).await
                }
                None => workflow.submit_text(text.as_deref().unwrap_or_default()).await,
            };
            debug!("Submission finished: {:?}", completion);

            let state = workflow.state();
            if json {
                let output =
                    serde_json::to_string_pretty(&state).context("Failed to serialize result")?;
                println!("{}", output);
            } else {
                print!("{}", render_state(&state));
            }

            Ok(completion == Completion::Published && state.error.is_none())
        }

        Command::Login { email, name } => {
            let email = email.trim().to_string();
            if email.is_empty() {
                anyhow::bail!("Email must not be empty");
            }
            let auth = sessions.sign_in(SessionUser::new(email, name)).await?;
            if let Some(user) = auth.user() {
                println!("✓ Signed in as {}", user.display_name());
            }
            Ok(true)
        }

        Command::Logout => {
            sessions.sign_out().await?;
            println!("✓ Signed out");
            Ok(true)
        }

        Command::Status => {
            let auth = sessions.load().await?;
            match auth.user() {
                Some(user) => println!(
                    "Session: signed in as {} since {}",
                    user.email,
                    user.signed_in_at.format("%Y-%m-%d %H:%M UTC")
                ),
                None => println!("Session: signed out"),
            }
            println!("Environment: {}", config.environment);
            println!(
                "Backend: {}",
                config.backend_api.as_deref().unwrap_or("(not configured)")
            );
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_text_and_file_conflict() {
        let parsed = Cli::try_parse_from([
            "classmate",
            "analyze",
            "I like data",
            "--file",
            "resume.pdf",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_file_upload() {
        let cli = Cli::try_parse_from([
            "classmate",
            "analyze",
            "--file",
            "fall_transcript.pdf",
            "--json",
            "--base-url",
            "http://localhost:8000",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8000"));
        match cli.command {
            Command::Analyze { text, file, json } => {
                assert_eq!(text, None);
                assert_eq!(file, Some(PathBuf::from("fall_transcript.pdf")));
                assert!(json);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[tokio::test]
    async fn test_analyze_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            environment: "local".to_string(),
            backend_api: Some("http://127.0.0.1:9".to_string()),
            timeout: None,
            session_path: dir.path().join("session.yaml"),
            log_format: Default::default(),
        };

        let succeeded = handle_command(
            Command::Analyze {
                text: Some("I want to become a data analyst".to_string()),
                file: None,
                json: false,
            },
            config,
        )
        .await
        .unwrap();
        assert!(!succeeded);
    }
}
