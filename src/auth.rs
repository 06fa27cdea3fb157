// src/auth.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::utils::ensure_directory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}

impl SessionUser {
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            email: email.into(),
            name,
            signed_in_at: Utc::now(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Unauthenticated,
    Pending,
    Authenticated,
}

/// Session state handed to whatever needs to know who is signed in.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub status: SessionStatus,
    pub user: Option<SessionUser>,
}

impl AuthContext {
    pub fn unauthenticated() -> Self {
        Self {
            status: SessionStatus::Unauthenticated,
            user: None,
        }
    }

    pub fn pending() -> Self {
        Self {
            status: SessionStatus::Pending,
            user: None,
        }
    }

    pub fn authenticated(user: SessionUser) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }
}

/// Local session persisted as YAML.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<AuthContext> {
        if !self.path.exists() {
            debug!("No session at {}", self.path.display());
            return Ok(AuthContext::unauthenticated());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read session: {}", self.path.display()))?;

        let user: SessionUser = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse session: {}", self.path.display()))?;

        Ok(AuthContext::authenticated(user))
    }

    pub async fn sign_in(&self, user: SessionUser) -> Result<AuthContext> {
        if let Some(parent) = self.path.parent() {
            ensure_directory(parent).await?;
        }

        let content = serde_yaml::to_string(&user).context("Failed to serialize session")?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write session: {}", self.path.display()))?;

        info!("Signed in as {}", user.email);
        Ok(AuthContext::authenticated(user))
    }

    pub async fn sign_out(&self) -> Result<()> {
        if self.path.exists() {
            tokio::fs::remove_file(&self.path)
                .await
                .with_context(|| format!("Failed to remove session: {}", self.path.display()))?;
            info!("Signed out");
        }
        Ok(())
    }
}
