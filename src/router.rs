// src/router.rs
//! Views and the sign-in guard evaluated before any of them is shown

use crate::auth::{AuthContext, SessionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Dashboard,
    Analyze,
    Careers,
    LearningPath,
    Profile,
    Login,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Dashboard => "/dashboard",
            View::Analyze => "/analyze",
            View::Careers => "/careers",
            View::LearningPath => "/learning-path",
            View::Profile => "/profile",
            View::Login => "/login",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        [
            View::Home,
            View::Dashboard,
            View::Analyze,
            View::Careers,
            View::LearningPath,
            View::Profile,
            View::Login,
        ]
        .into_iter()
        .find(|view| view.path() == path)
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, View::Home | View::Login)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(View),
    /// Session state not known yet
    Loading,
    Redirect(View),
}

pub fn guard(view: View, auth: &AuthContext) -> Navigation {
    if !view.requires_session() {
        return Navigation::Render(view);
    }

    match auth.status {
        SessionStatus::Authenticated => Navigation::Render(view),
        SessionStatus::Pending => Navigation::Loading,
        SessionStatus::Unauthenticated => Navigation::Redirect(View::Login),
    }
}
