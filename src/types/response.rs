// src/types/response.rs
use serde::{Deserialize, Serialize};

// ===== Analysis Service Response Types =====

/// Payload returned by both analysis endpoints.
///
/// Every section is optional: a missing section is simply not shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub careers: Option<Vec<CareerMatch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaps: Option<SkillGaps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_path: Option<LearningPath>,
}

impl AnalysisResult {
    /// True when no section would be rendered.
    pub fn is_empty(&self) -> bool {
        non_empty(&self.skills).is_none()
            && non_empty(&self.careers).is_none()
            && self.gaps.is_none()
            && self
                .learning_path
                .as_ref()
                .and_then(|path| non_empty(&path.missing_skills_ordered))
                .is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMatch {
    pub career_id: String,
    pub career_name: String,
    /// Fraction in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
}

impl CareerMatch {
    /// Score as a rounded percentage, `0.92` -> `92`.
    pub fn match_percent(&self) -> Option<i64> {
        self.match_score.and_then(match_percent)
    }
}

pub fn match_percent(score: f64) -> Option<i64> {
    if !score.is_finite() {
        return None;
    }
    Some((score * 100.0).round() as i64)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGaps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_optional: Option<Vec<String>>,
}

/// Skills in the order the backend recommends acquiring them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_skills_ordered: Option<Vec<String>>,
}

/// Error payload the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable detail, only when the server sent a non-empty string.
    pub fn detail_message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
            _ => None,
        }
    }
}

pub(crate) fn non_empty<T>(items: &Option<Vec<T>>) -> Option<&[T]> {
    items.as_deref().filter(|items| !items.is_empty())
}
