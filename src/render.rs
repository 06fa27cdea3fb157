// src/render.rs
//! Plain-text rendering of analysis results for the terminal

use std::fmt::Write;

use crate::types::response::non_empty;
use crate::types::AnalysisResult;
use crate::workflow::ViewState;

/// Render every present section of a result, in display order.
pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    if let Some(skills) = non_empty(&result.skills) {
        section(&mut out, "Extracted Skills");
        let _ = writeln!(out, "  {}", skills.join(" · "));
    }

    if let Some(careers) = non_empty(&result.careers) {
        section(&mut out, "Career Matches");
        for career in careers {
            match career.match_percent() {
                Some(percent) => {
                    let _ = writeln!(
                        out,
                        "  {} ({})  {}% match",
                        career.career_name, career.career_id, percent
                    );
                }
                None => {
                    let _ = writeln!(out, "  {} ({})", career.career_name, career.career_id);
                }
            }
        }
    }

    if let Some(gaps) = &result.gaps {
        section(&mut out, "Skill Gaps");
        if let Some(required) = non_empty(&gaps.missing_required) {
            let _ = writeln!(out, "  Required Skills (Missing): {}", required.join(", "));
        }
        if let Some(optional) = non_empty(&gaps.missing_optional) {
            let _ = writeln!(out, "  Optional Skills (Missing): {}", optional.join(", "));
        }
    }

    if let Some(path) = result
        .learning_path
        .as_ref()
        .and_then(|path| non_empty(&path.missing_skills_ordered))
    {
        section(&mut out, "Recommended Learning Path");
        for (index, skill) in path.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, skill);
        }
    }

    out
}

/// Render the error banner followed by whatever result is shown.
pub fn render_state(state: &ViewState) -> String {
    let mut out = String::new();
    if state.loading {
        out.push_str("Analyzing...\n");
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "Error: {}", error);
    }
    if let Some(result) = &state.result {
        if result.is_empty() {
            out.push_str("The analysis returned no results.\n");
        } else {
            out.push_str(&render_result(result));
        }
    }
    out
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}
