//! Page handlers
//!
//! Form-driven pages: the journal (`/`, `/analyze`) and the puzzle
//! (`/puzzle`, `/puzzle_played`).

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use log::{debug, info};
use serde::Deserialize;

use super::error::AppError;
use super::views::{self, IndexView};
use super::SharedState;
use crate::app::App;
use crate::recommend::Recommendation;

/// Fields posted by the journal form.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub mood_text: String,
    /// "on" when the mock checkbox is ticked, absent otherwise.
    pub mock_mode: Option<String>,
    /// "mock" when the "try it" button was used.
    pub action: Option<String>,
}

impl AnalyzeForm {
    #[must_use]
    pub fn use_mock(&self) -> bool {
        self.mock_mode.as_deref() == Some("on") || self.action.as_deref() == Some("mock")
    }
}

fn render_journal(
    app: &App,
    recommendation: Option<&Recommendation>,
    mood_text: &str,
    mock_mode: bool,
) -> Result<Html<String>, AppError> {
    let timeline = app.timeline.load(app.config.timeline_limit)?;
    let leaderboard = app.streaks.load_leaderboard(app.config.leaderboard_size)?;
    debug!(
        "Rendering journal with {} entries and {} leaderboard rows",
        timeline.len(),
        leaderboard.len()
    );

    Ok(Html(views::render_index(&IndexView {
        recommendation,
        timeline: &timeline,
        leaderboard: &leaderboard,
        mood_text,
        mock_mode,
    })))
}

/// GET /
pub async fn index(State(app): State<SharedState>) -> Result<Html<String>, AppError> {
    render_journal(&app, None, "", false)
}

/// POST /analyze
pub async fn analyze(
    State(app): State<SharedState>,
    Form(form): Form<AnalyzeForm>,
) -> Result<Html<String>, AppError> {
    let mock = form.use_mock();
    info!("Analyzing journal entry ({} chars, mock={mock})", form.mood_text.len());

    let recommendation = app.recommender.build(&app.timeline, &form.mood_text, mock)?;
    render_journal(&app, Some(&recommendation), &form.mood_text, mock)
}

/// GET /puzzle
pub async fn puzzle() -> impl IntoResponse {
    Html(include_str!("../../static/puzzle.html"))
}

/// POST /puzzle_played
pub async fn puzzle_played(State(app): State<SharedState>) -> Result<Redirect, AppError> {
    app.streaks.check_in(&app.config.default_user)?;
    Ok(Redirect::to("/"))
}

/// GET /static/style.css
pub async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../../static/style.css"),
    )
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(mock_mode: Option<&str>, action: Option<&str>) -> AnalyzeForm {
        AnalyzeForm {
            mood_text: "hello".into(),
            mock_mode: mock_mode.map(str::to_string),
            action: action.map(str::to_string),
        }
    }

    #[test]
    fn test_mock_detection() {
        assert!(!form(None, None).use_mock());
        assert!(form(Some("on"), None).use_mock());
        assert!(form(None, Some("mock")).use_mock());
        assert!(!form(Some("off"), Some("analyze")).use_mock());
    }
}
