//! JSON API
//!
//! Backs the single-page client. Every response is a JSON object:
//!
//! | Method | Path                 | Response                                |
//! |--------|----------------------|-----------------------------------------|
//! | POST   | `/api/analyze`       | `{mood, confidence, sentiment}`         |
//! | GET    | `/api/songs`         | `{tracks: [{name, artist, url}]}`       |
//! | GET    | `/api/book`          | `{mood, tip}`                           |
//! | GET    | `/api/puzzle`        | `{url}`                                 |
//! | POST   | `/api/journal`       | `{ok, entry}`                           |
//! | GET    | `/api/mood-timeline` | `{entries: [MoodEntry]}`                |
//! | POST   | `/api/streak/log`    | `{ok, user, streak}`                    |
//! | GET    | `/api/streak`        | `{user, streak}`                        |
//! | GET    | `/api/leaderboard`   | `{rows: [{user, streakDays}]}`          |
//!
//! Failures answer `{"error": "..."}`, including requests the extractors
//! reject (missing query fields, bad numbers, malformed JSON bodies).

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::SharedState;
use crate::mood::{self, Mood, Sentiment};
use crate::recommend;
use crate::songs::Track;
use crate::streak::{self, LeaderboardRow};
use crate::timeline::MoodEntry;

/// Where the client sends users for the daily puzzle.
pub const PUZZLE_PATH: &str = "/puzzle";

/// Routes mounted under `/api`.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/songs", get(songs))
        .route("/book", get(book))
        .route("/puzzle", get(puzzle))
        .route("/journal", post(journal))
        .route("/mood-timeline", get(mood_timeline))
        .route("/streak/log", post(log_streak))
        .route("/streak", get(streak))
        .route("/leaderboard", get(leaderboard))
}

/// Error body: `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Extractor rejection, keeping the status axum chose.
    Rejected(StatusCode, String),
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Rejected(status, message) => {
                debug!("Rejected API request ({status}): {message}");
                (status, message)
            }
            ApiError::Internal(err) => {
                error!("API request failed: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

fn parse_mood(label: &str) -> Result<Mood, ApiError> {
    label
        .parse()
        .map_err(|e: anyhow::Error| ApiError::BadRequest(e.to_string()))
}

/// POST /api/analyze
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub mock: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub mood: Mood,
    pub confidence: f64,
    pub sentiment: Sentiment,
}

/// Classify only. The client stores the entry through `/api/journal`.
pub async fn analyze(
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<AnalyzeResponse> {
    let Json(req) = payload?;
    info!("API analyze ({} chars, mock={})", req.text.len(), req.mock);

    if req.mock || req.text.trim().is_empty() {
        return Ok(Json(AnalyzeResponse {
            mood: Mood::Calm,
            confidence: 1.0,
            sentiment: Sentiment::Positive,
        }));
    }

    let classification = mood::classify(&req.text);
    Ok(Json(AnalyzeResponse {
        mood: classification.mood,
        confidence: classification.confidence(),
        sentiment: classification.sentiment,
    }))
}

/// GET /api/songs?mood=&limit=
#[derive(Debug, Deserialize)]
pub struct SongsQuery {
    pub mood: String,
    pub limit: Option<usize>,
}

/// A track as the client renders it.
#[derive(Debug, Serialize)]
pub struct SongItem {
    pub name: String,
    pub artist: String,
    pub url: Option<String>,
}

impl From<Track> for SongItem {
    fn from(track: Track) -> Self {
        Self {
            name: track.title,
            artist: track.artist,
            url: track.url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SongsResponse {
    pub tracks: Vec<SongItem>,
}

pub async fn songs(
    State(app): State<SharedState>,
    query: Result<Query<SongsQuery>, QueryRejection>,
) -> ApiResult<SongsResponse> {
    let Query(query) = query?;
    let mood = parse_mood(&query.mood)?;
    let limit = query.limit.unwrap_or(app.config.song_limit);
    let tracks = app
        .recommender
        .songs_for(mood, limit)
        .into_iter()
        .map(SongItem::from)
        .collect();
    Ok(Json(SongsResponse { tracks }))
}

/// GET /api/book?mood=
#[derive(Debug, Deserialize)]
pub struct BookQuery {
    #[serde(default)]
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub mood: Mood,
    pub tip: &'static str,
}

/// Unknown labels get the neutral suggestion.
pub async fn book(query: Result<Query<BookQuery>, QueryRejection>) -> ApiResult<BookResponse> {
    let Query(query) = query?;
    let mood = query.mood.parse().unwrap_or(Mood::Neutral);
    Ok(Json(BookResponse {
        mood,
        tip: recommend::book_for(mood),
    }))
}

/// GET /api/puzzle?mood=
#[derive(Debug, Deserialize)]
pub struct PuzzleQuery {
    pub mood: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PuzzleResponse {
    pub url: &'static str,
}

/// There is one puzzle for every mood.
pub async fn puzzle(
    query: Result<Query<PuzzleQuery>, QueryRejection>,
) -> ApiResult<PuzzleResponse> {
    let Query(query) = query?;
    debug!("Puzzle requested for mood {:?}", query.mood);
    Ok(Json(PuzzleResponse { url: PUZZLE_PATH }))
}

/// POST /api/journal
#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    pub text: String,
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct JournalResponse {
    pub ok: bool,
    pub entry: MoodEntry,
}

pub async fn journal(
    State(app): State<SharedState>,
    payload: Result<Json<JournalRequest>, JsonRejection>,
) -> ApiResult<JournalResponse> {
    let Json(req) = payload?;
    let mood = parse_mood(&req.mood)?;
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Journal text is empty".to_string()));
    }

    let entry = app.timeline.append(&req.text, mood)?;
    info!("Journal entry stored via API as `{mood}'");
    Ok(Json(JournalResponse { ok: true, entry }))
}

/// GET /api/mood-timeline?limit=
#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub entries: Vec<MoodEntry>,
}

pub async fn mood_timeline(
    State(app): State<SharedState>,
    query: Result<Query<TimelineQuery>, QueryRejection>,
) -> ApiResult<TimelineResponse> {
    let Query(query) = query?;
    let cap = app.config.timeline_limit;
    let limit = query.limit.map_or(cap, |limit| limit.min(cap));
    Ok(Json(TimelineResponse {
        entries: app.timeline.load(limit)?,
    }))
}

/// Streak of one user.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakResponse {
    pub user: String,
    pub streak: u32,
}

/// POST /api/streak/log
#[derive(Debug, Default, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub streak: StreakResponse,
}

pub async fn log_streak(
    State(app): State<SharedState>,
    payload: Result<Json<CheckInRequest>, JsonRejection>,
) -> ApiResult<CheckInResponse> {
    let Json(req) = payload?;
    let user = req.user.unwrap_or_else(|| app.config.default_user.clone());
    let entry = app.streaks.check_in(&user)?;
    let streak = app.streaks.streak_for(&entry.user)?;
    Ok(Json(CheckInResponse {
        ok: true,
        streak: StreakResponse {
            user: entry.user,
            streak,
        },
    }))
}

/// GET /api/streak?user=
#[derive(Debug, Deserialize)]
pub struct StreakQuery {
    pub user: Option<String>,
}

pub async fn streak(
    State(app): State<SharedState>,
    query: Result<Query<StreakQuery>, QueryRejection>,
) -> ApiResult<StreakResponse> {
    let Query(query) = query?;
    let requested = query.user.unwrap_or_else(|| app.config.default_user.clone());
    let user = streak::normalize_user(&requested).to_string();
    let streak = app.streaks.streak_for(&user)?;
    Ok(Json(StreakResponse { user, streak }))
}

/// One leaderboard line as the client renders it.
#[derive(Debug, Serialize)]
pub struct LeaderboardItem {
    pub user: String,
    #[serde(rename = "streakDays")]
    pub streak_days: u32,
}

impl From<LeaderboardRow> for LeaderboardItem {
    fn from(row: LeaderboardRow) -> Self {
        Self {
            user: row.user,
            streak_days: row.streak,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub rows: Vec<LeaderboardItem>,
}

/// GET /api/leaderboard
pub async fn leaderboard(State(app): State<SharedState>) -> ApiResult<LeaderboardResponse> {
    let rows = app
        .streaks
        .load_leaderboard(app.config.leaderboard_size)?
        .into_iter()
        .map(LeaderboardItem::from)
        .collect();
    Ok(Json(LeaderboardResponse { rows }))
}
