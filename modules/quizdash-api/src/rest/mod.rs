use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::AppState;

// --- Query structs ---

#[derive(Deserialize)]
pub struct QuestionQuery {
    t_id: i64,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: String,
}

// --- Handlers ---
//
// Reads are pure lookups over the in-process graph, so handlers are
// infallible; unknown identifiers come back as empty structures (or null),
// never as 404s. Malformed path ids are rejected by the extractors with 400.

pub async fn api_tournaments(State(state): State<Arc<AppState>>) -> Json<Value> {
    json_of(state.reader.tournaments())
}

pub async fn api_tournament_questions(
    State(state): State<Arc<AppState>>,
    Path(t_id): Path<i64>,
) -> Json<Value> {
    json_of(state.reader.tournament_questions(t_id))
}

pub async fn api_question_details(
    State(state): State<Arc<AppState>>,
    Path(q_uid): Path<String>,
    Query(params): Query<QuestionQuery>,
) -> Json<Value> {
    json_of(state.reader.question_details(&q_uid, params.t_id))
}

pub async fn api_team_stats(
    State(state): State<Arc<AppState>>,
    Path((team_id, t_id)): Path<(i64, i64)>,
) -> Json<Value> {
    json_of(state.reader.team_stats(team_id, t_id))
}

pub async fn api_leaderboard(
    State(state): State<Arc<AppState>>,
    Path(t_id): Path<i64>,
) -> Json<Value> {
    json_of(state.reader.leaderboard(t_id))
}

pub async fn api_team_roster(
    State(state): State<Arc<AppState>>,
    Path((team_id, t_id)): Path<(i64, i64)>,
) -> Json<Value> {
    json_of(state.reader.team_roster(team_id, t_id))
}

pub async fn api_search_teams(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Json<Value> {
    json_of(state.reader.search_teams(&params.q))
}

pub async fn api_team_global_stats(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<i64>,
) -> Json<Value> {
    // An unknown team yields an empty object, matching the dashboard's
    // expectation of a record rather than null.
    match state.reader.team_global_stats(team_id) {
        Some(stats) => json_of(stats),
        None => Json(serde_json::json!({})),
    }
}

pub async fn api_team_question_history(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<i64>,
) -> Json<Value> {
    json_of(state.reader.team_question_history(team_id))
}

pub async fn api_team_chart_stats(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<i64>,
) -> Json<Value> {
    json_of(state.reader.team_chart_stats(team_id))
}

fn json_of(value: impl serde::Serialize) -> Json<Value> {
    Json(serde_json::to_value(value).unwrap_or(Value::Null))
}
