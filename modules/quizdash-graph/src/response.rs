//! View structs returned by the analytics reader. Field names are the API
//! payload contract consumed by the dashboard.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub id: i64,
    pub title: String,
    pub stage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionWithAuthor {
    pub uid: String,
    pub text: String,
    pub answer: String,
    pub number: i64,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAnswer {
    pub team_id: i64,
    pub team: String,
    pub city: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerStats {
    pub total_teams: usize,
    pub correct_count: usize,
    pub accuracy_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionDetails {
    pub text: String,
    pub answer: String,
    pub author: Option<String>,
    pub results: Vec<TeamAnswer>,
    pub stats: AnswerStats,
}

/// One row of the per-question team profile: tournament-wide average
/// accuracy next to the team's own outcome (100 or 0).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionOutcome {
    pub num: i64,
    pub avg_accuracy: f64,
    pub team_result: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub team_id: i64,
    pub team: String,
    pub city: String,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterMember {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSearchHit {
    pub id: i64,
    pub name: String,
    pub city: String,
}

/// Cross-tournament aggregate for one team. Rank fields are absent when the
/// team has no answered tournaments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamGlobalStats {
    pub name: String,
    pub city: String,
    pub roster: Vec<String>,
    pub total_tournaments: usize,
    pub total_correct: i64,
    pub accuracy: f64,
    pub avg_rank: Option<f64>,
    pub best_rank: Option<usize>,
    pub worst_rank: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamChartPoint {
    pub stage_title: String,
    pub stage_number: String,
    pub correct_count: i64,
    pub total_questions: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnsweredQuestion {
    pub tournament: String,
    pub number: i64,
    pub text: String,
    pub answer: String,
    pub is_correct: bool,
}
