use std::path::Path;

use serde::Deserialize;

use quizdash_common::{PersonNode, QuestionNode, QuizDashError, TeamNode, TournamentNode};

/// The dataset document: two top-level collections, `nodes` keyed by entity
/// type name and `relationships` keyed by edge type name. Records reference
/// node keys by id/uid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub nodes: NodeCollections,
    #[serde(default)]
    pub relationships: EdgeCollections,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeCollections {
    #[serde(rename = "Tournament", default)]
    pub tournaments: Vec<TournamentNode>,
    #[serde(rename = "Team", default)]
    pub teams: Vec<TeamNode>,
    #[serde(rename = "Question", default)]
    pub questions: Vec<QuestionNode>,
    #[serde(rename = "Person", default)]
    pub persons: Vec<PersonNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EdgeCollections {
    #[serde(rename = "WROTE", default)]
    pub wrote: Vec<WroteRecord>,
    #[serde(rename = "PARTICIPATED", default)]
    pub participated: Vec<ParticipatedRecord>,
    #[serde(rename = "PLAYED_IN", default)]
    pub played_in: Vec<PlayedInRecord>,
    #[serde(rename = "ANSWERED", default)]
    pub answered: Vec<AnsweredRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WroteRecord {
    pub person_id: i64,
    pub question_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipatedRecord {
    pub team_id: i64,
    pub tournament_id: i64,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub total_correct: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayedInRecord {
    pub person_id: i64,
    pub team_id: i64,
    pub tournament_id: i64,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnsweredRecord {
    pub team_id: i64,
    pub question_id: String,
    pub tournament_id: i64,
    pub is_correct: bool,
}

impl Dataset {
    /// Read and parse a dataset file. An unreadable file is a connection
    /// failure (the store's data source is unreachable); malformed content
    /// is a validation failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, QuizDashError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QuizDashError::Connection(format!("cannot read dataset {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            QuizDashError::Validation(format!("malformed dataset {}: {e}", path.display()))
        })
    }
}
