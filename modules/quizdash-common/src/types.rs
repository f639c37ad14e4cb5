use serde::{Deserialize, Serialize};

// --- Domain Constants ---

/// Fixed question count per tournament used by the global accuracy formula.
/// Inherited domain assumption; kept as a named constant because it is
/// fragile across tournaments with differing question counts.
pub const QUESTIONS_PER_TOURNAMENT: i64 = 36;

/// Maximum number of hits returned by team name search.
pub const TEAM_SEARCH_LIMIT: usize = 10;

/// Default chunk size for batched dataset ingestion.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

// --- Node Types ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Tournament,
    Team,
    Person,
    Question,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeType::Tournament => write!(f, "Tournament"),
            NodeType::Team => write!(f, "Team"),
            NodeType::Person => write!(f, "Person"),
            NodeType::Question => write!(f, "Question"),
        }
    }
}

/// A tournament. `stage` is the grouping key questions are associated by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentNode {
    pub id: i64,
    pub title: String,
    pub stage: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamNode {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonNode {
    pub id: i64,
    pub name: String,
}

/// A question. `number` is its ordinal within the tournament; `stage`
/// matches the owning tournament's stage value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionNode {
    pub uid: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub answer: String,
    pub number: i64,
    pub stage: String,
}

/// Typed node payload for store upserts.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Tournament(TournamentNode),
    Team(TeamNode),
    Person(PersonNode),
    Question(QuestionNode),
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Tournament(_) => NodeType::Tournament,
            Node::Team(_) => NodeType::Team,
            Node::Person(_) => NodeType::Person,
            Node::Question(_) => NodeType::Question,
        }
    }
}

// --- Edge Types ---

/// Typed edge payload for store upserts. Identity is the endpoint pair,
/// extended by `tournament_id` for the tournament-scoped types; everything
/// else is a non-key attribute overwritten on re-upsert.
#[derive(Debug, Clone, PartialEq)]
pub enum Edge {
    HasQuestion {
        tournament_id: i64,
        question_uid: String,
    },
    Wrote {
        person_id: i64,
        question_uid: String,
    },
    Participated {
        team_id: i64,
        tournament_id: i64,
        position: i64,
        total_correct: i64,
    },
    PlayedIn {
        person_id: i64,
        team_id: i64,
        tournament_id: i64,
        role: String,
    },
    Answered {
        team_id: i64,
        question_uid: String,
        tournament_id: i64,
        is_correct: bool,
    },
}

impl Edge {
    pub fn edge_type(&self) -> &'static str {
        match self {
            Edge::HasQuestion { .. } => "HAS_QUESTION",
            Edge::Wrote { .. } => "WROTE",
            Edge::Participated { .. } => "PARTICIPATED",
            Edge::PlayedIn { .. } => "PLAYED_IN",
            Edge::Answered { .. } => "ANSWERED",
        }
    }
}
