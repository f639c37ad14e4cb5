use std::collections::{BTreeMap, BTreeSet};

use quizdash_common::{
    Edge, Node, NodeType, PersonNode, QuestionNode, QuizDashError, TeamNode, TournamentNode,
};

/// Attributes carried by a PARTICIPATED edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participation {
    pub position: i64,
    pub total_correct: i64,
}

/// A resolved ANSWERED edge, borrowed from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRef<'a> {
    pub team_id: i64,
    pub tournament_id: i64,
    pub question_uid: &'a str,
    pub is_correct: bool,
}

/// Counts removed by a full reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NukeReport {
    pub nodes_removed: usize,
    pub edges_removed: usize,
}

/// In-memory typed graph of tournament results.
///
/// Nodes live in maps keyed by their unique id/uid. Tournament-scoped edges
/// are keyed by their full identifying tuple so that prefix ranges answer
/// the scoped lookups directly; everything else is answered by a filtered
/// scan, which is cheap at the dataset sizes involved.
///
/// Upserts are create-or-update on the identifying key: repeated upserts
/// with the same key leave at most one entity, and non-key attributes take
/// the latest value. The serving path never mutates the store.
#[derive(Debug, Default)]
pub struct GraphStore {
    tournaments: BTreeMap<i64, TournamentNode>,
    teams: BTreeMap<i64, TeamNode>,
    persons: BTreeMap<i64, PersonNode>,
    questions: BTreeMap<String, QuestionNode>,

    /// tournament id -> question uids
    has_question: BTreeMap<i64, BTreeSet<String>>,
    /// question uid -> author person ids
    wrote: BTreeMap<String, BTreeSet<i64>>,
    /// (team id, tournament id) -> attributes
    participated: BTreeMap<(i64, i64), Participation>,
    /// (team id, tournament id, person id) -> role
    played_in: BTreeMap<(i64, i64, i64), String>,
    /// (team id, tournament id, question uid) -> is_correct
    answered: BTreeMap<(i64, i64, String), bool>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Write path (loader only) ---

    /// Create-or-update a node, keyed by its unique id/uid.
    pub fn upsert_node(&mut self, node: Node) {
        match node {
            Node::Tournament(n) => {
                self.tournaments.insert(n.id, n);
            }
            Node::Team(n) => {
                self.teams.insert(n.id, n);
            }
            Node::Person(n) => {
                self.persons.insert(n.id, n);
            }
            Node::Question(n) => {
                self.questions.insert(n.uid.clone(), n);
            }
        }
    }

    /// Create-or-update an edge, keyed by its identifying tuple.
    ///
    /// Fails with a `Reference` error naming the missing endpoint when
    /// either endpoint node does not exist; no edge is created in that case.
    pub fn upsert_edge(&mut self, edge: Edge) -> Result<(), QuizDashError> {
        match edge {
            Edge::HasQuestion {
                tournament_id,
                question_uid,
            } => {
                self.require_tournament(tournament_id)?;
                self.require_question(&question_uid)?;
                self.has_question
                    .entry(tournament_id)
                    .or_default()
                    .insert(question_uid);
            }
            Edge::Wrote {
                person_id,
                question_uid,
            } => {
                self.require_person(person_id)?;
                self.require_question(&question_uid)?;
                self.wrote.entry(question_uid).or_default().insert(person_id);
            }
            Edge::Participated {
                team_id,
                tournament_id,
                position,
                total_correct,
            } => {
                self.require_team(team_id)?;
                self.require_tournament(tournament_id)?;
                self.participated.insert(
                    (team_id, tournament_id),
                    Participation {
                        position,
                        total_correct,
                    },
                );
            }
            Edge::PlayedIn {
                person_id,
                team_id,
                tournament_id,
                role,
            } => {
                self.require_person(person_id)?;
                self.require_team(team_id)?;
                self.played_in
                    .insert((team_id, tournament_id, person_id), role);
            }
            Edge::Answered {
                team_id,
                question_uid,
                tournament_id,
                is_correct,
            } => {
                self.require_team(team_id)?;
                self.require_question(&question_uid)?;
                self.answered
                    .insert((team_id, tournament_id, question_uid), is_correct);
            }
        }
        Ok(())
    }

    /// Delete every node, edge, and derived index. Safe on an empty store.
    pub fn nuke(&mut self) -> NukeReport {
        let report = NukeReport {
            nodes_removed: self.node_count(),
            edges_removed: self.edge_count(),
        };
        self.tournaments.clear();
        self.teams.clear();
        self.persons.clear();
        self.questions.clear();
        self.has_question.clear();
        self.wrote.clear();
        self.participated.clear();
        self.played_in.clear();
        self.answered.clear();
        report
    }

    // --- Node lookups ---

    pub fn tournament(&self, id: i64) -> Option<&TournamentNode> {
        self.tournaments.get(&id)
    }

    pub fn team(&self, id: i64) -> Option<&TeamNode> {
        self.teams.get(&id)
    }

    pub fn person(&self, id: i64) -> Option<&PersonNode> {
        self.persons.get(&id)
    }

    pub fn question(&self, uid: &str) -> Option<&QuestionNode> {
        self.questions.get(uid)
    }

    pub fn tournaments(&self) -> impl Iterator<Item = &TournamentNode> {
        self.tournaments.values()
    }

    pub fn teams(&self) -> impl Iterator<Item = &TeamNode> {
        self.teams.values()
    }

    // --- Edge traversals ---

    /// Questions linked to a tournament, unordered.
    pub fn questions_for(&self, tournament_id: i64) -> Vec<&QuestionNode> {
        self.has_question
            .get(&tournament_id)
            .into_iter()
            .flatten()
            .filter_map(|uid| self.questions.get(uid))
            .collect()
    }

    /// The question's author, if any WROTE edge exists. When several do,
    /// the lowest person id wins (cardinality is not enforced at load).
    pub fn author_of(&self, question_uid: &str) -> Option<&PersonNode> {
        self.wrote
            .get(question_uid)?
            .iter()
            .find_map(|id| self.persons.get(id))
    }

    /// All ANSWERED edges scoped to a tournament, across every team.
    pub fn answers_in(&self, tournament_id: i64) -> Vec<AnswerRef<'_>> {
        self.answered
            .iter()
            .filter(|((_, t, _), _)| *t == tournament_id)
            .map(|((team, t, uid), correct)| AnswerRef {
                team_id: *team,
                tournament_id: *t,
                question_uid: uid,
                is_correct: *correct,
            })
            .collect()
    }

    /// All ANSWERED edges of one team, across every tournament.
    pub fn answers_of_team(&self, team_id: i64) -> Vec<AnswerRef<'_>> {
        self.answered
            .range((team_id, i64::MIN, String::new())..)
            .take_while(move |((team, _, _), _)| *team == team_id)
            .map(|((team, t, uid), correct)| AnswerRef {
                team_id: *team,
                tournament_id: *t,
                question_uid: uid,
                is_correct: *correct,
            })
            .collect()
    }

    /// One team's ANSWERED edges scoped to a tournament.
    pub fn answers_of_team_in(&self, team_id: i64, tournament_id: i64) -> Vec<AnswerRef<'_>> {
        self.answered
            .range((team_id, tournament_id, String::new())..)
            .take_while(move |((team, t, _), _)| *team == team_id && *t == tournament_id)
            .map(|((team, t, uid), correct)| AnswerRef {
                team_id: *team,
                tournament_id: *t,
                question_uid: uid,
                is_correct: *correct,
            })
            .collect()
    }

    /// Persons with a PLAYED_IN edge to the team scoped to a tournament.
    pub fn roster(&self, team_id: i64, tournament_id: i64) -> Vec<&PersonNode> {
        self.played_in
            .range((team_id, tournament_id, i64::MIN)..)
            .take_while(move |((team, t, _), _)| *team == team_id && *t == tournament_id)
            .filter_map(|((_, _, person), _)| self.persons.get(person))
            .collect()
    }

    /// Distinct persons who ever played in the team, any tournament.
    pub fn roster_all(&self, team_id: i64) -> Vec<&PersonNode> {
        let ids: BTreeSet<i64> = self
            .played_in
            .range((team_id, i64::MIN, i64::MIN)..)
            .take_while(move |((team, _, _), _)| *team == team_id)
            .map(|((_, _, person), _)| *person)
            .collect();
        ids.iter().filter_map(|id| self.persons.get(id)).collect()
    }

    pub fn participation(&self, team_id: i64, tournament_id: i64) -> Option<&Participation> {
        self.participated.get(&(team_id, tournament_id))
    }

    // --- Counts ---

    pub fn node_count(&self) -> usize {
        self.tournaments.len() + self.teams.len() + self.persons.len() + self.questions.len()
    }

    pub fn edge_count(&self) -> usize {
        let has_question: usize = self.has_question.values().map(BTreeSet::len).sum();
        let wrote: usize = self.wrote.values().map(BTreeSet::len).sum();
        has_question + wrote + self.participated.len() + self.played_in.len() + self.answered.len()
    }

    // --- Endpoint checks ---

    fn require_tournament(&self, id: i64) -> Result<(), QuizDashError> {
        if self.tournaments.contains_key(&id) {
            Ok(())
        } else {
            Err(missing(NodeType::Tournament, id.to_string()))
        }
    }

    fn require_team(&self, id: i64) -> Result<(), QuizDashError> {
        if self.teams.contains_key(&id) {
            Ok(())
        } else {
            Err(missing(NodeType::Team, id.to_string()))
        }
    }

    fn require_person(&self, id: i64) -> Result<(), QuizDashError> {
        if self.persons.contains_key(&id) {
            Ok(())
        } else {
            Err(missing(NodeType::Person, id.to_string()))
        }
    }

    fn require_question(&self, uid: &str) -> Result<(), QuizDashError> {
        if self.questions.contains_key(uid) {
            Ok(())
        } else {
            Err(missing(NodeType::Question, uid.to_string()))
        }
    }
}

fn missing(node_type: NodeType, key: String) -> QuizDashError {
    QuizDashError::Reference {
        step: String::new(),
        key: format!("{node_type} {key}"),
    }
}
