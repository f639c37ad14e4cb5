use std::collections::HashMap;

use tracing::{info, warn};

use quizdash_common::{Edge, Node, QuizDashError};

use crate::dataset::Dataset;
use crate::store::GraphStore;

/// Final store counts after a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub nodes: usize,
    pub edges: usize,
}

/// Applies a dataset to the store in a fixed ingestion order, so that edge
/// creation always finds its endpoints already present:
///
/// 1-4. Tournament, Team, Question, Person nodes
/// 5.   HAS_QUESTION (resolved stage join)
/// 6.   WROTE
/// 7.   PARTICIPATED
/// 8.   PLAYED_IN
/// 9.   ANSWERED
///
/// Collections are processed in bounded chunks purely for progress
/// reporting; chunk boundaries carry no semantics and every operation is an
/// idempotent upsert, so re-running the same dataset changes nothing. A
/// failing chunk aborts the run without rolling back committed chunks
/// (partial load is a possible terminal state).
pub struct GraphLoader {
    batch_size: usize,
}

impl GraphLoader {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn load(
        &self,
        store: &mut GraphStore,
        dataset: &Dataset,
    ) -> Result<LoadReport, QuizDashError> {
        info!("=== loading nodes ===");
        run_step("tournaments", &dataset.nodes.tournaments, self.batch_size, store, |s, n| {
            s.upsert_node(Node::Tournament(n.clone()));
            Ok(())
        })?;
        run_step("teams", &dataset.nodes.teams, self.batch_size, store, |s, n| {
            s.upsert_node(Node::Team(n.clone()));
            Ok(())
        })?;
        run_step("questions", &dataset.nodes.questions, self.batch_size, store, |s, n| {
            s.upsert_node(Node::Question(n.clone()));
            Ok(())
        })?;
        run_step("persons", &dataset.nodes.persons, self.batch_size, store, |s, n| {
            s.upsert_node(Node::Person(n.clone()));
            Ok(())
        })?;

        info!("=== creating relationships ===");

        // Questions attach to tournaments by stage equality. The join is
        // resolved once up front; a stage claimed by two tournaments would
        // make the attachment ambiguous, so it aborts the load.
        let stage_to_tournament = resolve_stages(dataset)?;
        run_step("has_question", &dataset.nodes.questions, self.batch_size, store, |s, q| {
            match stage_to_tournament.get(q.stage.as_str()) {
                Some(tournament_id) => s.upsert_edge(Edge::HasQuestion {
                    tournament_id: *tournament_id,
                    question_uid: q.uid.clone(),
                }),
                None => {
                    warn!(uid = %q.uid, stage = %q.stage, "question stage matches no tournament");
                    Ok(())
                }
            }
        })?;

        run_step("wrote", &dataset.relationships.wrote, self.batch_size, store, |s, r| {
            s.upsert_edge(Edge::Wrote {
                person_id: r.person_id,
                question_uid: r.question_id.clone(),
            })
        })?;
        run_step("participated", &dataset.relationships.participated, self.batch_size, store, |s, r| {
            s.upsert_edge(Edge::Participated {
                team_id: r.team_id,
                tournament_id: r.tournament_id,
                position: r.position,
                total_correct: r.total_correct,
            })
        })?;
        run_step("played_in", &dataset.relationships.played_in, self.batch_size, store, |s, r| {
            s.upsert_edge(Edge::PlayedIn {
                person_id: r.person_id,
                team_id: r.team_id,
                tournament_id: r.tournament_id,
                role: r.role.clone(),
            })
        })?;
        // The answer set dwarfs every other collection; use a larger chunk.
        run_step("answered", &dataset.relationships.answered, self.batch_size * 2, store, |s, r| {
            s.upsert_edge(Edge::Answered {
                team_id: r.team_id,
                question_uid: r.question_id.clone(),
                tournament_id: r.tournament_id,
                is_correct: r.is_correct,
            })
        })?;

        let report = LoadReport {
            nodes: store.node_count(),
            edges: store.edge_count(),
        };
        info!(nodes = report.nodes, edges = report.edges, "load complete");
        Ok(report)
    }
}

/// Map each stage value to its unique owning tournament.
fn resolve_stages(dataset: &Dataset) -> Result<HashMap<&str, i64>, QuizDashError> {
    let mut stages: HashMap<&str, i64> = HashMap::new();
    for t in &dataset.nodes.tournaments {
        if let Some(prev) = stages.insert(t.stage.as_str(), t.id) {
            if prev != t.id {
                return Err(QuizDashError::ConstraintViolation(format!(
                    "stage '{}' is claimed by tournaments {} and {}",
                    t.stage, prev, t.id
                )));
            }
        }
    }
    Ok(stages)
}

/// Apply one ingestion step in bounded chunks with progress logging.
/// On failure, reports the step, the chunk index, and how many records of
/// the step were committed before the error.
fn run_step<T>(
    step: &'static str,
    items: &[T],
    batch_size: usize,
    store: &mut GraphStore,
    mut apply: impl FnMut(&mut GraphStore, &T) -> Result<(), QuizDashError>,
) -> Result<(), QuizDashError> {
    let total = items.len();
    if total == 0 {
        return Ok(());
    }

    let mut committed = 0usize;
    for (chunk_idx, chunk) in items.chunks(batch_size).enumerate() {
        for item in chunk {
            apply(store, item).map_err(|e| {
                warn!(step, chunk = chunk_idx, committed, error = %e, "batch failed");
                e.in_step(step)
            })?;
            committed += 1;
        }
        info!(step, processed = committed, total, "processed batch");
    }
    Ok(())
}
