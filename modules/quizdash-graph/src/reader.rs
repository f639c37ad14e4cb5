use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use quizdash_common::{QUESTIONS_PER_TOURNAMENT, TEAM_SEARCH_LIMIT};

use crate::response::{
    AnswerStats, AnsweredQuestion, LeaderboardRow, QuestionDetails, QuestionOutcome,
    QuestionWithAuthor, RosterMember, TeamAnswer, TeamChartPoint, TeamGlobalStats, TeamSearchHit,
    TournamentSummary,
};
use crate::store::GraphStore;

/// Read-only analytics over the graph. Used by the web server.
///
/// Every operation is a pure function of store contents: no caching, no
/// external state, and no mutation, so calls are independently and
/// concurrently executable against the shared store. Unknown identifiers
/// yield empty results, never errors.
pub struct AnalyticsReader {
    store: Arc<GraphStore>,
}

impl AnalyticsReader {
    pub fn new(store: Arc<GraphStore>) -> Self {
        Self { store }
    }

    /// All tournaments, ordered by stage then title.
    pub fn tournaments(&self) -> Vec<TournamentSummary> {
        let mut out: Vec<TournamentSummary> = self
            .store
            .tournaments()
            .map(|t| TournamentSummary {
                id: t.id,
                title: t.title.clone(),
                stage: t.stage.clone(),
            })
            .collect();
        out.sort_by(|a, b| a.stage.cmp(&b.stage).then_with(|| a.title.cmp(&b.title)));
        out
    }

    /// Questions of a tournament with their authors, ordered by number.
    /// A question without a WROTE edge gets a null author.
    pub fn tournament_questions(&self, tournament_id: i64) -> Vec<QuestionWithAuthor> {
        let mut questions = self.store.questions_for(tournament_id);
        questions.sort_by_key(|q| q.number);
        questions
            .into_iter()
            .map(|q| QuestionWithAuthor {
                uid: q.uid.clone(),
                text: q.text.clone(),
                answer: q.answer.clone(),
                number: q.number,
                author: self.store.author_of(&q.uid).map(|p| p.name.clone()),
            })
            .collect()
    }

    /// A question's text/answer/author plus per-team results and derived
    /// statistics, scoped to the given tournament.
    pub fn question_details(
        &self,
        question_uid: &str,
        tournament_id: i64,
    ) -> Option<QuestionDetails> {
        let question = self.store.question(question_uid)?;

        let mut results: Vec<TeamAnswer> = self
            .store
            .answers_in(tournament_id)
            .into_iter()
            .filter(|a| a.question_uid == question_uid)
            .filter_map(|a| {
                let team = self.store.team(a.team_id)?;
                Some(TeamAnswer {
                    team_id: team.id,
                    team: team.name.clone(),
                    city: team.city.clone(),
                    correct: a.is_correct,
                })
            })
            .collect();
        results.sort_by(|a, b| a.team.cmp(&b.team));

        let total_teams = results.len();
        let correct_count = results.iter().filter(|r| r.correct).count();
        let accuracy_percent = if total_teams > 0 {
            round2(correct_count as f64 / total_teams as f64 * 100.0)
        } else {
            0.0
        };

        Some(QuestionDetails {
            text: question.text.clone(),
            answer: question.answer.clone(),
            author: self.store.author_of(question_uid).map(|p| p.name.clone()),
            results,
            stats: AnswerStats {
                total_teams,
                correct_count,
                accuracy_percent,
            },
        })
    }

    /// For every question of the tournament: the average accuracy across all
    /// teams (0 when nobody attempted it) alongside the given team's own
    /// outcome as 100 or 0. Ordered by question number.
    pub fn team_stats(&self, team_id: i64, tournament_id: i64) -> Vec<QuestionOutcome> {
        // (attempts, correct) per question across all teams
        let mut per_question: HashMap<&str, (i64, i64)> = HashMap::new();
        for a in self.store.answers_in(tournament_id) {
            let entry = per_question.entry(a.question_uid).or_insert((0, 0));
            entry.0 += 1;
            if a.is_correct {
                entry.1 += 1;
            }
        }

        let own: HashMap<&str, bool> = self
            .store
            .answers_of_team_in(team_id, tournament_id)
            .into_iter()
            .map(|a| (a.question_uid, a.is_correct))
            .collect();

        let mut questions = self.store.questions_for(tournament_id);
        questions.sort_by_key(|q| q.number);
        questions
            .into_iter()
            .map(|q| {
                let (attempts, correct) =
                    per_question.get(q.uid.as_str()).copied().unwrap_or((0, 0));
                let avg_accuracy = if attempts > 0 {
                    round1(correct as f64 / attempts as f64 * 100.0)
                } else {
                    0.0
                };
                let team_result = match own.get(q.uid.as_str()) {
                    Some(true) => 100,
                    _ => 0,
                };
                QuestionOutcome {
                    num: q.number,
                    avg_accuracy,
                    team_result,
                }
            })
            .collect()
    }

    /// Teams with at least one correct answer in the tournament, scored by
    /// correct count. Ordered by score descending, ties by name ascending.
    pub fn leaderboard(&self, tournament_id: i64) -> Vec<LeaderboardRow> {
        let mut scores: BTreeMap<i64, i64> = BTreeMap::new();
        for a in self.store.answers_in(tournament_id) {
            if a.is_correct {
                *scores.entry(a.team_id).or_insert(0) += 1;
            }
        }

        let mut rows: Vec<LeaderboardRow> = scores
            .into_iter()
            .filter_map(|(team_id, score)| {
                let team = self.store.team(team_id)?;
                Some(LeaderboardRow {
                    team_id,
                    team: team.name.clone(),
                    city: team.city.clone(),
                    score,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.team.cmp(&b.team)));
        rows
    }

    /// Names of the team's players in the given tournament.
    pub fn team_roster(&self, team_id: i64, tournament_id: i64) -> Vec<RosterMember> {
        self.store
            .roster(team_id, tournament_id)
            .into_iter()
            .map(|p| RosterMember {
                name: p.name.clone(),
            })
            .collect()
    }

    /// Teams whose name contains the query case-insensitively, capped at
    /// the search limit.
    pub fn search_teams(&self, query: &str) -> Vec<TeamSearchHit> {
        let needle = query.to_lowercase();
        self.store
            .teams()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .take(TEAM_SEARCH_LIMIT)
            .map(|t| TeamSearchHit {
                id: t.id,
                name: t.name.clone(),
                city: t.city.clone(),
            })
            .collect()
    }

    /// Cross-tournament aggregate for one team: all-time roster, totals,
    /// fixed-divisor accuracy, and competition-style rank summary.
    pub fn team_global_stats(&self, team_id: i64) -> Option<TeamGlobalStats> {
        let team = self.store.team(team_id)?;

        let roster: Vec<String> = {
            let names: BTreeSet<String> = self
                .store
                .roster_all(team_id)
                .into_iter()
                .map(|p| p.name.clone())
                .collect();
            names.into_iter().collect()
        };

        let answers = self.store.answers_of_team(team_id);
        let tournament_ids: BTreeSet<i64> = answers.iter().map(|a| a.tournament_id).collect();
        let total_correct = answers.iter().filter(|a| a.is_correct).count() as i64;
        let total_tournaments = tournament_ids.len();

        let accuracy = if total_tournaments > 0 {
            round1(
                total_correct as f64 * 100.0
                    / (total_tournaments as i64 * QUESTIONS_PER_TOURNAMENT) as f64,
            )
        } else {
            0.0
        };

        // Competition ranking per tournament: rank = teams with a strictly
        // greater correct count, plus one. A team with no correct answers
        // scores 0.
        let ranks: Vec<usize> = tournament_ids
            .iter()
            .map(|&tid| {
                let mut scores: HashMap<i64, i64> = HashMap::new();
                for a in self.store.answers_in(tid) {
                    if a.is_correct {
                        *scores.entry(a.team_id).or_insert(0) += 1;
                    }
                }
                let own = scores.get(&team_id).copied().unwrap_or(0);
                scores.values().filter(|s| **s > own).count() + 1
            })
            .collect();

        let (avg_rank, best_rank, worst_rank) = if ranks.is_empty() {
            (None, None, None)
        } else {
            let sum: usize = ranks.iter().sum();
            (
                Some(round1(sum as f64 / ranks.len() as f64)),
                ranks.iter().min().copied(),
                ranks.iter().max().copied(),
            )
        };

        Some(TeamGlobalStats {
            name: team.name.clone(),
            city: team.city.clone(),
            roster,
            total_tournaments,
            total_correct,
            accuracy,
            avg_rank,
            best_rank,
            worst_rank,
        })
    }

    /// Per-tournament result points for the team's history chart. Only
    /// tournaments where the team answered at least one question appear.
    /// Ordered by stage ascending.
    pub fn team_chart_stats(&self, team_id: i64) -> Vec<TeamChartPoint> {
        // tournament id -> (correct, total)
        let mut per_tournament: BTreeMap<i64, (i64, i64)> = BTreeMap::new();
        for a in self.store.answers_of_team(team_id) {
            let entry = per_tournament.entry(a.tournament_id).or_insert((0, 0));
            entry.1 += 1;
            if a.is_correct {
                entry.0 += 1;
            }
        }

        let mut points: Vec<TeamChartPoint> = per_tournament
            .into_iter()
            .filter(|(_, (_, total))| *total > 0)
            .filter_map(|(tid, (correct, total))| {
                let tournament = self.store.tournament(tid)?;
                Some(TeamChartPoint {
                    stage_title: tournament.title.clone(),
                    stage_number: tournament.stage.clone(),
                    correct_count: correct,
                    total_questions: total,
                })
            })
            .collect();
        points.sort_by(|a, b| a.stage_number.cmp(&b.stage_number));
        points
    }

    /// Every question the team ever answered, with its outcome. Ordered by
    /// tournament id then question number.
    pub fn team_question_history(&self, team_id: i64) -> Vec<AnsweredQuestion> {
        let mut rows: Vec<(i64, AnsweredQuestion)> = self
            .store
            .answers_of_team(team_id)
            .into_iter()
            .filter_map(|a| {
                let tournament = self.store.tournament(a.tournament_id)?;
                let question = self.store.question(a.question_uid)?;
                Some((
                    a.tournament_id,
                    AnsweredQuestion {
                        tournament: tournament.title.clone(),
                        number: question.number,
                        text: question.text.clone(),
                        answer: question.answer.clone(),
                        is_correct: a.is_correct,
                    },
                ))
            })
            .collect();
        rows.sort_by(|(a_tid, a), (b_tid, b)| a_tid.cmp(b_tid).then_with(|| a.number.cmp(&b.number)));
        rows.into_iter().map(|(_, row)| row).collect()
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
