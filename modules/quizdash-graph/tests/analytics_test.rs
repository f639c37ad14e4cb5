//! End-to-end behavior of the analytics operations over a loaded graph.
//!
//! Fixture: two tournaments of ten questions each. In tournament 1 the
//! teams score {Alpha: 10, Beta: 10, Gamma: 8, Delta: 5}; in tournament 2
//! only Alpha plays, scoring 8 of 10. Echo never answers anything.

use std::sync::Arc;

use quizdash_common::{PersonNode, QuestionNode, TeamNode, TournamentNode};
use quizdash_graph::dataset::{AnsweredRecord, Dataset, PlayedInRecord, WroteRecord};
use quizdash_graph::{AnalyticsReader, GraphLoader, GraphStore};

fn fixture() -> AnalyticsReader {
    let mut dataset = Dataset::default();

    dataset.nodes.tournaments = vec![
        TournamentNode {
            id: 1,
            title: "Tournament 1".into(),
            stage: "01".into(),
            date: "2024-10-01".into(),
            kind: "sync".into(),
        },
        TournamentNode {
            id: 2,
            title: "Tournament 2".into(),
            stage: "02".into(),
            date: "2024-11-01".into(),
            kind: "sync".into(),
        },
    ];

    dataset.nodes.teams = vec![
        TeamNode { id: 1, name: "Alpha".into(), city: "Riga".into() },
        TeamNode { id: 2, name: "Beta".into(), city: "Tartu".into() },
        TeamNode { id: 3, name: "Gamma".into(), city: "Vilnius".into() },
        TeamNode { id: 4, name: "Delta".into(), city: "Kaunas".into() },
        TeamNode { id: 5, name: "Echo".into(), city: "Narva".into() },
    ];

    dataset.nodes.persons = vec![
        PersonNode { id: 10, name: "Ann".into() },
        PersonNode { id: 11, name: "Bob".into() },
        PersonNode { id: 12, name: "Cal".into() },
    ];

    for n in 1..=10 {
        dataset.nodes.questions.push(QuestionNode {
            uid: format!("a{n}"),
            text: format!("t1 question {n}"),
            answer: format!("t1 answer {n}"),
            number: n,
            stage: "01".into(),
        });
        dataset.nodes.questions.push(QuestionNode {
            uid: format!("b{n}"),
            text: format!("t2 question {n}"),
            answer: format!("t2 answer {n}"),
            number: n,
            stage: "02".into(),
        });
    }
    // Nobody ever attempts this one.
    dataset.nodes.questions.push(QuestionNode {
        uid: "b11".into(),
        text: "t2 question 11".into(),
        answer: "t2 answer 11".into(),
        number: 11,
        stage: "02".into(),
    });

    dataset.relationships.wrote = vec![WroteRecord {
        person_id: 10,
        question_id: "a1".into(),
    }];

    // Ann switches from Alpha (t1) to Beta (t2); Bob stays on Alpha for t1,
    // Cal joins Alpha for t2.
    dataset.relationships.played_in = vec![
        PlayedInRecord { person_id: 10, team_id: 1, tournament_id: 1, role: "captain".into() },
        PlayedInRecord { person_id: 11, team_id: 1, tournament_id: 1, role: "base".into() },
        PlayedInRecord { person_id: 10, team_id: 2, tournament_id: 2, role: "captain".into() },
        PlayedInRecord { person_id: 12, team_id: 1, tournament_id: 2, role: "legionnaire".into() },
    ];

    let mut answer = |team_id: i64, uid: String, tournament_id: i64, is_correct: bool| {
        dataset.relationships.answered.push(AnsweredRecord {
            team_id,
            question_id: uid,
            tournament_id,
            is_correct,
        });
    };

    // Tournament 1 scores: Alpha 10, Beta 10, Gamma 8 (of 10 attempts),
    // Delta 5 (of 5 attempts).
    for n in 1..=10 {
        answer(1, format!("a{n}"), 1, true);
        answer(2, format!("a{n}"), 1, true);
        answer(3, format!("a{n}"), 1, n <= 8);
    }
    for n in 1..=5 {
        answer(4, format!("a{n}"), 1, true);
    }
    // Tournament 2: Alpha alone, 8 of 10.
    for n in 1..=10 {
        answer(1, format!("b{n}"), 2, n <= 8);
    }

    let mut store = GraphStore::new();
    GraphLoader::new(1000).load(&mut store, &dataset).unwrap();
    AnalyticsReader::new(Arc::new(store))
}

// =========================================================================
// Tournament listing + questions
// =========================================================================

#[test]
fn tournaments_are_ordered_by_stage_then_title() {
    let reader = fixture();
    let tournaments = reader.tournaments();
    assert_eq!(tournaments.len(), 2);
    assert_eq!(tournaments[0].id, 1);
    assert_eq!(tournaments[1].id, 2);
}

#[test]
fn tournament_questions_are_ordered_and_annotated_with_authors() {
    let reader = fixture();
    let questions = reader.tournament_questions(1);

    assert_eq!(questions.len(), 10);
    let numbers: Vec<i64> = questions.iter().map(|q| q.number).collect();
    assert_eq!(numbers, (1..=10).collect::<Vec<_>>());

    assert_eq!(questions[0].author.as_deref(), Some("Ann"));
    assert_eq!(questions[1].author, None);
}

#[test]
fn unknown_tournament_yields_no_questions() {
    let reader = fixture();
    assert!(reader.tournament_questions(99).is_empty());
}

// =========================================================================
// Question details
// =========================================================================

#[test]
fn question_details_aggregates_scoped_answers() {
    let reader = fixture();
    let details = reader.question_details("a1", 1).unwrap();

    assert_eq!(details.text, "t1 question 1");
    assert_eq!(details.author.as_deref(), Some("Ann"));
    assert_eq!(details.stats.total_teams, 4);
    assert_eq!(details.stats.correct_count, 4);
    assert_eq!(details.stats.accuracy_percent, 100.0);
}

#[test]
fn question_details_rounds_accuracy_to_two_decimals() {
    let reader = fixture();
    // a9: Alpha and Beta correct, Gamma wrong, Delta absent.
    let details = reader.question_details("a9", 1).unwrap();
    assert_eq!(details.stats.total_teams, 3);
    assert_eq!(details.stats.correct_count, 2);
    assert_eq!(details.stats.accuracy_percent, 66.67);
}

#[test]
fn unattempted_question_has_zero_accuracy() {
    let reader = fixture();
    let details = reader.question_details("b11", 2).unwrap();
    assert_eq!(details.stats.total_teams, 0);
    assert_eq!(details.stats.accuracy_percent, 0.0);
    assert!(details.results.is_empty());
}

#[test]
fn unknown_question_is_none() {
    let reader = fixture();
    assert!(reader.question_details("nope", 1).is_none());
}

// =========================================================================
// Team stats per question
// =========================================================================

#[test]
fn team_stats_reports_average_and_own_result_per_question() {
    let reader = fixture();
    let rows = reader.team_stats(4, 1); // Delta

    assert_eq!(rows.len(), 10);
    let numbers: Vec<i64> = rows.iter().map(|r| r.num).collect();
    assert_eq!(numbers, (1..=10).collect::<Vec<_>>());

    // q1: all four teams correct; Delta answered it.
    assert_eq!(rows[0].avg_accuracy, 100.0);
    assert_eq!(rows[0].team_result, 100);

    // q9: 2 of 3 attempts correct; Delta did not attempt it.
    assert_eq!(rows[8].avg_accuracy, 66.7);
    assert_eq!(rows[8].team_result, 0);
}

#[test]
fn team_stats_average_is_zero_without_attempts() {
    let reader = fixture();
    let rows = reader.team_stats(1, 2);
    let q11 = rows.iter().find(|r| r.num == 11).unwrap();
    assert_eq!(q11.avg_accuracy, 0.0);
    assert_eq!(q11.team_result, 0);
}

// =========================================================================
// Leaderboard
// =========================================================================

#[test]
fn leaderboard_orders_by_score_then_name() {
    let reader = fixture();
    let rows = reader.leaderboard(1);

    let names: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
    let scores: Vec<i64> = rows.iter().map(|r| r.score).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma", "Delta"]);
    assert_eq!(scores, vec![10, 10, 8, 5]);
}

#[test]
fn leaderboard_of_unknown_tournament_is_empty() {
    let reader = fixture();
    assert!(reader.leaderboard(99).is_empty());
}

#[test]
fn two_team_scenario_matches_expected_board() {
    // Dataset with 1 tournament, 2 questions, 2 teams; team 1 answers both
    // correctly, team 2 only the first.
    let mut dataset = Dataset::default();
    dataset.nodes.tournaments = vec![TournamentNode {
        id: 1,
        title: "Mini".into(),
        stage: "S1".into(),
        date: String::new(),
        kind: String::new(),
    }];
    dataset.nodes.teams = vec![
        TeamNode { id: 1, name: "Team1".into(), city: String::new() },
        TeamNode { id: 2, name: "Team2".into(), city: String::new() },
    ];
    for n in 1..=2 {
        dataset.nodes.questions.push(QuestionNode {
            uid: format!("q{n}"),
            text: String::new(),
            answer: String::new(),
            number: n,
            stage: "S1".into(),
        });
    }
    dataset.relationships.answered = vec![
        AnsweredRecord { team_id: 1, question_id: "q1".into(), tournament_id: 1, is_correct: true },
        AnsweredRecord { team_id: 1, question_id: "q2".into(), tournament_id: 1, is_correct: true },
        AnsweredRecord { team_id: 2, question_id: "q1".into(), tournament_id: 1, is_correct: true },
    ];

    let mut store = GraphStore::new();
    GraphLoader::new(1000).load(&mut store, &dataset).unwrap();
    let reader = AnalyticsReader::new(Arc::new(store));

    let board = reader.leaderboard(1);
    assert_eq!(board.len(), 2);
    assert_eq!((board[0].team.as_str(), board[0].score), ("Team1", 2));
    assert_eq!((board[1].team.as_str(), board[1].score), ("Team2", 1));

    let details = reader.question_details("q1", 1).unwrap();
    assert_eq!(details.stats.total_teams, 2);
    assert_eq!(details.stats.correct_count, 2);
    assert_eq!(details.stats.accuracy_percent, 100.0);
}

// =========================================================================
// Rosters
// =========================================================================

#[test]
fn roster_is_scoped_to_the_tournament() {
    let reader = fixture();

    let names = |rows: Vec<quizdash_graph::response::RosterMember>| {
        rows.into_iter().map(|m| m.name).collect::<Vec<_>>()
    };

    // Ann played for Alpha in t1 and for Beta in t2.
    assert_eq!(names(reader.team_roster(1, 1)), vec!["Ann", "Bob"]);
    assert!(reader.team_roster(2, 1).is_empty());
    assert_eq!(names(reader.team_roster(2, 2)), vec!["Ann"]);
}

// =========================================================================
// Search
// =========================================================================

#[test]
fn search_is_case_insensitive() {
    let reader = fixture();
    let hits = reader.search_teams("ALPHA");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Alpha");
}

#[test]
fn search_is_capped_at_ten_hits() {
    let mut dataset = Dataset::default();
    for i in 1..=12 {
        dataset.nodes.teams.push(TeamNode {
            id: 100 + i,
            name: format!("Quiz Club {i}"),
            city: String::new(),
        });
    }
    let mut store = GraphStore::new();
    GraphLoader::new(1000).load(&mut store, &dataset).unwrap();
    let reader = AnalyticsReader::new(Arc::new(store));

    assert_eq!(reader.search_teams("quiz club").len(), 10);
}

// =========================================================================
// Global stats + ranking
// =========================================================================

#[test]
fn competition_ranking_shares_tied_ranks() {
    let reader = fixture();

    // Scores in tournament 1: {10, 10, 8, 5}.
    let alpha = reader.team_global_stats(1).unwrap();
    let beta = reader.team_global_stats(2).unwrap();
    let gamma = reader.team_global_stats(3).unwrap();
    let delta = reader.team_global_stats(4).unwrap();

    assert_eq!(beta.best_rank, Some(1));
    assert_eq!(gamma.best_rank, Some(3));
    assert_eq!(delta.best_rank, Some(4));

    // Alpha also played tournament 2 alone: rank 1 twice.
    assert_eq!(alpha.best_rank, Some(1));
    assert_eq!(alpha.worst_rank, Some(1));
    assert_eq!(alpha.avg_rank, Some(1.0));
}

#[test]
fn global_accuracy_uses_the_fixed_divisor() {
    let reader = fixture();
    let alpha = reader.team_global_stats(1).unwrap();

    assert_eq!(alpha.total_tournaments, 2);
    assert_eq!(alpha.total_correct, 18);
    // 18 * 100 / (2 * 36)
    assert_eq!(alpha.accuracy, 25.0);
}

#[test]
fn global_roster_is_distinct_across_tournaments() {
    let reader = fixture();
    let alpha = reader.team_global_stats(1).unwrap();
    assert_eq!(alpha.roster, vec!["Ann", "Bob", "Cal"]);
}

#[test]
fn team_without_answers_has_zero_totals_and_no_ranks() {
    let reader = fixture();
    let echo = reader.team_global_stats(5).unwrap();

    assert_eq!(echo.total_tournaments, 0);
    assert_eq!(echo.total_correct, 0);
    assert_eq!(echo.accuracy, 0.0);
    assert_eq!(echo.avg_rank, None);
    assert_eq!(echo.best_rank, None);
    assert_eq!(echo.worst_rank, None);
}

#[test]
fn unknown_team_has_no_global_stats() {
    let reader = fixture();
    assert!(reader.team_global_stats(999).is_none());
}

// =========================================================================
// Chart stats + history
// =========================================================================

#[test]
fn chart_stats_exclude_tournaments_without_attempts() {
    let reader = fixture();

    let alpha = reader.team_chart_stats(1);
    assert_eq!(alpha.len(), 2);
    assert_eq!(alpha[0].stage_number, "01");
    assert_eq!((alpha[0].correct_count, alpha[0].total_questions), (10, 10));
    assert_eq!(alpha[1].stage_number, "02");
    assert_eq!((alpha[1].correct_count, alpha[1].total_questions), (8, 10));

    // Beta only attempted tournament 1.
    let beta = reader.team_chart_stats(2);
    assert_eq!(beta.len(), 1);
    assert_eq!(beta[0].stage_title, "Tournament 1");

    // Echo attempted nothing.
    assert!(reader.team_chart_stats(5).is_empty());
}

#[test]
fn question_history_is_ordered_by_tournament_then_number() {
    let reader = fixture();
    let rows = reader.team_question_history(1);

    assert_eq!(rows.len(), 20);
    assert!(rows[..10].iter().all(|r| r.tournament == "Tournament 1"));
    assert!(rows[10..].iter().all(|r| r.tournament == "Tournament 2"));
    let numbers: Vec<i64> = rows[..10].iter().map(|r| r.number).collect();
    assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
    assert!(!rows[18].is_correct); // b9 was wrong
    assert!(rows[0].is_correct);
}
