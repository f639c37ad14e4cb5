use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quizdash_common::Config;
use quizdash_graph::{AnalyticsReader, Dataset, GraphLoader, GraphStore};

mod rest;

pub struct AppState {
    pub reader: AnalyticsReader,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("quizdash=info".parse()?))
        .init();

    let config = Config::from_env();

    // The graph is built once at startup and never mutated while serving.
    // If the dataset cannot be loaded the service still starts and answers
    // every query with empty results instead of crashing.
    let mut store = GraphStore::new();
    match Dataset::from_file(&config.dataset_path) {
        Ok(dataset) => {
            match GraphLoader::new(config.batch_size).load(&mut store, &dataset) {
                Ok(report) => {
                    info!(nodes = report.nodes, edges = report.edges, "dataset loaded")
                }
                Err(e) => warn!(error = %e, "dataset load failed, serving partial graph"),
            }
        }
        Err(e) => warn!(error = %e, "dataset unavailable, serving empty graph"),
    }

    let state = Arc::new(AppState {
        reader: AnalyticsReader::new(Arc::new(store)),
    });

    let app = Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // REST API
        .route("/tournaments", get(rest::api_tournaments))
        .route("/tournament/{t_id}/questions", get(rest::api_tournament_questions))
        .route("/tournament/{t_id}/leaderboard", get(rest::api_leaderboard))
        .route("/question/{q_uid}", get(rest::api_question_details))
        .route("/team_stats/{team_id}/{t_id}", get(rest::api_team_stats))
        .route("/team/{team_id}/roster/{t_id}", get(rest::api_team_roster))
        .route("/search_teams", get(rest::api_search_teams))
        .route("/team_global_stats/{team_id}", get(rest::api_team_global_stats))
        .route("/team_questions_history/{team_id}", get(rest::api_team_question_history))
        .route("/team_chart_stats/{team_id}", get(rest::api_team_chart_stats))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path + status + latency only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("quizdash API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
