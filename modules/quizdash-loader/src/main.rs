//! One-shot dataset loader: full reset, fixed-order ingestion, count report.
//! Exits non-zero on the first failing batch; committed chunks are not
//! rolled back.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quizdash_common::Config;
use quizdash_graph::{Dataset, GraphLoader, GraphStore};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("quizdash=info".parse()?))
        .init();

    let config = Config::from_env();

    info!(path = %config.dataset_path, "reading dataset");
    let dataset = Dataset::from_file(&config.dataset_path)?;

    let mut store = GraphStore::new();
    let wiped = store.nuke();
    info!(
        nodes_removed = wiped.nodes_removed,
        edges_removed = wiped.edges_removed,
        "store reset"
    );

    let report = GraphLoader::new(config.batch_size).load(&mut store, &dataset)?;
    info!(nodes = report.nodes, edges = report.edges, "graph built");

    Ok(())
}
