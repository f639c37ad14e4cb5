use std::env;

use crate::types::DEFAULT_BATCH_SIZE;

/// Application configuration loaded from environment variables.
/// Every variable has a documented default so deployments can override
/// without code changes.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the dataset document. `DATASET_PATH`, default `graph_data.json`.
    pub dataset_path: String,

    /// Ingestion chunk size. `LOAD_BATCH_SIZE`, default 1000.
    pub batch_size: usize,

    // Web server
    /// `WEB_HOST`, default `0.0.0.0`.
    pub web_host: String,
    /// `WEB_PORT`, default 8000.
    pub web_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            dataset_path: env::var("DATASET_PATH")
                .unwrap_or_else(|_| "graph_data.json".to_string()),
            batch_size: env::var("LOAD_BATCH_SIZE")
                .unwrap_or_else(|_| DEFAULT_BATCH_SIZE.to_string())
                .parse()
                .expect("LOAD_BATCH_SIZE must be a number"),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
        }
    }
}
