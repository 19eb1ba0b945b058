// ./cli/src/main.rs
mod config;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use application::{ApplicationError, DocumentStore};
use domain::{Document, SearchRequest};
use infrastructure::{InMemoryDocumentRepository, UuidIdGenerator};

use crate::config::Config;

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

fn main() {
    // --- Logger Initialization ---
    // Logs go to stderr so stdout only carries the JSON result.
    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    info!("Logger initialized successfully.");

    let config = Config::from_env();

    // --- Dependency Injection ---
    let document_repository = Arc::new(InMemoryDocumentRepository::new());
    let id_generator = Arc::new(UuidIdGenerator::new());
    let store = DocumentStore::new(document_repository, id_generator);
    info!("In-memory document store initialized.");

    match run(&store, &config) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}

/// Seeds the store, then runs the configured lookup or search and renders it as JSON.
fn run(store: &DocumentStore, config: &Config) -> Result<String, CliError> {
    if let Some(path) = &config.seed_file {
        let documents: Vec<Document> = read_json(path)?;
        for document in documents {
            store.save(document)?;
        }
        info!(count = store.len()?, "Seed documents loaded.");
    }

    let output = match &config.find_id {
        Some(id) => serde_json::to_string_pretty(&store.find_by_id(id.as_str())?)?,
        None => {
            let request: Option<SearchRequest> = match &config.query_file {
                Some(path) => Some(read_json(path)?),
                None => None,
            };
            serde_json::to_string_pretty(&store.search(request.as_ref())?)?
        }
    };
    Ok(output)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}
