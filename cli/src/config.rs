use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

pub const SEED_FILE_VAR: &str = "DOCSTORE_SEED_FILE";
pub const QUERY_FILE_VAR: &str = "DOCSTORE_QUERY_FILE";
pub const FIND_ID_VAR: &str = "DOCSTORE_FIND_ID";

/// What the binary should do, resolved from the environment once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// JSON array of documents saved in order before anything else runs.
    pub seed_file: Option<PathBuf>,
    /// JSON search request. Absent means "return every document".
    pub query_file: Option<PathBuf>,
    /// When set, a lookup by id replaces the search.
    pub find_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            seed_file: read_var(&lookup, SEED_FILE_VAR).map(PathBuf::from),
            query_file: read_var(&lookup, QUERY_FILE_VAR).map(PathBuf::from),
            find_id: read_var(&lookup, FIND_ID_VAR),
        }
    }
}

fn read_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    match lookup(key) {
        Some(value) if value.trim().is_empty() => {
            warn!("Environment variable {} is set but empty. Ignoring it.", key);
            None
        }
        Some(value) => {
            info!("Using {}={} from environment.", key, value);
            Some(value)
        }
        None => None,
    }
}
