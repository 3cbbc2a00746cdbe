//! Errors surfaced by the command line.

use std::path::PathBuf;

use rosterforge::RosterError;
use rosterforge_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported problem file '{0}', expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),

    #[error("granularity must be a positive number of minutes, got {0}")]
    Granularity(i64),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}
