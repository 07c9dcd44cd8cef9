//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A platform-standard per-user location could not be determined.
    #[error("Could not determine default {what} path")]
    PathResolution { what: &'static str },

    /// A directory or a scaffolded file could not be created.
    #[error("Failed to create {}: {source}", .path.display())]
    FileCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not well-formed YAML.
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    /// A value in the config file does not fit its field type.
    #[error("Invalid value in config file {}: {source}", .path.display())]
    Merge {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    /// A duration-valued field could not be parsed.
    #[error("Invalid duration for '{field}': {source}")]
    InvalidDuration {
        field: &'static str,
        #[source]
        source: tikwm_core::DurationError,
    },
}
