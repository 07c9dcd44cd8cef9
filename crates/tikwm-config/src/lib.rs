//! # tikwm-config
//!
//! CLI configuration for tikwm: defaults, YAML loading via figment, and
//! first-run scaffolding of the config file and the targets list.
//!
//! The CLI settings embed [`CoreConfig`] and share one flat key namespace with
//! it, so `download_path` and `targets_file` sit side by side in the file.
//!
//! Load order for a single [`ConfigLoader::load`] call:
//! 1. Built-in defaults (platform paths, CPU count)
//! 2. The YAML config file, written from the defaults if it does not exist yet
//!
//! # Usage
//!
//! ```no_run
//! let config = tikwm_config::load(None).expect("config");
//! println!("targets: {}", config.targets_file);
//! ```

mod error;
mod loader;
mod normalize;
pub mod paths;
pub mod scaffold;

pub use error::ConfigError;
pub use loader::{ConfigLoader, load};
pub use paths::{HostDefaults, PathResolver, PlatformPaths, RootedPaths};
pub use tikwm_core::CoreConfig;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::paths::{APP_NAME, DATABASE_FILE_NAME, TARGETS_FILE_NAME, to_config_string};

/// Default polling interval once daemon mode has finished a full pass.
pub const DEFAULT_DAEMON_POLL_INTERVAL: &str = "60s";

/// CLI settings layered over [`CoreConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(flatten)]
    pub core: CoreConfig,

    /// Targets list used when none are given on the command line. Never empty after loading.
    pub targets_file: String,

    /// SQLite database that tracks downloaded posts.
    pub database_path: String,

    /// Editor for `tikwm edit`. Empty means detect at use time.
    pub editor: String,

    pub check_for_updates: bool,

    pub auto_update: bool,

    /// Maximum number of targets processed concurrently.
    pub max_workers: usize,

    pub daemon_mode: bool,

    /// Wait between low-frequency polls in daemon mode (e.g. `"60s"`).
    pub daemon_poll_interval: String,
}

impl CliConfig {
    /// Defaults using platform paths and the detected host.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::defaults_with(&PlatformPaths, &HostDefaults::detect())
    }

    /// Defaults using the given path resolver and host facts.
    ///
    /// Fails only when the history database or targets file location cannot
    /// be determined.
    pub fn defaults_with<R>(resolver: &R, host: &HostDefaults) -> Result<Self, ConfigError>
    where
        R: PathResolver + ?Sized,
    {
        let database_path = resolver
            .data_file(APP_NAME, DATABASE_FILE_NAME)
            .ok_or(ConfigError::PathResolution { what: "database" })?;
        let targets_file = resolver
            .data_file(APP_NAME, TARGETS_FILE_NAME)
            .ok_or(ConfigError::PathResolution {
                what: "targets file",
            })?;

        Ok(Self {
            core: CoreConfig::default(),
            targets_file: to_config_string(&targets_file),
            database_path: to_config_string(&database_path),
            editor: String::new(),
            check_for_updates: true,
            auto_update: false,
            max_workers: host.cpu_count.max(1),
            daemon_mode: false,
            daemon_poll_interval: String::from(DEFAULT_DAEMON_POLL_INTERVAL),
        })
    }

    /// Parse `daemon_poll_interval` into a [`Duration`].
    pub fn daemon_poll_interval(&self) -> Result<Duration, ConfigError> {
        tikwm_core::parse_duration(&self.daemon_poll_interval).map_err(|source| {
            ConfigError::InvalidDuration {
                field: "daemon_poll_interval",
                source,
            }
        })
    }

    /// Parse the core `feed_cache_ttl` into a [`Duration`].
    pub fn feed_cache_ttl(&self) -> Result<Duration, ConfigError> {
        self.core
            .feed_cache_ttl()
            .map_err(|source| ConfigError::InvalidDuration {
                field: "feed_cache_ttl",
                source,
            })
    }

    /// Whether an editor was configured explicitly.
    pub fn has_editor(&self) -> bool {
        !self.editor.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct NoDataDir;

    impl PathResolver for NoDataDir {
        fn config_file(&self, app: &str, name: &str) -> Option<std::path::PathBuf> {
            Some(std::path::PathBuf::from(app).join(name))
        }

        fn data_file(&self, _app: &str, _name: &str) -> Option<std::path::PathBuf> {
            None
        }
    }

    fn host() -> HostDefaults {
        HostDefaults { cpu_count: 6 }
    }

    #[test]
    fn defaults_are_correct() {
        let root = tempfile::tempdir().expect("tmp dir");
        let config = CliConfig::defaults_with(&RootedPaths::new(root.path()), &host())
            .expect("defaults");

        assert_eq!(config.max_workers, 6);
        assert!(!config.daemon_mode);
        assert_eq!(config.daemon_poll_interval, "60s");
        assert!(config.check_for_updates);
        assert!(!config.auto_update);
        assert!(config.editor.is_empty());
        assert!(!config.has_editor());
        assert!(config.targets_file.ends_with("tikwm/targets.txt"));
        assert!(config.database_path.ends_with("tikwm/history.db"));
        assert_eq!(config.core, CoreConfig::default());
    }

    #[test]
    fn defaults_do_not_touch_the_filesystem() {
        let root = tempfile::tempdir().expect("tmp dir");
        CliConfig::defaults_with(&RootedPaths::new(root.path()), &host()).expect("defaults");
        assert!(!root.path().join("data").exists());
        assert!(!root.path().join("config").exists());
    }

    #[test]
    fn missing_data_dir_is_a_path_resolution_error() {
        let err = CliConfig::defaults_with(&NoDataDir, &host()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PathResolution { what: "database" }
        ));
    }

    #[test]
    fn zero_cpu_count_still_yields_one_worker() {
        let root = tempfile::tempdir().expect("tmp dir");
        let config =
            CliConfig::defaults_with(&RootedPaths::new(root.path()), &HostDefaults { cpu_count: 0 })
                .expect("defaults");
        assert_eq!(config.max_workers, 1);
    }

    #[test]
    fn duration_accessors() {
        let root = tempfile::tempdir().expect("tmp dir");
        let mut config =
            CliConfig::defaults_with(&RootedPaths::new(root.path()), &host()).expect("defaults");
        assert_eq!(
            config.daemon_poll_interval().expect("interval"),
            Duration::from_secs(60)
        );
        assert_eq!(
            config.feed_cache_ttl().expect("ttl"),
            Duration::from_secs(3600)
        );

        config.daemon_poll_interval = "every minute".into();
        assert!(matches!(
            config.daemon_poll_interval(),
            Err(ConfigError::InvalidDuration {
                field: "daemon_poll_interval",
                ..
            })
        ));
    }

    #[test]
    fn serializes_as_one_flat_namespace() {
        let root = tempfile::tempdir().expect("tmp dir");
        let config =
            CliConfig::defaults_with(&RootedPaths::new(root.path()), &host()).expect("defaults");
        let value = figment::value::Value::serialize(&config).expect("serialize");
        let dict = value.into_dict().expect("dict");
        assert!(dict.contains_key("download_path"));
        assert!(dict.contains_key("targets_file"));
        assert!(!dict.contains_key("core"));
    }
}
