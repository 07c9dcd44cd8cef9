//! Per-user file locations and host facts used to build defaults.

use std::path::{Path, PathBuf};

/// Application directory name under the platform config and data roots.
pub const APP_NAME: &str = "tikwm";

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DATABASE_FILE_NAME: &str = "history.db";
pub const TARGETS_FILE_NAME: &str = "targets.txt";

/// Supplies default per-user file locations for an application.
///
/// Implementations only compute paths; they never create directories.
pub trait PathResolver {
    /// Location of a config file, e.g. `~/.config/<app>/<name>` on Linux.
    fn config_file(&self, app: &str, name: &str) -> Option<PathBuf>;

    /// Location of a data file, e.g. `~/.local/share/<app>/<name>` on Linux.
    fn data_file(&self, app: &str, name: &str) -> Option<PathBuf>;
}

/// Platform-standard locations via the `dirs` crate (XDG on Linux,
/// `Application Support` on macOS, `%APPDATA%` on Windows).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformPaths;

impl PathResolver for PlatformPaths {
    fn config_file(&self, app: &str, name: &str) -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(app).join(name))
    }

    fn data_file(&self, app: &str, name: &str) -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(app).join(name))
    }
}

/// Locations under fixed config and data roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootedPaths {
    pub config_root: PathBuf,
    pub data_root: PathBuf,
}

impl RootedPaths {
    /// Use `<root>/config` and `<root>/data` as the two roots.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_root: root.join("config"),
            data_root: root.join("data"),
        }
    }
}

impl PathResolver for RootedPaths {
    fn config_file(&self, app: &str, name: &str) -> Option<PathBuf> {
        Some(self.config_root.join(app).join(name))
    }

    fn data_file(&self, app: &str, name: &str) -> Option<PathBuf> {
        Some(self.data_root.join(app).join(name))
    }
}

/// Host facts that feed into defaults. Detected once and passed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostDefaults {
    /// Number of logical CPUs available to this process.
    pub cpu_count: usize,
}

impl HostDefaults {
    pub fn detect() -> Self {
        let cpu_count =
            std::thread::available_parallelism().map_or(1_usize, std::num::NonZeroUsize::get);
        Self { cpu_count }
    }
}

/// Render a path for a config value, always with forward slashes.
pub fn to_config_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
