use std::path::{Path, PathBuf};

use figment::{
    Figment, Profile, Provider,
    providers::{Format, Serialized, Yaml},
    value::Value,
};

use crate::normalize::normalize;
use crate::paths::{APP_NAME, CONFIG_FILE_NAME, HostDefaults, PathResolver, PlatformPaths};
use crate::{CliConfig, ConfigError, scaffold};

/// Load the CLI configuration using platform paths.
///
/// `path` overrides the config file location; `None` or an empty path uses
/// the platform default.
pub fn load(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    ConfigLoader::platform().load(path)
}

/// Resolves, scaffolds and reads the config file.
#[derive(Debug, Clone)]
pub struct ConfigLoader<R = PlatformPaths> {
    resolver: R,
    host: HostDefaults,
}

impl ConfigLoader<PlatformPaths> {
    /// Loader backed by platform-standard paths and the detected host.
    pub fn platform() -> Self {
        Self::new(PlatformPaths, HostDefaults::detect())
    }
}

impl<R: PathResolver> ConfigLoader<R> {
    pub const fn new(resolver: R, host: HostDefaults) -> Self {
        Self { resolver, host }
    }

    /// Built-in defaults for this loader's paths and host.
    pub fn defaults(&self) -> Result<CliConfig, ConfigError> {
        CliConfig::defaults_with(&self.resolver, &self.host)
    }

    /// The config file location `load` would use for `path`.
    pub fn config_path(&self, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match path.filter(|path| !path.as_os_str().is_empty()) {
            Some(path) => Ok(path.to_path_buf()),
            None => self
                .resolver
                .config_file(APP_NAME, CONFIG_FILE_NAME)
                .ok_or(ConfigError::PathResolution {
                    what: "config file",
                }),
        }
    }

    /// Load the configuration, writing the default config file and targets
    /// file first if they do not exist.
    ///
    /// Values in the file override defaults; missing or null keys keep their
    /// default and unknown keys are ignored. Failing to scaffold the targets
    /// file does not fail the load: it is emitted as a `tracing` warning,
    /// which only reaches stderr when a subscriber is installed. Use
    /// [`ConfigLoader::load_with_warnings`] to handle it directly.
    pub fn load(&self, path: Option<&Path>) -> Result<CliConfig, ConfigError> {
        self.load_with_warnings(path).map(|(config, _)| config)
    }

    /// Like [`ConfigLoader::load`], also returning the non-fatal errors that
    /// were logged along the way.
    pub fn load_with_warnings(
        &self,
        path: Option<&Path>,
    ) -> Result<(CliConfig, Vec<ConfigError>), ConfigError> {
        let defaults = self.defaults()?;
        let config_path = self.config_path(path)?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "writing default config file");
            scaffold::write_config_file(&config_path, &defaults)?;
        }

        let mut config = Self::read(&config_path, &defaults)?;

        // An explicitly blanked targets_file falls back to the default location.
        if config.targets_file.is_empty() {
            config.targets_file.clone_from(&defaults.targets_file);
        }

        let mut warnings = Vec::new();
        let targets_path = Path::new(&config.targets_file);
        if !targets_path.exists() {
            tracing::debug!(path = %targets_path.display(), "writing default targets file");
            if let Err(error) = scaffold::write_targets_file(targets_path) {
                tracing::warn!(%error, "failed to create default targets file");
                warnings.push(error);
            }
        }

        Ok((config, warnings))
    }

    fn read(path: &Path, defaults: &CliConfig) -> Result<CliConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let merge_error = |source| ConfigError::Merge {
            path: path.to_path_buf(),
            source: Box::new(source),
        };

        let mut figment = Figment::from(Serialized::defaults(defaults));
        if has_yaml_content(&content) {
            let mut data = Yaml::string(&content)
                .data()
                .map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: Box::new(source),
                })?;
            let parsed = data.remove(&Profile::Default).unwrap_or_default();
            let expected = Value::serialize(defaults)
                .map_err(merge_error)?
                .into_dict()
                .unwrap_or_default();
            figment = figment.merge(Serialized::defaults(normalize(parsed, &expected)));
        }

        figment.extract().map_err(merge_error)
    }
}

/// A file with only blank lines and comments means "all defaults".
fn has_yaml_content(content: &str) -> bool {
    content.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#') && line != "---"
    })
}
