use clap::Subcommand;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Inspect or scaffold the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the config file location.
    Path,
    /// Print the effective configuration.
    Show,
    /// Create the config and targets files if they are missing.
    Init,
}
