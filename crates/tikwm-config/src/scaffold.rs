//! First-run file scaffolding.
//!
//! Both files are written only when absent: directories are created owner-only
//! (0700) and files owner read/write (0600) on Unix. Existing files are never
//! overwritten, even if another process created one in the meantime.

use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::Path;

use crate::CliConfig;
use crate::error::ConfigError;

/// Contents of a freshly scaffolded targets file.
pub const TARGETS_TEMPLATE: &str = "\
# Add TikTok usernames or video URLs here, one per line.
# Lines starting with # are ignored.
#
# Example:
# losertron
# @tiktok
# https://www.tiktok.com/@creator/video/12345
";

/// Render the commented default config file for `config`.
pub fn render_config(config: &CliConfig) -> String {
    let core = &config.core;
    format!(
        r#"# tikwm CLI configuration file.
# Path where videos and images will be downloaded.
download_path: {download_path}
# Path to a file containing a list of targets (usernames or URLs), one per line.
# This file is used if no targets are provided on the command line.
targets_file: {targets_file}
# Path to the SQLite database to track downloaded posts.
database_path: {database_path}
# Maximum number of concurrent workers for processing targets.
# API calls are still sequential (1/sec), but downloads can be parallel.
# Defaults to the number of CPU cores.
max_workers: {max_workers}
# Quality to download videos in. Options: "source", "hd", "sd", "all".
quality: {quality}
# Default date to download content since (YYYY-MM-DD HH:MM:SS).
since: {since}
# Set to true to download video cover images along with the video.
download_covers: {download_covers}
# Type of cover to download. Options:
# "cover" or "medium": The standard, medium-quality cover.
# "origin" or "small": A slightly smaller, lower-quality cover.
# "dynamic": An animated dynamic cover.
cover_type: {cover_type}
# Set to true to download user profile avatars.
download_avatars: {download_avatars}
# Set to true to save the post title to a .txt file.
save_post_title: {save_post_title}
# When rate-limited (429) on an HD link, retry with backoff or fall back to SD?
# Set to true to retry with backoff, false to fall back to SD.
retry_on_429: {retry_on_429}
# Path to the ffmpeg executable. Used to validate downloaded videos.
ffmpeg_path: {ffmpeg_path}

# Network
# Specify the local IP address or network interface name for outbound connections.
# Leave blank to let the OS decide. Examples: "192.168.1.100", "eth0"
bind_address: {bind_address}

# Caching
# Enable caching of user feeds to speed up repeated runs.
feed_cache: {feed_cache}
# How long to keep feed cache before it's considered stale (e.g., "1h", "30m", "2h15m").
feed_cache_ttl: {feed_cache_ttl}

# Daemon Mode (for use with targets file)
# When enabled, the app will run continuously and poll for new content at a reduced rate after a full pass.
daemon_mode: {daemon_mode}
# The interval to wait between checks when in low-frequency daemon poll state.
daemon_poll_interval: {daemon_poll_interval}

# Other
# Editor to use for the 'edit' command. If empty, it will check $EDITOR, then common editors.
editor: {editor}
# Check for new versions of tikwm on startup.
check_for_updates: {check_for_updates}
# Automatically install new versions of tikwm. If false, you will be notified to run 'tikwm update'.
auto_update: {auto_update}
"#,
        download_path = quote_path(&core.download_path),
        targets_file = quote_path(&config.targets_file),
        database_path = quote_path(&config.database_path),
        max_workers = config.max_workers,
        quality = quote(&core.quality),
        since = quote(&core.since),
        download_covers = core.download_covers,
        cover_type = quote(&core.cover_type),
        download_avatars = core.download_avatars,
        save_post_title = core.save_post_title,
        retry_on_429 = core.retry_on_429,
        ffmpeg_path = quote_path(&core.ffmpeg_path),
        bind_address = quote(&core.bind_address),
        feed_cache = core.feed_cache,
        feed_cache_ttl = quote(&core.feed_cache_ttl),
        daemon_mode = config.daemon_mode,
        daemon_poll_interval = quote(&config.daemon_poll_interval),
        editor = quote(&config.editor),
        check_for_updates = config.check_for_updates,
        auto_update = config.auto_update,
    )
}

/// Write the default config file at `path`, creating parent directories.
pub fn write_config_file(path: &Path, config: &CliConfig) -> Result<(), ConfigError> {
    create_private_parent(path)?;
    write_private_file(path, &render_config(config))
}

/// Write the example targets file at `path`, creating parent directories.
pub fn write_targets_file(path: &Path) -> Result<(), ConfigError> {
    create_private_parent(path)?;
    write_private_file(path, TARGETS_TEMPLATE)
}

fn create_private_parent(path: &Path) -> Result<(), ConfigError> {
    let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return Ok(());
    };

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(dir)
        .map_err(|source| ConfigError::FileCreation {
            path: dir.to_path_buf(),
            source,
        })
}

fn write_private_file(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let creation_error = |source| ConfigError::FileCreation {
        path: path.to_path_buf(),
        source,
    };
    let mut file = options.open(path).map_err(creation_error)?;
    file.write_all(contents.as_bytes()).map_err(creation_error)?;
    file.sync_all().map_err(creation_error)
}

fn quote_path(value: &str) -> String {
    quote(&value.replace('\\', "/"))
}

/// Emit `value` as a YAML double-quoted scalar.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn quote_escapes_yaml_specials() {
        assert_eq!(quote(""), r#""""#);
        assert_eq!(quote("plain"), r#""plain""#);
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote("a\tb\nc"), r#""a\tb\nc""#);
        assert_eq!(quote("\u{1}"), r#""\u0001""#);
    }

    #[test]
    fn quote_path_normalizes_separators() {
        assert_eq!(
            quote_path(r"C:\Users\me\Videos"),
            r#""C:/Users/me/Videos""#
        );
    }

    #[test]
    fn targets_template_is_all_comments() {
        assert!(TARGETS_TEMPLATE.lines().all(|line| line.starts_with('#')));
    }
}
