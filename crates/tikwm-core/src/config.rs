//! Core download settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::duration::{DurationError, parse_duration};

/// Default download directory, relative to the working directory.
fn default_download_path() -> String {
    String::from("downloads")
}

/// Default video quality.
fn default_quality() -> String {
    String::from("source")
}

/// Default lower bound for post dates (`YYYY-MM-DD HH:MM:SS`).
fn default_since() -> String {
    String::from("1970-01-01 00:00:00")
}

fn default_cover_type() -> String {
    String::from("cover")
}

fn default_ffmpeg_path() -> String {
    String::from("ffmpeg")
}

const fn default_feed_cache() -> bool {
    true
}

fn default_feed_cache_ttl() -> String {
    String::from("1h")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CoreConfig {
    /// Directory where videos and images are downloaded.
    #[serde(default = "default_download_path")]
    pub download_path: String,

    /// Video quality: `source`, `hd`, `sd` or `all`.
    #[serde(default = "default_quality")]
    pub quality: String,

    /// Only fetch posts published after this timestamp.
    #[serde(default = "default_since")]
    pub since: String,

    /// Download cover images alongside videos.
    #[serde(default)]
    pub download_covers: bool,

    /// Cover variant: `cover`/`medium`, `origin`/`small` or `dynamic`.
    #[serde(default = "default_cover_type")]
    pub cover_type: String,

    /// Download profile avatars.
    #[serde(default)]
    pub download_avatars: bool,

    /// Save the post title to a sidecar `.txt` file.
    #[serde(default)]
    pub save_post_title: bool,

    /// On HTTP 429 for an HD link, retry with backoff instead of falling back to SD.
    #[serde(default)]
    pub retry_on_429: bool,

    /// ffmpeg executable used to validate downloads.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Local IP address or interface name for outbound connections. Empty lets the OS decide.
    #[serde(default)]
    pub bind_address: String,

    /// Cache user feeds between runs.
    #[serde(default = "default_feed_cache")]
    pub feed_cache: bool,

    /// Age after which a cached feed is stale (e.g. `"1h"`, `"30m"`).
    #[serde(default = "default_feed_cache_ttl")]
    pub feed_cache_ttl: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            download_path: default_download_path(),
            quality: default_quality(),
            since: default_since(),
            download_covers: false,
            cover_type: default_cover_type(),
            download_avatars: false,
            save_post_title: false,
            retry_on_429: false,
            ffmpeg_path: default_ffmpeg_path(),
            bind_address: String::new(),
            feed_cache: default_feed_cache(),
            feed_cache_ttl: default_feed_cache_ttl(),
        }
    }
}

impl CoreConfig {
    /// Parse `feed_cache_ttl` into a [`Duration`].
    pub fn feed_cache_ttl(&self) -> Result<Duration, DurationError> {
        parse_duration(&self.feed_cache_ttl)
    }

    /// Whether outbound connections are pinned to an address or interface.
    pub fn has_bind_address(&self) -> bool {
        !self.bind_address.trim().is_empty()
    }
}
