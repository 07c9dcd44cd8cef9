//! # tikwm-core
//!
//! Core types shared across tikwm crates:
//! - [`CoreConfig`], the download/caching settings every front end embeds
//! - Duration string parsing (`"60s"`, `"1h"`, `"2h15m"`) for interval fields

pub mod config;
pub mod duration;

pub use config::CoreConfig;
pub use duration::{DurationError, parse_duration};
