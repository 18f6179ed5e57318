//! Runtime configuration.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `POS_CACHE_DIR` | unset | directory of the file cart cache; unset keeps carts in memory |
//! | `POS_TABLE_COUNT` | 12 | dining tables seeded at startup |
//! | `POS_CHANNEL_BUFFER` | 32 | mailbox capacity of each resource actor |
//! | `POS_LOG_FILTER` | info | log filter used when `RUST_LOG` is unset |
//!
//! ```ignore
//! POS_CACHE_DIR=/var/lib/pos/carts POS_TABLE_COUNT=20 cargo run
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosConfig {
    pub cache_dir: Option<PathBuf>,
    pub table_count: u32,
    pub channel_buffer: usize,
    pub log_filter: String,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            table_count: 12,
            channel_buffer: 32,
            log_filter: "info".into(),
        }
    }
}

impl PosConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let channel_buffer = parsed(&lookup, "POS_CHANNEL_BUFFER")?.unwrap_or(defaults.channel_buffer);
        if channel_buffer == 0 {
            return Err(ConfigError::Invalid {
                var: "POS_CHANNEL_BUFFER",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(Self {
            cache_dir: lookup("POS_CACHE_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            table_count: parsed(&lookup, "POS_TABLE_COUNT")?.unwrap_or(defaults.table_count),
            channel_buffer,
            log_filter: lookup("POS_LOG_FILTER").unwrap_or(defaults.log_filter),
        })
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            }),
    }
}
