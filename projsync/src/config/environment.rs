//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PROJSYNC_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;

/// Handles environment variable overrides for configuration.
///
/// | Variable | Effect |
/// |---|---|
/// | `PROJSYNC_ENABLED` | sets `enabled` |
/// | `PROJSYNC_INCLUDE` | replaces `include` (comma separated) |
/// | `PROJSYNC_EXCLUDE` | extends `exclude` (comma separated) |
/// | `PROJSYNC_FOLLOW_SYMLINKS` | sets `walk.follow_symlinks` |
/// | `PROJSYNC_SKIP_HIDDEN` | sets `walk.skip_hidden` |
///
/// # Examples
///
/// ```no_run
/// use projsync::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean variable holds an unrecognized value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("PROJSYNC_ENABLED") {
            config.enabled = Some(Self::parse_bool("PROJSYNC_ENABLED", &val)?);
        }

        if let Ok(val) = env::var("PROJSYNC_INCLUDE") {
            config.include = Some(Self::parse_list(&val));
        }

        if let Ok(val) = env::var("PROJSYNC_EXCLUDE") {
            let patterns = Self::parse_list(&val);
            match &mut config.exclude {
                Some(existing) => existing.extend(patterns),
                None => config.exclude = Some(patterns),
            }
        }

        if let Ok(val) = env::var("PROJSYNC_FOLLOW_SYMLINKS") {
            let walk = config.walk.get_or_insert_with(Default::default);
            walk.follow_symlinks = Some(Self::parse_bool("PROJSYNC_FOLLOW_SYMLINKS", &val)?);
        }

        if let Ok(val) = env::var("PROJSYNC_SKIP_HIDDEN") {
            let walk = config.walk.get_or_insert_with(Default::default);
            walk.skip_hidden = Some(Self::parse_bool("PROJSYNC_SKIP_HIDDEN", &val)?);
        }

        Ok(())
    }

    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}
