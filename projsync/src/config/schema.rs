//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered; the
//! accessor methods supply the defaults.

use serde::{Deserialize, Serialize};

use crate::operations::WalkOptions;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use projsync::config::Config;
///
/// let config: Config = serde_yaml::from_str(
///     "enabled: true\ninclude: ['Sources/**']\nexclude: ['**/.build/**']\n",
/// ).unwrap();
/// assert!(config.is_enabled());
/// assert_eq!(config.include_patterns(), ["Sources/**"]);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Master switch for automatic manifest updates.
    pub enabled: Option<bool>,

    /// Allow-list of root-relative glob patterns. Empty or absent means
    /// every path under the project root is eligible.
    pub include: Option<Vec<String>>,

    /// Deny-list of root-relative glob patterns, accumulated across sources.
    pub exclude: Option<Vec<String>>,

    /// Recursive walk settings.
    pub walk: Option<WalkConfig>,
}

impl Config {
    /// Whether automatic updates are enabled (default `true`).
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// The include patterns, or an empty slice.
    #[must_use]
    pub fn include_patterns(&self) -> &[String] {
        self.include.as_deref().unwrap_or_default()
    }

    /// The exclude patterns, or an empty slice.
    #[must_use]
    pub fn exclude_patterns(&self) -> &[String] {
        self.exclude.as_deref().unwrap_or_default()
    }

    /// Resolves the walk settings with defaults applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::config::{Config, WalkConfig};
    ///
    /// let config = Config {
    ///     walk: Some(WalkConfig { follow_symlinks: None, skip_hidden: Some(true) }),
    ///     ..Default::default()
    /// };
    /// let options = config.walk_options();
    /// assert!(options.skip_hidden);
    /// assert!(!options.follow_symlinks);
    /// ```
    #[must_use]
    pub fn walk_options(&self) -> WalkOptions {
        let defaults = WalkOptions::default();
        let Some(walk) = &self.walk else {
            return defaults;
        };
        WalkOptions {
            follow_symlinks: walk.follow_symlinks.unwrap_or(defaults.follow_symlinks),
            skip_hidden: walk.skip_hidden.unwrap_or(defaults.skip_hidden),
        }
    }
}

/// Recursive walk configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WalkConfig {
    /// Follow symbolic links while walking a copied directory.
    pub follow_symlinks: Option<bool>,

    /// Prune dot-prefixed files and directories from the walk.
    pub skip_hidden: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.is_enabled());
        assert!(config.include_patterns().is_empty());
        assert!(config.exclude_patterns().is_empty());
        assert_eq!(config.walk_options(), WalkOptions::default());
    }

    #[test]
    fn test_deserialize_full() {
        let yaml = r"
enabled: false
include:
  - 'Sources/**'
exclude:
  - '**/.build/**'
walk:
  follow_symlinks: true
  skip_hidden: true
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.is_enabled());
        assert_eq!(config.exclude_patterns(), ["**/.build/**"]);
        let walk = config.walk_options();
        assert!(walk.follow_symlinks);
        assert!(walk.skip_hidden);
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<Config, _> = serde_yaml::from_str("enable: true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let config = Config {
            enabled: Some(true),
            include: Some(vec!["src/**".to_string()]),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
