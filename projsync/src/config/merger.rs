//! Configuration merging and precedence handling.
//!
//! Simple fields are overwritten by higher-precedence sources. `exclude` is
//! accumulated so a private file can only narrow what is synchronized, never
//! re-admit something the shared project file excludes.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, WalkConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use projsync::config::{Config, ConfigMerger};
///
/// let low = Config { enabled: Some(true), ..Default::default() };
/// let high = Config { enabled: Some(false), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.enabled, Some(false));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources ordered from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - `enabled`: source overwrites if set
    /// - `include`: source replaces the whole list if set
    /// - `exclude`: accumulated (union, first occurrence order kept)
    /// - `walk`: field-by-field
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.enabled.is_some() {
            target.enabled = source.enabled;
        }

        if source.include.is_some() {
            target.include.clone_from(&source.include);
        }

        if let Some(ref patterns) = source.exclude {
            let existing = target.exclude.get_or_insert_with(Vec::new);
            for pattern in patterns {
                if !existing.contains(pattern) {
                    existing.push(pattern.clone());
                }
            }
        }

        if let Some(ref walk) = source.walk {
            Self::merge_walk(target.walk.get_or_insert_with(WalkConfig::default), walk);
        }
    }

    fn merge_walk(target: &mut WalkConfig, source: &WalkConfig) {
        if source.follow_symlinks.is_some() {
            target.follow_symlinks = source.follow_symlinks;
        }
        if source.skip_hidden.is_some() {
            target.skip_hidden = source.skip_hidden;
        }
    }
}
