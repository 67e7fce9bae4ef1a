//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use projsync::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
///
/// let bad = Config { include: Some(vec!["/abs/**".into()]), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty, absolute, or malformed glob
    /// patterns.
    pub fn validate(config: &Config) -> Result<()> {
        for pattern in config.include_patterns() {
            Self::validate_pattern("include", pattern)?;
        }
        for pattern in config.exclude_patterns() {
            Self::validate_pattern("exclude", pattern)?;
        }
        Ok(())
    }

    /// Validate a single root-relative glob pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is blank, absolute, or does not
    /// compile.
    pub fn validate_pattern(field: &str, pattern: &str) -> Result<()> {
        if pattern.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Patterns cannot be empty".into(),
            });
        }

        if pattern.starts_with('/') || pattern.starts_with('\\') {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Pattern '{pattern}' must be relative to the project root"),
            });
        }

        glob::Pattern::new(pattern).map_err(|e| Error::Validation {
            field: field.into(),
            message: format!("Invalid pattern '{pattern}': {e}"),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_patterns() {
        for pattern in ["*.swift", "Sources/**", "**/.build/**", "[ab]/*.h"] {
            assert!(ConfigValidator::validate_pattern("include", pattern).is_ok());
        }
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = ConfigValidator::validate_pattern("include", "  ").unwrap_err();
        assert!(err.to_string().contains("include"));
    }

    #[test]
    fn test_absolute_pattern_rejected() {
        assert!(ConfigValidator::validate_pattern("exclude", "/tmp/**").is_err());
    }

    #[test]
    fn test_malformed_pattern_rejected() {
        let config = Config {
            exclude: Some(vec!["a/***".into()]),
            ..Default::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid pattern"));
    }
}
