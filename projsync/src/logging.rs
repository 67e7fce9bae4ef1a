//! Logging and user-facing notices.
//!
//! Internal diagnostics go through the `log` facade so the embedding host
//! picks the backend. Failures the user must see (a manifest call that was
//! rejected, a directory that could not be walked) are delivered as
//! [`Notice`]s to a [`Notifier`]. [`Logger`] is the default notifier and
//! writes to stderr, filtered by [`LogLevel`].

use std::env;
use std::fmt;

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use projsync::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all non-essential output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, and informational notices.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoticeLevel {
    /// Progress information, shown only in verbose mode.
    Info,
    /// Something was skipped but the manifest is still consistent.
    Warning,
    /// The manifest may now diverge from the file tree.
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A message that must reach the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity of the notice.
    pub level: NoticeLevel,
    /// Human-readable text.
    pub message: String,
}

impl Notice {
    /// Creates an informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Creates a warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// Receives notices the user has to see.
///
/// Hosts typically implement this with their notification area; the
/// synchronizer falls back to [`Logger`].
pub trait Notifier: Send + Sync {
    /// Delivers a notice. Must not block.
    fn notify(&self, notice: &Notice);
}

/// A simple stderr-based logger.
///
/// The logger respects the configured log level and only outputs messages
/// at or above that level.
///
/// # Examples
///
/// ```
/// use projsync::{Logger, LogLevel};
///
/// let logger = Logger::new(LogLevel::Normal);
/// logger.error("This is an error message");
/// logger.info("This will not be printed (requires Verbose)");
/// ```
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns whether a notice of the given severity would be printed.
    #[must_use]
    pub fn accepts(&self, level: NoticeLevel) -> bool {
        match level {
            NoticeLevel::Error | NoticeLevel::Warning => self.level >= LogLevel::Normal,
            NoticeLevel::Info => self.level >= LogLevel::Verbose,
        }
    }

    /// Logs an error message.
    pub fn error(&self, message: &str) {
        self.emit(NoticeLevel::Error, message);
    }

    /// Logs a warning message.
    pub fn warn(&self, message: &str) {
        self.emit(NoticeLevel::Warning, message);
    }

    /// Logs an informational message.
    pub fn info(&self, message: &str) {
        self.emit(NoticeLevel::Info, message);
    }

    fn emit(&self, level: NoticeLevel, message: &str) {
        if self.accepts(level) {
            eprintln!("{level}: {message}");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl Notifier for Logger {
    fn notify(&self, notice: &Notice) {
        self.emit(notice.level, &notice.message);
    }
}

/// Initializes a logger based on environment variables and explicit flags.
///
/// The priority order is:
/// 1. Flags (verbose/quiet, verbose wins when both are set)
/// 2. `PROJSYNC_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// # Examples
///
/// ```
/// use projsync::{init_logger, LogLevel};
///
/// let logger = init_logger(true, false);
/// assert_eq!(logger.level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    if let Ok(env_value) = env::var("PROJSYNC_LOG_MODE") {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return Logger::new(level);
        }
    }

    Logger::new(LogLevel::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_log_mode<F: FnOnce()>(value: Option<&str>, f: F) {
        let saved = env::var("PROJSYNC_LOG_MODE").ok();
        match value {
            Some(v) => env::set_var("PROJSYNC_LOG_MODE", v),
            None => env::remove_var("PROJSYNC_LOG_MODE"),
        }
        f();
        match saved {
            Some(v) => env::set_var("PROJSYNC_LOG_MODE", v),
            None => env::remove_var("PROJSYNC_LOG_MODE"),
        }
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("Normal").unwrap(), LogLevel::Normal);
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_logger_accepts_by_level() {
        let quiet = Logger::new(LogLevel::Quiet);
        assert!(!quiet.accepts(NoticeLevel::Error));

        let normal = Logger::default();
        assert!(normal.accepts(NoticeLevel::Error));
        assert!(normal.accepts(NoticeLevel::Warning));
        assert!(!normal.accepts(NoticeLevel::Info));

        let verbose = Logger::new(LogLevel::Verbose);
        assert!(verbose.accepts(NoticeLevel::Info));
    }

    #[test]
    fn test_notice_display() {
        let notice = Notice::error("manifest add_file failed");
        assert_eq!(notice.to_string(), "ERROR: manifest add_file failed");
        assert_eq!(Notice::warning("x").level, NoticeLevel::Warning);
        assert_eq!(Notice::info("x").level, NoticeLevel::Info);
    }

    #[test]
    #[serial]
    fn test_init_logger_defaults() {
        with_log_mode(None, || {
            assert_eq!(init_logger(false, false).level(), LogLevel::Normal);
        });
    }

    #[test]
    fn test_init_logger_verbose_takes_precedence() {
        assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
        assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
    }

    #[test]
    #[serial]
    fn test_init_logger_from_env() {
        with_log_mode(Some("verbose"), || {
            assert_eq!(init_logger(false, false).level(), LogLevel::Verbose);
        });
        with_log_mode(Some("invalid"), || {
            assert_eq!(init_logger(false, false).level(), LogLevel::Normal);
        });
    }

    #[test]
    #[serial]
    fn test_init_logger_flag_overrides_env() {
        with_log_mode(Some("quiet"), || {
            assert_eq!(init_logger(true, false).level(), LogLevel::Verbose);
        });
    }
}
