//! Configuration system for projsync.
//!
//! The configuration surface is small: a master enable flag, the include /
//! exclude glob lists that form the default update policy, and the walk
//! settings for recursive copies. It is layered from several sources.
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PROJSYNC_*`)
//! 3. Private project config (`projsync.local.yaml`)
//! 4. Project config (`projsync.yaml`)
//! 5. User config (`~/.projsync/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use projsync::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! println!("enabled: {}", config.is_enabled());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{Config, WalkConfig};
pub use validator::ConfigValidator;
