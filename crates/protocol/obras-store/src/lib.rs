//! Relational storage layer for obras records.
//!
//! This crate provides persistence for the obras pipeline:
//!
//! - **Obra storage** (SQLite): one row per obra, looked up by name
//! - **Aggregates** (SQLite): distinct values, grouped counts and sums,
//!   filtered counts and sums
//!
//! # Storage Layout
//!
//! ```text
//! ~/.obras/
//! ├── config.toml              # CLI configuration
//! └── obras.db                 # SQLite: obras table + schema_version
//! ```
//!
//! # Example
//!
//! ```no_run
//! use obras_store::{ObraStore, SqliteObraStore, StoreConfig};
//! use obras_types::Field;
//!
//! let config = StoreConfig::new("/tmp/obras");
//! let mut store = SqliteObraStore::connect(config.database_path()).expect("connect");
//! store.ensure_schema().expect("schema");
//!
//! let stages = store.count_grouped_by(Field::Stage).expect("query");
//! println!("{:?}", stages);
//! store.close().expect("close");
//! ```
//!
//! # Trait-Based Design
//!
//! The store is defined as the [`ObraStore`] trait so the pipeline can run
//! against alternative implementations (e.g., fault-injecting wrappers in
//! tests). The default implementation uses SQLite.

pub mod error;
pub mod obra;
pub mod query;
pub mod schema;
pub mod traits;

// Re-export error types
pub use error::{Result, StoreError};

// Re-export traits
pub use traits::ObraStore;

// Re-export query types
pub use query::{CountSum, Predicate, Value};

// Re-export implementations
pub use obra::SqliteObraStore;

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "OBRAS_DATA_DIR";

/// Get the default data directory for obras state.
///
/// Priority:
/// 1. `OBRAS_DATA_DIR` environment variable (if set)
/// 2. Platform-specific data directory (e.g., `~/.local/share/obras` on Linux)
/// 3. Fallback to `$HOME/.obras`
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("ar", "obras", "obras")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".obras")
        })
}

/// Location of the obras database.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base directory for all obras data.
    pub base_dir: PathBuf,
    /// Database file path (default: base_dir/obras.db).
    pub database_path: Option<PathBuf>,
}

impl StoreConfig {
    /// Create a new configuration with the given base directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            database_path: None,
        }
    }

    /// Set the database path.
    pub fn with_database_path(mut self, path: impl AsRef<Path>) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Get the database path.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.base_dir.join("obras.db"))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_paths() {
        let config = StoreConfig::new("/data/obras");
        assert_eq!(config.database_path(), PathBuf::from("/data/obras/obras.db"));

        let config = config.with_database_path("/elsewhere/x.db");
        assert_eq!(config.database_path(), PathBuf::from("/elsewhere/x.db"));
    }

    #[test]
    fn test_default_data_dir_not_empty() {
        assert!(!default_data_dir().as_os_str().is_empty());
    }
}
