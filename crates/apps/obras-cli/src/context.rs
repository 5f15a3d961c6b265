//! Store context for CLI operations.

use obras_ops::{DefaultObrasOperations, OpsConfig};

use crate::config::CliConfig;
use crate::error::CliResult;

/// Open operations over the configured database.
pub struct ObrasContext {
    /// Loaded configuration.
    pub config: CliConfig,
    /// Pipeline operations over the open store.
    pub ops: DefaultObrasOperations,
}

impl ObrasContext {
    /// Open the configured database, creating its schema if needed.
    pub fn open(config: CliConfig) -> CliResult<Self> {
        Self::open_with(config, OpsConfig::default())
    }

    /// Open with explicit operations configuration.
    pub fn open_with(config: CliConfig, ops_config: OpsConfig) -> CliResult<Self> {
        let store_config = config.store_config();
        tracing::debug!(database = %store_config.database_path().display(), "Opening store");
        let ops = DefaultObrasOperations::open(&store_config)?.with_config(ops_config);
        Ok(Self { config, ops })
    }

    /// Close the store.
    pub fn close(self) -> CliResult<()> {
        self.ops.close()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obras_store::ObraStore;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_database() {
        let temp = TempDir::new().unwrap();
        let mut config = CliConfig::default();
        config.storage.database = temp.path().join("data").join("obras.db");

        let ctx = ObrasContext::open(config).unwrap();
        assert_eq!(ctx.ops.store.count_all().unwrap(), 0);
        ctx.close().unwrap();
        assert!(temp.path().join("data").join("obras.db").exists());
    }

    #[test]
    fn test_open_with_disables_indicators() {
        let temp = TempDir::new().unwrap();
        let mut config = CliConfig::default();
        config.storage.database = temp.path().join("obras.db");

        let ctx =
            ObrasContext::open_with(config, OpsConfig::new().with_indicators(false)).unwrap();
        assert!(!ctx.ops.config.compute_indicators);
    }
}
