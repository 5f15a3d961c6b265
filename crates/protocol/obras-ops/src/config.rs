//! Configuration for the operations layer.

/// Operations behavior.
#[derive(Debug, Clone)]
pub struct OpsConfig {
    /// Run the indicator battery at the end of `run_pipeline`.
    pub compute_indicators: bool,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            compute_indicators: true,
        }
    }
}

impl OpsConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable indicators at the end of the pipeline.
    pub fn with_indicators(mut self, enabled: bool) -> Self {
        self.compute_indicators = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert!(OpsConfig::new().compute_indicators);
        assert!(!OpsConfig::new().with_indicators(false).compute_indicators);
    }
}
