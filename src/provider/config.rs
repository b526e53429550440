//! Provider configuration.

/// How a provider walks the scenario sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Stop after this many scenarios
    pub limit: Option<usize>,
    /// Stop pulling scenarios after the first binding failure
    pub fail_fast: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            limit: None,
            fail_fast: true,
        }
    }
}

impl ProviderConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of scenarios pulled from the source
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set whether the first failure ends the sequence
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}
