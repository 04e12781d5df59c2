//! Configuration for an investigation session.

use std::time::Duration;

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible cases.
    pub seed: u64,
    /// Chat-completions endpoint of the oracle. `None` runs offline.
    pub oracle_url: Option<String>,
    /// Model name sent with oracle requests.
    pub oracle_model: Option<String>,
    /// Upper bound on a single oracle call.
    pub oracle_timeout: Duration,
    /// Number of recent commands included in oracle context.
    pub history_window: usize,
    /// Number of past question and answer exchanges replayed with each
    /// oracle request.
    pub conversation_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            oracle_url: None,
            oracle_model: None,
            oracle_timeout: Duration::from_secs(15),
            history_window: 5,
            conversation_window: 10,
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the oracle endpoint.
    pub fn with_oracle_url(mut self, url: impl Into<String>) -> Self {
        self.oracle_url = Some(url.into());
        self
    }

    /// Set the oracle model name.
    pub fn with_oracle_model(mut self, model: impl Into<String>) -> Self {
        self.oracle_model = Some(model.into());
        self
    }

    /// Set the oracle timeout (at least one millisecond).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout = timeout.max(Duration::from_millis(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.seed, 42);
        assert!(cfg.oracle_url.is_none());
        assert_eq!(cfg.oracle_timeout, Duration::from_secs(15));
        assert_eq!(cfg.history_window, 5);
        assert_eq!(cfg.conversation_window, 10);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_seed(7)
            .with_oracle_url("http://localhost:8080/v1/chat/completions")
            .with_oracle_model("local")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.oracle_model.as_deref(), Some("local"));
        assert_eq!(cfg.oracle_timeout, Duration::from_secs(3));
    }

    #[test]
    fn zero_timeout_clamped() {
        let cfg = EngineConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(cfg.oracle_timeout, Duration::from_millis(1));
    }
}
