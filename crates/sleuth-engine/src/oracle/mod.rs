//! Oracle: the optional language-model backend behind `ask`, `theory`,
//! `analyze` and `hint`.
//!
//! The interpreter never waits on the oracle. It finishes a command with
//! local output and hands back an [`OracleRequest`]; the session then asks
//! the oracle through an [`OracleAdapter`], which bounds the call with a
//! timeout and substitutes a canned reply on any failure.

pub mod client;
pub mod context;
pub mod fallback;

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::config::EngineConfig;

pub use client::HttpOracle;
pub use context::{OracleContext, OracleRequest, QueryKind};
pub use fallback::{Enrichment, FALLBACK_RESPONSES, OracleAdapter};

/// Result type for oracle calls.
pub type OracleResult<T> = Result<T, OracleError>;

/// Ways an oracle call can fail. Never shown to the player verbatim.
#[derive(Debug, Error)]
pub enum OracleError {
    /// No backend is configured.
    #[error("oracle is not configured")]
    Unavailable,

    /// The call did not finish in time.
    #[error("oracle timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with a non-success status.
    #[error("oracle returned HTTP {0}")]
    Http(u16),

    /// Connection or protocol failure.
    #[error("oracle transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body did not have the expected shape.
    #[error("malformed oracle response: {0}")]
    MalformedBody(String),

    /// The reply was empty after cleanup.
    #[error("oracle returned an empty reply")]
    Empty,
}

/// A source of free-text analysis.
pub trait Oracle {
    /// Answer one request.
    fn consult(
        &mut self,
        request: &OracleRequest,
    ) -> impl Future<Output = OracleResult<String>> + Send;
}

/// An oracle that is never available. Every request falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineOracle;

impl Oracle for OfflineOracle {
    async fn consult(&mut self, _request: &OracleRequest) -> OracleResult<String> {
        Err(OracleError::Unavailable)
    }
}

/// The oracle selected by configuration.
#[derive(Debug)]
pub enum Backend {
    /// Remote chat-completions endpoint.
    Http(HttpOracle),
    /// No backend.
    Offline(OfflineOracle),
}

impl Backend {
    /// Build the backend named by `config`: HTTP when an endpoint is set,
    /// offline otherwise.
    pub fn from_config(config: &EngineConfig) -> OracleResult<Self> {
        match &config.oracle_url {
            Some(url) => Ok(Self::Http(HttpOracle::new(
                url.clone(),
                config.oracle_model.clone(),
                config.oracle_timeout,
                config.conversation_window,
            )?)),
            None => Ok(Self::Offline(OfflineOracle)),
        }
    }
}

impl Oracle for Backend {
    async fn consult(&mut self, request: &OracleRequest) -> OracleResult<String> {
        match self {
            Self::Http(oracle) => oracle.consult(request).await,
            Self::Offline(oracle) => oracle.consult(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_is_unavailable() {
        let request = OracleRequest::new(QueryKind::Ask, "hello", OracleContext::default());
        let err = OfflineOracle.consult(&request).await.unwrap_err();
        assert!(matches!(err, OracleError::Unavailable));
    }

    #[test]
    fn backend_follows_config() {
        let offline = Backend::from_config(&EngineConfig::default()).unwrap();
        assert!(matches!(offline, Backend::Offline(_)));
        let http = Backend::from_config(
            &EngineConfig::default().with_oracle_url("http://127.0.0.1:9/v1/chat/completions"),
        )
        .unwrap();
        assert!(matches!(http, Backend::Http(_)));
    }

    #[test]
    fn error_messages() {
        assert_eq!(OracleError::Http(503).to_string(), "oracle returned HTTP 503");
        assert!(
            OracleError::Timeout(Duration::from_secs(2))
                .to_string()
                .contains("2s")
        );
    }
}
