//! Timeout and fallback handling around an [`Oracle`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sleuth_core::RandomSource;
use tracing::warn;

use super::context::OracleRequest;
use super::{Oracle, OracleError, OracleResult};

/// Canned replies used when the oracle cannot answer.
pub const FALLBACK_RESPONSES: &[&str] = &[
    "ANALYSIS SYSTEM TEMPORARILY OFFLINE - Please try a different approach to your investigation.",
    "AI FORENSICS MODULE EXPERIENCING HIGH LOAD - Standard investigation tools remain available.",
    "ADVANCED ANALYSIS UNAVAILABLE - Recommend using basic commands: scan, logs, intercept, decrypt",
    "CONNECTION TO AI ANALYSIS GRID UNSTABLE - Try again in a moment.",
];

/// Text produced for an oracle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    /// Reply or fallback text.
    pub text: String,
    /// Whether `text` is a fallback.
    pub fallback: bool,
}

/// Wraps an oracle with a deadline and a fallback pool.
///
/// [`OracleAdapter::enrich`] always produces text; errors are logged and
/// replaced with one of [`FALLBACK_RESPONSES`]. Fallbacks are drawn from the
/// adapter's own random stream, never from the one that generates cases.
#[derive(Debug)]
pub struct OracleAdapter<O> {
    oracle: O,
    timeout: Duration,
    rng: RandomSource,
}

impl<O: Oracle> OracleAdapter<O> {
    /// Wrap `oracle`, allowing each call at most `timeout` and picking
    /// fallbacks with `rng`.
    pub fn new(oracle: O, timeout: Duration, rng: RandomSource) -> Self {
        Self {
            oracle,
            timeout,
            rng,
        }
    }

    /// The wrapped oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// The per-call deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Call the oracle under the deadline.
    pub async fn call(&mut self, request: &OracleRequest) -> OracleResult<String> {
        match tokio::time::timeout(self.timeout, self.oracle.consult(request)).await {
            Ok(Ok(text)) if text.trim().is_empty() => Err(OracleError::Empty),
            Ok(result) => result,
            Err(_) => Err(OracleError::Timeout(self.timeout)),
        }
    }

    /// Answer `request`, falling back to a canned reply on any failure.
    pub async fn enrich(&mut self, request: &OracleRequest) -> Enrichment {
        match self.call(request).await {
            Ok(text) => Enrichment {
                text,
                fallback: false,
            },
            Err(err) => {
                warn!(error = %err, kind = ?request.kind, "oracle failed, using fallback");
                Enrichment {
                    text: fallback(&mut self.rng).to_string(),
                    fallback: true,
                }
            }
        }
    }
}

/// Pick one fallback reply.
pub fn fallback(rng: &mut RandomSource) -> &'static str {
    *rng.pick(FALLBACK_RESPONSES)
}
