//! Investigation session management.
//!
//! `Session` owns the game state, the RNG, the case generator and the
//! oracle. Each submitted line runs through the synchronous interpreter
//! first; if the command asked for an oracle opinion, the session then
//! awaits the oracle (bounded by the configured timeout) and appends its
//! reply, or a fallback, as enrichment lines.

use chrono::{DateTime, Utc};
use sleuth_core::{CaseGenerator, Catalog, GeneratorConfig, RandomSource};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::interpreter::{Dispatch, step};
use crate::oracle::{Oracle, OracleAdapter};
use crate::output::{LineKind, Output};
use crate::state::GameState;

/// Offsets the seed of the fallback stream from the case stream.
const FALLBACK_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// An interactive investigation session.
pub struct Session<O> {
    state: GameState,
    rng: RandomSource,
    generator: CaseGenerator,
    oracle: OracleAdapter<O>,
    history_window: usize,
}

impl<O: Oracle> Session<O> {
    /// Create a session with the default case generator.
    pub fn new(config: &EngineConfig, oracle: O) -> Self {
        Self::with_generator(config, CaseGenerator::default(), oracle)
    }

    /// Create a session with a custom case generator.
    pub fn with_generator(config: &EngineConfig, generator: CaseGenerator, oracle: O) -> Self {
        Self::resume(GameState::new(), config, generator, oracle)
    }

    /// Create a session drawing cases from a custom catalog.
    ///
    /// Fails if the catalog or generator settings cannot produce a case.
    pub fn with_catalog(
        config: &EngineConfig,
        catalog: Catalog,
        generator_config: GeneratorConfig,
        oracle: O,
    ) -> EngineResult<Self> {
        let generator = CaseGenerator::new(catalog, generator_config)?;
        Ok(Self::with_generator(config, generator, oracle))
    }

    /// Continue from saved state.
    ///
    /// The RNG restarts from the configured seed, so cases generated after
    /// resuming differ from those an uninterrupted session would produce.
    pub fn resume(
        state: GameState,
        config: &EngineConfig,
        generator: CaseGenerator,
        oracle: O,
    ) -> Self {
        Self {
            state,
            rng: RandomSource::seeded(config.seed),
            generator,
            oracle: OracleAdapter::new(
                oracle,
                config.oracle_timeout,
                RandomSource::seeded(config.seed ^ FALLBACK_STREAM),
            ),
            history_window: config.history_window,
        }
    }

    /// Get the game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the session, keeping its state.
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Get the oracle adapter.
    pub fn oracle(&self) -> &OracleAdapter<O> {
        &self.oracle
    }

    /// Process a line of input. Returns `None` for blank input.
    pub async fn submit(&mut self, input: &str) -> Option<Output> {
        self.submit_at(input, Utc::now()).await
    }

    /// Process a line of input with an explicit clock, for reproducible
    /// case generation.
    pub async fn submit_at(&mut self, input: &str, now: DateTime<Utc>) -> Option<Output> {
        if input.trim().is_empty() {
            return None;
        }

        let result = {
            let mut ctx = Dispatch {
                rng: &mut self.rng,
                generator: &self.generator,
                now,
                history_window: self.history_window,
            };
            step(&mut self.state, input, &mut ctx)
        };

        let mut output = result.output;
        if let Some(request) = result.query {
            debug!(kind = ?request.kind, "awaiting oracle");
            let enrichment = self.oracle.enrich(&request).await;
            for line in enrichment.text.lines().filter(|l| !l.trim().is_empty()) {
                output.push(LineKind::Enrichment, line);
            }
        }
        Some(output)
    }
}
