//! Command interpreter, evidence tracking and oracle adapter for Sleuth.
//!
//! The interpreter is a synchronous state machine over [`GameState`]. The
//! [`Session`] wraps it with an async oracle step that can enrich `ask`,
//! `theory`, `analyze` and `hint` output without ever blocking or failing
//! the command itself.

pub mod command;
pub mod config;
pub mod error;
pub mod evidence;
pub mod hint;
pub mod interpreter;
pub mod oracle;
pub mod output;
pub mod progress;
pub mod render;
pub mod session;
pub mod state;

pub use command::{Command, parse_command};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use evidence::{EvidenceCategory, EvidenceStore};
pub use hint::HintLevel;
pub use interpreter::{Dispatch, Step, step};
pub use oracle::{Backend, HttpOracle, OfflineOracle, Oracle, OracleAdapter, OracleError};
pub use output::{Line, LineKind, Output, StateDelta};
pub use progress::ProgressTracker;
pub use session::Session;
pub use state::{GameState, Metrics, Phase};
