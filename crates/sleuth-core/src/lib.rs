//! Core model for Sleuth, a terminal investigation game.
//!
//! Provides the case data model (suspects and the log, email, chat and file
//! artifacts that implicate them), a seeded case generator that plants one
//! statistically detectable culprit and one red herring, and the judge that
//! rules on a final accusation.

pub mod artifact;
pub mod case;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod judge;
pub mod random;
pub mod suspect;

pub use artifact::{ChatMessage, Email, FileMetadata, LogAction, LogEntry, LogStatus};
pub use case::{Case, CaseId, Severity, Solution, TimeWindow};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult};
pub use generator::{CaseGenerator, GeneratorConfig, generate_case};
pub use judge::{Verdict, judge};
pub use random::RandomSource;
pub use suspect::{AccessLevel, RiskTier, Suspect, SuspectId};
