//! # feedback-engine
//!
//! In-memory feedback aggregation: the reaction toggle ledger, the shared
//! append-only event log, and the timeline window index with its peak
//! clustering. Every operation is synchronous and safe to call from many
//! threads or async tasks at once.

pub mod engine;
pub mod index;
pub mod ledger;
pub mod log;
pub mod peaks;

pub use engine::{EngineStats, FeedbackEngine};
pub use index::FeedbackWindowIndex;
pub use ledger::{ReactionLedger, ToggleResult};
pub use log::EventLog;
pub use peaks::PeakGroups;
