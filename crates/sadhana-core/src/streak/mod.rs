//! Streak computation and milestone detection.
//!
//! The streak record is the state; the engine is the transition function.
//! Persistence lives in [`crate::storage`], which brackets the engine with
//! a transactional read-modify-write cycle.

pub mod engine;
pub mod milestones;
pub mod record;

pub use engine::{CompletionOutcome, StreakEngine};
pub use milestones::MilestoneSchedule;
pub use record::StreakRecord;
