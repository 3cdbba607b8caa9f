//! # Sadhana Core Library
//!
//! This library provides the core business logic for Sadhana, a daily
//! devotional-ritual tracker. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI front
//! end being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Streak Engine**: Pure decision logic that turns a prior streak record
//!   and a completion event into the next record plus a milestone flag.
//!   It performs no I/O and never mutates its input.
//! - **Storage**: SQLite-based streak and ritual-log storage plus TOML-based
//!   configuration. The database wraps the read-compute-write cycle around
//!   the engine in a single transaction so concurrent completions for one
//!   user cannot lose updates.
//!
//! ## Key Components
//!
//! - [`StreakEngine`]: Streak transition and milestone detection
//! - [`StreakDb`]: Streak record and ritual history persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod ritual;
pub mod storage;
pub mod streak;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use ritual::{CompletedRitual, RitualCompletionEvent};
pub use storage::{Config, StreakDb};
pub use streak::{CompletionOutcome, MilestoneSchedule, StreakEngine, StreakRecord};
