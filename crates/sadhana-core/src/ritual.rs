//! Ritual completion events and logged history entries.
//!
//! A completion event is the transient input the caller submits when a user
//! finishes the guided ritual flow. The streak engine reads only `user_id`
//! and `date`; the remaining metadata is passed through to the ritual log
//! for later history display and never interpreted by the streak logic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single user-submitted record that a ritual was finished on a given
/// calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RitualCompletionEvent {
    /// Opaque stable user identifier
    pub user_id: String,

    /// Calendar date the ritual was completed (supplied by the caller,
    /// not derived from the server clock)
    pub date: NaiveDate,

    /// Whether the full flow was finished
    #[serde(default = "default_completed")]
    pub completed: bool,

    /// Number of ritual steps completed (0-8)
    #[serde(default = "default_steps_completed")]
    pub steps_completed: u8,

    /// Deity the ritual was performed for
    pub deity_used: String,

    /// Whether the soundscape was playing
    pub soundscape_on: bool,

    /// Total ritual duration in seconds
    pub duration_sec: u32,
}

fn default_completed() -> bool {
    true
}

fn default_steps_completed() -> u8 {
    5
}

impl RitualCompletionEvent {
    /// Create an event with metadata defaults, for callers that only know
    /// the user and the day.
    pub fn new(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            completed: true,
            steps_completed: default_steps_completed(),
            deity_used: String::new(),
            soundscape_on: false,
            duration_sec: 0,
        }
    }
}

/// Parse a caller-supplied `YYYY-MM-DD` string into a calendar date.
///
/// Boundary validation: the engine assumes well-formed dates, so callers
/// must run their input through this before building an event.
pub fn parse_ritual_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        value: value.to_string(),
    })
}

/// A ritual-log entry as returned by history queries: the submitted event
/// plus the identifier assigned on append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedRitual {
    /// Log entry id assigned on append
    pub id: String,

    #[serde(flatten)]
    pub event: RitualCompletionEvent,
}
