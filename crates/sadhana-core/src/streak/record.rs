//! The per-user streak record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-user streak state, one record per `user_id`.
///
/// Invariant: `longest_streak >= current_streak` after every engine update.
/// The record is only ever mutated by persisting the output of
/// [`StreakEngine::record_completion`](crate::streak::StreakEngine::record_completion).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    /// Opaque stable user identifier, unique key
    pub user_id: String,

    /// Consecutive days of completion ending at `last_completed_date`
    pub current_streak: u32,

    /// Maximum `current_streak` ever observed for this user
    pub longest_streak: u32,

    /// Calendar date of the most recent completion, `None` if never completed
    pub last_completed_date: Option<NaiveDate>,

    /// Reserved for a grace-day leniency feature; persisted but not read
    /// or written by any completion logic
    #[serde(default)]
    pub grace_used_in_window: bool,

    /// Reserved, see `grace_used_in_window`
    #[serde(default)]
    pub window_start_date: Option<NaiveDate>,
}

impl StreakRecord {
    /// A fresh record for a user that has never completed a ritual.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            current_streak: 0,
            longest_streak: 0,
            last_completed_date: None,
            grace_used_in_window: false,
            window_start_date: None,
        }
    }

    /// Whether the user has ever completed a ritual.
    pub fn has_completed(&self) -> bool {
        self.last_completed_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_all_zero() {
        let record = StreakRecord::new("u1");
        assert_eq!(record.current_streak, 0);
        assert_eq!(record.longest_streak, 0);
        assert!(record.last_completed_date.is_none());
        assert!(!record.has_completed());
        assert!(!record.grace_used_in_window);
        assert!(record.window_start_date.is_none());
    }

    #[test]
    fn serializes_null_date_for_fresh_record() {
        let json = serde_json::to_value(StreakRecord::new("u1")).unwrap();
        assert_eq!(json["last_completed_date"], serde_json::Value::Null);
        assert_eq!(json["window_start_date"], serde_json::Value::Null);
    }

    #[test]
    fn reserved_fields_default_when_absent() {
        let record: StreakRecord = serde_json::from_str(
            r#"{"user_id":"u1","current_streak":2,"longest_streak":4,"last_completed_date":"2024-01-10"}"#,
        )
        .unwrap();
        assert!(!record.grace_used_in_window);
        assert!(record.window_start_date.is_none());
    }
}
