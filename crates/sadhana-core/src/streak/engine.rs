//! Streak transition logic.
//!
//! `StreakEngine` is a pure function of `(record, event)`: it performs no
//! I/O, holds no state beyond its milestone schedule, and returns a new
//! record instead of mutating its input. Callers load the prior record,
//! run the engine, and persist the outcome; see
//! [`StreakDb::record_completion`](crate::storage::StreakDb::record_completion)
//! for the transactional wrapper.

use serde::Serialize;

use crate::ritual::RitualCompletionEvent;
use crate::streak::{MilestoneSchedule, StreakRecord};

/// Result of recording one completion event.
///
/// Carries the updated record for persistence plus the display values the
/// caller surfaces to the UI, so nothing needs recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionOutcome {
    /// The record as it must be persisted
    pub record: StreakRecord,

    /// Streak after this completion
    pub current_streak: u32,

    /// Longest streak after this completion
    pub longest_streak: u32,

    /// Whether this completion landed exactly on a milestone
    pub milestone_reached: bool,

    /// Whether a completion for this calendar day was already recorded;
    /// when set, `record` is the input unchanged
    pub already_completed: bool,
}

/// Pure streak transition and milestone detection.
#[derive(Debug, Clone, Default)]
pub struct StreakEngine {
    milestones: MilestoneSchedule,
}

impl StreakEngine {
    /// Engine with the default milestone schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a caller-supplied milestone schedule.
    pub fn with_milestones(milestones: MilestoneSchedule) -> Self {
        Self { milestones }
    }

    /// The milestone schedule this engine celebrates.
    pub fn milestones(&self) -> &MilestoneSchedule {
        &self.milestones
    }

    /// Compute the streak transition for one completion event.
    ///
    /// The record has two logical states, "never completed"
    /// (`last_completed_date = None`) and "active streak", with four edges:
    ///
    /// - first completion ever starts the streak at 1
    /// - the next calendar day extends it by 1
    /// - a gap of two or more days, or a backdated event, resets it to 1
    /// - replaying the already-recorded day changes nothing (idempotence)
    ///
    /// `longest_streak` only ever grows. Day differences are whole calendar
    /// days on `NaiveDate`, so the arithmetic is immune to timezone and DST
    /// drift.
    pub fn record_completion(
        &self,
        record: &StreakRecord,
        event: &RitualCompletionEvent,
    ) -> CompletionOutcome {
        // Idempotence: a second completion on the recorded day is a no-op
        // and never re-fires the milestone.
        if record.last_completed_date == Some(event.date) {
            return CompletionOutcome {
                record: record.clone(),
                current_streak: record.current_streak,
                longest_streak: record.longest_streak,
                milestone_reached: false,
                already_completed: true,
            };
        }

        let new_streak = match record.last_completed_date {
            None => 1,
            Some(last) => match (event.date - last).num_days() {
                1 => record.current_streak + 1,
                // Defensive fallback: a zero-day difference between unequal
                // dates cannot occur, the equality check above already
                // handled the recorded day.
                0 => record.current_streak.max(1),
                _ => 1,
            },
        };

        let longest_streak = record.longest_streak.max(new_streak);
        let updated = StreakRecord {
            current_streak: new_streak,
            longest_streak,
            last_completed_date: Some(event.date),
            ..record.clone()
        };

        CompletionOutcome {
            record: updated,
            current_streak: new_streak,
            longest_streak,
            milestone_reached: self.milestones.is_milestone(new_streak),
            already_completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(current: u32, longest: u32, last: Option<&str>) -> StreakRecord {
        StreakRecord {
            current_streak: current,
            longest_streak: longest,
            last_completed_date: last.map(date),
            ..StreakRecord::new("u1")
        }
    }

    fn event(day: &str) -> RitualCompletionEvent {
        RitualCompletionEvent::new("u1", date(day))
    }

    #[test]
    fn first_ever_completion_starts_at_one() {
        let engine = StreakEngine::new();
        let out = engine.record_completion(&record(0, 0, None), &event("2024-02-01"));
        assert_eq!(out.current_streak, 1);
        assert_eq!(out.longest_streak, 1);
        assert!(!out.milestone_reached);
        assert!(!out.already_completed);
        assert_eq!(out.record.last_completed_date, Some(date("2024-02-01")));
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let engine = StreakEngine::new();
        let out = engine.record_completion(
            &record(5, 5, Some("2024-01-10")),
            &event("2024-01-11"),
        );
        assert_eq!(out.current_streak, 6);
        assert_eq!(out.longest_streak, 6);
        assert!(!out.milestone_reached);
    }

    #[test]
    fn gap_resets_streak_but_keeps_longest() {
        let engine = StreakEngine::new();
        let out = engine.record_completion(
            &record(5, 5, Some("2024-01-10")),
            &event("2024-01-13"),
        );
        assert_eq!(out.current_streak, 1);
        assert_eq!(out.longest_streak, 5);
        assert!(!out.milestone_reached);
    }

    #[test]
    fn longest_survives_reset_from_ten() {
        let engine = StreakEngine::new();
        let out = engine.record_completion(
            &record(10, 10, Some("2024-01-10")),
            &event("2024-01-20"),
        );
        assert_eq!(out.current_streak, 1);
        assert_eq!(out.longest_streak, 10);
    }

    #[test]
    fn backdated_event_resets_streak() {
        let engine = StreakEngine::new();
        let out = engine.record_completion(
            &record(5, 5, Some("2024-01-10")),
            &event("2024-01-08"),
        );
        assert_eq!(out.current_streak, 1);
        assert_eq!(out.longest_streak, 5);
        assert_eq!(out.record.last_completed_date, Some(date("2024-01-08")));
    }

    #[test]
    fn same_day_replay_is_a_no_op() {
        let engine = StreakEngine::new();
        let before = record(5, 7, Some("2024-01-10"));
        let out = engine.record_completion(&before, &event("2024-01-10"));
        assert!(out.already_completed);
        assert!(!out.milestone_reached);
        assert_eq!(out.record, before);
        assert_eq!(out.current_streak, 5);
        assert_eq!(out.longest_streak, 7);
    }

    #[test]
    fn input_record_is_not_mutated() {
        let engine = StreakEngine::new();
        let before = record(5, 5, Some("2024-01-10"));
        let snapshot = before.clone();
        let out = engine.record_completion(&before, &event("2024-01-11"));
        assert_eq!(before, snapshot);
        assert_ne!(out.record, before);
    }

    #[test]
    fn milestone_fires_exactly_on_day_seven() {
        let engine = StreakEngine::new();
        let mut rec = StreakRecord::new("u1");
        let start = date("2024-03-01");
        for day in 0..8 {
            let ev = RitualCompletionEvent::new("u1", start + chrono::Days::new(day));
            let out = engine.record_completion(&rec, &ev);
            let expect_milestone = matches!(out.current_streak, 3 | 7);
            assert_eq!(
                out.milestone_reached, expect_milestone,
                "day {} streak {}",
                day + 1,
                out.current_streak
            );
            rec = out.record;
        }
        assert_eq!(rec.current_streak, 8);
    }

    #[test]
    fn custom_schedule_is_honored() {
        let engine = StreakEngine::with_milestones(MilestoneSchedule::new(vec![2]));
        let out = engine.record_completion(
            &record(1, 1, Some("2024-01-10")),
            &event("2024-01-11"),
        );
        assert_eq!(out.current_streak, 2);
        assert!(out.milestone_reached);
    }

    #[test]
    fn milestone_does_not_refire_after_gap_back_to_one() {
        // Reset lands on 1, which is not in the default schedule.
        let engine = StreakEngine::new();
        let out = engine.record_completion(
            &record(7, 7, Some("2024-01-10")),
            &event("2024-01-15"),
        );
        assert_eq!(out.current_streak, 1);
        assert!(!out.milestone_reached);
    }

    #[test]
    fn reserved_fields_pass_through_untouched() {
        let engine = StreakEngine::new();
        let mut before = record(2, 2, Some("2024-01-10"));
        before.grace_used_in_window = true;
        before.window_start_date = Some(date("2024-01-08"));
        let out = engine.record_completion(&before, &event("2024-01-11"));
        assert!(out.record.grace_used_in_window);
        assert_eq!(out.record.window_start_date, Some(date("2024-01-08")));
    }

    prop_compose! {
        fn arb_record()(
            current in 0u32..500,
            headroom in 0u32..100,
            last_offset in proptest::option::of(0i64..1000),
        ) -> StreakRecord {
            StreakRecord {
                current_streak: current,
                longest_streak: current + headroom,
                last_completed_date: last_offset
                    .map(|d| date("2020-01-01") + chrono::Days::new(d as u64)),
                ..StreakRecord::new("u1")
            }
        }
    }

    proptest! {
        #[test]
        fn longest_is_never_below_current(
            rec in arb_record(),
            event_offset in 0i64..2000,
        ) {
            let engine = StreakEngine::new();
            let ev = RitualCompletionEvent::new(
                "u1",
                date("2020-01-01") + chrono::Days::new(event_offset as u64),
            );
            let out = engine.record_completion(&rec, &ev);
            prop_assert!(out.longest_streak >= out.current_streak);
            prop_assert!(out.record.longest_streak >= out.record.current_streak);
            // Longest never shrinks.
            prop_assert!(out.longest_streak >= rec.longest_streak);
        }

        #[test]
        fn replaying_an_outcome_is_idempotent(
            rec in arb_record(),
            event_offset in 0i64..2000,
        ) {
            let engine = StreakEngine::new();
            let ev = RitualCompletionEvent::new(
                "u1",
                date("2020-01-01") + chrono::Days::new(event_offset as u64),
            );
            let first = engine.record_completion(&rec, &ev);
            let second = engine.record_completion(&first.record, &ev);
            prop_assert!(second.already_completed);
            prop_assert!(!second.milestone_reached);
            prop_assert_eq!(second.record, first.record);
        }
    }
}
