use clap::Subcommand;
use sadhana_core::ritual::parse_ritual_date;
use sadhana_core::{Config, RitualCompletionEvent, StreakDb, StreakEngine, ValidationError};

#[derive(Subcommand)]
pub enum RitualAction {
    /// Record a completed ritual and update the streak
    Complete {
        #[arg(long)]
        user: String,
        /// Calendar day of the completion (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Deity the ritual was performed for
        #[arg(long)]
        deity: Option<String>,
        /// Ritual duration in seconds
        #[arg(long)]
        duration_sec: Option<u32>,
        /// Ritual steps completed (0-8)
        #[arg(long)]
        steps: Option<u8>,
        /// Whether the soundscape was playing
        #[arg(long)]
        soundscape: Option<bool>,
    },
    /// Completion history, newest first
    History {
        #[arg(long)]
        user: String,
        /// Maximum entries to return (default 100)
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub fn run(action: RitualAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = StreakDb::open()?;
    let config = Config::load()?;

    match action {
        RitualAction::Complete {
            user,
            date,
            deity,
            duration_sec,
            steps,
            soundscape,
        } => {
            // Validate caller input before the engine sees it.
            let date = match date {
                Some(raw) => parse_ritual_date(&raw)?,
                None => chrono::Local::now().date_naive(),
            };
            let steps = steps.unwrap_or(config.ritual.steps_per_ritual);
            if steps > 8 {
                return Err(ValidationError::InvalidValue {
                    field: "steps".into(),
                    message: format!("{steps} exceeds the 8-step ritual flow"),
                }
                .into());
            }

            let event = RitualCompletionEvent {
                user_id: user,
                date,
                completed: true,
                steps_completed: steps,
                deity_used: deity.unwrap_or_else(|| config.ritual.default_deity.clone()),
                soundscape_on: soundscape.unwrap_or(config.ritual.soundscape_default_on),
                duration_sec: duration_sec.unwrap_or(0),
            };

            let engine = StreakEngine::with_milestones(config.milestone_schedule());
            let outcome = db.record_completion(&engine, &event)?;

            let message = if outcome.already_completed {
                "Already completed today"
            } else {
                "Ritual completed"
            };
            let body = serde_json::json!({
                "message": message,
                "streak": outcome.current_streak,
                "longest_streak": outcome.longest_streak,
                "milestone": outcome.milestone_reached,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        RitualAction::History { user, limit } => {
            let history = db.history(&user, limit)?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
    }
    Ok(())
}
