use clap::Subcommand;
use sadhana_core::{Config, StreakDb};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Current streak for a user (creates the record on first sight)
    Show {
        #[arg(long)]
        user: String,
    },
    /// Initialize a streak record for a user
    Init {
        #[arg(long)]
        user: String,
    },
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = StreakDb::open()?;

    match action {
        StreakAction::Show { user } => {
            let record = db.streak_init(&user)?;
            let schedule = Config::load()?.milestone_schedule();
            let mut json = serde_json::to_value(&record)?;
            json["next_milestone"] =
                serde_json::to_value(schedule.next_after(record.current_streak))?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        StreakAction::Init { user } => {
            let record = db.streak_init(&user)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
