use clap::Subcommand;
use sadhana_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the full configuration
    Show,
    /// Replace the milestone schedule, e.g. `set-milestones 3 7 21 40`
    SetMilestones {
        #[arg(required = true)]
        days: Vec<u32>,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::SetMilestones { days } => {
            let mut config = Config::load()?;
            config.streak.milestones = days;
            config.save()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&config.milestone_schedule())?
            );
        }
    }
    Ok(())
}
