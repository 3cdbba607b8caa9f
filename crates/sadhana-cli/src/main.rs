use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sadhana-cli", version, about = "Sadhana CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Streak inspection and initialization
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Ritual completion and history
    Ritual {
        #[command(subcommand)]
        action: commands::ritual::RitualAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Ritual { action } => commands::ritual::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
