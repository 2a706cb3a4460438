use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "voidhabit", version, about = "Voidhabit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Routine task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Workout plans and guided sessions
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Meditation sessions
    Meditate {
        #[command(subcommand)]
        action: commands::meditate::MeditateAction,
    },
    /// Bookshelf management
    Book {
        #[command(subcommand)]
        action: commands::book::BookAction,
    },
    /// Streaks and activity summaries
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Profile configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Meditate { action } => commands::meditate::run(action),
        Commands::Book { action } => commands::book::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
