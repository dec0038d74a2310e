//! ttt CLI - tic-tac-toe with agents that learn by self-play
//!
//! - `ttt train` runs self-play batches between two agents sharing one store
//! - `ttt play` lets you play against an agent in the terminal

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "ttt")]
#[command(version, about = "Tic-tac-toe with self-improving agents", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train agents by self-play
    Train(Box<ttt_learner::cli::commands::train::TrainArgs>),

    /// Play against an agent
    Play(ttt_learner::cli::commands::play::PlayArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Train(args) => ttt_learner::cli::commands::train::execute(*args),
        Commands::Play(args) => ttt_learner::cli::commands::play::execute(args),
    }
}
