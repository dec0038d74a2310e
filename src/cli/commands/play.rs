//! Play command - a human against a learning agent on the terminal

use std::{
    io::{self, BufReader},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    agents::AgentKind,
    cli::{
        human::HumanAgent,
        output::{print_kv, print_result, print_section},
    },
    learning::PolicyStore,
    pipeline::{Session, SessionConfig},
    ports::Seat,
};

#[derive(Parser, Debug)]
#[command(about = "Play against an agent")]
pub struct PlayArgs {
    /// Opponent (random, greedy, adaptive[:greedy,mirrored])
    #[arg(long, short = 'o', default_value = "adaptive:greedy,mirrored")]
    pub opponent: AgentKind,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Self-play games the opponent trains on before the first game
    #[arg(long, default_value_t = 0)]
    pub pretrain: usize,

    /// Let the agent open the first game
    #[arg(long)]
    pub agent_first: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let store = Arc::new(PolicyStore::new());
    let mut agent = args.opponent.build(args.opponent.to_string(), &store, args.seed);

    if args.pretrain > 0 {
        let mut sparring = args.opponent.build(
            format!("{} (sparring)", args.opponent),
            &store,
            args.seed.map(|s| s.wrapping_add(1)),
        );
        let mut session = Session::new(SessionConfig {
            games: args.pretrain,
            seed: args.seed,
            alternate_first: true,
            first: Seat::A,
        });
        let result = session
            .run(agent.as_mut(), sparring.as_mut())
            .context("Pretraining failed")?;
        log::info!(
            "pretrained on {} games ({} draws)",
            result.total_games,
            result.draws
        );
    }

    let mut human = HumanAgent::new("You", BufReader::new(io::stdin()), io::stdout());

    print_section(&format!("You vs {}", args.opponent));
    println!("Enter moves as 'row col' (0-2), e.g. '1 1' for the centre.");

    // The opener alternates between games
    let mut session = Session::new(SessionConfig {
        games: args.games,
        seed: args.seed.map(|s| s.wrapping_add(2)),
        alternate_first: true,
        first: if args.agent_first { Seat::B } else { Seat::A },
    });
    let result = session.run(&mut human, agent.as_mut())?;

    if args.games > 1 {
        print_section("Results");
        print_result(&result, "You", &args.opponent.to_string());
    }
    if let Some(flags) = args.opponent.flags() {
        print_kv("Learned pairs", &store.entry_count(flags).to_string());
    }

    Ok(())
}
