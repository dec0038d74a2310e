//! Train command - self-play batches between two agents sharing one store

use std::{fs::File, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    agents::AgentKind,
    cli::{
        config::CliConfig,
        output::{print_kv, print_result, print_section, print_store},
    },
    learning::PolicyStore,
    pipeline::{
        JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver, Session, SessionConfig,
        SessionResult,
    },
    ports::Seat,
};

#[derive(Parser, Debug)]
#[command(about = "Train agents by self-play")]
pub struct TrainArgs {
    /// JSON configuration file; flags below override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Agent in seat A (random, greedy, adaptive[:greedy,mirrored])
    #[arg(long, short = 'a')]
    pub player_a: Option<AgentKind>,

    /// Agent in seat B
    #[arg(long, short = 'b')]
    pub player_b: Option<AgentKind>,

    /// Games per batch
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Number of batches
    #[arg(long)]
    pub batches: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log windowed metrics every N games (shown with -v)
    #[arg(long)]
    pub report_every: Option<usize>,

    /// Print the busiest learned states of each table
    #[arg(long)]
    pub show_table: bool,

    /// Keep seat A on X for every game
    #[arg(long)]
    pub no_alternate: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Write every finished game to this JSONL file
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Write per-batch results to this JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl TrainArgs {
    /// Configuration file (or defaults) with the explicit flags applied
    pub fn resolve(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => CliConfig::default(),
        };

        if let Some(kind) = self.player_a {
            config.train.player_a = kind;
        }
        if let Some(kind) = self.player_b {
            config.train.player_b = kind;
        }
        if let Some(games) = self.games {
            config.train.games = games;
        }
        if let Some(batches) = self.batches {
            config.train.batches = batches;
        }
        if let Some(every) = self.report_every {
            config.train.report_every = every;
        }
        if self.seed.is_some() {
            config.common.seed = self.seed;
        }
        if self.no_alternate {
            config.train.alternate_first = false;
        }
        if self.no_progress {
            config.common.progress = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
struct BatchSummary {
    batch: usize,
    result: SessionResult,
    policy_entries: usize,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    player_a: AgentKind,
    player_b: AgentKind,
    seed: Option<u64>,
    batches: Vec<BatchSummary>,
    total: SessionResult,
    metrics: MetricsSummary,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.resolve()?;
    let train = &config.train;

    let store = Arc::new(PolicyStore::new());
    let a_name = format!("A:{}", train.player_a);
    let b_name = format!("B:{}", train.player_b);
    let seed = config.common.seed;
    let mut a = train.player_a.build(a_name.clone(), &store, seed);
    let mut b = train
        .player_b
        .build(b_name.clone(), &store, seed.map(|s| s.wrapping_add(1)));

    print_section("Self-Play Training");
    print_kv("Seat A", &train.player_a.to_string());
    print_kv("Seat B", &train.player_b.to_string());
    print_kv(
        "Games",
        &format!("{} x {} batches", train.games, train.batches),
    );
    if let Some(seed) = seed {
        print_kv("Seed", &seed.to_string());
    }

    let mut record = args
        .record
        .as_ref()
        .map(|path| {
            JsonlObserver::new(path)
                .with_context(|| format!("Failed to create game log {}", path.display()))
        })
        .transpose()?;

    let mut metrics = MetricsObserver::new(train.window).with_report_every(train.report_every);
    let mut total = SessionResult::default();
    let mut batches = Vec::with_capacity(train.batches);

    for batch in 0..train.batches {
        let session_config = SessionConfig {
            games: train.games,
            // Each batch gets its own pair of agent seeds
            seed: seed.map(|s| s.wrapping_add(2 * batch as u64)),
            alternate_first: train.alternate_first,
            first: Seat::A,
        };

        let mut session = Session::new(session_config).with_observer(Box::new(&mut metrics));
        if config.common.progress {
            session = session.with_observer(Box::new(ProgressObserver::new()));
        }
        if let Some(record) = record.as_mut() {
            session = session.with_observer(Box::new(record));
        }

        let result = session
            .run(a.as_mut(), b.as_mut())
            .with_context(|| format!("Batch {} failed", batch + 1))?;
        drop(session);
        total.merge(&result);

        let policy_entries = [train.player_a, train.player_b]
            .iter()
            .filter_map(AgentKind::flags)
            .map(|flags| store.entry_count(flags))
            .max()
            .unwrap_or(0);

        print_section(&format!("Batch {}/{}", batch + 1, train.batches));
        print_result(&result, &a_name, &b_name);
        print_kv("Policy entries", &policy_entries.to_string());

        batches.push(BatchSummary {
            batch: batch + 1,
            result,
            policy_entries,
        });
    }

    let summary = metrics.summary();
    print_section("Totals");
    print_result(&total, &a_name, &b_name);
    print_kv(
        &format!("Last {} games", summary.window),
        &format!(
            "A {:.1}% / B {:.1}% / draw {:.1}%",
            summary.recent_a_win_rate * 100.0,
            summary.recent_b_win_rate * 100.0,
            summary.recent_draw_rate * 100.0
        ),
    );
    print_store(&store, if args.show_table { 5 } else { 0 });
    if config.common.verbose {
        println!("\n{}", serde_json::to_string_pretty(&summary)?);
    }

    if let Some(path) = &args.summary {
        let file = File::create(path)
            .with_context(|| format!("Failed to create summary {}", path.display()))?;
        let contents = TrainingSummaryFile {
            player_a: train.player_a,
            player_b: train.player_b,
            seed,
            batches,
            total,
            metrics: summary,
        };
        to_writer_pretty(file, &contents)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
