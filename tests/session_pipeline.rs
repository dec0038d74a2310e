//! Session harness, observers and CLI configuration

use std::{
    fs,
    sync::{Arc, Mutex},
};

use clap::Parser;
use ttt_learner::{
    AgentKind, PolicyStore, Result,
    agents::RandomAgent,
    cli::{commands::train::TrainArgs, config::CliConfig},
    pipeline::{MetricsObserver, Session, SessionConfig},
    ports::{Agent, Observer, Seat},
    tictactoe::{BoardState, GameRecord, Move},
};

/// Records the seat on X for every game and every move it sees
#[derive(Default)]
struct Recorder {
    x_seats: Arc<Mutex<Vec<Seat>>>,
    moves: usize,
}

impl Observer for Recorder {
    fn on_game_start(&mut self, _game_num: usize, x_seat: Seat) -> Result<()> {
        self.x_seats.lock().expect("lock").push(x_seat);
        Ok(())
    }

    fn on_move(&mut self, _: usize, _: usize, _: &BoardState, _: Move) -> Result<()> {
        self.moves += 1;
        Ok(())
    }

    fn on_game_end(&mut self, _: usize, record: &GameRecord, _: Seat) -> Result<()> {
        assert!(record.final_state.is_ended());
        Ok(())
    }
}

fn random_pair(seed: u64) -> (RandomAgent, RandomAgent) {
    (
        RandomAgent::with_seed("a".to_string(), seed),
        RandomAgent::with_seed("b".to_string(), seed + 1),
    )
}

#[test]
fn test_session_alternates_the_opening_seat() {
    let x_seats = Arc::new(Mutex::new(Vec::new()));
    let recorder = Recorder {
        x_seats: Arc::clone(&x_seats),
        moves: 0,
    };

    let config = SessionConfig {
        games: 4,
        seed: Some(7),
        alternate_first: true,
        first: Seat::B,
    };
    let (mut a, mut b) = random_pair(7);
    let result = Session::new(config)
        .with_observer(Box::new(recorder))
        .run(&mut a, &mut b)
        .expect("session completes");

    assert_eq!(result.total_games, 4);
    assert_eq!(
        *x_seats.lock().expect("lock"),
        vec![Seat::B, Seat::A, Seat::B, Seat::A]
    );
}

#[test]
fn test_borrowed_observers_can_be_read_afterwards() {
    let mut recorder = Recorder::default();
    let mut metrics = MetricsObserver::new(10);

    let (mut a, mut b) = random_pair(3);
    let result = Session::new(SessionConfig {
        games: 25,
        seed: Some(3),
        ..SessionConfig::default()
    })
    .with_observer(Box::new(&mut recorder))
    .with_observer(Box::new(&mut metrics))
    .run(&mut a, &mut b)
    .expect("session completes");

    let summary = metrics.summary();
    assert_eq!(summary.total_games, 25);
    assert_eq!(summary.a_wins, result.a_wins);
    assert_eq!(summary.b_wins, result.b_wins);
    assert_eq!(summary.draws, result.draws);
    assert_eq!(summary.window, 10);
    assert!((5..=9 * 25).contains(&recorder.moves));
    assert!((summary.avg_game_length - recorder.moves as f64 / 25.0).abs() < 1e-9);
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let run = || {
        let store = Arc::new(PolicyStore::new());
        let kind: AgentKind = "adaptive:greedy,mirrored".parse().expect("known kind");
        let mut a = kind.build("a", &store, None);
        let mut b = AgentKind::Random.build("b", &store, None);
        let result = Session::new(SessionConfig {
            games: 50,
            seed: Some(99),
            ..SessionConfig::default()
        })
        .run(a.as_mut(), b.as_mut())
        .expect("session completes");
        (result, store.entry_count(kind.flags().expect("adaptive")))
    };

    assert_eq!(run(), run());
}

#[test]
fn test_agents_learn_across_sessions_through_the_store() {
    let store = Arc::new(PolicyStore::new());
    let kind = AgentKind::Adaptive {
        greedy: false,
        mirrored: true,
    };
    let mut a = kind.build("a", &store, Some(1));
    let mut b = kind.build("b", &store, Some(2));

    let flags = kind.flags().expect("adaptive");
    Session::new(SessionConfig {
        games: 20,
        seed: Some(1),
        ..SessionConfig::default()
    })
    .run(a.as_mut(), b.as_mut())
    .expect("session completes");
    let after_first = store.total_observations(flags);
    assert!(after_first > 0);

    Session::new(SessionConfig {
        games: 20,
        seed: Some(2),
        ..SessionConfig::default()
    })
    .run(a.as_mut(), b.as_mut())
    .expect("session completes");
    assert!(store.total_observations(flags) > after_first);
}

#[test]
fn test_config_file_with_flag_overrides() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("train.json");
    fs::write(
        &path,
        r#"{
            "common": { "seed": 5, "progress": false },
            "train": { "games": 40, "batches": 3, "player_a": "adaptive:mirrored", "player_b": "greedy" }
        }"#,
    )
    .expect("write config");

    let loaded = CliConfig::load(&path).expect("config loads");
    assert_eq!(loaded.common.seed, Some(5));
    assert_eq!(loaded.train.batches, 3);
    assert_eq!(
        loaded.train.player_a,
        AgentKind::Adaptive {
            greedy: false,
            mirrored: true
        }
    );

    let path_arg = path.to_string_lossy().into_owned();
    let args = TrainArgs::try_parse_from([
        "train",
        "--config",
        path_arg.as_str(),
        "--games",
        "10",
        "--player-b",
        "random",
        "--report-every",
        "5",
    ])
    .expect("arguments parse");
    let resolved = args.resolve().expect("config resolves");

    assert_eq!(resolved.train.games, 10);
    assert_eq!(resolved.train.player_b, AgentKind::Random);
    assert_eq!(resolved.train.batches, 3);
    assert_eq!(resolved.train.report_every, 5);
    assert_eq!(resolved.common.seed, Some(5));
    assert!(!resolved.common.progress);
}

#[test]
fn test_invalid_config_files_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");

    let unknown_agent = dir.path().join("agent.json");
    fs::write(&unknown_agent, r#"{ "train": { "player_a": "minimax" } }"#).expect("write");
    assert!(CliConfig::load(&unknown_agent).is_err());

    let zero_batches = dir.path().join("batches.json");
    fs::write(&zero_batches, r#"{ "train": { "batches": 0 } }"#).expect("write");
    assert!(CliConfig::load(&zero_batches).is_err());

    assert!(CliConfig::load(dir.path().join("missing.json")).is_err());
}

#[test]
fn test_agent_names_come_from_build() {
    let store = Arc::new(PolicyStore::new());
    let agent: Box<dyn Agent> = AgentKind::GreedyRandom.build("greedy-1", &store, Some(4));
    assert_eq!(agent.name(), "greedy-1");
}
