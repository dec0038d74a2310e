//! Learning behaviour of the adaptive agent against a shared policy store

use std::{sync::Arc, thread};

use ttt_learner::{
    AdaptiveConfig, AdaptivePlayer, OutcomeCounters, Outcome, PolicyFlags, PolicyStore,
    agents::RandomAgent,
    pipeline::{Seat, Session, SessionConfig, play_game},
    ports::Agent,
    tictactoe::{BoardState, Move, Player},
};

fn mv(row: usize, col: usize) -> Move {
    Move::new(row, col).expect("in bounds")
}

fn adaptive(config: AdaptiveConfig, store: &Arc<PolicyStore>) -> AdaptivePlayer {
    AdaptivePlayer::new("adaptive".to_string(), config, Arc::clone(store))
}

#[test]
fn greedy_agent_always_takes_the_immediate_win() {
    let store = Arc::new(PolicyStore::new());
    // X wins at (0,2); every other cell is legal too
    let state = BoardState::from_string("XX.OO....").expect("valid board");

    for seed in 0..50 {
        let mut agent = adaptive(AdaptiveConfig::new().greedy(true).with_seed(seed), &store);
        assert_eq!(agent.select_move(&state).expect("move"), mv(0, 2));
    }
}

#[test]
fn unseen_pair_has_uniform_probabilities() {
    let store = PolicyStore::new();
    let p = store.outcome_probabilities(PolicyFlags::default(), &BoardState::initial(), mv(1, 1));
    assert!((p.win - 1.0 / 3.0).abs() < 1e-12);
    assert!((p.draw - 1.0 / 3.0).abs() < 1e-12);
    assert!((p.lose - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn stored_counts_become_probabilities() {
    let store = PolicyStore::new();
    let flags = PolicyFlags::default();
    let state = BoardState::initial();
    let pair = [(state, mv(0, 0))];

    for outcome in [Outcome::Win, Outcome::Win, Outcome::Draw, Outcome::Lose] {
        store.record_game(flags, &[(&pair[..], outcome)]);
    }

    assert_eq!(
        store.counters(flags, &state, mv(0, 0)),
        Some(OutcomeCounters::new(2, 1, 1))
    );
    let p = store.outcome_probabilities(flags, &state, mv(0, 0));
    assert_eq!((p.win, p.draw, p.lose), (0.5, 0.25, 0.25));
}

#[test]
fn finished_game_credits_exactly_the_recorded_pairs() {
    let store = Arc::new(PolicyStore::new());
    let flags = PolicyFlags::default();
    let other_flags = PolicyFlags::new(true, true);

    // O to move on an empty grid never occurs in play
    let unreachable = BoardState::from_string("........._O").expect("valid board");
    let initial = BoardState::initial();
    store.record_game(flags, &[(&[(unreachable, mv(1, 1))][..], Outcome::Lose)]);
    store.record_game(other_flags, &[(&[(initial, mv(0, 0))][..], Outcome::Draw)]);

    let mut x = adaptive(AdaptiveConfig::new().with_seed(11), &store);
    let mut o = RandomAgent::with_seed("random".to_string(), 12);

    let record = play_game(&mut x, &mut o).expect("game completes");
    let states = record.state_sequence().expect("legal replay");
    let outcome = Outcome::for_player(record.winner(), Player::X);
    let expected = match outcome {
        Outcome::Win => OutcomeCounters::new(1, 0, 0),
        Outcome::Draw => OutcomeCounters::new(0, 1, 0),
        Outcome::Lose => OutcomeCounters::new(0, 0, 1),
    };

    let x_pairs: Vec<(BoardState, Move)> = states
        .iter()
        .zip(&record.moves)
        .step_by(2)
        .map(|(state, mv)| (*state, *mv))
        .collect();

    for (state, mv) in &x_pairs {
        assert_eq!(store.counters(flags, state, *mv), Some(expected));
    }
    assert_eq!(store.entry_count(flags), x_pairs.len() + 1);
    assert_eq!(store.total_observations(flags), x_pairs.len() as u64 + 1);
    assert!(x.own_history().is_empty());

    assert_eq!(
        store.counters(flags, &unreachable, mv(1, 1)),
        Some(OutcomeCounters::new(0, 0, 1))
    );
    assert_eq!(
        store.counters(other_flags, &initial, mv(0, 0)),
        Some(OutcomeCounters::new(0, 1, 0))
    );
    assert_eq!(store.entry_count(other_flags), 1);
    assert_eq!(store.total_observations(other_flags), 1);
}

#[test]
fn mirrored_agent_credits_the_opponent_with_the_inverted_outcome() {
    let store = Arc::new(PolicyStore::new());
    let config = AdaptiveConfig::new().greedy(true).mirrored(true).with_seed(5);
    let flags = config.flags();
    let mut agent = adaptive(config, &store);

    let before_o = BoardState::from_string("XX.O.....").expect("valid board");
    assert_eq!(before_o.turn(), Player::O);
    agent.notify_opponent_move(&before_o, mv(1, 1));

    let before_x = before_o.apply_move(mv(1, 1)).expect("legal");
    let chosen = agent.select_move(&before_x).expect("move");
    assert_eq!(chosen, mv(0, 2));
    let final_state = before_x.apply_move(chosen).expect("legal");
    agent.notify_game_ended(&final_state);

    assert_eq!(
        store.counters(flags, &before_o, mv(1, 1)),
        Some(OutcomeCounters::new(0, 0, 1))
    );
    assert_eq!(
        store.counters(flags, &before_x, chosen),
        Some(OutcomeCounters::new(1, 0, 0))
    );
    assert!(agent.opponent_history().is_empty());
}

#[test]
fn agents_with_the_same_flags_pool_learning() {
    let store = Arc::new(PolicyStore::new());
    let config = AdaptiveConfig::new().greedy(true);
    let mut learner = adaptive(config.with_seed(1), &store);
    let observer = adaptive(config.with_seed(2), &store);

    let state = BoardState::from_string("XX.OO....").expect("valid board");
    let chosen = learner.select_move(&state).expect("move");
    learner.notify_game_ended(&state.apply_move(chosen).expect("legal"));

    let p = observer.outcome_probabilities(&state, chosen);
    assert_eq!((p.win, p.draw, p.lose), (1.0, 0.0, 0.0));

    // A different flag combination reads a different table
    let other = adaptive(AdaptiveConfig::new().with_seed(3), &store);
    assert!((other.outcome_probabilities(&state, chosen).win - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn separate_stores_do_not_share() {
    let first = Arc::new(PolicyStore::new());
    let second = Arc::new(PolicyStore::new());
    let config = AdaptiveConfig::new().with_seed(9);

    let mut x = adaptive(config, &first);
    let mut o = RandomAgent::with_seed("random".to_string(), 10);
    play_game(&mut x, &mut o).expect("game completes");

    assert!(first.entry_count(config.flags()) > 0);
    assert_eq!(second.entry_count(config.flags()), 0);
}

#[test]
fn concurrent_games_lose_no_updates() {
    let store = Arc::new(PolicyStore::new());
    let flags = PolicyFlags::default();

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut x = AdaptivePlayer::new(
                    format!("adaptive-{t}"),
                    AdaptiveConfig::new().with_seed(t),
                    store,
                );
                let mut o = RandomAgent::with_seed(format!("random-{t}"), 100 + t);
                let mut recorded = 0u64;
                for _ in 0..100 {
                    let record = play_game(&mut x, &mut o).expect("game completes");
                    recorded += record.moves.len().div_ceil(2) as u64;
                }
                recorded
            })
        })
        .collect();

    let recorded: u64 = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread finished"))
        .sum();
    assert_eq!(store.total_observations(flags), recorded);
}

#[test]
fn self_play_training_reduces_losses_to_random() {
    let store = Arc::new(PolicyStore::new());
    let mut learner = adaptive(AdaptiveConfig::new().greedy(true).mirrored(true), &store);
    let mut random = RandomAgent::new("random".to_string());

    let mut run = |seed: u64, games: usize| {
        let mut session = Session::new(SessionConfig {
            games,
            seed: Some(seed),
            alternate_first: true,
            first: Seat::A,
        });
        session
            .run(&mut learner, &mut random)
            .expect("session completes")
    };

    let early = run(1, 300);
    run(2, 3000);
    let late = run(3, 300);

    assert!(
        late.b_win_rate() < early.b_win_rate(),
        "losses to random should fall: early {:.3}, late {:.3}",
        early.b_win_rate(),
        late.b_win_rate()
    );
}
