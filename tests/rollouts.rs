//! Property-based random rollouts.
//!
//! Random games on random maps must keep every bookkeeping invariant after
//! every action, and stay reproducible under the same seeds.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use rust_tribes::actions::Command;
use rust_tribes::agent::{play_game, Agent, RandomAgent};
use rust_tribes::core::{GameConfig, GameMode, GameRng};
use rust_tribes::game::{invariant_violations, GameState};
use rust_tribes::setup::GameBuilder;
use rust_tribes::tribe::TribeKind;

fn game(size: usize, tribes: usize, map_seed: u64, seed: u64, mode: GameMode) -> GameState {
    GameBuilder::new(size)
        .with_config(GameConfig::new().with_mode(mode).with_max_turns(12))
        .with_tribes(TribeKind::ALL[..tribes].to_vec())
        .generated(map_seed)
        .build(seed)
        .unwrap()
}

fn mode_strategy() -> impl Strategy<Value = GameMode> {
    prop_oneof![Just(GameMode::Capitals), Just(GameMode::Score)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Bookkeeping stays consistent after every single action.
    #[test]
    fn prop_rollout_keeps_invariants(
        size in 8usize..14,
        tribes in 2usize..=4,
        map_seed in any::<u64>(),
        seed in any::<u64>(),
        mode in mode_strategy(),
    ) {
        let mut gs = game(size, tribes, map_seed, seed, mode);
        let mut rng = GameRng::new(seed);
        for _ in 0..300 {
            let legal = gs.legal_actions();
            let Some(action) = rng.choose(&legal).copied() else {
                break;
            };
            prop_assert!(action.is_feasible(&gs));
            prop_assert!(gs.execute(&action).unwrap());
            let violations = invariant_violations(&gs);
            prop_assert!(violations.is_empty(), "{:?} after {:?}", violations, action);
        }
    }

    /// Stars never underflow and score never drops.
    #[test]
    fn prop_economy_is_monotone_where_it_should_be(
        map_seed in any::<u64>(),
        seed in any::<u64>(),
    ) {
        let mut gs = game(10, 2, map_seed, seed, GameMode::Score);
        let mut rng = GameRng::new(seed ^ 0x5eed);
        let mut scores: Vec<u32> = gs.tribes().map(|t| t.score).collect();
        for _ in 0..250 {
            let legal = gs.legal_actions();
            let Some(action) = rng.choose(&legal).copied() else {
                break;
            };
            gs.execute(&action).unwrap();
            for (i, tribe) in gs.tribes().enumerate() {
                prop_assert!(tribe.score >= scores[i]);
                scores[i] = tribe.score;
            }
        }
    }

    /// Observation only ever grows.
    #[test]
    fn prop_fog_never_returns(
        map_seed in any::<u64>(),
        seed in any::<u64>(),
    ) {
        let mut gs = game(10, 2, map_seed, seed, GameMode::Capitals);
        let mut rng = GameRng::new(seed.rotate_left(7));
        let count = |gs: &GameState| -> Vec<usize> {
            gs.tribes().map(|t| gs.board().observed_count(t.id)).collect()
        };
        let mut seen = count(&gs);
        for _ in 0..200 {
            let legal = gs.legal_actions();
            let Some(action) = rng.choose(&legal).copied() else {
                break;
            };
            gs.execute(&action).unwrap();
            let now = count(&gs);
            for (before, after) in seen.iter().zip(&now) {
                prop_assert!(after >= before);
            }
            seen = now;
        }
    }

    /// Same seeds, same game.
    #[test]
    fn prop_driver_is_deterministic(
        map_seed in any::<u64>(),
        seed in any::<u64>(),
    ) {
        let run = || {
            let mut gs = game(9, 2, map_seed, seed, GameMode::Capitals);
            let mut agents: Vec<Box<dyn Agent>> = vec![
                Box::new(RandomAgent::new(seed)),
                Box::new(RandomAgent::new(seed.wrapping_add(1))),
            ];
            let result = play_game(&mut gs, &mut agents, 400).unwrap();
            (result, gs.snapshot().unwrap())
        };
        prop_assert_eq!(run(), run());
    }
}
