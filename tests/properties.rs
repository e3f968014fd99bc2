// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Property-based tests for the board, players and simulation.

use proptest::prelude::*;

use chutes_sim::{Board, CarryRules, Player, Simulation, Variant};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop::sample::select(Variant::ALL.to_vec())
}

fn field_strategy() -> impl Strategy<Value = Vec<Variant>> {
    prop::collection::vec(variant_strategy(), 1..=6)
}

proptest! {
    // Squares without a link never move the player
    #[test]
    fn adjust_matches_links(square in -10..200i32) {
        let board = Board::<i32>::standard();
        let expected = board.destination(square).map_or(0, |end| end - square);
        prop_assert_eq!(expected, board.adjust(square));
        prop_assert_eq!(board.is_link_start(square), expected != 0);
    }

    // Every completed turn is counted and ends off every link start
    #[test]
    fn turns_are_counted(seed in any::<u64>(), variant in variant_strategy(), k in 1..60usize) {
        let board = Board::<i32>::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut player = Player::new(&board, variant, CarryRules::default());
        for _ in 0..k {
            let turn = player.take_turn(&mut rng);
            prop_assert!(!board.is_link_start(turn.position), "rested on {}", turn.position);
            prop_assert!((1..=6).contains(&turn.roll));
        }
        prop_assert_eq!(k, player.moves_taken());
    }

    // A bonus is applied exactly once, on the turn after a chute
    #[test]
    fn resilient_bonus_once(first in 1..=6u8, second in 1..=6u8, extra in 0..4i32) {
        let board = Board::<i32>::new(Some(&[(first as i32, 0)]), Some(&[]), Some(100)).unwrap();
        let rules = CarryRules { extra_steps: extra, dropped_steps: 1 };
        let mut player = Player::new(&board, Variant::Resilient, rules);
        let fall = player.advance(first);
        prop_assert!(fall.adjustment < 0);
        let bonus = player.advance(second);
        prop_assert_eq!(second as i32 + extra, bonus.landed - fall.position);
        let after = player.advance(second);
        let refell = if bonus.adjustment < 0 { extra } else { 0 };
        prop_assert_eq!(refell, after.carry);
    }

    // Same seed and field, same results
    #[test]
    fn simulation_deterministic(seed in any::<u64>(), field in field_strategy(), n in 0..8usize) {
        let mut first = Simulation::<i32>::standard(field.clone(), seed).unwrap();
        let mut second = Simulation::<i32>::standard(field, seed).unwrap();
        first.run(n).unwrap();
        second.run(n).unwrap();
        prop_assert_eq!(first.results(), second.results());
    }

    // Aggregates agree with the recorded results
    #[test]
    fn aggregates_consistent(seed in any::<u64>(), field in field_strategy(), n in 0..20usize) {
        let mut sim = Simulation::<i32>::standard(field.clone(), seed).unwrap();
        sim.run(n).unwrap();
        let wins = sim.wins_by_variant();
        let durations = sim.durations_by_variant();
        prop_assert_eq!(n, sim.results().len());
        prop_assert_eq!(n, wins.values().sum::<usize>());
        prop_assert_eq!(field.len(), sim.players_by_variant().values().sum::<usize>());
        for variant in &field {
            prop_assert_eq!(wins[variant], durations[variant].len());
        }
        for result in sim.results() {
            prop_assert!(field.contains(&result.winner));
        }
    }
}
