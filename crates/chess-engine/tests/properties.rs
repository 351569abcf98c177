//! Property tests over random playouts.

use chess_core::{Move, Square};
use chess_engine::{Game, Position, Variant};
use proptest::prelude::*;
use proptest::sample::select;

/// Plays up to `choices.len()` legal moves, picking each by index.
fn playout(variant: Variant, choices: &[usize]) -> Game {
    let mut game = Game::new(variant);
    for &choice in choices {
        let moves = game.legal_moves();
        if moves.is_empty() {
            break;
        }
        let m = moves[choice % moves.len()];
        if let Err(err) = game.make_move(m, None) {
            panic!("listed move {} rejected in {}: {}", m, game.to_fen(), err);
        }
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn fen_roundtrips_through_random_playouts(
        variant in select(Variant::ALL.to_vec()),
        choices in prop::collection::vec(0usize..256, 0..40),
    ) {
        let game = playout(variant, &choices);
        for played in game.moves() {
            let reparsed = Position::from_fen(&played.fen_after).unwrap();
            prop_assert_eq!(reparsed.to_fen(), played.fen_after.clone());
        }
        let fen = game.to_fen();
        let reloaded = Game::from_fen(variant, &fen).unwrap();
        prop_assert_eq!(reloaded.to_fen(), fen);
    }

    #[test]
    fn rejected_moves_leave_the_game_untouched(
        variant in select(Variant::ALL.to_vec()),
        choices in prop::collection::vec(0usize..256, 0..20),
        from in 0u8..64,
        to in 0u8..64,
    ) {
        let mut game = playout(variant, &choices);
        let before = game.to_fen();
        let played = game.moves().len();
        let visits = game.visited_positions().clone();

        let (Some(from), Some(to)) = (Square::from_index(from), Square::from_index(to)) else {
            unreachable!("indices below 64 are squares");
        };
        if game.make_move(Move::new(from, to), None).is_err() {
            prop_assert_eq!(game.to_fen(), before);
            prop_assert_eq!(game.moves().len(), played);
            prop_assert_eq!(game.visited_positions(), &visits);
        }
    }

    #[test]
    fn listed_moves_are_exactly_the_accepted_ones(
        variant in select(Variant::ALL.to_vec()),
        choices in prop::collection::vec(0usize..256, 0..20),
    ) {
        let game = playout(variant, &choices);
        let listed = game.legal_moves();
        for from in (0u8..64).filter_map(Square::from_index) {
            for to in (0u8..64).filter_map(Square::from_index) {
                let m = Move::new(from, to);
                let accepted = game.clone().make_move(m, None).is_ok();
                prop_assert_eq!(accepted, listed.contains(&m), "move {} in {}", m, game.to_fen());
            }
        }
    }
}
