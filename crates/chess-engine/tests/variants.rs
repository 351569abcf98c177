//! Whole-game scenarios for each variant.

use chess_core::{CastleSide, Color, FenRecord, Move, Square};
use chess_engine::{
    EndReason, Game, GameConfig, GameError, GameState, PositionError, StartPositions, Variant,
};

fn game(variant: Variant, fen: &str) -> Game {
    Game::from_fen(variant, fen).expect("valid FEN")
}

#[test]
fn atomic_explosion_removes_adjacent_king() {
    let mut game = game(Variant::Atomic, "4k3/3n4/8/8/8/8/8/3QK3 w - - 0 1");
    let played = game.make_explicit_move("d1", "d7", None).unwrap();
    assert_eq!(played.san, "Qxd7#");
    assert_eq!(game.to_fen(), "8/8/8/8/8/8/8/4K3 b - - 0 1");
    assert_eq!(game.state(), GameState::VictoryWhite);
    assert_eq!(game.end_reason(), Some(EndReason::KingExploded));
}

#[test]
fn atomic_cannot_explode_own_king() {
    let mut game = game(Variant::Atomic, "4k3/8/8/8/8/8/3p4/3QK3 w - - 0 1");
    let before = game.to_fen();
    assert!(matches!(
        game.make_explicit_move("d1", "d2", None),
        Err(GameError::IllegalMove(_))
    ));
    assert_eq!(game.to_fen(), before);
}

#[test]
fn atomic_adjacent_kings_ignore_check() {
    let fen = "8/8/8/3k4/r2K4/8/7P/8 w - - 0 1";

    let mut atomic = game(Variant::Atomic, fen);
    assert!(!atomic.is_check());
    let played = atomic.make_explicit_move("h2", "h3", None).unwrap();
    assert_eq!(played.san, "h3");
    assert!(!atomic.is_check());
    assert!(atomic.is_in_progress());
    atomic.make_explicit_move("d5", "d6", None).unwrap();
    assert!(atomic.is_check());

    let mut standard = game(Variant::Standard, fen);
    assert!(matches!(
        standard.make_explicit_move("h2", "h3", None),
        Err(GameError::IllegalMove(_))
    ));
}

#[test]
fn atomic_castling_beside_enemy_king() {
    let mut game = game(Variant::Atomic, "r3k2r/3K4/8/8/8/8/8/8 b kq - 0 1");
    assert!(!game.is_check());
    let moves = game.legal_moves();
    assert!(moves.contains(&Move::Castle(CastleSide::King)));
    assert!(moves.contains(&Move::Castle(CastleSide::Queen)));

    let played = game.make_pgn_move("O-O-O").unwrap();
    assert_eq!(played.san, "O-O-O");
    assert_eq!(game.to_fen(), "2kr3r/3K4/8/8/8/8/8/8 w - - 1 2");
    assert!(!game.is_check());
}

#[test]
fn atomic_en_passant_explodes_around_captured_pawn() {
    let mut game = game(Variant::Atomic, "4k3/8/8/3pP3/2n5/8/8/4K3 w - d6 0 2");
    game.make_explicit_move("e5", "d6", None).unwrap();
    assert_eq!(game.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 2");
}

#[test]
fn atomic_explosion_revokes_castling() {
    let mut game = game(Variant::Atomic, "r3k2r/p7/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let played = game.make_explicit_move("a1", "a7", None).unwrap();
    assert_eq!(played.san, "Rxa7");
    assert_eq!(game.to_fen(), "4k2r/8/8/8/8/8/8/4K2R b Kk - 0 1");
}

#[test]
fn horde_start_position() {
    let game = Game::new(Variant::Horde);
    assert_eq!(game.to_fen(), FenRecord::HORDE_STARTPOS);
    assert!(game.is_in_progress());
    assert!(!game.is_check());
    assert!(!game.legal_moves().is_empty());
}

#[test]
fn horde_white_cannot_castle() {
    let mut game = game(Variant::Horde, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert_eq!(
        game.make_explicit_move("e1", "g1", None).unwrap_err(),
        GameError::Position(PositionError::IllegalCastling {
            color: Color::White,
            side: CastleSide::King
        })
    );
    assert!(!game
        .legal_moves()
        .iter()
        .any(|m| matches!(m, Move::Castle(_))));
}

#[test]
fn horde_eliminated_loses() {
    let mut game = game(Variant::Horde, "4k3/8/8/8/8/8/p7/1P6 b - - 0 1");
    let played = game.make_pgn_move("axb1=Q").unwrap();
    assert_eq!(played.san, "axb1=Q#");
    assert_eq!(game.state(), GameState::VictoryBlack);
    assert_eq!(game.end_reason(), Some(EndReason::HordeEliminated));
}

#[test]
fn horde_without_moves_is_a_draw() {
    let mut game = game(Variant::Horde, "7k/8/8/p7/P7/8/8/8 b - - 0 1");
    game.make_explicit_move("h8", "g8", None).unwrap();
    assert_eq!(game.state(), GameState::Draw);
    assert_eq!(game.end_reason(), Some(EndReason::Stalemate));
}

#[test]
fn standard_castling_rights_follow_king_and_rooks() {
    let mut game = game(Variant::Standard, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    for (from, to) in [("e1", "f1"), ("a8", "a7"), ("f1", "e1"), ("a7", "a8")] {
        game.make_explicit_move(from, to, None).unwrap();
    }
    assert_eq!(game.position().castling.to_fen_field(), "k");
    assert!(matches!(
        game.make_pgn_move("O-O"),
        Err(GameError::Position(PositionError::IllegalCastling { .. }))
    ));
}

#[test]
fn standard_rook_capture_revokes_both_sides() {
    let mut game = game(Variant::Standard, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let played = game.make_explicit_move("a1", "a8", None).unwrap();
    assert_eq!(played.san, "Rxa8+");
    assert_eq!(game.to_fen(), "R3k2r/8/8/8/8/8/8/4K2R b Kk - 0 1");
}

#[test]
fn standard_castling_through_attack_is_refused() {
    let mut game = game(Variant::Standard, "4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let before = game.to_fen();
    assert!(game.make_pgn_move("O-O").is_err());
    assert_eq!(game.to_fen(), before);
    game.make_pgn_move("O-O-O").unwrap();
    assert_eq!(game.to_fen(), "4kr2/8/8/8/8/8/8/2KR3R b - - 1 1");
}

#[test]
fn standard_castling_out_of_check_is_refused() {
    let mut game = game(Variant::Standard, "4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(game.is_check());
    assert!(game.make_explicit_move("e1", "g1", None).is_err());
    assert!(game.make_explicit_move("e1", "c1", None).is_err());
}

#[test]
fn chess960_from_config() {
    let config = GameConfig {
        variant: Variant::Chess960,
        start_positions: StartPositions {
            chess960: "bqnb1rkr/pppppppp/8/8/8/8/PPPPPPPP/BQNB1RKR w - - 0 1".to_string(),
            ..StartPositions::default()
        },
    };
    let mut game = Game::with_config(config.variant, &config).unwrap();
    assert_eq!(game.variant(), Variant::Chess960);
    let knight = Move::new(
        Square::from_name("c1").unwrap(),
        Square::from_name("d3").unwrap(),
    );
    assert!(game.legal_moves().contains(&knight));
    assert_eq!(game.make_pgn_move("Nd3").unwrap().mv, knight);
}

#[test]
fn config_from_toml_drives_game() {
    let config = GameConfig::from_toml_str(
        r#"
variant = "atomic"

[start_positions]
atomic = "4k3/3n4/8/8/8/8/8/3QK3 w - - 0 1"
"#,
    )
    .unwrap();
    let mut game = Game::with_config(config.variant, &config).unwrap();
    game.make_pgn_move("Qxd7").unwrap();
    assert_eq!(game.state(), GameState::VictoryWhite);
}
