//! Full game management with history tracking.
//!
//! The [`Game`] struct owns the current position and everything a single
//! position cannot know: whose moves were accepted, how often each position
//! occurred, and whether the game has ended and why.

use chess_core::{CastleSide, Color, FenError, FenRecord, Move, NotationError, PieceKind, Square};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::pgn::{self, PgnError, PgnMove};
use crate::rules::{EndReason, GameState, Variant, Verdict};
use crate::san::{self, SanError};
use crate::{movegen, Position, PositionError, RepetitionTable};

/// A recorded move in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    pub mv: Move,
    /// SAN notation for the move, with check or mate suffix.
    pub san: String,
    pub fen_after: String,
    /// Alternative lines recorded against this move, as SAN tokens.
    pub variations: Vec<Vec<String>>,
}

/// Error type for game operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("it is {expected}'s turn")]
    WrongTurn { expected: Color },

    #[error("illegal move {0}: the mover's king would be left in check")]
    IllegalMove(String),

    #[error("game is not in progress: {0}")]
    GameNotInProgress(GameState),

    #[error(transparent)]
    Position(#[from] PositionError),

    #[error(transparent)]
    San(#[from] SanError),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Pgn(#[from] PgnError),
}

/// A chess game under one variant's rules.
///
/// Every accepted move is recorded, the repetition table is updated, and the
/// position is assessed. Once the state leaves
/// [`InProgress`](GameState::InProgress) it never changes again.
#[derive(Debug, Clone)]
pub struct Game {
    variant: Variant,
    /// Position the game started from.
    start: Position,
    position: Position,
    moves: Vec<GameMove>,
    visited: RepetitionTable,
    state: GameState,
    end_reason: Option<EndReason>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Variant::Standard)
    }
}

impl Game {
    /// Creates a game from the variant's built-in start position.
    pub fn new(variant: Variant) -> Self {
        Self::with_config(variant, &GameConfig::default())
            .expect("built-in start positions are valid")
    }

    /// Creates a game from the start position configured for `variant`.
    pub fn with_config(variant: Variant, config: &GameConfig) -> Result<Self, GameError> {
        Self::from_fen(variant, config.start_fen(variant))
    }

    /// Creates a game from any position.
    ///
    /// The position is assessed immediately, so a mate or stalemate FEN
    /// yields a game that is already over.
    pub fn from_fen(variant: Variant, fen: &str) -> Result<Self, GameError> {
        let position = Position::from_fen_with_variant(fen, variant)?;
        let mut game = Game {
            variant,
            start: position.clone(),
            position,
            moves: Vec::new(),
            visited: RepetitionTable::new(),
            state: GameState::InProgress,
            end_reason: None,
        };
        game.visited.record(game.position.signature());
        game.assess();
        Ok(game)
    }

    /// Creates a game from PGN text, honouring its `Variant` and `FEN` tags.
    pub fn from_pgn(text: &str) -> Result<Self, GameError> {
        let parsed = pgn::parse_pgn(text)?;
        let variant = parsed
            .tag("Variant")
            .and_then(|name| name.parse().ok())
            .unwrap_or_default();
        let mut game = match parsed.tag("FEN") {
            Some(fen) => Self::from_fen(variant, fen)?,
            None => Self::new(variant),
        };
        game.play_pgn_moves(&parsed.moves)?;
        Ok(game)
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[inline]
    pub fn is_in_progress(&self) -> bool {
        self.state == GameState::InProgress
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn moves(&self) -> &[GameMove] {
        &self.moves
    }

    pub fn visited_positions(&self) -> &RepetitionTable {
        &self.visited
    }

    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.variant
            .rules()
            .is_in_check(self.position.side_to_move, &self.position)
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        if !self.is_in_progress() {
            return Vec::new();
        }
        movegen::legal_moves(&self.position)
    }

    pub fn has_threefold_repetition(&self) -> bool {
        self.visited.has_threefold_repetition()
    }

    /// Forgets all recorded positions.
    pub fn clear_visited_positions(&mut self) {
        self.visited.clear();
    }

    /// Ends an in-progress game without a result.
    pub fn abort(&mut self) -> Result<(), GameError> {
        if !self.is_in_progress() {
            return Err(GameError::GameNotInProgress(self.state));
        }
        self.finish(Verdict {
            state: GameState::Aborted,
            reason: EndReason::Aborted,
        });
        Ok(())
    }

    /// Plays a move given as origin and destination square names.
    ///
    /// A king moving two files from its home square castles.
    pub fn make_explicit_move(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<char>,
    ) -> Result<&GameMove, GameError> {
        let from = Square::from_name(from)?;
        let to = Square::from_name(to)?;
        let m = self.castle_by_king_step(from, to).unwrap_or(Move::new(from, to));
        self.make_move(m, promotion)
    }

    /// Plays a move given as a SAN token.
    pub fn make_pgn_move(&mut self, token: &str) -> Result<&GameMove, GameError> {
        if !self.is_in_progress() {
            return Err(GameError::GameNotInProgress(self.state));
        }
        let parsed = san::san_to_move(&self.position, token)?;
        self.make_move(parsed.mv, parsed.promotion)
    }

    /// Plays the main line of PGN movetext and returns how many moves were played.
    ///
    /// Stops at the first move that fails; the moves before it stay played.
    pub fn play_pgn(&mut self, movetext: &str) -> Result<usize, GameError> {
        let (moves, _) = pgn::parse_movetext(movetext)?;
        self.play_pgn_moves(&moves)
    }

    fn play_pgn_moves(&mut self, moves: &[PgnMove]) -> Result<usize, GameError> {
        for (played, pgn_move) in moves.iter().enumerate() {
            if let Err(err) = self.make_pgn_move(&pgn_move.san) {
                debug!(played, token = %pgn_move.san, error = %err, "PGN replay stopped");
                return Err(err);
            }
            if let Some(last) = self.moves.last_mut() {
                last.variations = pgn_move
                    .variations
                    .iter()
                    .map(|line| line.iter().map(|m| m.san.clone()).collect())
                    .collect();
            }
        }
        Ok(moves.len())
    }

    /// Plays a move for the side to move.
    ///
    /// Rejected moves leave the game exactly as it was.
    pub fn make_move(&mut self, m: Move, promotion: Option<char>) -> Result<&GameMove, GameError> {
        if !self.is_in_progress() {
            return Err(GameError::GameNotInProgress(self.state));
        }
        let side = self.position.side_to_move;
        if let Move::Piece { from, .. } = m {
            let piece = self
                .position
                .piece_at(from)
                .ok_or(PositionError::PieceNotFound(from))?;
            if piece.color != side {
                return Err(GameError::WrongTurn { expected: side });
            }
        }

        let rules = self.variant.rules();
        let (next, outcome) = movegen::apply_move(&self.position, m, promotion)?;
        if rules.is_illegal_board_state(&next) {
            return Err(GameError::IllegalMove(m.to_string()));
        }

        let san = san::move_to_san(&self.position, m, promotion);
        self.position = next;
        if outcome.captured {
            self.clear_visited_positions();
        }
        self.visited.record(self.position.signature());

        let fen_after = self.position.to_fen();
        debug!(%side, %m, %san, fen = %fen_after, "move played");
        self.moves.push(GameMove {
            mv: m,
            san,
            fen_after,
            variations: Vec::new(),
        });
        self.assess();

        let index = self.moves.len() - 1;
        Ok(&self.moves[index])
    }

    /// Recognizes `e1g1`-style king moves of the side to move as castling.
    fn castle_by_king_step(&self, from: Square, to: Square) -> Option<Move> {
        let king = self.position.piece_at(from)?;
        if king.kind != PieceKind::King || king.color != self.position.side_to_move {
            return None;
        }
        let home = king.color.home_row() as i8;
        if from.col() != 4 || from.row() != home || to.row() != home {
            return None;
        }
        CastleSide::BOTH
            .into_iter()
            .find(|side| side.king_target_col() == to.col())
            .map(Move::Castle)
    }

    fn assess(&mut self) {
        if !self.is_in_progress() {
            return;
        }
        if let Some(verdict) = self
            .variant
            .rules()
            .assess_board_state(&self.position, &self.visited)
        {
            self.finish(verdict);
        }
    }

    fn finish(&mut self, verdict: Verdict) {
        info!(
            variant = %self.variant,
            state = %verdict.state,
            reason = %verdict.reason,
            moves = self.moves.len(),
            "game over"
        );
        self.state = verdict.state;
        self.end_reason = Some(verdict.reason);
    }

    /// Exports the game as PGN.
    ///
    /// `tags` come first in the given order. `Variant`, `SetUp`/`FEN` and
    /// `Result` are added unless already present.
    pub fn to_pgn(&self, tags: &[(&str, &str)]) -> String {
        let mut all: Vec<(String, String)> = tags
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let mut add = |name: &str, value: String| {
            if !all.iter().any(|(n, _)| n == name) {
                all.push((name.to_string(), value));
            }
        };
        if self.variant != Variant::Standard {
            add("Variant", self.variant.to_string());
        }
        let start_fen = self.start.to_fen();
        if start_fen != FenRecord::STARTPOS {
            add("SetUp", "1".to_string());
            add("FEN", start_fen);
        }
        let result = self.state.result_token();
        add("Result", result.to_string());

        let sans: Vec<String> = self.moves.iter().map(|m| m.san.clone()).collect();
        pgn::write_pgn(
            &all,
            &sans,
            self.start.fullmove_number,
            self.start.side_to_move == Color::Black,
            result,
        )
    }
}
