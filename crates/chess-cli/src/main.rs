//! Chess CLI - replays moves through the variant rules engine.
//!
//! Moves may be given in coordinate notation (`e2e4`, `e7e8n`) or SAN
//! (`Nf3`, `O-O`). The final position, game state and end reason are printed
//! after the last move.

use std::path::PathBuf;

use anyhow::Context;
use chess_core::Square;
use chess_engine::movegen::perft_divide;
use chess_engine::{Game, GameConfig, Position, Variant};
use clap::Parser;

/// Replays chess moves under the chosen variant's rules.
#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Replays moves through the chess variant rules engine")]
struct Args {
    /// Variant to play: standard, atomic, horde or chess960
    #[arg(long)]
    variant: Option<Variant>,

    /// Start from this FEN instead of the variant's start position
    #[arg(long)]
    fen: Option<String>,

    /// TOML file with the default variant and start positions
    #[arg(long)]
    config: Option<PathBuf>,

    /// PGN movetext to play before the positional moves
    #[arg(long)]
    pgn: Option<String>,

    /// Print the game as PGN at the end
    #[arg(long)]
    export: bool,

    /// Count leaf nodes to this depth from the final position
    #[arg(long)]
    perft: Option<u32>,

    /// Moves in coordinate notation or SAN
    moves: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let variant = args.variant.unwrap_or(config.variant);
    tracing::info!("Variant: {}", variant);

    let mut game = match &args.fen {
        Some(fen) => Game::from_fen(variant, fen).context("invalid start FEN")?,
        None => Game::with_config(variant, &config).context("invalid configured start FEN")?,
    };

    if let Some(movetext) = &args.pgn {
        let played = game.play_pgn(movetext).context("replaying PGN movetext")?;
        tracing::info!("Replayed {} PGN moves", played);
    }

    for token in &args.moves {
        let san = play_token(&mut game, token).with_context(|| format!("move {}", token))?;
        println!("{}", san);
    }

    println!("FEN: {}", game.to_fen());
    match game.end_reason() {
        Some(reason) => println!("State: {} ({})", game.state(), reason),
        None => println!("State: {}", game.state()),
    }

    if args.export {
        println!();
        print!("{}", game.to_pgn(&[]));
    }

    if let Some(depth) = args.perft {
        print_perft(game.position(), depth);
    }

    Ok(())
}

/// Plays one move token and returns its SAN.
fn play_token(game: &mut Game, token: &str) -> anyhow::Result<String> {
    let played = match coordinate_move(token) {
        Some((from, to, promotion)) => game.make_explicit_move(from, to, promotion)?,
        None => game.make_pgn_move(token)?,
    };
    Ok(played.san.clone())
}

/// Splits `e7e8q` into origin, destination and promotion letter.
fn coordinate_move(token: &str) -> Option<(&str, &str, Option<char>)> {
    if !token.is_ascii() || !(4..=5).contains(&token.len()) {
        return None;
    }
    let (from, to) = (&token[0..2], &token[2..4]);
    if Square::from_name(from).is_err() || Square::from_name(to).is_err() {
        return None;
    }
    Some((from, to, token[4..].chars().next()))
}

fn print_perft(position: &Position, depth: u32) {
    let divide = perft_divide(position, depth);
    let total: u64 = divide.iter().map(|(_, nodes)| nodes).sum();
    for (mv, nodes) in &divide {
        println!("{}: {}", mv, nodes);
    }
    println!("Nodes searched: {}", total);
}
