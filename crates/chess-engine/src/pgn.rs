//! PGN (Portable Game Notation) reading and writing.
//!
//! The reader accepts tag pairs, brace and semicolon comments, numeric
//! annotation glyphs, move numbers and nested variations. It only splits the
//! text into moves: interpreting each move is left to
//! [`Game::make_pgn_move`](crate::Game::make_pgn_move).

use std::fmt::Write;

use thiserror::Error;

/// Errors raised while reading PGN text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PgnError {
    #[error("malformed tag pair: {0}")]
    MalformedTag(String),

    #[error("unterminated comment")]
    UnterminatedComment,

    #[error("unbalanced variation parentheses")]
    UnbalancedVariation,
}

/// A move token with its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PgnMove {
    /// The SAN token as written, annotation suffixes included.
    pub san: String,
    pub comment: Option<String>,
    /// Alternatives to this move, each a line of moves.
    pub variations: Vec<Vec<PgnMove>>,
}

/// A parsed PGN game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PgnGame {
    pub tags: Vec<(String, String)>,
    pub moves: Vec<PgnMove>,
    /// The game termination marker, if present.
    pub result: Option<String>,
}

impl PgnGame {
    /// Value of the first tag called `name`.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// SAN tokens of the main line.
    pub fn main_line(&self) -> Vec<&str> {
        self.moves.iter().map(|m| m.san.as_str()).collect()
    }
}

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Parses one PGN game: tag pairs followed by movetext.
pub fn parse_pgn(text: &str) -> Result<PgnGame, PgnError> {
    let mut tags = Vec::new();
    let mut movetext = String::new();
    let mut in_header = true;

    for line in text.lines() {
        let trimmed = line.trim();
        if in_header && trimmed.starts_with('[') {
            tags.push(parse_tag(trimmed)?);
            continue;
        }
        if trimmed.is_empty() && movetext.is_empty() {
            continue;
        }
        in_header = false;
        movetext.push_str(line);
        movetext.push('\n');
    }

    let (moves, result) = parse_movetext(&movetext)?;
    Ok(PgnGame {
        tags,
        moves,
        result,
    })
}

fn parse_tag(line: &str) -> Result<(String, String), PgnError> {
    let malformed = || PgnError::MalformedTag(line.to_string());
    let inner = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(malformed)?
        .trim();
    let (name, rest) = inner.split_once(char::is_whitespace).ok_or_else(malformed)?;
    let value = rest
        .trim()
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(malformed)?;
    Ok((name.to_string(), value.replace("\\\"", "\"")))
}

/// Splits movetext into main-line moves and the result marker.
pub fn parse_movetext(text: &str) -> Result<(Vec<PgnMove>, Option<String>), PgnError> {
    let mut lines: Vec<Vec<PgnMove>> = vec![Vec::new()];
    let mut result = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut comment = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => comment.push(ch),
                        None => return Err(PgnError::UnterminatedComment),
                    }
                }
                if let Some(last) = lines.last_mut().and_then(|line| line.last_mut()) {
                    last.comment = Some(comment.trim().to_string());
                }
            }
            ';' => {
                for ch in chars.by_ref() {
                    if ch == '\n' {
                        break;
                    }
                }
            }
            '(' => lines.push(Vec::new()),
            ')' => {
                if lines.len() < 2 {
                    return Err(PgnError::UnbalancedVariation);
                }
                let variation = lines.pop().unwrap_or_default();
                if let Some(last) = lines.last_mut().and_then(|line| line.last_mut()) {
                    last.variations.push(variation);
                }
            }
            c if c.is_whitespace() => {}
            first => {
                let mut token = String::from(first);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || matches!(next, '{' | '}' | '(' | ')' | ';') {
                        break;
                    }
                    token.push(next);
                    chars.next();
                }

                if RESULTS.contains(&token.as_str()) {
                    if lines.len() == 1 {
                        result = Some(token);
                    }
                    continue;
                }
                let san = strip_move_number(&token);
                if san.is_empty() || san.starts_with('$') {
                    continue;
                }
                if let Some(line) = lines.last_mut() {
                    line.push(PgnMove {
                        san: san.to_string(),
                        ..PgnMove::default()
                    });
                }
            }
        }
    }

    if lines.len() != 1 {
        return Err(PgnError::UnbalancedVariation);
    }
    Ok((lines.pop().unwrap_or_default(), result))
}

/// Drops a leading `12.` or `12...` from a token.
fn strip_move_number(token: &str) -> &str {
    let rest = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < token.len() && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

/// Renders a complete PGN game.
///
/// `first_move_number` and `black_first` describe the starting position, so
/// games set up from a FEN get correct numbering. Movetext is wrapped at 80
/// columns.
pub fn write_pgn(
    tags: &[(String, String)],
    moves: &[String],
    first_move_number: u32,
    black_first: bool,
    result: &str,
) -> String {
    let mut out = String::new();
    for (name, value) in tags {
        let _ = writeln!(out, "[{} \"{}\"]", name, value.replace('"', "\\\""));
    }
    if !tags.is_empty() {
        out.push('\n');
    }

    let mut tokens = Vec::with_capacity(moves.len() * 3 / 2 + 1);
    let mut number = first_move_number;
    let mut black_to_move = black_first;
    for (i, san) in moves.iter().enumerate() {
        if !black_to_move {
            tokens.push(format!("{}.", number));
        } else if i == 0 {
            tokens.push(format!("{}...", number));
        }
        tokens.push(san.clone());
        if black_to_move {
            number += 1;
        }
        black_to_move = !black_to_move;
    }
    tokens.push(result.to_string());

    let mut line = String::new();
    for token in tokens {
        if !line.is_empty() && line.len() + 1 + token.len() > 80 {
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&token);
    }
    out.push_str(&line);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOOLS_MATE: &str = r#"[Event "Casual"]
[White "A"]
[Black "B"]
[Result "0-1"]

1. f3 {weak} e5 2. g4?! (2. e4 Nf6 (2... Nc6)) ; tempting
2... Qh4# $1 0-1
"#;

    #[test]
    fn parses_tags() {
        let game = parse_pgn(FOOLS_MATE).unwrap();
        assert_eq!(game.tags.len(), 4);
        assert_eq!(game.tag("White"), Some("A"));
        assert_eq!(game.tag("Result"), Some("0-1"));
        assert_eq!(game.tag("Round"), None);
    }

    #[test]
    fn parses_main_line_and_result() {
        let game = parse_pgn(FOOLS_MATE).unwrap();
        assert_eq!(game.main_line(), vec!["f3", "e5", "g4?!", "Qh4#"]);
        assert_eq!(game.result.as_deref(), Some("0-1"));
    }

    #[test]
    fn attaches_comments_and_variations() {
        let game = parse_pgn(FOOLS_MATE).unwrap();
        assert_eq!(game.moves[0].comment.as_deref(), Some("weak"));

        let g4 = &game.moves[2];
        assert_eq!(g4.variations.len(), 1);
        let line: Vec<&str> = g4.variations[0].iter().map(|m| m.san.as_str()).collect();
        assert_eq!(line, vec!["e4", "Nf6"]);
        assert_eq!(g4.variations[0][1].variations[0][0].san, "Nc6");
    }

    #[test]
    fn movetext_without_tags() {
        let (moves, result) = parse_movetext("1.e4 e5 2.Nf3 *").unwrap();
        let sans: Vec<&str> = moves.iter().map(|m| m.san.as_str()).collect();
        assert_eq!(sans, vec!["e4", "e5", "Nf3"]);
        assert_eq!(result.as_deref(), Some("*"));
    }

    #[test]
    fn castling_zeros_are_not_results() {
        let (moves, result) = parse_movetext("1. 0-0 0-0-0").unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(result, None);
    }

    #[test]
    fn rejects_broken_text() {
        assert_eq!(
            parse_movetext("1. e4 {unclosed"),
            Err(PgnError::UnterminatedComment)
        );
        assert_eq!(
            parse_movetext("1. e4 (1. d4"),
            Err(PgnError::UnbalancedVariation)
        );
        assert_eq!(parse_movetext("1. e4 )"), Err(PgnError::UnbalancedVariation));
        assert!(matches!(
            parse_pgn("[Event Casual]\n1. e4"),
            Err(PgnError::MalformedTag(_))
        ));
    }

    #[test]
    fn writes_numbered_movetext() {
        let moves: Vec<String> = ["f3", "e5", "g4", "Qh4#"].iter().map(|s| s.to_string()).collect();
        let tags = vec![("Result".to_string(), "0-1".to_string())];
        let pgn = write_pgn(&tags, &moves, 1, false, "0-1");
        assert_eq!(pgn, "[Result \"0-1\"]\n\n1. f3 e5 2. g4 Qh4# 0-1\n");
    }

    #[test]
    fn writes_black_first_numbering() {
        let moves = vec!["e5".to_string(), "Nf3".to_string()];
        assert_eq!(write_pgn(&[], &moves, 7, true, "*"), "7... e5 8. Nf3 *\n");
    }

    #[test]
    fn wraps_long_movetext() {
        let moves = vec!["Nf3".to_string(); 60];
        let pgn = write_pgn(&[], &moves, 1, false, "*");
        assert!(pgn.lines().all(|line| line.len() <= 80));
        assert_eq!(parse_movetext(&pgn).unwrap().0.len(), 60);
    }
}
