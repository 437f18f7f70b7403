//! Replay a sequence of moves and print the resulting position.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rookery_core::perft::divide;
use rookery_core::{Game, Position, PromotionPiece};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "rookery", about = "Replay chess moves under the full rules.")]
struct Cli {
    /// Start from this FEN instead of the standard position
    #[arg(long)]
    fen: Option<String>,
    /// After replaying, print a perft breakdown to this depth
    #[arg(long)]
    perft: Option<usize>,
    /// Moves in coordinate notation, e.g. `e2e4` or `e7e8q`
    moves: Vec<String>,
}

/// Split `e2e4` / `e7e8q` into origin, destination and promotion choice.
fn parse_move(text: &str) -> Result<(Position, Position, Option<PromotionPiece>)> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        bail!("malformed move `{text}`");
    }
    let from = Position::from_algebraic(&text[0..2])
        .with_context(|| format!("bad origin square in `{text}`"))?;
    let to = Position::from_algebraic(&text[2..4])
        .with_context(|| format!("bad destination square in `{text}`"))?;
    let promotion = match text[4..].chars().next() {
        Some(c) => Some(
            PromotionPiece::from_char(c)
                .with_context(|| format!("bad promotion piece in `{text}`"))?,
        ),
        None => None,
    };
    Ok((from, to, promotion))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut game = match &cli.fen {
        Some(fen) => fen
            .parse::<Game>()
            .with_context(|| format!("invalid FEN `{fen}`"))?,
        None => Game::new(),
    };
    info!(fen = %game, "game loaded");

    for text in &cli.moves {
        let (from, to, promotion) = parse_move(text)?;
        let result = game
            .apply_turn(from, to, promotion)
            .with_context(|| format!("cannot play `{text}`"))?;
        debug!(mv = %text, ?result, "move replayed");
    }

    println!("{}", game.board().pretty());
    println!("fen: {game}");
    println!("status: {}", game.status());

    if let Some(depth) = cli.perft {
        let results = divide(&game, depth);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        for (mv, nodes) in &results {
            println!("{mv}: {nodes}");
        }
        println!("\nNodes searched: {total}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_move() {
        let (from, to, promo) = parse_move("e2e4").unwrap();
        assert_eq!(from.to_string(), "e2");
        assert_eq!(to.to_string(), "e4");
        assert_eq!(promo, None);
    }

    #[test]
    fn parse_promotion() {
        let (_, _, promo) = parse_move("e7e8n").unwrap();
        assert_eq!(promo, Some(PromotionPiece::Knight));
    }

    #[test]
    fn reject_garbage() {
        assert!(parse_move("e2").is_err());
        assert!(parse_move("e2e9").is_err());
        assert!(parse_move("e7e8k").is_err());
        assert!(parse_move("é2e4").is_err());
    }
}
