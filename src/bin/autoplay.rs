//! Play a batch of games headlessly and log the results.
//!
//! ```text
//! autoplay [games] [height] [width] [mines] [seed] [single|fixpoint]
//! ```
//!
//! Set `RUST_LOG=debug` to see every learned cell and statement.

use std::process::ExitCode;

use rust_minesweeper::{BoardConfig, InferenceMode, SelfPlayConfig, SelfPlayWorker};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            tracing::error!("{message}");
            eprintln!("usage: autoplay [games] [height] [width] [mines] [seed] [single|fixpoint]");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = config.board.validate() {
        tracing::error!(%err, "invalid board");
        return ExitCode::FAILURE;
    }

    match SelfPlayWorker::new(config).run() {
        Ok(stats) => {
            println!(
                "{} games: {} won, {} lost, {} stalled ({:.1}% win rate, {:.2} guesses/game)",
                stats.games,
                stats.wins,
                stats.losses,
                stats.stalls,
                stats.win_rate() * 100.0,
                stats.mean_random_moves(),
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "simulation aborted");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<SelfPlayConfig, String> {
    let defaults = SelfPlayConfig::default();
    let board = defaults.board;

    let games = next_number(&mut args, "games", defaults.games as u64)? as usize;
    let height = next_number(&mut args, "height", board.height as u64)? as usize;
    let width = next_number(&mut args, "width", board.width as u64)? as usize;
    let mines = next_number(&mut args, "mines", board.mines as u64)? as usize;
    let seed = next_number(&mut args, "seed", defaults.seed_offset)?;
    let inference = match args.next().as_deref() {
        None | Some("single") => InferenceMode::SinglePass,
        Some("fixpoint") => InferenceMode::Fixpoint,
        Some(other) => return Err(format!("unknown inference mode {other:?}")),
    };

    Ok(defaults
        .with_games(games)
        .with_board(BoardConfig::new(height, width, mines))
        .with_seed_offset(seed)
        .with_inference(inference))
}

fn next_number(args: &mut impl Iterator<Item = String>, name: &str, default: u64) -> Result<u64, String> {
    match args.next() {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{name} must be a non-negative integer, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_defaults() {
        let config = parse_args(args(&[])).unwrap();
        assert_eq!(config.games, 100);
        assert_eq!(config.board, BoardConfig::default());
        assert_eq!(config.inference, InferenceMode::SinglePass);
    }

    #[test]
    fn test_parse_all() {
        let config = parse_args(args(&["10", "16", "30", "99", "5", "fixpoint"])).unwrap();
        assert_eq!(config.games, 10);
        assert_eq!(config.board, BoardConfig::new(16, 30, 99));
        assert_eq!(config.seed_offset, 5);
        assert_eq!(config.inference, InferenceMode::Fixpoint);
    }

    #[test]
    fn test_oversized_board_fails_validation() {
        let config = parse_args(args(&["1", "99999999999", "99999999999"])).unwrap();
        assert!(config.board.validate().is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_args(args(&["ten"])).is_err());
        assert!(parse_args(args(&["1", "2", "2", "1", "0", "smart"])).is_err());
    }
}
