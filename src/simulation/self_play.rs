//! Headless self-play.
//!
//! Pits a fresh `KnowledgeEngine` against a fresh `Minefield` per game. The
//! agent always takes a proven-safe cell when it has one and falls back to a
//! uniform random guess otherwise. Every game gets its own seed, so games are
//! independent and replayable.

use tracing::{debug, info};

use crate::board::{Minefield, Reveal};
use crate::core::{BoardConfig, EngineConfig, GameRng, InferenceMode, PlayError};
use crate::knowledge::KnowledgeEngine;

use super::record::{GameOutcome, GameRecord, MoveKind, MoveRecord, SimulationStats};

/// Configuration for a batch of simulated games.
#[derive(Clone, Debug)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub games: usize,

    /// Board every game is played on.
    pub board: BoardConfig,

    /// Inference mode for the agent.
    pub inference: InferenceMode,

    /// Seed offset (combined with game index for unique seeds).
    pub seed_offset: u64,

    /// Maximum reveals per game.
    pub max_moves: usize,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            games: 100,
            board: BoardConfig::default(),
            inference: InferenceMode::default(),
            seed_offset: 0,
            max_moves: 10_000,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    pub fn with_inference(mut self, inference: InferenceMode) -> Self {
        self.inference = inference;
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    pub fn with_max_moves(mut self, max: usize) -> Self {
        self.max_moves = max;
        self
    }

    /// Seed for the game at `index`.
    pub fn game_seed(&self, index: usize) -> u64 {
        self.seed_offset.wrapping_add(index as u64)
    }
}

/// Runs self-play games.
pub struct SelfPlayWorker {
    config: SelfPlayConfig,
}

impl SelfPlayWorker {
    pub fn new(config: SelfPlayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play the game at `index` on a freshly generated field.
    pub fn play_game(&self, index: usize) -> Result<GameRecord, PlayError> {
        let seed = self.config.game_seed(index);
        let mut field_rng = GameRng::new(seed).fork();
        let field = Minefield::new(self.config.board, &mut field_rng)?;
        self.play_on(field, seed)
    }

    /// Play a game on a given field.
    ///
    /// `seed` drives the agent's random fallback moves. The game is won once
    /// every safe cell has been revealed.
    pub fn play_on(&self, mut field: Minefield, seed: u64) -> Result<GameRecord, PlayError> {
        let engine_config = EngineConfig::new(*field.config())
            .with_inference(self.config.inference)
            .with_seed(seed);
        let mut engine = KnowledgeEngine::new(engine_config);
        let mut record = GameRecord::new(seed);

        record.outcome = loop {
            if field.cleared() {
                break GameOutcome::Won;
            }
            if record.moves.len() >= self.config.max_moves {
                break GameOutcome::MoveLimit;
            }

            let (cell, kind) = match engine.pick_safe_move() {
                Some(cell) => (cell, MoveKind::Safe),
                None => match engine.pick_random_move() {
                    Some(cell) => (cell, MoveKind::Random),
                    None => break GameOutcome::Stalled,
                },
            };

            match field.reveal(cell)? {
                Reveal::Mine => {
                    record.moves.push(MoveRecord { cell, kind, count: None });
                    break GameOutcome::Lost(cell);
                }
                Reveal::Safe(count) => {
                    record.moves.push(MoveRecord { cell, kind, count: Some(count) });
                    engine.record_observation(cell, count)?;
                }
            }

            for &mine in engine.mines() {
                field.flag(mine)?;
            }
        };

        record.all_mines_flagged = field.won();
        record.known_safes = engine.safes().len();
        record.known_mines = engine.mines().len();
        debug!(
            seed,
            outcome = ?record.outcome,
            moves = record.moves.len(),
            random_moves = record.random_moves(),
            "game finished"
        );
        Ok(record)
    }

    /// Play every configured game.
    pub fn play_games(&self) -> Result<Vec<GameRecord>, PlayError> {
        (0..self.config.games).map(|i| self.play_game(i)).collect()
    }

    /// Play every configured game and aggregate the results.
    pub fn run(&self) -> Result<SimulationStats, PlayError> {
        let records = self.play_games()?;
        let stats = SimulationStats::from_records(&records);
        info!(
            games = stats.games,
            wins = stats.wins,
            losses = stats.losses,
            stalls = stats.stalls,
            win_rate = stats.win_rate(),
            mean_random_moves = stats.mean_random_moves(),
            "self-play complete"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    #[test]
    fn test_default_config() {
        let config = SelfPlayConfig::default();
        assert_eq!(config.games, 100);
        assert_eq!(config.board, BoardConfig::default());
        assert_eq!(config.inference, InferenceMode::SinglePass);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SelfPlayConfig::new()
            .with_games(5)
            .with_board(BoardConfig::new(4, 4, 2))
            .with_inference(InferenceMode::Fixpoint)
            .with_seed_offset(100)
            .with_max_moves(3);

        assert_eq!(config.games, 5);
        assert_eq!(config.board.mines, 2);
        assert_eq!(config.max_moves, 3);
        assert_eq!(config.game_seed(2), 102);
    }

    #[test]
    fn test_mine_free_board_is_won() {
        let worker = SelfPlayWorker::new(SelfPlayConfig::new());
        let field = Minefield::from_mines(BoardConfig::new(4, 4, 0), Vec::<Cell>::new()).unwrap();

        let record = worker.play_on(field, 9).unwrap();

        assert_eq!(record.outcome, GameOutcome::Won);
        // One guess opens the whole board
        assert_eq!(record.random_moves(), 1);
        assert_eq!(record.moves.len(), 16);
        assert_eq!(record.known_safes, 16);
    }

    #[test]
    fn test_move_limit() {
        let worker = SelfPlayWorker::new(SelfPlayConfig::new().with_max_moves(2));
        let field = Minefield::from_mines(BoardConfig::new(5, 5, 0), Vec::<Cell>::new()).unwrap();

        let record = worker.play_on(field, 1).unwrap();
        assert_eq!(record.outcome, GameOutcome::MoveLimit);
        assert_eq!(record.moves.len(), 2);
    }

    #[test]
    fn test_loss_records_mine() {
        let worker = SelfPlayWorker::new(SelfPlayConfig::new());
        // Only (2,2) is safe; a first guess anywhere else loses
        let mines: Vec<Cell> = Cell::all(3, 3).filter(|&c| c != Cell::new(2, 2)).collect();
        let field = Minefield::from_mines(BoardConfig::new(3, 3, 0), mines).unwrap();

        let record = worker.play_on(field, 4).unwrap();
        match record.outcome {
            GameOutcome::Lost(cell) => {
                assert_ne!(cell, Cell::new(2, 2));
                assert_eq!(record.moves.last().unwrap().count, None);
            }
            GameOutcome::Won => assert_eq!(record.moves[0].cell, Cell::new(2, 2)),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_games_are_replayable() {
        let worker = SelfPlayWorker::new(
            SelfPlayConfig::new().with_board(BoardConfig::new(6, 6, 5)).with_seed_offset(17),
        );
        let a = worker.play_game(3).unwrap();
        let b = worker.play_game(3).unwrap();

        assert_eq!(a.moves, b.moves);
        assert_eq!(a.outcome, b.outcome);
    }
}
