//! Game records and aggregate statistics.

use serde::{Deserialize, Serialize};

use crate::core::Cell;

/// How a move was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Proven safe by the engine.
    Safe,
    /// Uniform fallback; no proven-safe cell was available.
    Random,
}

/// A single reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub cell: Cell,
    pub kind: MoveKind,
    /// Neighbor count reported by the field. `None` if the cell was a mine.
    pub count: Option<usize>,
}

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every safe cell revealed.
    Won,
    /// Revealed a mine.
    Lost(Cell),
    /// No cell left that is neither revealed nor a known mine.
    Stalled,
    /// Hit the configured move limit.
    MoveLimit,
}

impl GameOutcome {
    #[must_use]
    pub fn is_win(self) -> bool {
        matches!(self, GameOutcome::Won)
    }
}

/// A complete simulated game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    /// Seed the game was played from. Replaying it reproduces the game.
    pub seed: u64,

    pub moves: Vec<MoveRecord>,

    pub outcome: GameOutcome,

    /// Whether the engine had identified every mine, and nothing else, by
    /// the end of the game.
    pub all_mines_flagged: bool,

    /// Size of the engine's safe set when the game ended.
    pub known_safes: usize,

    /// Size of the engine's mine set when the game ended.
    pub known_mines: usize,
}

impl GameRecord {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            seed,
            moves: Vec::new(),
            outcome: GameOutcome::MoveLimit,
            all_mines_flagged: false,
            known_safes: 0,
            known_mines: 0,
        }
    }

    #[must_use]
    pub fn safe_moves(&self) -> usize {
        self.moves.iter().filter(|m| m.kind == MoveKind::Safe).count()
    }

    #[must_use]
    pub fn random_moves(&self) -> usize {
        self.moves.iter().filter(|m| m.kind == MoveKind::Random).count()
    }
}

/// Totals over a batch of games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub stalls: usize,
    pub safe_moves: usize,
    pub random_moves: usize,
}

impl SimulationStats {
    /// Aggregate a batch of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a GameRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.push(record);
        }
        stats
    }

    /// Fold one more game into the totals.
    pub fn push(&mut self, record: &GameRecord) {
        self.games += 1;
        match record.outcome {
            GameOutcome::Won => self.wins += 1,
            GameOutcome::Lost(_) => self.losses += 1,
            GameOutcome::Stalled | GameOutcome::MoveLimit => self.stalls += 1,
        }
        self.safe_moves += record.safe_moves();
        self.random_moves += record.random_moves();
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    /// Mean number of random guesses per game.
    #[must_use]
    pub fn mean_random_moves(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.random_moves as f64 / self.games as f64
        }
    }
}
