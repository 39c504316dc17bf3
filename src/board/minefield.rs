//! Ground truth for one game: where the mines are.
//!
//! The knowledge engine never sees a `Minefield`. It only receives the
//! neighbor counts the field reports for revealed cells.

use rustc_hash::FxHashSet;

use crate::core::{BoardConfig, BoardError, Cell, GameRng};

/// Result of revealing a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
    /// The cell was a mine. The game is lost.
    Mine,
    /// The cell was safe and has this many neighboring mines.
    Safe(usize),
}

/// A grid with hidden mines.
#[derive(Clone, Debug)]
pub struct Minefield {
    config: BoardConfig,
    mines: FxHashSet<Cell>,
    revealed: FxHashSet<Cell>,
    flagged: FxHashSet<Cell>,
}

impl Minefield {
    /// Place exactly `config.mines` mines uniformly at random.
    pub fn new(config: BoardConfig, rng: &mut GameRng) -> Result<Self, BoardError> {
        config.validate()?;

        // Selection sampling: walk the cells in row-major order and take each
        // with probability (mines still to place) / (cells still to visit).
        let total = config.cell_count();
        let mut mines = FxHashSet::default();
        for (visited, cell) in Cell::all(config.height, config.width).enumerate() {
            let to_place = config.mines - mines.len();
            if to_place == 0 {
                break;
            }
            let remaining = total - visited;
            if rng.gen_bool(to_place as f64 / remaining as f64) {
                mines.insert(cell);
            }
        }

        Ok(Self::with_layout(config, mines))
    }

    /// Build a field with a fixed mine layout.
    ///
    /// `config.mines` is replaced by the number of distinct cells given.
    pub fn from_mines(
        config: BoardConfig,
        cells: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, BoardError> {
        let mines: FxHashSet<Cell> = cells.into_iter().collect();
        let config = config.with_mines(mines.len());
        config.validate()?;
        if let Some(&cell) = mines.iter().find(|c| !config.contains(**c)) {
            return Err(BoardError::OutOfBounds {
                cell,
                height: config.height,
                width: config.width,
            });
        }
        Ok(Self::with_layout(config, mines))
    }

    fn with_layout(config: BoardConfig, mines: FxHashSet<Cell>) -> Self {
        Self {
            config,
            mines,
            revealed: FxHashSet::default(),
            flagged: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The mine layout. Only for scoring and tests; an agent must not look.
    #[must_use]
    pub fn mines(&self) -> &FxHashSet<Cell> {
        &self.mines
    }

    #[must_use]
    pub fn revealed(&self) -> &FxHashSet<Cell> {
        &self.revealed
    }

    #[must_use]
    pub fn flagged(&self) -> &FxHashSet<Cell> {
        &self.flagged
    }

    #[must_use]
    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Number of mines among the in-bounds neighbors of `cell`.
    pub fn nearby_mines(&self, cell: Cell) -> Result<usize, BoardError> {
        self.check_bounds(cell)?;
        Ok(cell
            .neighbors(self.config.height, self.config.width)
            .iter()
            .filter(|n| self.mines.contains(*n))
            .count())
    }

    /// Reveal a cell.
    pub fn reveal(&mut self, cell: Cell) -> Result<Reveal, BoardError> {
        self.check_bounds(cell)?;
        if !self.revealed.insert(cell) {
            return Err(BoardError::AlreadyRevealed { cell });
        }
        if self.is_mine(cell) {
            Ok(Reveal::Mine)
        } else {
            self.nearby_mines(cell).map(Reveal::Safe)
        }
    }

    /// Flag a cell as a mine.
    pub fn flag(&mut self, cell: Cell) -> Result<(), BoardError> {
        self.check_bounds(cell)?;
        self.flagged.insert(cell);
        Ok(())
    }

    /// Every mine flagged and nothing else.
    #[must_use]
    pub fn won(&self) -> bool {
        self.flagged == self.mines
    }

    /// Every non-mine cell has been revealed.
    #[must_use]
    pub fn cleared(&self) -> bool {
        self.revealed.iter().filter(|c| !self.mines.contains(*c)).count()
            == self.config.cell_count() - self.mines.len()
    }

    /// Text dump of the layout, `X` for mines.
    #[must_use]
    pub fn render(&self) -> String {
        let rule = format!("{}-\n", "--".repeat(self.config.width));
        let mut out = String::new();
        for row in 0..self.config.height {
            out.push_str(&rule);
            for col in 0..self.config.width {
                out.push_str(if self.is_mine(Cell::new(row, col)) { "|X" } else { "| " });
            }
            out.push_str("|\n");
        }
        out.push_str(&rule);
        out
    }

    fn check_bounds(&self, cell: Cell) -> Result<(), BoardError> {
        if self.config.contains(cell) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                cell,
                height: self.config.height,
                width: self.config.width,
            })
        }
    }
}
