use std::time::Duration;

use thiserror::Error;

use crate::board::Board;

/// A 600 pixel board split into 25 pixel tiles.
pub const DEFAULT_BOARD_CELLS: u16 = 24;
pub const DEFAULT_CELL_SIZE: u16 = 2;
pub const DEFAULT_TICK_MS: u64 = 90;

/// The snake starts at (5, 5), so smaller boards cannot hold it.
pub const MIN_BOARD_CELLS: u16 = 6;
pub const MAX_CELL_SIZE: u16 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least {min} cells wide, got {got}")]
    BoardTooSmall { min: u16, got: u16 },
    #[error("cell size must be between 1 and {max} columns, got {got}")]
    BadCellSize { max: u16, got: u16 },
    #[error("tick period must be non-zero")]
    ZeroTick,
}

/// Board geometry and timing. Fixed once a game is built; there is no way
/// to change them while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_cells: u16,
    /// Terminal columns a single cell spans.
    pub cell_size: u16,
    pub tick: Duration,
    /// Seed for food placement. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_cells: DEFAULT_BOARD_CELLS,
            cell_size: DEFAULT_CELL_SIZE,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(board_cells: u16, cell_size: u16, tick: Duration) -> Self {
        GameConfig { board_cells, cell_size, tick, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.board_cells < MIN_BOARD_CELLS {
            return Err(ConfigError::BoardTooSmall { min: MIN_BOARD_CELLS, got: self.board_cells });
        }

        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIZE {
            return Err(ConfigError::BadCellSize { max: MAX_CELL_SIZE, got: self.cell_size });
        }

        if self.tick == Duration::from_millis(0) {
            return Err(ConfigError::ZeroTick);
        }

        Ok(self)
    }

    pub fn board(&self) -> Board {
        Board::new(self.board_cells)
    }

    /// Columns and rows needed to show the board, its border and the
    /// status line underneath.
    pub fn required_terminal_size(&self) -> (u16, u16) {
        (
            self.board_cells.saturating_mul(self.cell_size).saturating_add(2),
            self.board_cells.saturating_add(3),
        )
    }
}
