use thiserror::Error;

/// Rejected game configurations. Commands never fail; only construction does.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Grid size must be positive")]
    EmptyGrid,
    #[error("{mines} mines do not fit a {size}x{size} grid with a safe first cell")]
    TooManyMines { size: usize, mines: usize },
    #[error("Mine at ({x},{y}) is outside the grid")]
    MineOutOfBounds { x: usize, y: usize },
    #[error("Mine at ({x},{y}) listed twice")]
    DuplicateMine { x: usize, y: usize },
}
