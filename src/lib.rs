pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod placement;
pub mod reveal;
pub mod tui;

pub use config::{Difficulty, GameConfig};
pub use error::ConfigError;
pub use game::{CellView, Game, RevealResult, Status};
