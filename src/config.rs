use std::fmt;

use clap::ValueEnum;

use crate::error::ConfigError;

/// Side length of the grid used by every difficulty preset.
pub const PRESET_SIZE: usize = 14;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn grid_size(self) -> usize { PRESET_SIZE }

    pub const fn mine_count(self) -> usize {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Medium => 30,
            Difficulty::Hard => 40,
        }
    }

    pub const fn config(self) -> GameConfig {
        GameConfig { size: self.grid_size(), mines: self.mine_count() }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grid geometry plus mine count. Always satisfies `0 < size` and `mines < size * size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    size: usize,
    mines: usize,
}

impl GameConfig {
    /// Fixed 10x10 board with 10 mines and no difficulty selection.
    pub const CLASSIC: GameConfig = GameConfig { size: 10, mines: 10 };

    pub fn new(size: usize, mines: usize) -> Result<Self, ConfigError> {
        if size == 0 { return Err(ConfigError::EmptyGrid); }
        let fits = size.checked_mul(size).is_some_and(|total| mines < total);
        if !fits { return Err(ConfigError::TooManyMines { size, mines }); }
        Ok(Self { size, mines })
    }

    pub fn size(&self) -> usize { self.size }
    pub fn mines(&self) -> usize { self.mines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_leave_room_for_safe_cell() {
        for d in Difficulty::ALL {
            let c = d.config();
            assert!(GameConfig::new(c.size(), c.mines()).is_ok(), "{d} preset invalid");
        }
        assert!(GameConfig::new(GameConfig::CLASSIC.size(), GameConfig::CLASSIC.mines()).is_ok());
    }

    #[test]
    fn rejects_full_or_empty_grids() {
        assert_eq!(GameConfig::new(0, 0), Err(ConfigError::EmptyGrid));
        assert_eq!(GameConfig::new(3, 9), Err(ConfigError::TooManyMines { size: 3, mines: 9 }));
        assert!(GameConfig::new(3, 8).is_ok());
    }

    #[test]
    fn overflowing_size_is_rejected() {
        let huge = 1usize << (usize::BITS / 2);
        assert_eq!(GameConfig::new(huge, 0), Err(ConfigError::TooManyMines { size: huge, mines: 0 }));
    }
}
