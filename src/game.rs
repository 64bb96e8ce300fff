use std::fmt;
use std::time::Instant;

use log::{info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Difficulty, GameConfig};
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::placement;
use crate::reveal::{self, Reveal};

/// Frames the explosion flash stays lit after a mine is hit.
pub const FLASH_FRAMES: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Mines not placed yet; the next reveal is guaranteed safe.
    AwaitingFirstClick,
    Active,
    GameOver,
    Victory,
}

impl Status {
    pub const fn is_playable(self) -> bool {
        matches!(self, Self::AwaitingFirstClick | Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealResult {
    NoOp,
    RevealedSafe,
    HitMine,
    Won,
}

/// Player-visible state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    Mine,
    Open(u8),
}

impl CellView {
    /// Single-character form shared by the text board and the TUI.
    pub fn glyph(self) -> char {
        match self {
            CellView::Hidden => '.',
            CellView::Flagged => 'F',
            CellView::Mine => '*',
            CellView::Open(0) => ' ',
            CellView::Open(n) => char::from_digit(n as u32, 10).unwrap_or('?'),
        }
    }
}

enum MineSource {
    Random(StdRng),
    Fixed(Vec<(usize, usize)>),
}

pub struct Game {
    config: GameConfig,
    difficulty: Option<Difficulty>,
    grid: Grid,
    mines: MineSource,
    status: Status,
    score: u32,
    high_score: u32,
    flagged: usize,
    hint_used: bool,
    started_at: Option<Instant>,
    elapsed_secs: u64,
    flash_frames: u32,
}

impl Game {
    /// Preset game. A `seed` of 0 draws one from the OS.
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let mut game = Self::blank(difficulty.config(), MineSource::Random(rng_from_seed(seed)));
        game.difficulty = Some(difficulty);
        game
    }

    /// Game on an arbitrary validated configuration, e.g. [`GameConfig::CLASSIC`].
    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        Self::blank(config, MineSource::Random(rng_from_seed(seed)))
    }

    /// Game whose mines sit exactly at `mines`, placed at the first reveal like a
    /// random layout. The first click is not protected here.
    pub fn with_layout(size: usize, mines: &[(usize, usize)]) -> Result<Self, ConfigError> {
        let config = GameConfig::new(size, mines.len())?;
        placement::place_mines_at(&mut Grid::new(size), mines)?;
        Ok(Self::blank(config, MineSource::Fixed(mines.to_vec())))
    }

    fn blank(config: GameConfig, mines: MineSource) -> Self {
        Self {
            config,
            difficulty: None,
            grid: Grid::new(config.size()),
            mines,
            status: Status::AwaitingFirstClick,
            score: 0,
            high_score: 0,
            flagged: 0,
            hint_used: false,
            started_at: None,
            elapsed_secs: 0,
            flash_frames: 0,
        }
    }

    /// Starts over on `difficulty`. Only the high score survives.
    pub fn reset(&mut self, difficulty: Difficulty) {
        self.config = difficulty.config();
        self.difficulty = Some(difficulty);
        if let MineSource::Fixed(_) = self.mines {
            self.mines = MineSource::Random(rng_from_seed(0));
        }
        self.clear();
        info!("new {} game", difficulty);
    }

    /// Starts over with the current configuration.
    pub fn retry(&mut self) {
        self.clear();
        info!("retry on {}x{} with {} mines", self.config.size(), self.config.size(), self.config.mines());
    }

    fn clear(&mut self) {
        self.grid = Grid::new(self.config.size());
        self.status = Status::AwaitingFirstClick;
        self.score = 0;
        self.flagged = 0;
        self.hint_used = false;
        self.started_at = None;
        self.elapsed_secs = 0;
        self.flash_frames = 0;
    }

    pub fn reveal(&mut self, x: usize, y: usize) -> RevealResult {
        if !self.status.is_playable() {
            trace!("reveal ({},{}) ignored, game finished", x, y);
            return RevealResult::NoOp;
        }
        match self.grid.cell(x, y) {
            Some(c) if !c.flagged() && !c.revealed() => {}
            _ => return RevealResult::NoOp,
        }

        if self.status == Status::AwaitingFirstClick { self.start(x, y); }

        let opened = reveal::reveal(&mut self.grid, x, y);
        self.apply(opened)
    }

    fn start(&mut self, safe_x: usize, safe_y: usize) {
        match &mut self.mines {
            MineSource::Random(rng) => placement::place_mines(&mut self.grid, self.config.mines(), safe_x, safe_y, rng),
            MineSource::Fixed(positions) => {
                if let Err(e) = placement::place_mines_at(&mut self.grid, positions.as_slice()) {
                    warn!("fixed layout rejected: {}", e);
                }
            }
        }
        self.started_at = Some(Instant::now());
        self.status = Status::Active;
    }

    fn apply(&mut self, opened: Reveal) -> RevealResult {
        self.score += opened.points;
        if opened.hit_mine {
            self.finish(Status::GameOver);
            reveal::reveal_mines(&mut self.grid);
            self.flash_frames = FLASH_FRAMES;
            info!("mine hit, score {}", self.score);
            return RevealResult::HitMine;
        }
        if opened.is_noop() { return RevealResult::NoOp; }
        if self.grid.all_safe_revealed() {
            self.finish(Status::Victory);
            self.high_score = self.high_score.max(self.score);
            info!("cleared in {}s, score {} (best {})", self.elapsed_secs, self.score, self.high_score);
            return RevealResult::Won;
        }
        RevealResult::RevealedSafe
    }

    fn finish(&mut self, status: Status) {
        self.refresh_elapsed(Instant::now());
        self.status = status;
    }

    pub fn toggle_flag(&mut self, x: usize, y: usize) -> bool {
        if !self.status.is_playable() { return false; }
        let Some(cell) = self.grid.cell_mut(x, y) else { return false };
        if cell.revealed() { return false; }
        cell.toggle_flag();
        if cell.flagged() { self.flagged += 1; } else { self.flagged -= 1; }
        true
    }

    /// Reveals the first hidden, unflagged safe cell, scanning columns left to
    /// right and each column top to bottom. Once per game.
    ///
    /// Before the first click no mines exist yet, so the hint becomes the first click.
    pub fn use_hint(&mut self) -> RevealResult {
        if self.hint_used || !self.status.is_playable() {
            trace!("hint ignored");
            return RevealResult::NoOp;
        }
        let size = self.size();
        let target = (0..size)
            .flat_map(|x| (0..size).map(move |y| (x, y)))
            .find(|&(x, y)| {
                self.grid.cell(x, y).is_some_and(|c| !c.revealed() && !c.flagged() && !c.is_mine())
                    && !self.planned_mine((x, y))
            });
        let Some((x, y)) = target else { return RevealResult::NoOp };
        self.hint_used = true;
        self.reveal(x, y)
    }

    fn planned_mine(&self, pos: (usize, usize)) -> bool {
        match &self.mines {
            MineSource::Fixed(positions) => self.status == Status::AwaitingFirstClick && positions.contains(&pos),
            MineSource::Random(_) => false,
        }
    }

    /// Per-frame update: advances the clock and the explosion flash.
    pub fn tick(&mut self) { self.tick_at(Instant::now()); }

    pub fn tick_at(&mut self, now: Instant) {
        if self.status == Status::Active { self.refresh_elapsed(now); }
        self.flash_frames = self.flash_frames.saturating_sub(1);
    }

    fn refresh_elapsed(&mut self, now: Instant) {
        if let Some(start) = self.started_at {
            self.elapsed_secs = now.saturating_duration_since(start).as_secs();
        }
    }

    pub fn cell_view(&self, x: usize, y: usize) -> Option<CellView> {
        let c = self.grid.cell(x, y)?;
        Some(if c.revealed() {
            if c.is_mine() { CellView::Mine } else { CellView::Open(c.adjacent()) }
        } else if c.flagged() {
            CellView::Flagged
        } else {
            CellView::Hidden
        })
    }

    /// ASCII board with coordinate labels. `show_all` uncovers every mine.
    pub fn render(&self, show_all: bool, one_based: bool) -> String {
        let size = self.size();
        let base = usize::from(one_based);
        let header: String = (0..size).map(|x| format!("{:>2} ", x + base)).collect();
        let mut out = format!("    {}\n   {}\n", header, "-".repeat(size * 3 + 1));
        for y in 0..size {
            let row: String = (0..size).map(|x| {
                let exposed = show_all && self.grid.cell(x, y).is_some_and(|c| c.is_mine());
                let view = if exposed { CellView::Mine } else { self.cell_view(x, y).unwrap_or(CellView::Hidden) };
                format!("{}  ", view.glyph())
            }).collect();
            out.push_str(&format!("{:>2} | {}\n", y + base, row));
        }
        out
    }
}

fn rng_from_seed(seed: u64) -> StdRng {
    if seed == 0 { StdRng::from_entropy() } else { StdRng::seed_from_u64(seed) }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false, true))
    }
}

impl Game {
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn size(&self) -> usize { self.config.size() }
    pub fn difficulty(&self) -> Option<Difficulty> { self.difficulty }
    pub fn mine_count(&self) -> usize { self.config.mines() }
    pub fn status(&self) -> Status { self.status }
    pub fn score(&self) -> u32 { self.score }
    pub fn high_score(&self) -> u32 { self.high_score }
    pub fn elapsed_seconds(&self) -> u64 { self.elapsed_secs }
    pub fn started_at(&self) -> Option<Instant> { self.started_at }
    pub fn flagged_count(&self) -> usize { self.flagged }
    pub fn hint_used(&self) -> bool { self.hint_used }
    pub fn flash_active(&self) -> bool { self.flash_frames > 0 }
}
