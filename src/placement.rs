use log::debug;
use rand::Rng;

use crate::error::ConfigError;
use crate::grid::Grid;

/// Scatters `mines` mines uniformly over `grid`, never on `(safe_x, safe_y)`,
/// then fills in neighbor counts.
///
/// Rejection sampling: a drawn coordinate that is the safe cell or already a
/// mine is simply redrawn. Callers guarantee `mines < size * size` (see
/// [`GameConfig`](crate::config::GameConfig)), so at least one candidate always
/// remains and the loop terminates.
pub fn place_mines<R: Rng + ?Sized>(grid: &mut Grid, mines: usize, safe_x: usize, safe_y: usize, rng: &mut R) {
    let size = grid.size();
    debug_assert!(mines < size * size, "mine count must leave a safe cell");
    let mut placed = 0;
    while placed < mines {
        let x = rng.gen_range(0..size);
        let y = rng.gen_range(0..size);
        if x == safe_x && y == safe_y { continue; }
        let Some(cell) = grid.cell_mut(x, y) else { continue };
        if cell.is_mine() { continue; }
        cell.set_mine();
        placed += 1;
    }
    compute_adjacency(grid);
    debug!("placed {} mines on {}x{} grid, safe cell ({},{})", mines, size, size, safe_x, safe_y);
}

/// Puts mines exactly at `positions` and fills in neighbor counts.
pub fn place_mines_at(grid: &mut Grid, positions: &[(usize, usize)]) -> Result<(), ConfigError> {
    for &(x, y) in positions {
        let cell = grid.cell_mut(x, y).ok_or(ConfigError::MineOutOfBounds { x, y })?;
        if cell.is_mine() { return Err(ConfigError::DuplicateMine { x, y }); }
        cell.set_mine();
    }
    compute_adjacency(grid);
    debug!("placed fixed layout of {} mines", positions.len());
    Ok(())
}

fn compute_adjacency(grid: &mut Grid) {
    let size = grid.size();
    for y in 0..size {
        for x in 0..size {
            if grid.cell(x, y).map_or(true, |c| c.is_mine()) { continue; }
            let n = grid.neighbors(x, y).filter(|&(nx, ny)| grid.cell(nx, ny).is_some_and(|c| c.is_mine())).count();
            if let Some(cell) = grid.cell_mut(x, y) { cell.set_adjacent(n as u8); }
        }
    }
}
