use log::debug;

use crate::grid::Grid;

/// Points for each non-mine cell a reveal opens.
pub const POINTS_PER_CELL: u32 = 10;

/// What a single reveal command opened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reveal {
    /// Newly revealed cells in the order they were opened.
    pub cells: Vec<(usize, usize)>,
    pub points: u32,
    pub hit_mine: bool,
}

impl Reveal {
    pub fn is_noop(&self) -> bool { self.cells.is_empty() }
}

/// Opens `(x, y)` and cascades through zero-count cells.
///
/// Out-of-bounds, revealed and flagged cells are skipped, both at the start
/// and for every cell reached by the cascade. A mine is revealed but never
/// expanded and earns nothing.
pub fn reveal(grid: &mut Grid, x: usize, y: usize) -> Reveal {
    let mut out = Reveal::default();
    let mut stack = vec![(x, y)];
    while let Some((cx, cy)) = stack.pop() {
        let Some(cell) = grid.cell_mut(cx, cy) else { continue };
        if cell.revealed() || cell.flagged() { continue; }
        cell.set_revealed();
        out.cells.push((cx, cy));
        if cell.is_mine() {
            out.hit_mine = true;
            continue;
        }
        out.points += POINTS_PER_CELL;
        if cell.adjacent() == 0 {
            stack.extend(grid.neighbors(cx, cy).filter(|&(nx, ny)| grid.cell(nx, ny).is_some_and(|c| !c.revealed())));
        }
    }
    if out.cells.len() > 1 {
        debug!("cascade from ({},{}) opened {} cells", x, y, out.cells.len());
    }
    out
}

/// Uncovers every mine for the end-of-game display. Returns how many were hidden.
pub fn reveal_mines(grid: &mut Grid) -> usize {
    let size = grid.size();
    let mut n = 0;
    for y in 0..size {
        for x in 0..size {
            if let Some(cell) = grid.cell_mut(x, y) {
                if cell.is_mine() && !cell.revealed() {
                    cell.set_revealed();
                    n += 1;
                }
            }
        }
    }
    n
}
