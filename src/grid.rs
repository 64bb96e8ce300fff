/// One square of the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    is_mine: bool,
    adjacent: u8,
    revealed: bool,
    flagged: bool,
}

impl Cell {
    pub fn is_mine(&self) -> bool { self.is_mine }
    /// Mines in the Moore neighborhood. Always 0 for mine cells.
    pub fn adjacent(&self) -> u8 { self.adjacent }
    pub fn revealed(&self) -> bool { self.revealed }
    pub fn flagged(&self) -> bool { self.flagged }

    pub(crate) fn set_mine(&mut self) { self.is_mine = true; }
    pub(crate) fn set_adjacent(&mut self, n: u8) { self.adjacent = n; }
    pub(crate) fn set_revealed(&mut self) { self.revealed = true; }
    pub(crate) fn toggle_flag(&mut self) { self.flagged = !self.flagged; }
}

/// Square board of `size * size` cells stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size, cells: vec![Cell::default(); size * size] }
    }

    pub fn size(&self) -> usize { self.size }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool { x < self.size && y < self.size }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if self.in_bounds(x, y) { Some(&self.cells[idx(self.size, x, y)]) } else { None }
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if self.in_bounds(x, y) { Some(&mut self.cells[idx(self.size, x, y)]) } else { None }
    }

    /// All cells with their coordinates, rows top to bottom.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(i, c)| ((i % size, i / size), c))
    }

    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        neighbors(self.size, x, y)
    }

    pub fn mine_count(&self) -> usize { self.cells.iter().filter(|c| c.is_mine).count() }

    pub fn revealed_count(&self) -> usize { self.cells.iter().filter(|c| c.revealed).count() }

    /// True once every non-mine cell is revealed. Flags do not count.
    pub fn all_safe_revealed(&self) -> bool {
        self.cells.iter().all(|c| c.is_mine || c.revealed)
    }
}

fn idx(size: usize, x: usize, y: usize) -> usize { y * size + x }

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

fn neighbors(size: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    DISPLACEMENTS.into_iter().filter_map(move |(dx, dy)| {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < size && ny < size).then_some((nx, ny))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_clipped_at_edges() {
        assert_eq!(neighbors(5, 0, 0).count(), 3);
        assert_eq!(neighbors(5, 4, 4).count(), 3);
        assert_eq!(neighbors(5, 2, 0).count(), 5);
        assert_eq!(neighbors(5, 2, 2).count(), 8);
        assert_eq!(neighbors(1, 0, 0).count(), 0);
    }

    #[test]
    fn cells_iterate_row_major() {
        let g = Grid::new(3);
        let coords: Vec<_> = g.cells().map(|(p, _)| p).take(4).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1)]);
    }

    #[test]
    fn out_of_bounds_lookup_is_none() {
        let g = Grid::new(4);
        assert!(g.cell(3, 3).is_some());
        assert!(g.cell(4, 0).is_none());
        assert!(g.cell(0, 4).is_none());
        assert!(!g.in_bounds(usize::MAX, 0));
    }
}
