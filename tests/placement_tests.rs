use minefield::grid::Grid;
use minefield::placement::{place_mines, place_mines_at};
use minefield::{ConfigError, Difficulty};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn neighbors(n: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    let x = x as isize; let y = y as isize; let n = n as isize;
    let mut out = Vec::new();
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 { continue; }
            let nx = x + dx; let ny = y + dy;
            if nx >= 0 && ny >= 0 && nx < n && ny < n { out.push((nx as usize, ny as usize)); }
        }
    }
    out.into_iter()
}

#[test]
fn every_preset_places_exact_mine_count() {
    for d in Difficulty::ALL {
        for seed in 1..20 {
            let mut g = Grid::new(d.grid_size());
            place_mines(&mut g, d.mine_count(), 3, 4, &mut StdRng::seed_from_u64(seed));
            assert_eq!(g.mine_count(), d.mine_count(), "{d} seed {seed}");
        }
    }
}

#[test]
fn safe_cell_never_gets_a_mine() {
    for seed in 1..200 {
        let mut g = Grid::new(4);
        let safe = ((seed % 4) as usize, (seed / 4 % 4) as usize);
        place_mines(&mut g, 12, safe.0, safe.1, &mut StdRng::seed_from_u64(seed));
        assert!(!g.cell(safe.0, safe.1).unwrap().is_mine(), "seed {seed}");
    }
}

#[test]
fn fullest_board_mines_everything_but_safe_cell() {
    let mut g = Grid::new(3);
    place_mines(&mut g, 8, 1, 1, &mut StdRng::seed_from_u64(9));
    for ((x, y), c) in g.cells() {
        assert_eq!(c.is_mine(), (x, y) != (1, 1));
    }
    assert_eq!(g.cell(1, 1).unwrap().adjacent(), 8);
}

#[test]
fn adjacency_matches_neighbor_mines() {
    let mut g = Grid::new(14);
    place_mines(&mut g, 40, 0, 0, &mut StdRng::seed_from_u64(999));
    let n = g.size();
    for y in 0..n {
        for x in 0..n {
            let c = g.cell(x, y).unwrap();
            if c.is_mine() { continue; }
            let adj = neighbors(n, x, y).filter(|&(nx, ny)| g.cell(nx, ny).unwrap().is_mine()).count();
            assert_eq!(c.adjacent() as usize, adj, "adjacency mismatch at ({},{})", x, y);
        }
    }
}

#[test]
fn fixed_layout_counts_are_exact() {
    let mut g = Grid::new(3);
    place_mines_at(&mut g, &[(0, 0), (2, 2)]).unwrap();
    assert_eq!(g.mine_count(), 2);
    assert_eq!(g.cell(1, 1).unwrap().adjacent(), 2);
    assert_eq!(g.cell(1, 0).unwrap().adjacent(), 1);
    assert_eq!(g.cell(2, 0).unwrap().adjacent(), 0);
    assert_eq!(g.cell(0, 2).unwrap().adjacent(), 0);
}

#[test]
fn fixed_layout_rejects_bad_positions() {
    assert_eq!(place_mines_at(&mut Grid::new(3), &[(3, 0)]), Err(ConfigError::MineOutOfBounds { x: 3, y: 0 }));
    assert_eq!(place_mines_at(&mut Grid::new(3), &[(1, 1), (1, 1)]), Err(ConfigError::DuplicateMine { x: 1, y: 1 }));
}
