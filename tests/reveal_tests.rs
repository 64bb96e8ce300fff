use minefield::grid::Grid;
use minefield::placement::place_mines_at;
use minefield::reveal::{reveal, reveal_mines, POINTS_PER_CELL};

fn grid_with(size: usize, mines: &[(usize, usize)]) -> Grid {
    let mut g = Grid::new(size);
    place_mines_at(&mut g, mines).expect("layout");
    g
}

#[test]
fn cascade_opens_connected_region_around_single_mine() {
    let mut g = grid_with(3, &[(2, 2)]);
    let r = reveal(&mut g, 0, 0);
    assert!(!r.hit_mine);
    assert_eq!(r.cells.len(), 8);
    assert_eq!(r.points, 8 * POINTS_PER_CELL);
    assert!(!g.cell(2, 2).unwrap().revealed());
    assert!(g.all_safe_revealed());
}

#[test]
fn cascade_stops_at_wall_of_mines() {
    let wall: Vec<_> = (0..5).map(|y| (2, y)).collect();
    let mut g = grid_with(5, &wall);
    let r = reveal(&mut g, 0, 0);
    assert_eq!(r.cells.len(), 10);
    for ((x, _), c) in g.cells() {
        assert_eq!(c.revealed(), x < 2, "column {x}");
    }
}

#[test]
fn numbered_cell_does_not_cascade() {
    let mut g = grid_with(3, &[(2, 2)]);
    let r = reveal(&mut g, 1, 1);
    assert_eq!(r.cells, vec![(1, 1)]);
    assert_eq!(r.points, POINTS_PER_CELL);
}

#[test]
fn mine_is_revealed_without_points() {
    let mut g = grid_with(3, &[(2, 2)]);
    let r = reveal(&mut g, 2, 2);
    assert!(r.hit_mine);
    assert_eq!(r.points, 0);
    assert_eq!(r.cells, vec![(2, 2)]);
    assert!(g.cell(2, 2).unwrap().revealed());
}

#[test]
fn revealed_and_out_of_bounds_are_noops() {
    let mut g = grid_with(3, &[(2, 2)]);
    reveal(&mut g, 1, 1);
    assert!(reveal(&mut g, 1, 1).is_noop());
    assert!(reveal(&mut g, 3, 0).is_noop());
    assert!(reveal(&mut g, 0, usize::MAX).is_noop());
    assert_eq!(g.revealed_count(), 1);
}

#[test]
fn large_empty_grid_floods_without_recursion() {
    let mut g = Grid::new(300);
    let r = reveal(&mut g, 150, 150);
    assert_eq!(r.cells.len(), 300 * 300);
    assert!(g.all_safe_revealed());
}

#[test]
fn reveal_mines_uncovers_only_mines() {
    let mut g = grid_with(4, &[(0, 0), (3, 3), (1, 2)]);
    assert_eq!(reveal_mines(&mut g), 3);
    assert_eq!(reveal_mines(&mut g), 0);
    for (_, c) in g.cells() {
        assert_eq!(c.revealed(), c.is_mine());
    }
}
