/// Fuzzes the searcher by checking for many random grids that a path is
/// found exactly when start and goal share a connected component, and that
/// the reported trace upholds its contract. Both movement modes are tested.
use grid_astar::SearchGrid;
use grid_util::grid::Grid;
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::HashSet;

fn random_grid(n: usize, rng: &mut StdRng, diagonal: bool) -> SearchGrid {
    let mut grid: SearchGrid = SearchGrid::new(n, n, false);
    grid.allow_diagonal_move = diagonal;
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            grid.set(x, y, rng.gen_bool(0.4))
        }
    }
    grid.generate_components();
    grid
}

fn visualize_grid(grid: &SearchGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.get(x as usize, y as usize) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// The free cells sharing the start's component.
fn component_cells(grid: &SearchGrid, start: &Point) -> HashSet<Point> {
    let mut cells = HashSet::new();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let p = Point::new(x as i32, y as i32);
            if !grid.get(x, y) && grid.reachable(start, &p) {
                cells.insert(p);
            }
        }
    }
    cells
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 10000;
    let mut rng = StdRng::seed_from_u64(0);
    for diagonal in [false, true] {
        let start = Point::new(0, 0);
        let end = Point::new(N as i32 - 1, N as i32 - 1);
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(N, &mut rng, diagonal);
            grid.set(0, 0, false);
            grid.set(N - 1, N - 1, false);
            let reachable = grid.reachable(&start, &end);
            let result = grid.search(start, end).unwrap();
            // Show the grid if a path is not found
            if result.found() != reachable {
                visualize_grid(&grid, &start, &end);
            }
            assert!(result.found() == reachable);
            if result.found() {
                assert_eq!(*result.path.first().unwrap(), start);
                assert_eq!(*result.path.last().unwrap(), end);
                for w in result.path.windows(2) {
                    assert!(grid.can_move_to(w[0], w[1]));
                    if !diagonal {
                        assert_eq!((w[1].x - w[0].x).abs() + (w[1].y - w[0].y).abs(), 1);
                    }
                }
            } else {
                // An exhausted search closes the whole free region around
                // the start, each cell exactly once.
                let examined: HashSet<Point> = result.examined.iter().copied().collect();
                assert_eq!(examined.len(), result.examined.len());
                assert_eq!(examined, component_cells(&grid, &start));
            }
        }
    }
}

#[test]
fn fuzz_deterministic() {
    const N: usize = 8;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(7);
    for diagonal in [false, true] {
        let start = Point::new(0, 0);
        let end = Point::new(N as i32 - 1, N as i32 - 1);
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(N, &mut rng, diagonal);
            grid.set(0, 0, false);
            grid.set(N - 1, N - 1, false);
            let first = grid.search(start, end).unwrap();
            let second = grid.search(start, end).unwrap();
            assert_eq!(first, second);
        }
    }
}
