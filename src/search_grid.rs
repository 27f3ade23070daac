use crate::astar::astar_traced;
use crate::{cost_as_unit_float, PathingError, C, P};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Candidate move offsets in row-major scan order.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Step cost between adjacent cells: [C], with the surcharge [P] when the
/// coordinate deltas sum to an even number. For single-cell steps that
/// prices diagonals at 1.4 against 1.0 for cardinal moves.
pub fn step_cost(from: &Point, to: &Point) -> i32 {
    if (to.x - from.x + to.y - from.y).rem_euclid(2) == 0 {
        C + P
    } else {
        C
    }
}

fn heuristic(point: &Point, goal: &Point) -> i32 {
    ((point.x - goal.x).abs() + (point.y - goal.y).abs()) * C
}

/// What [SearchGrid::search] produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Cells from start to goal inclusive; empty when the goal cannot be
    /// reached or an endpoint is blocked.
    pub path: Vec<Point>,
    /// Every cell the search closed, in the order it was closed.
    pub examined: Vec<Point>,
}

impl SearchResult {
    /// True when a path was found.
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    fn empty() -> SearchResult {
        SearchResult {
            path: Vec::new(),
            examined: Vec::new(),
        }
    }
}

/// [SearchGrid] holds the occupancy values in a [BoolGrid] ([true] meaning
/// blocked) together with the movement configuration, and maintains a
/// [UnionFind] over cells so that reachability between two cells can be
/// answered without running a search. Implements [Grid] by building on
/// [BoolGrid].
#[derive(Clone, Debug)]
pub struct SearchGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    pub allow_diagonal_move: bool,
}

impl Default for SearchGrid {
    fn default() -> SearchGrid {
        SearchGrid {
            grid: BoolGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
            allow_diagonal_move: true,
        }
    }
}

impl SearchGrid {
    /// Builds a grid from rows of cell values, nonzero marking a blocked
    /// cell. Rows map to `y`, columns to `x`. Components are generated
    /// before returning.
    pub fn from_cells(rows: &[Vec<u8>]) -> Result<SearchGrid, PathingError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(PathingError::EmptyGrid);
        }
        let width = rows[0].len();
        let mut search_grid = SearchGrid::new(width, rows.len(), false);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PathingError::RaggedRows { row: y });
            }
            for (x, &cell) in row.iter().enumerate() {
                search_grid.grid.set(x, y, cell != 0);
            }
        }
        search_grid.generate_components();
        Ok(search_grid)
    }

    /// Flips one cell between blocked and free.
    pub fn toggle(&mut self, x: usize, y: usize) {
        let blocked = self.grid.get(x, y);
        self.set(x, y, !blocked);
    }

    /// The cells a single step could lead to: all 8 surrounding cells, or
    /// the 4 cardinal ones when diagonal movement is disabled. Validity of
    /// the step itself is checked by [can_move_to](Self::can_move_to).
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; 8]> {
        NEIGHBOR_OFFSETS
            .iter()
            .copied()
            .filter(|&(dx, dy)| self.allow_diagonal_move || dx.abs() + dy.abs() == 1)
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .collect()
    }

    /// Checks that a single step from `from` to `to` is allowed: `to` must
    /// be a free in-bounds cell, and a diagonal step must not pass between
    /// two touching blocked cells. A diagonal with one free orthogonal
    /// neighbour is allowed.
    pub fn can_move_to(&self, from: Point, to: Point) -> bool {
        debug_assert!((from.x - to.x).abs() <= 1 && (from.y - to.y).abs() <= 1);
        if !self.can_move_to_simple(to) {
            return false;
        }
        if from.x != to.x && from.y != to.y {
            !(self.grid.get_point(Point::new(from.x, to.y))
                && self.grid.get_point(Point::new(to.x, from.y)))
        } else {
            true
        }
    }

    pub fn can_move_to_simple(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.grid.get_point(pos)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.grid.index_in_bounds(x as usize, y as usize)
    }

    fn successor_cells(&self, node: &Point) -> SmallVec<[(Point, i32); 8]> {
        self.neighborhood_points(node)
            .into_iter()
            .filter(|p| self.can_move_to(*node, *p))
            .map(|p| (p, step_cost(node, &p)))
            .collect()
    }

    /// Searches a path between two cells. The result carries the path
    /// (start to goal inclusive, empty when the goal cannot be reached or
    /// an endpoint is blocked) and every cell the search closed, in close
    /// order. When the goal cannot be reached the closed cells are the
    /// whole free region around the start.
    ///
    /// The grid is not mutated and component state is not consulted, so a
    /// grid with stale components still answers correctly.
    pub fn search(&self, start: Point, goal: Point) -> Result<SearchResult, PathingError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(PathingError::EmptyGrid);
        }
        for p in [start, goal] {
            if !self.in_bounds(p.x, p.y) {
                return Err(PathingError::OutOfBounds(p));
            }
        }
        // Occupied endpoints reject the query before any node is created.
        if self.grid.get_point(start) || self.grid.get_point(goal) {
            return Ok(SearchResult::empty());
        }
        if start == goal {
            return Ok(SearchResult {
                path: vec![start],
                examined: Vec::new(),
            });
        }
        let trace = astar_traced(
            &start,
            |node| self.successor_cells(node),
            |point| heuristic(point, &goal),
            |point| *point == goal,
        );
        Ok(match trace.path {
            Some((path, cost)) => {
                debug!(
                    "found a path from {} to {} costing {} after closing {} cells",
                    start,
                    goal,
                    cost_as_unit_float(cost),
                    trace.closed.len()
                );
                SearchResult {
                    path,
                    examined: trace.closed,
                }
            }
            None => {
                info!(
                    "{} cannot be reached from {}: {} cells were closed",
                    goal,
                    start,
                    trace.closed.len()
                );
                SearchResult {
                    path: Vec::new(),
                    examined: trace.closed,
                }
            }
        })
    }

    /// Total fixed-point cost of a step-by-step path.
    pub fn path_cost(&self, path: &[Point]) -> i32 {
        path.windows(2).map(|w| step_cost(&w[0], &w[1])).sum()
    }

    /// [path_cost](Self::path_cost) in units where a cardinal step costs 1.0.
    pub fn path_cost_float(&self, path: &[Point]) -> f64 {
        cost_as_unit_float(self.path_cost(path))
    }

    fn cell_index(&self, point: &Point) -> usize {
        self.grid.get_ix(point.x as usize, point.y as usize)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.cell_index(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            !self
                .components
                .equiv(self.cell_index(start), self.cell_index(goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours
    /// to the same components. Corner cutting being disallowed, every legal
    /// diagonal step has a two-step cardinal equivalent, so cardinal
    /// adjacency alone determines connectivity in both movement modes.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w {
            for y in 0..h {
                if self.grid.get(x, y) {
                    continue;
                }
                let parent_ix = self.grid.get_ix(x, y);
                let point = Point::new(x as i32, y as i32);
                for neighbor in [
                    Point::new(point.x + 1, point.y),
                    Point::new(point.x, point.y + 1),
                ] {
                    if self.can_move_to_simple(neighbor) {
                        self.components.union(parent_ix, self.cell_index(&neighbor));
                    }
                }
            }
        }
    }
}

impl fmt::Display for SearchGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in 0..self.grid.height {
            let values = (0..self.grid.width)
                .map(|x| self.grid.get(x, y) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

impl Grid<bool> for SearchGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        SearchGrid {
            grid: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
            allow_diagonal_move: true,
        }
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and
    /// flags the components as dirty if components are (potentially) broken
    /// apart into multiple.
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        if blocked {
            if !self.grid.get(x, y) {
                self.components_dirty = true;
            }
        } else {
            let p = Point::new(x as i32, y as i32);
            let ix = self.grid.get_ix(x, y);
            for neighbor in [
                Point::new(p.x - 1, p.y),
                Point::new(p.x + 1, p.y),
                Point::new(p.x, p.y - 1),
                Point::new(p.x, p.y + 1),
            ] {
                if self.can_move_to_simple(neighbor) {
                    self.components.union(ix, self.cell_index(&neighbor));
                }
            }
        }
        self.grid.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}
