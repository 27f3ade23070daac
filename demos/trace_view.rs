use grid_astar::{SearchGrid, SearchResult};
use grid_util::grid::Grid;
use grid_util::point::Point;

// Renders the outcome of a search the way an interactive caller would:
// '#' wall, 'o' path cell, '.' examined cell, ' ' untouched cell,
// S and G mark the endpoints.
fn render(grid: &SearchGrid, result: &SearchResult, start: Point, end: Point) {
    for y in 0..grid.height() as i32 {
        let mut line = String::new();
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            line.push(if p == start {
                'S'
            } else if p == end {
                'G'
            } else if grid.get(x as usize, y as usize) {
                '#'
            } else if result.path.contains(&p) {
                'o'
            } else if result.examined.contains(&p) {
                '.'
            } else {
                ' '
            });
        }
        println!("{}", line);
    }
}

fn main() {
    let mut grid: SearchGrid = SearchGrid::new(23, 23, false);
    // Two wall runs the path has to wind around.
    for y in 0..18 {
        grid.set(6, y, true);
    }
    for y in 5..23 {
        grid.set(12, y, true);
    }
    for x in 12..20 {
        grid.set(x, 5, true);
    }
    grid.generate_components();
    let start = Point::new(1, 11);
    let end = Point::new(21, 11);
    let result = grid.search(start, end).unwrap();
    render(&grid, &result, start, end);
    println!(
        "path: {} cells, cost {:.1}; examined: {} cells",
        result.path.len(),
        grid.path_cost_float(&result.path),
        result.examined.len()
    );
}
