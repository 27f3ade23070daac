use grid_astar::SearchGrid;
use grid_util::grid::Grid;
use grid_util::point::Point;
use grid_util::rect::Rect;

fn main() {
    let mut grid: SearchGrid = SearchGrid::new(10, 10, false);
    grid.set_rectangle(&Rect::new(1, 1, 2, 2), true);
    grid.set_rectangle(&Rect::new(5, 0, 2, 2), true);
    grid.set_rectangle(&Rect::new(0, 5, 2, 2), true);
    grid.set_rectangle(&Rect::new(8, 8, 2, 2), true);
    grid.allow_diagonal_move = false;
    grid.generate_components();
    let start = Point::new(0, 0);
    let end = Point::new(7, 7);
    let result = grid.search(start, end).unwrap();
    println!("{:?}", result.path);
}
