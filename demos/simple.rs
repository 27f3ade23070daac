use grid_astar::SearchGrid;
use grid_util::grid::Grid;
use grid_util::point::Point;
use grid_util::rect::Rect;

// In this example a path is found on a grid with shape
// #####
// #S  #
// # # #
// #  E#
// #####
// S marks the start
// E marks the end
fn main() {
    let mut grid: SearchGrid = SearchGrid::new(5, 5, true);
    grid.set_rectangle(&Rect::new(1, 1, 3, 3), false);
    grid.set(2, 2, true);
    grid.generate_components();
    let start = Point::new(1, 1);
    let end = Point::new(3, 3);
    let result = grid.search(start, end).unwrap();
    if result.found() {
        println!("A path has been found:");
        for p in &result.path {
            println!("{:?}", p);
        }
        println!("{} cells were examined to find it", result.examined.len());
    }
}
