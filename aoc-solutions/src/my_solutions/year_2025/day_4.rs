use aoc_shared::Grid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// A roll can be lifted when fewer than this many neighbours hold rolls
const CROWDED: usize = 4;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["2025", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<bool>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rows = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|c| c != '.').collect())
            .collect();

        Grid::from_rows(rows).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(liftable(shared).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        let mut removed = 0;

        loop {
            let lift: Vec<_> = liftable(&grid).collect();
            if lift.is_empty() {
                break;
            }
            for (x, y) in lift {
                grid.queue_set(x as isize, y as isize, false)
                    .map_err(|e| SolveError::SolveFailed(Box::new(e)))?;
            }
            removed += grid.apply_queued_ops();
        }

        Ok(removed.to_string())
    }
}

/// Rolls with fewer than [`CROWDED`] rolls around them
fn liftable(grid: &Grid<bool>) -> impl Iterator<Item = (usize, usize)> + '_ {
    grid.iter()
        .filter(|&(x, y, &roll)| {
            roll && grid
                .adjacencies(x as isize, y as isize)
                .iter()
                .filter(|&&neighbour| neighbour)
                .count()
                < CROWDED
        })
        .map(|(x, y, _)| (x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@.
@@@@@@@@.@
@.@.@@@.@.
";

    #[test]
    fn test_sample() {
        let mut grid = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut grid, 1).unwrap(), "13");
        assert_eq!(Solver::solve_part(&mut grid, 2).unwrap(), "43");
    }

    #[test]
    fn test_part_two_leaves_shared_grid_intact() {
        let mut grid = Solver::parse(SAMPLE).unwrap();
        let before = grid.clone();
        Solver::solve_part(&mut grid, 2).unwrap();
        assert_eq!(grid, before);
        assert_eq!(Solver::solve_part(&mut grid, 1).unwrap(), "13");
    }

    #[test]
    fn test_full_block_keeps_its_core() {
        // Corners have 3 neighbours and go first; the centre of a 3x3 block
        // only becomes liftable once the corners are gone.
        let mut grid = Solver::parse("@@@\n@@@\n@@@\n").unwrap();
        assert_eq!(Solver::solve_part(&mut grid, 1).unwrap(), "4");
        assert_eq!(Solver::solve_part(&mut grid, 2).unwrap(), "9");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(Solver::parse("\n\n"), Err(ParseError::InvalidFormat(_))));
    }
}
