use aoc_shared::{Direction, Grid};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::BTreeMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 7, tags = ["2025", "grid", "dynamic-programming"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Splitter,
}

#[derive(Debug)]
pub struct Manifold {
    grid: Grid<Cell>,
    start: (isize, isize),
}

/// Outcome of sending the beam down the manifold
#[derive(Debug, PartialEq, Eq)]
struct Descent {
    /// Splitters reached by at least one beam
    splits: u64,
    /// Distinct paths a single particle could take out of the manifold
    timelines: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = Manifold;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut start = None;
        let mut rows = Vec::new();

        for (y, line) in input.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(x, c)| match c {
                    '.' => Ok(Cell::Empty),
                    '^' => Ok(Cell::Splitter),
                    'S' if start.is_none() => {
                        start = Some((x as isize, y as isize));
                        Ok(Cell::Empty)
                    }
                    'S' => Err(ParseError::InvalidFormat("more than one beam source".into())),
                    other => Err(ParseError::InvalidFormat(format!(
                        "unexpected {other:?} at ({x}, {y})"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        let start = start.ok_or_else(|| ParseError::MissingData("no beam source `S`".into()))?;
        let grid = Grid::from_rows(rows).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(Manifold { grid, start })
    }
}

impl Manifold {
    /// Push every beam one row down at a time. Beams on the same column
    /// merge, carrying the sum of their timelines; a beam that leaves the
    /// grid ends its timelines.
    fn descend(&self) -> Descent {
        let mut beams = BTreeMap::from([(self.start.0, 1u64)]);
        let mut y = self.start.1;
        let mut splits = 0;
        let mut timelines = 0;

        while !beams.is_empty() {
            let mut next = BTreeMap::new();
            for (x, paths) in beams {
                let (bx, by) = Direction::S.apply(x, y);
                match self.grid.get(bx, by) {
                    Err(_) => timelines += paths,
                    Ok(Cell::Empty) => *next.entry(bx).or_insert(0) += paths,
                    Ok(Cell::Splitter) => {
                        splits += 1;
                        for side in [Direction::W, Direction::E] {
                            let (sx, _) = side.apply(bx, by);
                            *next.entry(sx).or_insert(0) += paths;
                        }
                    }
                }
            }
            beams = next;
            y += 1;
        }

        log::debug!("beam split {splits} times over {} rows", y - self.start.1);
        Descent { splits, timelines }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.descend().splits.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.descend().timelines.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
.......S.......
...............
.......^.......
...............
......^.^......
...............
.....^.^.^.....
...............
....^.^...^....
...............
...^.^...^.^...
...............
..^...^.....^..
...............
.^.^.^.^.^...^.
...............
";

    #[test]
    fn test_sample() {
        let mut manifold = Solver::parse(SAMPLE).unwrap();
        assert_eq!(manifold.start, (7, 0));
        assert_eq!(Solver::solve_part(&mut manifold, 1).unwrap(), "21");
        assert_eq!(Solver::solve_part(&mut manifold, 2).unwrap(), "40");
    }

    #[test]
    fn test_merging_beams_split_once() {
        // The two lower splitters both feed the middle column
        let manifold = Solver::parse("..S..\n.....\n..^..\n.....\n.^.^.\n.....\n").unwrap();
        assert_eq!(manifold.descend(), Descent { splits: 3, timelines: 4 });
    }

    #[test]
    fn test_beams_leaving_sideways_end_their_timeline() {
        let manifold = Solver::parse("S.\n^.\n..\n").unwrap();
        assert_eq!(manifold.descend(), Descent { splits: 1, timelines: 2 });
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("...\n.^.\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("S.S\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("S.#\n"), Err(ParseError::InvalidFormat(_))));
    }
}
