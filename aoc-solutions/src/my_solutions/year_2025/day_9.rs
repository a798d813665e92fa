use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["2025", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tile {
    x: i64,
    y: i64,
}

impl Tile {
    /// Tiles covered by the rectangle spanned by `self` and `other`, borders included
    fn area(self, other: Tile) -> i64 {
        ((self.x - other.x).abs() + 1) * ((self.y - other.y).abs() + 1)
    }
}

/// Red tiles in loop order; consecutive tiles (wrapping around) share a row
/// or a column and the straight runs between them are green.
#[derive(Debug)]
pub struct Floor {
    red: Vec<Tile>,
}

impl AocParser for Solver {
    type SharedData<'a> = Floor;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_floor(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

fn parse_floor(input: &str) -> anyhow::Result<Floor> {
    let red = input
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| parse_tile(line).with_context(|| format!("line {}", idx + 1)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if red.len() < 2 {
        bail!("need at least two red tiles, got {}", red.len());
    }
    for (a, b) in edges(&red) {
        if a.x != b.x && a.y != b.y {
            bail!("red tiles {},{} and {},{} share no row or column", a.x, a.y, b.x, b.y);
        }
    }
    Ok(Floor { red })
}

fn parse_tile(line: &str) -> anyhow::Result<Tile> {
    let (x, y) = line
        .split_once(',')
        .ok_or_else(|| anyhow!("expected `x,y`, got {line:?}"))?;
    Ok(Tile {
        x: x.trim().parse().with_context(|| format!("invalid x {x:?}"))?,
        y: y.trim().parse().with_context(|| format!("invalid y {y:?}"))?,
    })
}

/// Consecutive pairs of the loop, closing back to the first tile
fn edges(red: &[Tile]) -> impl Iterator<Item = (Tile, Tile)> + '_ {
    red.iter().copied().zip(red.iter().copied().cycle().skip(1))
}

impl Floor {
    fn on_boundary(&self, p: Tile) -> bool {
        edges(&self.red).any(|(a, b)| {
            let between = |v: i64, s: i64, t: i64| s.min(t) <= v && v <= s.max(t);
            (a.x == b.x && p.x == a.x && between(p.y, a.y, b.y))
                || (a.y == b.y && p.y == a.y && between(p.x, a.x, b.x))
        })
    }

    /// Red or green: on the loop, or enclosed by it.
    ///
    /// Casts a ray towards +x and counts the vertical walls it crosses. Each
    /// wall covers `[min_y, max_y)` so a ray through a corner is counted once.
    fn is_colored(&self, p: Tile) -> bool {
        if self.on_boundary(p) {
            return true;
        }
        let crossings = edges(&self.red)
            .filter(|&(a, b)| a.x == b.x && a.x > p.x && a.y.min(b.y) <= p.y && p.y < a.y.max(b.y))
            .count();
        crossings % 2 == 1
    }

    fn largest_rectangle(&self) -> i64 {
        let mut best = 0;
        for (i, &a) in self.red.iter().enumerate() {
            for &b in &self.red[i + 1..] {
                best = best.max(a.area(b));
            }
        }
        best
    }

    /// Largest rectangle with red opposite corners that only covers red or
    /// green tiles
    fn largest_colored_rectangle(&self) -> Option<i64> {
        let compressed = CompressedFloor::new(self);
        let mut best = None;

        for (i, &a) in self.red.iter().enumerate() {
            for &b in &self.red[i + 1..] {
                let area = a.area(b);
                if best.is_some_and(|best| area <= best) {
                    continue;
                }
                let fits = self.is_colored(Tile { x: b.x, y: a.y })
                    && self.is_colored(Tile { x: a.x, y: b.y })
                    && compressed.uncolored_between(a, b) == Some(0);
                if fits {
                    best = Some(area);
                }
            }
        }
        best
    }
}

/// The floor cut along every distinct red `x` and `y`.
///
/// Cell `(i, j)` spans `xs[i]..xs[i + 1]` by `ys[j]..ys[j + 1]` and is
/// uncolored when the tile just inside its top-left corner is. A summed-area
/// table over those cells answers "is any cell in this block uncolored" in
/// constant time.
struct CompressedFloor {
    xs: Vec<i64>,
    ys: Vec<i64>,
    /// `sums[j][i]` counts uncolored cells with column below `i` and row below `j`
    sums: Vec<Vec<u32>>,
}

impl CompressedFloor {
    fn new(floor: &Floor) -> Self {
        let sorted_unique = |key: fn(&Tile) -> i64| {
            let mut values: Vec<i64> = floor.red.iter().map(key).collect();
            values.sort_unstable();
            values.dedup();
            values
        };
        let xs = sorted_unique(|t| t.x);
        let ys = sorted_unique(|t| t.y);

        let (columns, rows) = (xs.len() - 1, ys.len() - 1);
        let mut sums = vec![vec![0u32; columns + 1]; rows + 1];
        for j in 0..rows {
            for i in 0..columns {
                let inside_corner = Tile {
                    x: xs[i] + 1,
                    y: ys[j] + 1,
                };
                let uncolored = u32::from(!floor.is_colored(inside_corner));
                sums[j + 1][i + 1] = uncolored + sums[j][i + 1] + sums[j + 1][i] - sums[j][i];
            }
        }
        log::debug!("compressed floor to {columns}x{rows} cells, {} uncolored", sums[rows][columns]);

        Self { xs, ys, sums }
    }

    /// Uncolored cells inside the rectangle spanned by two red tiles
    fn uncolored_between(&self, a: Tile, b: Tile) -> Option<u32> {
        let rank = |values: &[i64], v: i64| values.binary_search(&v).ok();
        let (xa, xb) = (rank(&self.xs, a.x)?, rank(&self.xs, b.x)?);
        let (ya, yb) = (rank(&self.ys, a.y)?, rank(&self.ys, b.y)?);
        let (c1, c2) = (xa.min(xb), xa.max(xb));
        let (r1, r2) = (ya.min(yb), ya.max(yb));

        Some(self.sums[r2][c2] + self.sums[r1][c1] - self.sums[r1][c2] - self.sums[r2][c1])
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.largest_rectangle().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .largest_colored_rectangle()
            .map(|area| area.to_string())
            .ok_or_else(|| SolveError::SolveFailed("no rectangle stays on colored tiles".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "7,1\n11,1\n11,7\n9,7\n9,5\n2,5\n2,3\n7,3\n";

    fn tile(x: i64, y: i64) -> Tile {
        Tile { x, y }
    }

    #[test]
    fn test_sample() {
        let mut floor = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut floor, 1).unwrap(), "50");
        assert_eq!(Solver::solve_part(&mut floor, 2).unwrap(), "24");
    }

    #[test]
    fn test_area_includes_borders() {
        assert_eq!(tile(2, 5).area(tile(11, 1)), 50);
        assert_eq!(tile(7, 3).area(tile(7, 3)), 1);
    }

    #[test]
    fn test_is_colored() {
        let floor = Solver::parse(SAMPLE).unwrap();
        // Red corner, green border run, enclosed interior
        assert!(floor.is_colored(tile(7, 1)));
        assert!(floor.is_colored(tile(9, 1)));
        assert!(floor.is_colored(tile(8, 4)));
        // Outside the notch and beyond the loop
        assert!(!floor.is_colored(tile(3, 2)));
        assert!(!floor.is_colored(tile(10, 8)));
        assert!(!floor.is_colored(tile(0, 4)));
    }

    #[test]
    fn test_rectangle_crossing_notch_is_rejected() {
        let floor = Solver::parse(SAMPLE).unwrap();
        let compressed = CompressedFloor::new(&floor);
        // 2,5 to 11,1 covers the empty corner around 2..7 x 1..3
        assert!(compressed.uncolored_between(tile(2, 5), tile(11, 1)).unwrap() > 0);
        assert_eq!(compressed.uncolored_between(tile(9, 5), tile(2, 3)), Some(0));
    }

    #[test]
    fn test_rectangle_loop_is_fully_colored() {
        let mut floor = Solver::parse("0,0\n4,0\n4,3\n0,3\n").unwrap();
        assert_eq!(Solver::solve_part(&mut floor, 1).unwrap(), "20");
        assert_eq!(Solver::solve_part(&mut floor, 2).unwrap(), "20");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("1,1\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("1,1\n2,2\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("1;1\n1,5\n"), Err(ParseError::InvalidFormat(_))));
    }
}
