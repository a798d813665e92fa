use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Closest pairs wired together before measuring circuits
const CONNECTIONS: usize = 1000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["2025", "union-find", "graph"])]
pub struct Solver;

type Point = [i64; 3];

/// Candidate connection between boxes `a` and `b`
#[derive(Debug, Clone, Copy)]
struct Edge {
    distance_sq: i64,
    a: usize,
    b: usize,
}

#[derive(Debug)]
pub struct Playground {
    boxes: Vec<Point>,
    /// Every pair of boxes, shortest first; built on first use
    edges: Option<Vec<Edge>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Playground;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let boxes = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| parse_point(line).map_err(|e| anyhow!("(line {}) {e:#}", idx + 1)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        if boxes.is_empty() {
            return Err(ParseError::MissingData("no junction boxes".into()));
        }
        Ok(Playground { boxes, edges: None })
    }
}

fn parse_point(line: &str) -> anyhow::Result<Point> {
    let coords = line
        .split(',')
        .map(|c| c.trim().parse().with_context(|| format!("invalid coordinate {c:?}")))
        .collect::<anyhow::Result<Vec<i64>>>()?;
    ensure!(coords.len() == 3, "expected `x,y,z`, got {line:?}");
    Ok([coords[0], coords[1], coords[2]])
}

fn distance_sq(p: &Point, q: &Point) -> i64 {
    p.iter().zip(q).map(|(a, b)| (a - b) * (a - b)).sum()
}

/// Union-find over box indices with union by size and path halving
struct Circuits {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl Circuits {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            count: n,
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the circuits holding `a` and `b`; false if already one circuit
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        self.count -= 1;
        true
    }

    /// Sizes of all circuits, largest first
    fn sizes(&mut self) -> Vec<usize> {
        let roots: Vec<usize> = (0..self.parent.len()).filter(|&x| self.find(x) == x).collect();
        let mut sizes: Vec<usize> = roots.into_iter().map(|root| self.size[root]).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }
}

impl Playground {
    fn edges(&mut self) -> &[Edge] {
        let boxes = &self.boxes;
        self.edges.get_or_insert_with(|| {
            let mut edges: Vec<Edge> = (0..boxes.len())
                .flat_map(|a| {
                    (a + 1..boxes.len()).map(move |b| Edge {
                        distance_sq: distance_sq(&boxes[a], &boxes[b]),
                        a,
                        b,
                    })
                })
                .collect();
            // Stable, so equally distant pairs keep input order
            edges.sort_by_key(|e| e.distance_sq);
            log::debug!("sorted {} candidate connections", edges.len());
            edges
        })
    }

    /// Product of the three largest circuits after wiring the `pairs`
    /// closest pairs, whether or not a pair was already connected
    fn largest_circuits_product(&mut self, pairs: usize) -> usize {
        let mut circuits = Circuits::new(self.boxes.len());
        for edge in self.edges().iter().take(pairs) {
            circuits.union(edge.a, edge.b);
        }
        circuits.sizes().iter().take(3).product()
    }

    /// The connection that first joins every box into one circuit
    fn final_connection(&mut self) -> Option<(Point, Point)> {
        let mut circuits = Circuits::new(self.boxes.len());
        let last = self
            .edges()
            .iter()
            .find(|edge| circuits.union(edge.a, edge.b) && circuits.count == 1)
            .copied()?;
        Some((self.boxes[last.a], self.boxes[last.b]))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.largest_circuits_product(CONNECTIONS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b) = shared
            .final_connection()
            .ok_or_else(|| SolveError::SolveFailed("boxes never form a single circuit".into()))?;
        Ok((a[0] * b[0]).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

    #[test]
    fn test_sample() {
        let mut playground = Solver::parse(SAMPLE).unwrap();
        assert_eq!(playground.largest_circuits_product(10), 40);
        assert_eq!(Solver::solve_part(&mut playground, 2).unwrap(), "25272");
    }

    #[test]
    fn test_closest_pair_first() {
        let mut playground = Solver::parse(SAMPLE).unwrap();
        let closest = playground.edges()[0];
        let mut pair = [closest.a, closest.b];
        pair.sort();
        // 162,817,812 and 425,690,689
        assert_eq!(pair, [0, 19]);
    }

    #[test]
    fn test_circuits() {
        let mut circuits = Circuits::new(5);
        assert!(circuits.union(0, 1));
        assert!(circuits.union(1, 2));
        assert!(!circuits.union(0, 2));
        assert_eq!(circuits.count, 3);
        assert_eq!(circuits.sizes(), vec![3, 1, 1]);
    }

    #[test]
    fn test_single_box_has_no_final_connection() {
        let mut playground = Solver::parse("1,2,3\n").unwrap();
        assert!(playground.final_connection().is_none());
        assert!(Solver::solve_part(&mut playground, 2).is_err());
        assert_eq!(Solver::solve_part(&mut playground, 1).unwrap(), "1");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("1,2\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("1,2,x\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("\n"), Err(ParseError::MissingData(_))));
    }
}
