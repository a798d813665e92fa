use anyhow::{anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["2025", "graph", "dynamic-programming"])]
pub struct Solver;

const YOU: &str = "you";
const SERVER: &str = "svr";
const OUT: &str = "out";
/// Devices every counted server path must pass, in either order
const CHECKPOINTS: [&str; 2] = ["dac", "fft"];

/// Device wiring, borrowed from the puzzle input
#[derive(Debug)]
pub struct Rack<'a> {
    outputs: HashMap<&'a str, Vec<&'a str>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Rack<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut outputs = HashMap::new();

        for (idx, line) in input.lines().map(str::trim).enumerate() {
            if line.is_empty() {
                continue;
            }
            let invalid = |msg: String| ParseError::InvalidFormat(format!("(line {}) {msg}", idx + 1));
            let (device, targets) = line
                .split_once(':')
                .ok_or_else(|| invalid(format!("expected `name: outputs`, got {line:?}")))?;
            let device = device.trim();
            if device.is_empty() {
                return Err(invalid("missing device name".into()));
            }
            if outputs.insert(device, targets.split_whitespace().collect()).is_some() {
                return Err(invalid(format!("device {device:?} listed twice")));
            }
        }

        if outputs.is_empty() {
            return Err(ParseError::MissingData("no devices".into()));
        }
        Ok(Rack { outputs })
    }
}

impl<'a> Rack<'a> {
    /// Number of distinct paths from `from` to `to`. The wiring must not
    /// loop on any path that can be walked from `from`.
    fn paths(&self, from: &'a str, to: &'a str) -> anyhow::Result<u64> {
        ensure!(
            from == OUT || self.outputs.contains_key(from),
            "no device named {from:?}"
        );
        let mut memo = HashMap::new();
        self.count(from, to, &mut memo)
    }

    /// `memo` holds `None` while a device is on the current path
    fn count(
        &self,
        node: &'a str,
        to: &'a str,
        memo: &mut HashMap<&'a str, Option<u64>>,
    ) -> anyhow::Result<u64> {
        if node == to {
            return Ok(1);
        }
        match memo.get(node) {
            Some(Some(known)) => return Ok(*known),
            Some(None) => bail!("wiring loops through {node:?}"),
            None => {}
        }

        memo.insert(node, None);
        let mut total = 0u64;
        for &next in self.outputs.get(node).into_iter().flatten() {
            total += self.count(next, to, memo)?;
        }
        memo.insert(node, Some(total));
        Ok(total)
    }

    /// Paths from the server to the output that visit both checkpoints
    fn checked_server_paths(&self) -> anyhow::Result<u64> {
        let [a, b] = CHECKPOINTS;
        let through = |first: &'a str, second: &'a str| -> anyhow::Result<u64> {
            Ok(self.paths(SERVER, first)? * self.paths(first, second)? * self.paths(second, OUT)?)
        };
        // At most one of the two orders can be non-zero in loop-free wiring
        Ok(through(a, b)? + through(b, a)?)
    }
}

fn solve_failed(e: anyhow::Error) -> SolveError {
    SolveError::SolveFailed(e.into())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.paths(YOU, OUT).map(|n| n.to_string()).map_err(solve_failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        for checkpoint in CHECKPOINTS {
            if !shared.outputs.contains_key(checkpoint) {
                return Err(solve_failed(anyhow!("no device named {checkpoint:?}")));
            }
        }
        shared
            .checked_server_paths()
            .map(|n| n.to_string())
            .map_err(solve_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE_YOU: &str = "\
aaa: you hhh
you: bbb ccc
bbb: ddd eee
ccc: ddd eee fff
ddd: ggg
eee: out
fff: out
ggg: out
hhh: ccc fff iii
iii: out
";

    const SAMPLE_SERVER: &str = "\
svr: aaa bbb
aaa: fft
fft: ccc
bbb: tty
tty: ccc
ccc: ddd eee
ddd: hub
hub: fff
eee: dac
dac: fff
fff: ggg hhh
ggg: out
hhh: out
";

    #[test]
    fn test_sample_part_one() {
        let mut rack = Solver::parse(SAMPLE_YOU).unwrap();
        assert_eq!(Solver::solve_part(&mut rack, 1).unwrap(), "5");
    }

    #[test]
    fn test_sample_part_two() {
        let mut rack = Solver::parse(SAMPLE_SERVER).unwrap();
        assert_eq!(rack.paths(SERVER, OUT).unwrap(), 8);
        assert_eq!(Solver::solve_part(&mut rack, 2).unwrap(), "2");
    }

    #[test]
    fn test_missing_start_device_fails() {
        let mut rack = Solver::parse(SAMPLE_SERVER).unwrap();
        assert!(Solver::solve_part(&mut rack, 1).is_err());
        let mut rack = Solver::parse(SAMPLE_YOU).unwrap();
        assert!(Solver::solve_part(&mut rack, 2).is_err());
    }

    #[test]
    fn test_loop_is_reported() {
        let rack = Solver::parse("you: a\na: b\nb: a out\n").unwrap();
        let err = rack.paths(YOU, OUT).unwrap_err();
        assert!(err.to_string().contains("loops"));
    }

    #[test]
    fn test_dead_ends_contribute_nothing() {
        let rack = Solver::parse("you: a b\na: out\nb: nowhere\n").unwrap();
        assert_eq!(rack.paths(YOU, OUT).unwrap(), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("you out\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse(": out\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("a: b\na: c\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("\n"), Err(ParseError::MissingData(_))));
    }
}
