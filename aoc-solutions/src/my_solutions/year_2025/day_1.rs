use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const DIAL_SIZE: i64 = 100;
const DIAL_START: i64 = 50;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["2025", "dial"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<i64>,
    counts: Option<ZeroCounts>,
}

#[derive(Debug, Clone, Copy)]
struct ZeroCounts {
    /// Rotations that end with the dial on 0
    landed: u64,
    /// Clicks onto 0, during or at the end of a rotation
    passed: u64,
}

fn parse_rotation(line: &str) -> anyhow::Result<i64> {
    let (sign, amount) = match line.as_bytes().first() {
        Some(b'L') => (-1, &line[1..]),
        Some(b'R') => (1, &line[1..]),
        _ => bail!("rotation must start with 'L' or 'R'"),
    };
    let amount: i64 = amount
        .parse()
        .with_context(|| format!("invalid rotation amount {amount:?}"))?;
    if amount < 0 {
        return Err(anyhow!("rotation amount must be non negative"));
    }
    Ok(sign * amount)
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rotations = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| parse_rotation(line).map_err(|e| anyhow!("(line {}) {e:#}", idx + 1)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        Ok(SharedData {
            rotations,
            counts: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(zero_counts(shared).landed.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(zero_counts(shared).passed.to_string())
    }
}

/// Turn the dial from `current` by `diff` clicks. Returns the new position
/// and how many times the dial pointed at 0 along the way.
fn turn(current: i64, diff: i64) -> (i64, u64) {
    let raw = current + diff;
    let zeros = if diff > 0 {
        raw.div_euclid(DIAL_SIZE) - current.div_euclid(DIAL_SIZE)
    } else if diff < 0 {
        (current - 1).div_euclid(DIAL_SIZE) - (raw - 1).div_euclid(DIAL_SIZE)
    } else {
        0
    };
    (raw.rem_euclid(DIAL_SIZE), zeros as u64)
}

fn zero_counts(shared: &mut SharedData) -> ZeroCounts {
    *shared.counts.get_or_insert_with(|| {
        let (_, landed, passed) = shared.rotations.iter().fold(
            (DIAL_START, 0, 0),
            |(dial, landed, passed), &diff| {
                let (next, zeros) = turn(dial, diff);
                (next, landed + u64::from(next == 0), passed + zeros)
            },
        );
        ZeroCounts { landed, passed }
    })
}
