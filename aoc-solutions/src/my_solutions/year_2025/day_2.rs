use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["2025", "ranges", "digits"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<RangeInclusive<u64>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let ranges = input
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(parse_range)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;

        if ranges.is_empty() {
            return Err(ParseError::MissingData("no ID ranges".into()));
        }
        Ok(ranges)
    }
}

fn parse_range(range: &str) -> anyhow::Result<RangeInclusive<u64>> {
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| anyhow!("expected `start-end`, got {range:?}"))?;
    let start: u64 = start.parse().with_context(|| format!("invalid range start {start:?}"))?;
    let end: u64 = end.parse().with_context(|| format!("invalid range end {end:?}"))?;
    if end < start {
        return Err(anyhow!("range {start}-{end} is reversed"));
    }
    Ok(start..=end)
}

fn digit_count(n: u64) -> u32 {
    n.checked_ilog10().unwrap_or(0) + 1
}

/// IDs in `range` made of one digit block written `repeats` times
/// for some `repeats` accepted by `allowed`.
///
/// Instead of scanning the range, every candidate is `block * multiplier`
/// where the multiplier is `1 0..01 0..01` with one `1` per repetition, so
/// only the block bounds need computing.
fn repeated_ids(range: &RangeInclusive<u64>, allowed: impl Fn(u32) -> bool) -> BTreeSet<u64> {
    let mut ids = BTreeSet::new();

    for digits in digit_count(*range.start())..=digit_count(*range.end()) {
        for repeats in (2..=digits).filter(|&k| digits % k == 0 && allowed(k)) {
            let block_len = digits / repeats;
            let shift = 10u64.pow(block_len);
            let multiplier = (1..repeats).fold(1u64, |m, _| m * shift + 1);

            let lowest = (shift / 10).max(range.start().div_ceil(multiplier));
            let highest = (shift - 1).min(range.end() / multiplier);
            ids.extend((lowest..=highest).map(|block| block * multiplier));
        }
    }
    ids
}

fn sum_repeated(ranges: &[RangeInclusive<u64>], allowed: impl Fn(u32) -> bool + Copy) -> u64 {
    ranges
        .iter()
        .map(|range| repeated_ids(range, allowed).into_iter().sum::<u64>())
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_repeated(shared, |repeats| repeats == 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_repeated(shared, |_| true).to_string())
    }
}
