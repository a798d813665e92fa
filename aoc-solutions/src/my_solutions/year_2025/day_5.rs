use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["2025", "ranges"])]
pub struct Solver;

#[derive(Debug)]
pub struct Inventory {
    /// Fresh ID ranges, sorted by start and merged so none overlap or touch
    fresh: Vec<RangeInclusive<u64>>,
    ingredients: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Inventory;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut ranges = Vec::new();
        let mut ingredients: Vec<u64> = Vec::new();

        for (idx, line) in input.lines().map(str::trim).enumerate() {
            if line.is_empty() {
                continue;
            }
            let parsed = match line.split_once('-') {
                Some((start, end)) => parse_range(start, end).map(|r| ranges.push(r)),
                None => line
                    .parse::<u64>()
                    .map(|id| ingredients.push(id))
                    .with_context(|| format!("invalid ingredient id {line:?}")),
            };
            parsed.map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e:#}", idx + 1)))?;
        }

        if ranges.is_empty() {
            return Err(ParseError::MissingData("no fresh ID ranges".into()));
        }

        Ok(Inventory {
            fresh: merge(ranges),
            ingredients,
        })
    }
}

fn parse_range(start: &str, end: &str) -> anyhow::Result<RangeInclusive<u64>> {
    let start: u64 = start.parse().with_context(|| format!("invalid range start {start:?}"))?;
    let end: u64 = end.parse().with_context(|| format!("invalid range end {end:?}"))?;
    if end < start {
        return Err(anyhow!("range {start}-{end} is reversed"));
    }
    Ok(start..=end)
}

/// Sort by start and fold overlapping or adjacent ranges together
fn merge(mut ranges: Vec<RangeInclusive<u64>>) -> Vec<RangeInclusive<u64>> {
    ranges.sort_by_key(|r| *r.start());

    let mut merged: Vec<RangeInclusive<u64>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

impl Inventory {
    /// Binary search for the last range starting at or before `id`
    fn is_fresh(&self, id: u64) -> bool {
        let idx = self.fresh.partition_point(|r| *r.start() <= id);
        idx > 0 && self.fresh[idx - 1].contains(&id)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = shared
            .ingredients
            .iter()
            .filter(|&&id| shared.is_fresh(id))
            .count();
        Ok(fresh.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .fresh
            .iter()
            .map(|r| r.end() - r.start() + 1)
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const SAMPLE: &str = "3-5\n10-14\n16-20\n12-18\n\n1\n5\n8\n11\n17\n32\n";

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "3");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "14");
    }

    #[test]
    fn test_merge() {
        assert_eq!(merge(vec![10..=14, 3..=5, 16..=20, 12..=18]), vec![3..=5, 10..=20]);
        assert_eq!(merge(vec![1..=2, 3..=4]), vec![1..=4]);
        assert_eq!(merge(vec![1..=10, 2..=3]), vec![1..=10]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("5-3\n\n4"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("1-3\n\nabc"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("\n7\n"), Err(ParseError::MissingData(_))));
    }

    proptest! {
        /// Merged lookup agrees with a linear scan over the raw ranges
        #[test]
        fn prop_is_fresh_matches_scan(
            raw in prop::collection::vec((0u64..200, 0u64..20), 1..10),
            ids in prop::collection::vec(0u64..240, 1..30),
        ) {
            let ranges: Vec<_> = raw.iter().map(|&(s, len)| s..=s + len).collect();
            let inventory = Inventory { fresh: merge(ranges.clone()), ingredients: vec![] };

            for id in ids {
                prop_assert_eq!(inventory.is_fresh(id), ranges.iter().any(|r| r.contains(&id)));
            }
        }
    }
}
