use anyhow::{anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["2025", "greedy"])]
pub struct Solver;

/// Batteries switched on per bank in each part
const PART_1_BATTERIES: usize = 2;
const PART_2_BATTERIES: usize = 12;

/// One bank of battery joltage ratings, each a single digit
type Bank = Vec<u8>;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Bank>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| parse_bank(line).map_err(|e| anyhow!("(line {}) {e:#}", idx + 1)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_bank(line: &str) -> anyhow::Result<Bank> {
    let bank: Bank = line
        .bytes()
        .map(|b| {
            b.is_ascii_digit()
                .then(|| b - b'0')
                .ok_or_else(|| anyhow!("invalid joltage {:?}", b as char))
        })
        .collect::<anyhow::Result<_>>()?;
    ensure!(
        bank.len() >= PART_2_BATTERIES,
        "bank has {} batteries, need at least {PART_2_BATTERIES}",
        bank.len()
    );
    Ok(bank)
}

/// Largest number formed by `count` digits of `bank` kept in order.
///
/// Each digit is the leftmost maximum of the window that still leaves
/// enough digits behind it for the rest of the number.
fn max_joltage(bank: &[u8], count: usize) -> u64 {
    let mut joltage = 0;
    let mut start = 0;

    for remaining in (0..count).rev() {
        let window = &bank[start..bank.len() - remaining];
        let (offset, digit) = window
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, digit)| digit)
            .map_or((0, 0), |(offset, &digit)| (offset, digit));

        joltage = joltage * 10 + u64::from(digit);
        start += offset + 1;
    }
    joltage
}

fn total_joltage(banks: &[Bank], count: usize) -> u64 {
    banks.iter().map(|bank| max_joltage(bank, count)).sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_joltage(shared, PART_1_BATTERIES).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_joltage(shared, PART_2_BATTERIES).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
987654321111111
811111111111119
234234234234278
818181911112111
";

    #[test]
    fn test_sample() {
        let mut banks = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut banks, 1).unwrap(), "357");
        assert_eq!(Solver::solve_part(&mut banks, 2).unwrap(), "3121910778619");
    }

    #[test]
    fn test_max_joltage_prefers_leftmost_maximum() {
        assert_eq!(max_joltage(&[9, 8, 7], 2), 98);
        assert_eq!(max_joltage(&[8, 1, 1, 9], 2), 89);
        // Taking the second 9 would waste the first one
        assert_eq!(max_joltage(&[9, 1, 9, 1], 2), 99);
        assert_eq!(max_joltage(&[1, 2, 3], 3), 123);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("12345678901x"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("98765"), Err(ParseError::InvalidFormat(_))));
    }
}
