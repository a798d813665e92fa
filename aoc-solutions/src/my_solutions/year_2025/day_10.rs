use anyhow::{Context, anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

/// Part two enumerates every subset of a machine's buttons
const MAX_BUTTONS: usize = 20;
/// Lights are packed into one `u64` row
const MAX_LIGHTS: usize = 64;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["2025", "linear-algebra", "dynamic-programming"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    lights: usize,
    /// Bit `i` set when light `i` must end up on
    target: u64,
    /// Bit `i` set when the button toggles light `i` and bumps counter `i`
    buttons: Vec<u64>,
    joltage: Vec<u32>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| parse_machine(line).with_context(|| format!("line {}", idx + 1)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

/// `[.##.] (3) (1,3) (2) {3,5,4,7}`
fn parse_machine(line: &str) -> anyhow::Result<Machine> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    let diagram = strip(tokens.first().copied(), '[', ']').context("missing light diagram")?;
    let joltage = strip(tokens.last().copied(), '{', '}').context("missing joltage requirements")?;
    tokens.truncate(tokens.len() - 1);

    let lights = diagram.len();
    ensure!(
        (1..=MAX_LIGHTS).contains(&lights),
        "machine has {lights} lights, expected 1 to {MAX_LIGHTS}"
    );
    let mut target = 0;
    for (i, c) in diagram.chars().enumerate() {
        match c {
            '#' => target |= 1 << i,
            '.' => {}
            other => bail!("unexpected {other:?} in light diagram"),
        }
    }

    let buttons = tokens[1..]
        .iter()
        .map(|&token| parse_button(token, lights).with_context(|| format!("button {token:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    ensure!(
        buttons.len() <= MAX_BUTTONS,
        "machine has {} buttons, at most {MAX_BUTTONS} supported",
        buttons.len()
    );

    let joltage = parse_numbers(joltage)?;
    ensure!(
        joltage.len() == lights,
        "{} joltage counters for {lights} lights",
        joltage.len()
    );

    Ok(Machine {
        lights,
        target,
        buttons,
        joltage,
    })
}

fn parse_button(token: &str, lights: usize) -> anyhow::Result<u64> {
    let mut mask = 0;
    for light in parse_numbers(strip(Some(token), '(', ')')?)? {
        let light = usize::try_from(light)?;
        ensure!(light < lights, "wires light {light} of {lights}");
        mask |= 1 << light;
    }
    Ok(mask)
}

fn strip(token: Option<&str>, open: char, close: char) -> anyhow::Result<&str> {
    token
        .and_then(|t| t.strip_prefix(open))
        .and_then(|t| t.strip_suffix(close))
        .ok_or_else(|| anyhow!("expected `{open}..{close}`"))
}

fn parse_numbers(list: &str) -> anyhow::Result<Vec<u32>> {
    list.split(',')
        .map(|n| n.trim().parse().with_context(|| format!("invalid number {n:?}")))
        .collect()
}

impl Machine {
    /// Fewest presses that light exactly the target pattern.
    ///
    /// Pressing a button twice undoes it, so this is the minimum-weight
    /// solution of `A x = target` over GF(2), where column `j` of `A` is
    /// button `j`. Gauss-Jordan elimination gives one particular solution
    /// plus a null space basis; every solution is the particular one xor a
    /// combination of the basis, walked here in Gray code order.
    fn fewest_presses_for_lights(&self) -> Option<u32> {
        let n = self.buttons.len();
        let augmented = 1u64 << n;

        // Row `i` holds the buttons touching light `i`, target bit at column `n`
        let mut rows: Vec<u64> = (0..self.lights)
            .map(|light| {
                let wired = self
                    .buttons
                    .iter()
                    .enumerate()
                    .filter(|&(_, &b)| b >> light & 1 == 1)
                    .fold(0u64, |row, (j, _)| row | 1 << j);
                wired | if self.target >> light & 1 == 1 { augmented } else { 0 }
            })
            .collect();

        let mut pivots: Vec<usize> = Vec::new();
        for col in 0..n {
            let r = pivots.len();
            let Some(found) = (r..rows.len()).find(|&i| rows[i] >> col & 1 == 1) else {
                continue;
            };
            rows.swap(r, found);
            let pivot_row = rows[r];
            for (i, row) in rows.iter_mut().enumerate() {
                if i != r && *row >> col & 1 == 1 {
                    *row ^= pivot_row;
                }
            }
            pivots.push(col);
        }

        if rows[pivots.len()..].iter().any(|&row| row & augmented != 0) {
            return None;
        }

        let particular = pivots
            .iter()
            .enumerate()
            .filter(|&(r, _)| rows[r] & augmented != 0)
            .fold(0u64, |x, (_, &col)| x | 1 << col);

        let basis: Vec<u64> = (0..n)
            .filter(|col| !pivots.contains(col))
            .map(|free| {
                pivots
                    .iter()
                    .enumerate()
                    .filter(|&(r, _)| rows[r] >> free & 1 == 1)
                    .fold(1u64 << free, |v, (_, &col)| v | 1 << col)
            })
            .collect();

        let mut solution = particular;
        let mut best = solution.count_ones();
        for step in 1u64..1 << basis.len() {
            solution ^= basis[step.trailing_zeros() as usize];
            best = best.min(solution.count_ones());
        }
        Some(best)
    }

    /// Fewest presses that drive every counter to its joltage requirement.
    ///
    /// Any press vector splits into its odd part (a subset of buttons
    /// pressed once) plus twice another press vector. The subset must match
    /// the parity of the targets, after which the remaining targets halve.
    fn fewest_presses_for_joltage(&self) -> Option<u64> {
        let subsets = ButtonSubsets::new(&self.buttons, self.lights);
        let mut memo = HashMap::new();
        subsets.fewest(&self.joltage, &mut memo)
    }
}

/// Every subset of a machine's buttons, grouped by the parity pattern of
/// the counter increments it produces
struct ButtonSubsets {
    by_parity: HashMap<u64, Vec<(u64, Vec<u32>)>>,
}

impl ButtonSubsets {
    fn new(buttons: &[u64], lights: usize) -> Self {
        let mut by_parity: HashMap<u64, Vec<(u64, Vec<u32>)>> = HashMap::new();
        for subset in 0u64..1 << buttons.len() {
            let mut increments = vec![0u32; lights];
            for (j, &button) in buttons.iter().enumerate() {
                if subset >> j & 1 == 1 {
                    for (light, inc) in increments.iter_mut().enumerate() {
                        *inc += (button >> light & 1) as u32;
                    }
                }
            }
            by_parity
                .entry(parity(&increments))
                .or_default()
                .push((u64::from(subset.count_ones()), increments));
        }
        Self { by_parity }
    }

    fn fewest(&self, target: &[u32], memo: &mut HashMap<Vec<u32>, Option<u64>>) -> Option<u64> {
        if target.iter().all(|&t| t == 0) {
            return Some(0);
        }
        if let Some(&known) = memo.get(target) {
            return known;
        }

        let mut best: Option<u64> = None;
        for (presses, increments) in self.by_parity.get(&parity(target)).into_iter().flatten() {
            if increments.iter().zip(target).any(|(inc, t)| inc > t) {
                continue;
            }
            let half: Vec<u32> = increments.iter().zip(target).map(|(inc, t)| (t - inc) / 2).collect();
            if let Some(rest) = self.fewest(&half, memo) {
                let total = presses + 2 * rest;
                best = Some(best.map_or(total, |b| b.min(total)));
            }
        }

        memo.insert(target.to_vec(), best);
        best
    }
}

fn parity(values: &[u32]) -> u64 {
    values
        .iter()
        .enumerate()
        .fold(0, |mask, (i, &v)| mask | u64::from(v & 1) << i)
}

fn total_presses<T>(
    machines: &[Machine],
    presses: impl Fn(&Machine) -> Option<T>,
) -> Result<u64, SolveError>
where
    u64: From<T>,
{
    machines.iter().enumerate().try_fold(0u64, |total, (idx, machine)| {
        let n = presses(machine).ok_or_else(|| {
            SolveError::SolveFailed(format!("machine {} cannot be configured", idx + 1).into())
        })?;
        Ok(total + u64::from(n))
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_presses(shared, Machine::fewest_presses_for_lights)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_presses(shared, Machine::fewest_presses_for_joltage)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const SAMPLE: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[test]
    fn test_sample() {
        let mut machines = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut machines, 1).unwrap(), "7");
        assert_eq!(Solver::solve_part(&mut machines, 2).unwrap(), "33");
    }

    #[test]
    fn test_sample_machines() {
        let machines = Solver::parse(SAMPLE).unwrap();
        let lights: Vec<_> = machines.iter().map(Machine::fewest_presses_for_lights).collect();
        let joltage: Vec<_> = machines.iter().map(Machine::fewest_presses_for_joltage).collect();
        assert_eq!(lights, vec![Some(2), Some(3), Some(2)]);
        assert_eq!(joltage, vec![Some(10), Some(12), Some(11)]);
    }

    #[test]
    fn test_parse_machine() {
        let machine = parse_machine("[.##.] (3) (1,3) (2) {3,5,4,7}").unwrap();
        assert_eq!(
            machine,
            Machine {
                lights: 4,
                target: 0b0110,
                buttons: vec![0b1000, 0b1010, 0b0100],
                joltage: vec![3, 5, 4, 7],
            }
        );
    }

    #[test]
    fn test_unreachable_configurations() {
        // Light 1 has no button at all
        let machine = parse_machine("[.#] (0) {1,1}").unwrap();
        assert_eq!(machine.fewest_presses_for_lights(), None);
        assert_eq!(machine.fewest_presses_for_joltage(), None);
        let mut machines = vec![machine];
        assert!(Solver::solve_part(&mut machines, 1).is_err());
    }

    #[test]
    fn test_all_off_needs_no_presses() {
        let machine = parse_machine("[...] (0,1) (2) {0,0,0}").unwrap();
        assert_eq!(machine.fewest_presses_for_lights(), Some(0));
        assert_eq!(machine.fewest_presses_for_joltage(), Some(0));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_machine("(0) {1}").is_err());
        assert!(parse_machine("[#] (0)").is_err());
        assert!(parse_machine("[#] (1) {1}").is_err());
        assert!(parse_machine("[#x] (0) {1,1}").is_err());
        assert!(parse_machine("[##] (0) {1}").is_err());
        assert!(parse_machine("[#] 0 {1}").is_err());
    }

    /// Exhaustive search over press counts up to `limit` per button
    fn brute_force_joltage(machine: &Machine, limit: u32) -> Option<u64> {
        let n = machine.buttons.len();
        let mut best = None;
        let mut presses = vec![0u32; n];
        loop {
            let mut counters = vec![0u32; machine.lights];
            for (j, &button) in machine.buttons.iter().enumerate() {
                for (light, counter) in counters.iter_mut().enumerate() {
                    *counter += presses[j] * (button >> light & 1) as u32;
                }
            }
            if counters == machine.joltage {
                let total: u64 = presses.iter().map(|&p| u64::from(p)).sum();
                best = Some(best.map_or(total, |b: u64| b.min(total)));
            }

            let Some(j) = presses.iter().position(|&p| p < limit) else {
                return best;
            };
            presses[j] += 1;
            presses[..j].iter_mut().for_each(|p| *p = 0);
        }
    }

    proptest! {
        /// Both parts agree with exhaustive search on small machines
        #[test]
        fn prop_matches_brute_force(
            lights in 1usize..4,
            wiring in prop::collection::vec(1u64..8, 1..4),
            presses in prop::collection::vec(0u32..4, 3),
        ) {
            let buttons: Vec<u64> = wiring.iter().map(|w| w & ((1 << lights) - 1)).collect();
            let mut joltage = vec![0u32; lights];
            for (button, &p) in buttons.iter().zip(&presses) {
                for (light, counter) in joltage.iter_mut().enumerate() {
                    *counter += p * (button >> light & 1) as u32;
                }
            }
            let target = parity(&joltage);
            let machine = Machine { lights, target, buttons, joltage };

            prop_assert_eq!(machine.fewest_presses_for_joltage(), brute_force_joltage(&machine, 9));

            let odd_subsets = (0u64..1 << machine.buttons.len())
                .filter(|&s| {
                    let lit = machine.buttons.iter().enumerate()
                        .filter(|&(j, _)| s >> j & 1 == 1)
                        .fold(0, |acc, (_, &b)| acc ^ b);
                    lit == target
                })
                .map(|s| s.count_ones())
                .min();
            prop_assert_eq!(machine.fewest_presses_for_lights(), odd_subsets);
        }
    }
}
