//! Parsed solver instances with timing

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Wall-clock span of one step (parsing or solving a part)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Timing {
    /// Run `step` and record when it started and finished
    pub fn measure<T>(step: impl FnOnce() -> T) -> (T, Timing) {
        let start = Utc::now();
        let output = step();
        let end = Utc::now();
        (output, Timing { start, end })
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Answer to one part plus how long it took
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub timing: Timing,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.timing.duration()
    }
}

/// A solver bound to one parsed input.
///
/// Parsing happens in [`SolverInstance::new`]; the parsed data then lives as
/// long as the instance and is handed mutably to each part in turn.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_timing: Timing,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parse_timing) = Timing::measure(|| S::parse(input));
        Ok(Self {
            year,
            day,
            shared: shared?,
            parse_timing,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], so that solvers with different
/// `SharedData` types can sit behind one `Box<dyn DynSolver>`.
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn run_all(solver: &mut dyn DynSolver) -> Result<(), aoc_solver::SolveError> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("part {part}: {} ({})", result.answer, result.duration());
///     }
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve `part`, recording its timing
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_timing(&self) -> Timing;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    /// Number of parts the underlying solver implements
    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_timing().duration()
    }
}

impl<S: Solver> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, timing) = Timing::measure(|| S::solve_part_checked(&mut self.shared, part));
        Ok(SolveResult {
            answer: answer?,
            timing,
        })
    }

    fn parse_timing(&self) -> Timing {
        self.parse_timing
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::AocParser;

    struct Lines;

    impl AocParser for Lines {
        type SharedData<'a> = Vec<&'a str>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            if input.is_empty() {
                return Err(ParseError::MissingData("no lines".into()));
            }
            Ok(input.lines().collect())
        }
    }

    impl Solver for Lines {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.len().to_string()),
                2 => Ok(shared.concat()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn test_instance_solves_parts() {
        let mut instance = SolverInstance::<Lines>::new(2025, 3, "ab\ncd").unwrap();
        assert_eq!(instance.year(), 2025);
        assert_eq!(instance.day(), 3);
        assert_eq!(instance.parts(), 2);

        let result = instance.solve(1).unwrap();
        assert_eq!(result.answer, "2");
        assert!(result.duration() >= TimeDelta::zero());
        assert_eq!(instance.solve(2).unwrap().answer, "abcd");
    }

    #[test]
    fn test_instance_rejects_out_of_range_part() {
        let mut instance = SolverInstance::<Lines>::new(2025, 3, "x").unwrap();
        assert!(matches!(instance.solve(0), Err(SolveError::PartOutOfRange(0))));
        assert!(matches!(instance.solve(3), Err(SolveError::PartOutOfRange(3))));
    }

    #[test]
    fn test_parse_failure_propagates() {
        let result = SolverInstance::<Lines>::new(2025, 3, "");
        assert!(matches!(result, Err(ParseError::MissingData(_))));
    }

    #[test]
    fn test_parse_timing_is_ordered() {
        let instance = SolverInstance::<Lines>::new(2025, 3, "a").unwrap();
        let timing = instance.parse_timing();
        assert!(timing.end >= timing.start);
        assert_eq!(instance.parse_duration(), timing.duration());
    }
}
