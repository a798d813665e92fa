//! Output formatting for solver results

use crate::executor::SolverResult;
use aoc_shared::timer::format_duration;
use std::time::{Duration, Instant};

pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{}", answer),
            (Ok(_), false) => println!("{}", format_result(result)),
            (Err(e), true) => eprintln!("Error: {}", e),
            (Err(_), false) => eprintln!("{}", format_result(result)),
        }
    }

    /// Totals over successful results plus the wall-clock time since
    /// construction
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let solved: Vec<&SolverResult> = results.iter().filter(|r| r.answer.is_ok()).collect();
        let failures = results.len() - solved.len();
        let total_parse: Duration = solved.iter().filter_map(|r| r.parse_duration).sum();
        let total_solve: Duration = solved.iter().map(|r| r.solve_duration).sum();
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Solvers: {} solved, {} failed", solved.len(), failures);
        println!("Total parse time: {}", format_duration(total_parse));
        println!("Total solve time: {}", format_duration(total_solve));
        println!("Elapsed wall-clock time: {}", format_duration(elapsed));
        if !elapsed.is_zero() {
            let speedup = (total_parse + total_solve).as_secs_f64() / elapsed.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// `YYYY/DD Part P: answer (parse: .., solve: ..)` or `YYYY/DD Part P: Error - ..`
fn format_result(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
    match &result.answer {
        Ok(answer) => {
            let parse = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{}: {} ({}solve: {})",
                prefix,
                answer,
                parse,
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{}: Error - {}", prefix, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutorError;

    fn result(part: u8, parse: Option<Duration>) -> SolverResult {
        SolverResult {
            year: 2025,
            day: 4,
            part,
            answer: Ok("13".to_string()),
            parse_duration: parse,
            solve_duration: Duration::from_micros(1_500),
        }
    }

    #[test]
    fn test_format_with_parse_time() {
        assert_eq!(
            format_result(&result(1, Some(Duration::from_micros(250)))),
            "2025/04 Part 1: 13 (parse: 250µs, solve: 1.50ms)"
        );
    }

    #[test]
    fn test_format_without_parse_time() {
        assert_eq!(format_result(&result(2, None)), "2025/04 Part 2: 13 (solve: 1.50ms)");
    }

    #[test]
    fn test_format_error() {
        let failed = SolverResult {
            answer: Err(ExecutorError::MissingSession { year: 2025, day: 4 }.into()),
            ..result(1, None)
        };
        assert_eq!(
            format_result(&failed),
            "2025/04 Part 1: Error - No session available to download input for 2025/04"
        );
    }
}
