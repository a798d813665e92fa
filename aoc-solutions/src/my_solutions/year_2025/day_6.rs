use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["2025", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Multiply,
}

impl Operator {
    fn apply(self, numbers: &[u64]) -> u64 {
        match self {
            Operator::Add => numbers.iter().sum(),
            Operator::Multiply => numbers.iter().product(),
        }
    }
}

/// One worksheet problem read both ways
#[derive(Debug, PartialEq, Eq)]
pub struct Problem {
    operator: Operator,
    /// One number per row, as humans read it
    rows: Vec<u64>,
    /// One number per column, digits read top to bottom
    columns: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Problem>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_worksheet(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

/// Problems are blocks of columns separated by columns that are blank on
/// every line. The last line holds one operator per block.
fn parse_worksheet(input: &str) -> anyhow::Result<Vec<Problem>> {
    // Alignment matters, so only line endings and trailing blank lines go
    let mut lines: Vec<&[u8]> = input
        .lines()
        .map(|line| line.trim_end_matches('\r').as_bytes())
        .collect();
    while lines.last().is_some_and(|l| l.iter().all(|&b| b == b' ')) {
        lines.pop();
    }
    let Some((operators, numbers)) = lines.split_last() else {
        bail!("worksheet is empty");
    };
    if numbers.is_empty() {
        bail!("worksheet has no number rows");
    }

    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let at = |line: &[u8], x: usize| line.get(x).copied().unwrap_or(b' ');
    let blank_column = |x: usize| lines.iter().all(|&l| at(l, x) == b' ');

    let mut problems = Vec::new();
    let mut x = 0;
    while x < width {
        if blank_column(x) {
            x += 1;
            continue;
        }
        let start = x;
        while x < width && !blank_column(x) {
            x += 1;
        }
        problems.push(
            parse_problem(operators, numbers, start..x, at)
                .with_context(|| format!("problem at column {}", start + 1))?,
        );
    }
    Ok(problems)
}

fn parse_problem(
    operators: &[u8],
    numbers: &[&[u8]],
    columns: std::ops::Range<usize>,
    at: impl Fn(&[u8], usize) -> u8,
) -> anyhow::Result<Problem> {
    let mut symbols = columns.clone().map(|x| at(operators, x)).filter(|&b| b != b' ');
    let operator = match (symbols.next(), symbols.next()) {
        (Some(b'+'), None) => Operator::Add,
        (Some(b'*'), None) => Operator::Multiply,
        (None, _) => bail!("missing operator"),
        _ => bail!("expected a single `+` or `*`"),
    };

    let to_number = |digits: Vec<u8>| -> anyhow::Result<Option<u64>> {
        if digits.is_empty() {
            return Ok(None);
        }
        let text = String::from_utf8_lossy(&digits).into_owned();
        text.parse()
            .map(Some)
            .with_context(|| format!("invalid number {text:?}"))
    };

    let mut rows = Vec::new();
    for &line in numbers {
        let digits = columns.clone().map(|x| at(line, x)).filter(|&b| b != b' ').collect();
        rows.extend(to_number(digits)?);
    }

    let mut by_column = Vec::new();
    for x in columns {
        let digits = numbers.iter().map(|&line| at(line, x)).filter(|&b| b != b' ').collect();
        by_column.extend(to_number(digits)?);
    }

    if rows.is_empty() {
        return Err(anyhow!("problem has no numbers"));
    }
    Ok(Problem {
        operator,
        rows,
        columns: by_column,
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().map(|p| p.operator.apply(&p.rows)).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().map(|p| p.operator.apply(&p.columns)).sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    // Trailing spaces are significant, so keep them out of reach of editors
    const SAMPLE: &str = "123 328  51 64 \n 45 64  387 23 \n  6 98  215 314\n*   +   *   +  \n";

    #[test]
    fn test_sample() {
        let mut problems = Solver::parse(SAMPLE).unwrap();
        assert_eq!(problems.len(), 4);
        assert_eq!(Solver::solve_part(&mut problems, 1).unwrap(), "4277556");
        assert_eq!(Solver::solve_part(&mut problems, 2).unwrap(), "3263827");
    }

    #[test]
    fn test_problem_read_both_ways() {
        let problems = Solver::parse(SAMPLE).unwrap();
        assert_eq!(
            problems[0],
            Problem {
                operator: Operator::Multiply,
                rows: vec![123, 45, 6],
                columns: vec![1, 24, 356],
            }
        );
        assert_eq!(problems[3].rows, vec![64, 23, 314]);
        assert_eq!(problems[3].columns, vec![623, 431, 4]);
    }

    #[test]
    fn test_short_lines_are_padded() {
        // The second line stops early, its missing cells read as blanks
        let mut problems = Solver::parse("12 3\n4\n+  *\n").unwrap();
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].rows, vec![12, 4]);
        assert_eq!(problems[0].columns, vec![14, 2]);
        assert_eq!(Solver::solve_part(&mut problems, 1).unwrap(), "19");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse(""), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("+\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("1 2\n-  \n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("1a\n+ \n"), Err(ParseError::InvalidFormat(_))));
    }
}
