//! Parallel executor for running solvers

use crate::cache::InputCache;
use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use aoc_http_client::AocClient;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use std::time::Duration;
use zeroize::Zeroizing;

/// Outcome of one part
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Only set on the result that paid for parsing
    pub parse_duration: Option<Duration>,
    pub solve_duration: Duration,
}

/// A registered day and the parts to run for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Where puzzle inputs come from
pub enum InputSource {
    /// Contents of `--input`, used for the single selected day
    Fixed(String),
    /// Cache first, download on a miss when a session is available
    Cached {
        cache: InputCache,
        remote: Option<(AocClient, Zeroizing<String>)>,
    },
}

/// Parallel executor for running solvers
pub struct Executor {
    shared: SharedState,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs, borrowed from the executor
struct SharedState {
    registry: SolverRegistry,
    source: InputSource,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Executor reading inputs from the configured cache only
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            shared: SharedState {
                registry,
                source: InputSource::Cached {
                    cache: InputCache::new(config.cache_dir.clone()),
                    remote: None,
                },
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn set_input_source(&mut self, source: InputSource) {
        self.shared.source = source;
    }

    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let shared = &self.shared;
        shared
            .registry
            .iter_info()
            .filter(|info| shared.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| shared.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(shared.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Run every work item, streaming one [`SolverResult`] per part into `tx`.
    ///
    /// Failures to load an input or to solve are reported as error results.
    /// Only infrastructure failures (a closed channel) end up in the returned
    /// error.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let shared = &self.shared;

        match shared.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .filter_map(|work| run_work_item(work, &tx, shared).err())
                .reduce(ArcExecutorError::combine)
                .map_or(Ok(()), Err),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();
                self.execute_parallel(by_year, &tx)
            }
            ParallelizeBy::Day | ParallelizeBy::Part => {
                self.execute_parallel(work_items.into_iter().map(|w| vec![w]).collect(), &tx)
            }
        }
    }

    /// Run each group as one rayon task; items inside a group run in order
    fn execute_parallel(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let shared = &self.shared;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .filter_map(|items| {
                    items
                        .iter()
                        .filter_map(|work| run_work_item(work, tx, shared).err())
                        .reduce(ArcExecutorError::combine)
                })
                .reduce_with(ArcExecutorError::combine)
                .map_or(Ok(()), Err)
        })
    }
}

/// Restrict a solver's parts to the `--part` filter
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

fn error_result(work: &WorkItem, part: u8, error: ArcExecutorError) -> SolverResult {
    SolverResult {
        year: work.year,
        day: work.day,
        part,
        answer: Err(error),
        parse_duration: None,
        solve_duration: Duration::ZERO,
    }
}

fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    shared: &SharedState,
) -> Result<(), ArcExecutorError> {
    let input = match load_input(work, &shared.source) {
        Ok(input) => input,
        Err(e) => {
            log::debug!("skipping {}/{:02}: {e}", work.year, work.day);
            let error = ArcExecutorError::from(e);
            for part in work.parts.clone() {
                send(tx, error_result(work, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    if shared.parallelize_by == ParallelizeBy::Part {
        work.parts
            .clone()
            .into_par_iter()
            .try_for_each_with(tx.clone(), |tx, part| {
                let result = match shared.registry.create_solver(work.year, work.day, &input) {
                    Ok(mut solver) => solve_part(work, part, &mut *solver, true),
                    Err(e) => error_result(work, part, ExecutorError::from(e).into()),
                };
                send(tx, result)
            })
    } else {
        match shared.registry.create_solver(work.year, work.day, &input) {
            Ok(mut solver) => {
                for part in work.parts.clone() {
                    let first = part == *work.parts.start();
                    send(tx, solve_part(work, part, &mut *solver, first))?;
                }
            }
            Err(e) => {
                let error = ArcExecutorError::from(ExecutorError::from(e));
                for part in work.parts.clone() {
                    send(tx, error_result(work, part, error.clone()))?;
                }
            }
        }
        Ok(())
    }
}

/// `with_parse` attributes the instance's parse time to this result
fn solve_part(work: &WorkItem, part: u8, solver: &mut dyn DynSolver, with_parse: bool) -> SolverResult {
    let parse_duration = with_parse.then(|| to_std(solver.parse_duration()));
    match solver.solve(part) {
        Ok(solved) => {
            let solve_duration = to_std(solved.duration());
            SolverResult {
                year: work.year,
                day: work.day,
                part,
                answer: Ok(solved.answer),
                parse_duration,
                solve_duration,
            }
        }
        Err(e) => {
            let error = ExecutorError::from(aoc_solver::SolverError::from(e)).into();
            SolverResult {
                parse_duration,
                ..error_result(work, part, error)
            }
        }
    }
}

fn to_std(delta: TimeDelta) -> Duration {
    delta.to_std().unwrap_or_default()
}

/// Input for a work item: the fixed file, the cache, or a download that is
/// then written back to the cache
fn load_input(work: &WorkItem, source: &InputSource) -> Result<String, ExecutorError> {
    let (year, day) = (work.year, work.day);
    let (cache, remote) = match source {
        InputSource::Fixed(input) => return Ok(input.clone()),
        InputSource::Cached { cache, remote } => (cache, remote),
    };

    let fetch_error = |source: Box<dyn std::error::Error + Send + Sync>| ExecutorError::InputFetch {
        year,
        day,
        source,
    };

    if let Some(input) = cache.get(year, day).map_err(|e| fetch_error(Box::new(e)))? {
        return Ok(input);
    }

    let (client, session) = remote
        .as_ref()
        .ok_or(ExecutorError::MissingSession { year, day })?;

    log::info!("downloading input for {}/{:02}", year, day);
    let input = client.get_input(year, day, session).map_err(|e| {
        if e.is_unauthorized() {
            log::warn!("session rejected while downloading {}/{:02}, check AOC_SESSION", year, day);
        }
        fetch_error(Box::new(e))
    })?;

    if let Err(e) = cache.put(year, day, &input) {
        log::warn!(
            "{}",
            ExecutorError::CacheWrite {
                year,
                day,
                message: e.to_string(),
            }
        );
    }

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
    use clap::Parser;
    use std::sync::mpsc;
    use tempfile::TempDir;

    /// Part 1 sums the numbers, part 2 takes their product
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Arith;

    impl AocParser for Arith {
        type SharedData<'a> = Vec<i64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
                .collect()
        }
    }

    impl PartSolver<1> for Arith {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<i64>().to_string())
        }
    }

    impl PartSolver<2> for Arith {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().product::<i64>().to_string())
        }
    }

    fn registry() -> SolverRegistry {
        SolverRegistryBuilder::new()
            .register_solver::<Arith>(2025, 1)
            .unwrap()
            .register_solver::<Arith>(2025, 2)
            .unwrap()
            .register_solver::<Arith>(2016, 3)
            .unwrap()
            .build()
    }

    fn executor(argv: &[&str], source: InputSource) -> Executor {
        let config = Config::from_args(Args::try_parse_from(argv).unwrap());
        let mut executor = Executor::new(registry(), &config).unwrap();
        executor.set_input_source(source);
        executor
    }

    fn run(executor: &Executor) -> (Vec<SolverResult>, Result<(), ArcExecutorError>) {
        let (tx, rx) = mpsc::channel();
        let outcome = executor.execute(tx);
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        (results, outcome)
    }

    fn answers(results: &[SolverResult]) -> Vec<(u16, u8, u8, String)> {
        results
            .iter()
            .map(|r| {
                let answer = match &r.answer {
                    Ok(a) => a.clone(),
                    Err(e) => format!("error: {e}"),
                };
                (r.year, r.day, r.part, answer)
            })
            .collect()
    }

    fn cached(dir: &TempDir) -> InputSource {
        let cache = InputCache::new(dir.path().to_path_buf());
        cache.put(2016, 3, "1 2 3").unwrap();
        cache.put(2025, 1, "2 5").unwrap();
        cache.put(2025, 2, "4 x").unwrap();
        InputSource::Cached { cache, remote: None }
    }

    #[test]
    fn test_collect_work_items_filters() {
        let items = executor(&["aoc", "-y", "2025", "-p", "2"], InputSource::Fixed(String::new()))
            .collect_work_items();
        assert_eq!(
            items,
            vec![
                WorkItem { year: 2025, day: 1, parts: 2..=2 },
                WorkItem { year: 2025, day: 2, parts: 2..=2 },
            ]
        );

        let items = executor(&["aoc", "-p", "3"], InputSource::Fixed(String::new())).collect_work_items();
        assert!(items.is_empty());
    }

    #[test]
    fn test_every_parallelization_gives_same_answers() {
        let dir = TempDir::new().unwrap();
        let mut expected = None;

        for mode in ["sequential", "year", "day", "part"] {
            let (results, outcome) = run(&executor(&["aoc", "--parallelize-by", mode], cached(&dir)));
            assert!(outcome.is_ok());

            let got = answers(&results);
            assert_eq!(got.len(), 6);
            assert_eq!(got[0], (2016, 3, 1, "6".to_string()));
            assert_eq!(got[2], (2025, 1, 1, "7".to_string()));
            assert_eq!(got[3], (2025, 1, 2, "10".to_string()));
            assert!(got[4].3.starts_with("error: Invalid format"));
            assert_eq!(expected.get_or_insert_with(|| got.clone()), &got);
        }
    }

    #[test]
    fn test_parse_time_reported_once_per_day() {
        let dir = TempDir::new().unwrap();
        let (results, _) = run(&executor(&["aoc", "-y", "2016", "--parallelize-by", "day"], cached(&dir)));

        let parse_flags: Vec<bool> = results.iter().map(|r| r.parse_duration.is_some()).collect();
        assert_eq!(parse_flags, vec![true, false]);
    }

    #[test]
    fn test_fixed_input_is_used() {
        let (results, outcome) = run(&executor(
            &["aoc", "-y", "2025", "-d", "1", "-i", "ignored.txt"],
            InputSource::Fixed("3 4".to_string()),
        ));

        assert!(outcome.is_ok());
        assert_eq!(
            answers(&results),
            vec![(2025, 1, 1, "7".to_string()), (2025, 1, 2, "12".to_string())]
        );
    }

    #[test]
    fn test_cache_miss_without_session_reports_each_part() {
        let dir = TempDir::new().unwrap();
        let source = InputSource::Cached {
            cache: InputCache::new(dir.path().to_path_buf()),
            remote: None,
        };

        let (results, outcome) = run(&executor(&["aoc", "-y", "2016"], source));

        assert!(outcome.is_ok());
        assert_eq!(results.len(), 2);
        for result in results {
            let err = result.answer.unwrap_err();
            assert!(matches!(err.inner(), ExecutorError::MissingSession { year: 2016, day: 3 }));
        }
    }

    #[test]
    fn test_download_is_cached() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2016/day/3/input")
            .match_header("cookie", "session=cafe")
            .with_body("5 6")
            .expect(1)
            .create();

        let dir = TempDir::new().unwrap();
        let client = AocClient::builder().base_url(server.url()).unwrap().build().unwrap();
        let source = InputSource::Cached {
            cache: InputCache::new(dir.path().to_path_buf()),
            remote: Some((client, Zeroizing::new("cafe".to_string()))),
        };

        let executor = executor(&["aoc", "-y", "2016"], source);
        let (first, _) = run(&executor);
        let (second, _) = run(&executor);

        mock.assert();
        assert_eq!(answers(&first), answers(&second));
        assert_eq!(answers(&first)[1].3, "30");
        assert!(dir.path().join("2016_day03.txt").is_file());
    }

    #[test]
    fn test_closed_channel_is_an_error() {
        let (tx, rx) = mpsc::channel();
        drop(rx);

        let executor = executor(&["aoc", "--parallelize-by", "sequential"], InputSource::Fixed("1".into()));
        let err = executor.execute(tx).unwrap_err();

        assert!(matches!(err.inner(), ExecutorError::Multiple(errors) if errors.len() == 3));
    }
}
