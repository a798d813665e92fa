//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cache;
mod cli;
mod config;
mod error;
mod executor;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_http_client::AocClient;
use aoc_shared::timer::{format_duration, time_task};
use aoc_solver::SolverRegistryBuilder;
use cache::InputCache;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, InputSource, WorkItem};
use output::OutputFormatter;

fn main() {
    let config = Config::from_args(Args::parse());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level()))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(mut config: Config) -> Result<(), CliError> {
    let (registry, took) = time_task(|| build_registry(&config.tags));
    let registry = registry?;
    log::debug!("registered {} solver(s) in {}", registry.len(), format_duration(took));

    let mut executor =
        Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;
    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    if let Some(source) = input_source(&mut config, &work_items)? {
        executor.set_input_source(source);
    }

    run_executor(executor, work_items, config.quiet)
}

/// Input source replacing the executor's cache-only default, prompting for a
/// session only when some input is neither given on the command line nor cached
fn input_source(
    config: &mut Config,
    work_items: &[WorkItem],
) -> Result<Option<InputSource>, CliError> {
    if let Some(path) = &config.input_file {
        let input = std::fs::read_to_string(path).map_err(|source| CliError::InputFile {
            path: path.clone(),
            source,
        })?;
        return Ok(Some(InputSource::Fixed(input)));
    }

    let cache = InputCache::new(config.cache_dir.clone());
    let missing: Vec<&WorkItem> = work_items
        .iter()
        .filter(|w| !cache.contains(w.year, w.day))
        .collect();

    if missing.is_empty() {
        return Ok(None);
    }

    if !config.quiet {
        println!("Missing {} input file(s):", missing.len());
        for w in &missing {
            println!("  - {}/day{:02}", w.year, w.day);
        }
    }

    let session = match config.session.take() {
        Some(session) => session,
        None => {
            println!();
            config::prompt_session("Session token required to fetch missing inputs from adventofcode.com")?
        }
    };

    Ok(Some(InputSource::Cached {
        cache,
        remote: Some((AocClient::new()?, session)),
    }))
}

fn run_executor(executor: Executor, work_items: Vec<WorkItem>, quiet: bool) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys = work_items.iter().flat_map(|w| {
        w.parts.clone().map(move |part| aggregator::ResultKey {
            year: w.year,
            day: w.day,
            part,
        })
    });
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        log::warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
        .map_err(CliError::Executor)?;

    formatter.print_summary(&results);

    Ok(())
}

/// Register plugins carrying every tag in `tags`
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
