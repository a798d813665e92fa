//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable holding the adventofcode.com session cookie
pub const SESSION_ENV: &str = "AOC_SESSION";

/// Resolved runtime configuration
pub struct Config {
    pub year_filter: Option<u16>,
    pub day_filter: Option<u8>,
    pub part_filter: Option<u8>,
    /// Solvers must carry every one of these tags
    pub tags: Vec<String>,
    /// Local input file replacing cache and download
    pub input_file: Option<PathBuf>,
    /// Cache directory with `~` expanded
    pub cache_dir: PathBuf,
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    /// Session from the environment; prompted for later if a download needs it
    pub session: Option<Zeroizing<String>>,
    pub quiet: bool,
    pub verbose: u8,
}

impl Config {
    /// Build config from CLI args and the environment
    pub fn from_args(args: Args) -> Self {
        let session = std::env::var(SESSION_ENV)
            .ok()
            .map(Zeroizing::new)
            .filter(|s| !s.trim().is_empty());

        Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_file: args.input,
            cache_dir: expand_tilde(&args.cache_dir),
            thread_count: args.threads.unwrap_or_else(num_cpus),
            parallelize_by: args.parallelize_by,
            session,
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }

    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            _ => "trace",
        }
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest)),
        Err(_) => path.to_path_buf(),
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Ask for the session cookie without echoing it
pub fn prompt_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    println!("{}", reason);
    let session = Zeroizing::new(
        rpassword::prompt_password("Enter AOC session key: ")
            .map_err(|e| CliError::Config(format!("Failed to read session: {}", e)))?,
    );
    if session.trim().is_empty() {
        return Err(CliError::Config("Session token is required.".to_string()));
    }
    Ok(session)
}
