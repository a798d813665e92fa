//! Downloads Advent of Code puzzle inputs.
//!
//! Inputs are personalised, so every request carries the `session` cookie
//! from a logged-in browser. TLS goes through rustls.
//!
//! ```no_run
//! use aoc_http_client::AocClient;
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), aoc_http_client::AocError> {
//! let client = AocClient::builder().timeout(Duration::from_secs(5)).build()?;
//! let input = client.get_input(2025, 1, "53616c7465645f5f...")?;
//! println!("{} bytes", input.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{AocClient, AocClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::AocError;
