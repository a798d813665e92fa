//! Blocking input downloader

use crate::error::AocError;
use reqwest::header::{COOKIE, HeaderValue};
use std::time::Duration;
use zeroize::Zeroize;

pub const DEFAULT_BASE_URL: &str = "https://adventofcode.com";
/// Requests that take longer than this fail with [`AocError::Request`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for `{base_url}/{year}/day/{day}/input`
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
}

impl AocClient {
    /// Client against adventofcode.com with the default timeout
    pub fn new() -> Result<Self, AocError> {
        Self::builder().build()
    }

    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    /// Build a `session=...` header marked sensitive so it never shows up in
    /// debug output. The intermediate string is zeroized.
    fn cookie_header(session: &str) -> Result<HeaderValue, AocError> {
        let mut cookie = format!("session={}", session.trim());
        let header = HeaderValue::from_bytes(cookie.as_bytes());
        cookie.zeroize();

        let mut header =
            header.map_err(|_| AocError::ClientInit("Invalid session cookie format".to_string()))?;
        header.set_sensitive(true);
        Ok(header)
    }

    fn input_url(&self, year: u16, day: u8) -> Result<reqwest::Url, AocError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AocError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(&[&year.to_string(), "day", &day.to_string(), "input"]);
        Ok(url)
    }

    /// Fetch the puzzle input for `year`/`day`.
    ///
    /// # Errors
    ///
    /// * [`AocError::Request`] on network failure or timeout
    /// * [`AocError::InvalidStatus`] for any non-2xx status (e.g. 400 for a
    ///   bad session, 404 for a locked day)
    /// * [`AocError::Encoding`] when the body is not UTF-8
    pub fn get_input(&self, year: u16, day: u8, session: &str) -> Result<String, AocError> {
        let url = self.input_url(year, day)?;
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .header(COOKIE, Self::cookie_header(session)?)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("input request for {year} day {day} returned {status}");
            return Err(AocError::InvalidStatus { status });
        }

        response.text().map_err(|_| AocError::Encoding)
    }
}

#[derive(Debug)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    timeout: Duration,
}

impl AocClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at another server, e.g. a local mock
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let client = reqwest::blocking::Client::builder()
            .use_rustls_tls()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient { client, base_url })
    }
}

impl Default for AocClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
