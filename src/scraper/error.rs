//! Shared error type for link collection and page extraction.

use thiserror::Error;

/// Scraper error for URL handling, HTTP transport, and selector setup.
///
/// Missing elements on a page are never errors; fields are simply left unset.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Invalid URL: {input}: {reason}")]
    InvalidUrl { input: String, reason: String },

    // HTTP and network
    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body from {url}: {source}")]
    BodyRead { url: String, source: reqwest::Error },

    #[error("Invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Cannot build calendar windows for year {year}.")]
    InvalidYear { year: i32 },
}
