//! In-memory transport for tests: serves canned HTML by URL and records every request.

use super::error::ScraperError;
use super::page::Page;
use super::Transport;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    pages: HashMap<String, String>,
    fallback: Option<String>,
    requests: Vec<String>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Body served for any URL without a canned page. Without one, such URLs get HTTP 404.
    pub(crate) fn with_fallback(mut self, html: &str) -> Self {
        self.fallback = Some(html.to_string());
        self
    }

    pub(crate) fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl Transport for FakeTransport {
    fn get(&mut self, url: &str) -> Result<Page, ScraperError> {
        self.requests.push(url.to_string());
        match self.pages.get(url).or(self.fallback.as_ref()) {
            Some(html) => Ok(Page::parse(url, html)),
            None => Err(ScraperError::HttpStatus {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}
