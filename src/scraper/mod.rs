//! CS Library CMS scraping: transport trait, shared client, link collection, and per-kind
//! page extractors.

mod client;
mod error;

pub mod event;
pub mod library;
pub mod links;
pub mod news;
pub mod page;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{HttpClient, HttpClientBuilder};
pub use error::ScraperError;
pub use links::{calendar_windows, resolve_href, CalendarWindow, LinkSet};
pub use page::Page;

use crate::model::{EventContainer, LibraryContainer, NewsContainer};

/// Resource kind on a CS Library site. Picks the listing page(s) and the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Events,
    News,
    Libraries,
}

impl ResourceKind {
    /// Name used in CLI values and default output file names.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Events => "events",
            ResourceKind::News => "news",
            ResourceKind::Libraries => "libraries",
        }
    }
}

/// Fetches one page. Network failures and non-success statuses are errors.
pub trait Transport {
    fn get(&mut self, url: &str) -> Result<Page, ScraperError>;
}

/// Scraper for one CS Library site family. Holds a reference to the transport.
pub struct CsLibraryScraper<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
}

impl<'a, T: Transport + ?Sized> CsLibraryScraper<'a, T> {
    pub fn new(transport: &'a mut T) -> Self {
        Self { transport }
    }

    /// Collect detail-page links for `kind` from the site at `base_url`.
    ///
    /// `year` only matters for events, whose calendar is walked month by month.
    pub fn collect_links(
        &mut self,
        kind: ResourceKind,
        base_url: &str,
        year: i32,
    ) -> Result<LinkSet, ScraperError> {
        match kind {
            ResourceKind::Events => links::events_links(&mut *self.transport, base_url, year),
            ResourceKind::News => links::news_links(&mut *self.transport, base_url),
            ResourceKind::Libraries => links::libraries_links(&mut *self.transport, base_url),
        }
    }

    /// Fetch an event page and fill `record`.
    pub fn scrape_event<C: EventContainer + ?Sized>(
        &mut self,
        url: &str,
        record: &mut C,
    ) -> Result<(), ScraperError> {
        let page = self.transport.get(url)?;
        event::fill_event(&page, record)
    }

    /// Fetch a news page and fill `record`.
    pub fn scrape_news<C: NewsContainer + ?Sized>(
        &mut self,
        url: &str,
        record: &mut C,
    ) -> Result<(), ScraperError> {
        let page = self.transport.get(url)?;
        news::fill_news(&page, record)
    }

    /// Fetch a library page and fill `record`.
    pub fn scrape_library<C: LibraryContainer + ?Sized>(
        &mut self,
        url: &str,
        record: &mut C,
    ) -> Result<(), ScraperError> {
        let page = self.transport.get(url)?;
        library::fill_library(&page, record)
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeTransport;
    use super::*;
    use crate::model::{EventRecord, LibraryRecord, NewsRecord};

    #[test]
    fn resource_kind_names() {
        assert_eq!(ResourceKind::Events.as_str(), "events");
        assert_eq!(ResourceKind::News.as_str(), "news");
        assert_eq!(ResourceKind::Libraries.as_str(), "libraries");
    }

    #[test]
    fn scrape_event_fetches_once_and_fills() -> Result<(), ScraperError> {
        let mut fake = FakeTransport::new().with_page(
            "https://lib.example/event/1",
            r#"<h1 class="page-title">Bokcirkel</h1>"#,
        );
        let mut record = EventRecord::default();
        CsLibraryScraper::new(&mut fake).scrape_event("https://lib.example/event/1", &mut record)?;
        assert_eq!(record.title.as_deref(), Some("Bokcirkel"));
        assert_eq!(fake.requests(), ["https://lib.example/event/1"]);
        Ok(())
    }

    #[test]
    fn fetch_failure_propagates_and_leaves_record_untouched() -> Result<(), String> {
        let mut fake = FakeTransport::new();
        let mut news = NewsRecord::default();
        let mut lib = LibraryRecord::default();
        let mut scraper = CsLibraryScraper::new(&mut fake);
        match scraper.scrape_news("https://lib.example/missing", &mut news) {
            Err(ScraperError::HttpStatus { status: 404, .. }) => {}
            other => return Err(format!("expected HttpStatus 404, got {:?}", other)),
        }
        if scraper.scrape_library("https://lib.example/missing", &mut lib).is_ok() {
            return Err("expected library scrape to fail".to_string());
        }
        assert_eq!(news, NewsRecord::default());
        assert_eq!(lib, LibraryRecord::default());
        Ok(())
    }
}
