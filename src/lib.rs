//! cslscrape: harvester for events, news and library pages on CS Library CMS sites.

pub mod cli;
pub mod config;
pub mod formats;
pub mod harvest;
pub mod model;
pub mod scraper;

// Re-exports for CLI and consumers.
pub use formats::{write_records, write_records_to_path, FormatError, OutputFormat};
pub use harvest::{harvest, resolved_links, HarvestOptions};
pub use model::{
    EventContainer, EventRecord, Harvested, LibraryContainer, LibraryRecord, NewsContainer,
    NewsRecord, ResourceRecord,
};
pub use scraper::{
    calendar_windows, CalendarWindow, CsLibraryScraper, HttpClient, HttpClientBuilder, LinkSet,
    Page, ResourceKind, ScraperError, Transport,
};
