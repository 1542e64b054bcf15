//! Harvest pipeline: collect links for a resource kind, then extract one record per link.

use crate::model::{EventRecord, Harvested, LibraryRecord, NewsRecord, ResourceRecord};
use crate::scraper::{CsLibraryScraper, ResourceKind, ScraperError, Transport};
use reqwest::Url;

/// Options for a harvest run: reference year, page limit, failure handling, progress callback.
pub struct HarvestOptions<'a> {
    /// Calendar year walked when collecting event links.
    pub year: i32,
    /// Extract at most this many detail pages.
    pub limit: Option<usize>,
    /// Log and skip detail pages that fail instead of aborting.
    pub skip_failed: bool,
    pub progress: Option<&'a dyn Fn(usize, usize)>,
}

fn parse_base(base_url: &str) -> Result<Url, ScraperError> {
    let base = Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl {
        input: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if base.host_str().is_none() {
        return Err(ScraperError::InvalidUrl {
            input: base_url.to_string(),
            reason: "URL has no host".to_string(),
        });
    }
    Ok(base)
}

/// Collect detail-page links for `kind` as absolute URLs, in listing order.
///
/// Relative hrefs are resolved against the listing page they were found on.
pub fn resolved_links<T: Transport + ?Sized>(
    transport: &mut T,
    kind: ResourceKind,
    base_url: &str,
    year: i32,
) -> Result<Vec<String>, ScraperError> {
    parse_base(base_url)?;
    let links = CsLibraryScraper::new(transport).collect_links(kind, base_url, year)?;
    Ok(links.into_vec())
}

fn extract_one<T: Transport + ?Sized>(
    scraper: &mut CsLibraryScraper<'_, T>,
    kind: ResourceKind,
    url: &str,
) -> Result<ResourceRecord, ScraperError> {
    Ok(match kind {
        ResourceKind::Events => {
            let mut record = EventRecord::default();
            scraper.scrape_event(url, &mut record)?;
            ResourceRecord::Event(record)
        }
        ResourceKind::News => {
            let mut record = NewsRecord::default();
            scraper.scrape_news(url, &mut record)?;
            ResourceRecord::News(record)
        }
        ResourceKind::Libraries => {
            let mut record = LibraryRecord::default();
            scraper.scrape_library(url, &mut record)?;
            ResourceRecord::Library(record)
        }
    })
}

/// Collect links for `kind` from the site at `base_url` and extract every detail page.
///
/// Records come back in link order. Any transport failure aborts the run unless
/// `options.skip_failed` is set.
pub fn harvest<T: Transport + ?Sized>(
    transport: &mut T,
    kind: ResourceKind,
    base_url: &str,
    options: &HarvestOptions<'_>,
) -> Result<Vec<Harvested>, ScraperError> {
    let mut links = resolved_links(&mut *transport, kind, base_url, options.year)?;
    if let Some(limit) = options.limit {
        links.truncate(limit);
    }

    let total = links.len();
    let mut scraper = CsLibraryScraper::new(transport);
    let mut out = Vec::with_capacity(total);
    for (i, url) in links.into_iter().enumerate() {
        if let Some(progress) = options.progress {
            progress(i + 1, total);
        }
        match extract_one(&mut scraper, kind, &url) {
            Ok(record) => out.push(Harvested { url, record }),
            Err(e) if options.skip_failed => {
                log::warn!("Skipped {}: {}", url, e);
            }
            Err(e) => return Err(e),
        }
    }
    log::info!(
        "Harvested {} of {} {} page(s)",
        out.len(),
        total,
        kind.as_str()
    );
    Ok(out)
}
