//! Link collection from listing pages: the month-by-month event calendar, the news search
//! listing, and the opening-hours library directory.

use super::error::ScraperError;
use super::page::{attr, Page};
use super::Transport;
use chrono::{Datelike, NaiveDate};
use reqwest::Url;
use std::collections::HashSet;

const PAGE_LINK: &str = "a.page-link";
const LIBRARY_NAME_LINK: &str = "a.library-name";

const NEWS_LISTING_PATH: &str = "/search/content/html?fType=news&mode=full&no-cache-lang=sv";
const LIBRARIES_LISTING_PATH: &str = "/opening-hours?culture=sv";

/// First and last calendar day of one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl CalendarWindow {
    /// Window for `month` (1-12) of `year`, or None if the date is out of chrono's range.
    pub fn for_month(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let last = next_month.pred_opt()?;
        Some(Self { first, last })
    }

    /// Event calendar listing URL covering this window.
    pub fn listing_url(&self, base_url: &str) -> String {
        format!(
            "{}/calendar/html?fDateMin={}&fDateMax={}",
            trim_base(base_url),
            self.first.format("%Y-%m-%d"),
            self.last.format("%Y-%m-%d")
        )
    }
}

/// The twelve month windows of `year`, January first.
pub fn calendar_windows(year: i32) -> Result<Vec<CalendarWindow>, ScraperError> {
    (1..=12)
        .map(|month| CalendarWindow::for_month(year, month))
        .collect::<Option<Vec<_>>>()
        .ok_or(ScraperError::InvalidYear { year })
}

/// Link URLs in first-seen order. Never holds an empty string or the same string twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link. Returns false if it was empty or already present.
    pub fn insert(&mut self, link: impl Into<String>) -> bool {
        let link = link.into();
        if link.is_empty() || self.seen.contains(&link) {
            return false;
        }
        self.seen.insert(link.clone());
        self.links.push(link);
        true
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.seen.contains(link)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.links.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.links
    }
}

impl Extend<String> for LinkSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for link in iter {
            self.insert(link);
        }
    }
}

impl FromIterator<String> for LinkSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = LinkSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Resolve an `href` against the URL of the page it appeared on. Absolute links come back
/// unchanged. None if the href cannot be joined.
pub fn resolve_href(page_url: &Url, href: &str) -> Option<String> {
    match page_url.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            log::warn!("Unresolvable link {:?} on {}: {}", href, page_url, e);
            None
        }
    }
}

/// `href` of every anchor matching `sel`, resolved against the listing page URL. Anchors
/// without an href, or with an empty one, are skipped.
fn anchor_hrefs(page: &Page, sel: &str) -> Result<Vec<String>, ScraperError> {
    let page_url = Url::parse(page.url()).ok();
    Ok(page
        .select_all(sel)?
        .into_iter()
        .filter_map(|el| attr(el, "href"))
        .filter(|href| !href.is_empty())
        .filter_map(|href| match &page_url {
            Some(base) => resolve_href(base, &href),
            None => Some(href),
        })
        .collect())
}

/// Walk the twelve months of `year`, one calendar request per month, in order.
pub fn events_links<T: Transport + ?Sized>(
    transport: &mut T,
    base_url: &str,
    year: i32,
) -> Result<LinkSet, ScraperError> {
    let mut links = LinkSet::new();
    for window in calendar_windows(year)? {
        let url = window.listing_url(base_url);
        let page = transport.get(&url)?;
        let month_links = anchor_hrefs(&page, PAGE_LINK)?;
        log::debug!(
            "{}-{:02}: {} event link(s)",
            year,
            window.first.month(),
            month_links.len()
        );
        links.extend(month_links);
    }
    log::info!("Collected {} event link(s) for {}", links.len(), year);
    Ok(links)
}

pub fn news_links<T: Transport + ?Sized>(
    transport: &mut T,
    base_url: &str,
) -> Result<LinkSet, ScraperError> {
    let url = format!("{}{}", trim_base(base_url), NEWS_LISTING_PATH);
    let page = transport.get(&url)?;
    let links: LinkSet = anchor_hrefs(&page, PAGE_LINK)?.into_iter().collect();
    log::info!("Collected {} news link(s)", links.len());
    Ok(links)
}

pub fn libraries_links<T: Transport + ?Sized>(
    transport: &mut T,
    base_url: &str,
) -> Result<LinkSet, ScraperError> {
    let url = format!("{}{}", trim_base(base_url), LIBRARIES_LISTING_PATH);
    let page = transport.get(&url)?;
    let links: LinkSet = anchor_hrefs(&page, LIBRARY_NAME_LINK)?
        .into_iter()
        .collect();
    log::info!("Collected {} library link(s)", links.len());
    Ok(links)
}
