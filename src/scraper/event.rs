//! Event page extractor.

use super::error::ScraperError;
use super::page::Page;
use crate::model::EventContainer;

const TITLE: &str = "h1.page-title";
const INTRODUCTION: &str = ".page-introduction";
const LIST_IMAGE: &str = ".editorial-image > img";
const CATEGORY: &str = ".editorial-image > .content-type";
const DATE: &str = ".event-date";
const MONTH: &str = ".event-month";
const TIME: &str = ".event-when > .value";
const LIBRARY: &str = ".library-name > .page-link";
const PRICE: &str = ".event-cost > .value";
const AUDIENCE: &str = "li.audience-value";
const TAGS: &str = ".tags li";

/// Fill `record` from a parsed event page. Blocks missing from the page leave fields unset.
pub fn fill_event<C: EventContainer + ?Sized>(
    page: &Page,
    record: &mut C,
) -> Result<(), ScraperError> {
    if let Some(title) = page.last_text(TITLE)? {
        record.set_title(title);
    }
    if let Some(body) = page.last_text(INTRODUCTION)? {
        record.set_body(body);
    }
    if let Some(src) = page.last_attr(LIST_IMAGE, "src")? {
        record.set_list_image(src);
    }
    if let Some(category) = page.last_text(CATEGORY)? {
        record.set_category(category);
    }
    if let Some(date) = page.last_text(DATE)? {
        record.set_date(date);
    }
    if let Some(month) = page.last_text(MONTH)? {
        record.set_month(month);
    }
    if let Some(time) = page.last_text(TIME)? {
        record.set_time(time);
    }
    if let Some(library) = page.last_text(LIBRARY)? {
        record.set_library(library);
    }
    if let Some(cost) = page.last_text(PRICE)? {
        match parse_price(&cost) {
            Some(price) => record.set_price(price),
            None => log::warn!("Unreadable price {:?} at {}", cost, page.url()),
        }
    }

    let target = page.normalized_texts(AUDIENCE)?;
    if !target.is_empty() {
        record.set_target(target);
    }
    let tags = page.normalized_texts(TAGS)?;
    if !tags.is_empty() {
        record.set_tags(tags);
    }
    Ok(())
}

/// Price from the cost block: the first run of ASCII digits anywhere in the text.
///
/// Text without digits ("Gratis", "") is a free event and yields 0. A digit run that does not
/// fit in u32 yields None. Signs are ignored: prices are never negative, so "-50" reads as 50.
pub fn parse_price(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}
