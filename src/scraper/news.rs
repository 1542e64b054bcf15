//! News article page extractor. The body is kept as raw HTML.

use super::error::ScraperError;
use super::page::{inner_html, Page};
use crate::model::NewsContainer;

const TITLE: &str = "h1.page-title";
const INTRODUCTION: &str = ".page-introduction";
const LIST_IMAGE: &str = ".content-image > img";
const TITLE_IMAGE: &str = ".image-widget > img";
const ZONE_1: &str = ".template .zone-1";
const AUDIENCE: &str = ".audiences a";
const TAGS: &str = ".tags li";

pub fn fill_news<C: NewsContainer + ?Sized>(
    page: &Page,
    record: &mut C,
) -> Result<(), ScraperError> {
    if let Some(title) = page.last_text(TITLE)? {
        record.set_title(title);
    }
    if let Some(lead) = page.last_text(INTRODUCTION)? {
        record.set_lead(lead);
    }
    if let Some(src) = page.last_attr(LIST_IMAGE, "src")? {
        record.set_list_image(src);
    }
    if let Some(src) = page.last_attr(TITLE_IMAGE, "src")? {
        record.set_title_image(src);
    }
    if let Some(zone) = page.select_last(ZONE_1)? {
        record.set_body(inner_html(zone));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewsRecord;

    #[test]
    fn body_is_raw_zone_html_with_bold_kept() -> Result<(), ScraperError> {
        let page = Page::parse(
            "u",
            r#"<html><body><div class="template"><div class="zone-1"><div>Hello <b>world</b></div></div></div></body></html>"#,
        );
        let mut record = NewsRecord::default();
        fill_news(&page, &mut record)?;
        assert_eq!(record.body.as_deref(), Some("<div>Hello <b>world</b></div>"));
        Ok(())
    }

    #[test]
    fn strong_is_not_filtered_in_news() -> Result<(), ScraperError> {
        let page = Page::parse(
            "u",
            r#"<div class="template"><div class="zone-1"><p><strong>Obs!</strong> Stängt.</p></div></div>"#,
        );
        let mut record = NewsRecord::default();
        fill_news(&page, &mut record)?;
        assert_eq!(
            record.body.as_deref(),
            Some("<p><strong>Obs!</strong> Stängt.</p>")
        );
        Ok(())
    }

    #[test]
    fn full_news_page() -> Result<(), ScraperError> {
        let html = r#"<!DOCTYPE html><html><body>
<div class="template">
  <h1 class="page-title">Nya öppettider i sommar</h1>
  <p class="page-introduction"> Från 1 juni gäller sommaröppettider. </p>
  <div class="content-image"><img src="/images/list.jpg"></div>
  <div class="image-widget"><img src="/images/top.jpg"></div>
  <div class="zone-1"><p>Se alla tider nedan.</p></div>
  <div class="audiences"><a href="/a/1">Alla
      åldrar</a><a href="/a/2"> Vuxna </a></div>
  <ul class="tags"><li>Öppettider</li><li>  Sommar  </li></ul>
</div>
</body></html>"#;
        let page = Page::parse("u", html);
        let mut record = NewsRecord::default();
        fill_news(&page, &mut record)?;
        assert_eq!(record.title.as_deref(), Some("Nya öppettider i sommar"));
        assert_eq!(
            record.lead.as_deref(),
            Some("Från 1 juni gäller sommaröppettider.")
        );
        assert_eq!(record.list_image.as_deref(), Some("/images/list.jpg"));
        assert_eq!(record.title_image.as_deref(), Some("/images/top.jpg"));
        assert_eq!(record.body.as_deref(), Some("<p>Se alla tider nedan.</p>"));
        assert_eq!(record.target, vec!["Alla åldrar", "Vuxna"]);
        assert_eq!(record.tags, vec!["Öppettider", "Sommar"]);
        Ok(())
    }

    #[test]
    fn zone_outside_template_is_ignored() -> Result<(), ScraperError> {
        let page = Page::parse("u", r#"<div class="zone-1"><p>Fristående</p></div>"#);
        let mut record = NewsRecord::default();
        fill_news(&page, &mut record)?;
        assert_eq!(record, NewsRecord::default());
        Ok(())
    }
}
