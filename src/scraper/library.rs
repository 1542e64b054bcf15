//! Library page extractor. The body is rebuilt from the main content block's children,
//! without scripts and without blocks carrying `<strong>` (opening-hours notices and similar).

use super::error::ScraperError;
use super::page::{child_elements, inner_html, tag_name, Page};
use crate::model::LibraryContainer;
use scraper::ElementRef;

const TITLE: &str = "h1.page-title";
const TITLE_IMAGE: &str = ".content-image > img";
const ZONE_1: &str = ".template .zone-1";

const STRONG_MARKER: &str = "<strong>";

pub fn fill_library<C: LibraryContainer + ?Sized>(
    page: &Page,
    record: &mut C,
) -> Result<(), ScraperError> {
    if let Some(title) = page.last_text(TITLE)? {
        record.set_title(title);
    }
    if let Some(src) = page.last_attr(TITLE_IMAGE, "src")? {
        record.set_title_image(src);
    }
    if let Some(zone) = page.select_last(ZONE_1)? {
        record.set_body(library_body(zone));
    }
    Ok(())
}

/// Inner HTML of each non-script child of `zone`, then cleaned by [assemble_body].
pub fn library_body(zone: ElementRef<'_>) -> String {
    let fragments = child_elements(zone)
        .filter(|child| tag_name(*child) != "script")
        .map(inner_html);
    assemble_body(fragments)
}

/// Concatenate rendered child fragments in order, dropping empty ones and any containing
/// `<strong>`.
pub fn assemble_body<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fragments
        .into_iter()
        .filter(|f| !f.is_empty() && !f.contains(STRONG_MARKER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LibraryRecord;

    #[test]
    fn assemble_drops_empty_and_strong_fragments_in_order() {
        let fragments = ["<p>A</p>", "", "<p><strong>B</strong></p>", "<p>C</p>"]
            .into_iter()
            .map(String::from);
        assert_eq!(assemble_body(fragments), "<p>A</p><p>C</p>");
    }

    #[test]
    fn bold_tag_is_not_a_strong_marker() {
        let fragments = vec!["Hello <b>world</b>".to_string()];
        assert_eq!(assemble_body(fragments), "Hello <b>world</b>");
    }

    #[test]
    fn zone_children_filtered_by_tag_then_content() -> Result<(), ScraperError> {
        let html = r#"<html><body><div class="template"><div class="zone-1">
<div><p>A</p></div>
<script>window.track("library");</script>
<p></p>
<div><p><strong>Öppettider</strong> 10-18</p></div>
<p>Välkommen <strong>in</strong></p>
<div><p>C</p></div>
</div></div></body></html>"#;
        let page = Page::parse("u", html);
        let mut record = LibraryRecord::default();
        fill_library(&page, &mut record)?;
        assert_eq!(record.body.as_deref(), Some("<p>A</p><p>C</p>"));
        Ok(())
    }

    #[test]
    fn paragraph_children_render_their_inner_html() -> Result<(), ScraperError> {
        let html = r#"<div class="template"><div class="zone-1"><p>Första</p><h2>Rubrik</h2></div></div>"#;
        let page = Page::parse("u", html);
        let mut record = LibraryRecord::default();
        fill_library(&page, &mut record)?;
        assert_eq!(record.body.as_deref(), Some("FörstaRubrik"));
        Ok(())
    }

    #[test]
    fn title_and_image() -> Result<(), ScraperError> {
        let html = r#"<h1 class="page-title">
   Stadsbiblioteket </h1><div class="content-image"><img src="/img/stad.jpg"></div>"#;
        let page = Page::parse("u", html);
        let mut record = LibraryRecord::default();
        fill_library(&page, &mut record)?;
        assert_eq!(record.title.as_deref(), Some("Stadsbiblioteket"));
        assert_eq!(record.title_image.as_deref(), Some("/img/stad.jpg"));
        assert!(record.body.is_none());
        Ok(())
    }

    #[test]
    fn zone_with_only_scripts_yields_empty_body() -> Result<(), ScraperError> {
        let html = r#"<div class="template"><div class="zone-1"><script>a()</script></div></div>"#;
        let page = Page::parse("u", html);
        let mut record = LibraryRecord::default();
        fill_library(&page, &mut record)?;
        assert_eq!(record.body.as_deref(), Some(""));
        Ok(())
    }
}
