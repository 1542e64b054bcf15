//! Parsed HTML page and the small set of element queries the extractors need.

use super::error::ScraperError;
use scraper::{ElementRef, Html, Selector};

/// Parse a CSS selector or return an error (avoids panics from Selector::parse).
pub fn parse_selector(sel: &str) -> Result<Selector, ScraperError> {
    Selector::parse(sel).map_err(|e| ScraperError::InvalidSelector {
        selector: sel.to_string(),
        reason: e.to_string(),
    })
}

/// One fetched page: the URL it came from and its parsed document.
pub struct Page {
    url: String,
    doc: Html,
}

impl Page {
    pub fn parse(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            doc: Html::parse_document(html),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// All elements matching `sel`, in document order.
    pub fn select_all(&self, sel: &str) -> Result<Vec<ElementRef<'_>>, ScraperError> {
        let selector = parse_selector(sel)?;
        Ok(self.doc.select(&selector).collect())
    }

    /// Last element matching `sel`. Repeated matches overwrite earlier ones when filling a
    /// single-valued field, so the last one is the one that counts.
    pub fn select_last(&self, sel: &str) -> Result<Option<ElementRef<'_>>, ScraperError> {
        let selector = parse_selector(sel)?;
        Ok(self.doc.select(&selector).last())
    }

    /// Trimmed text of the last match.
    pub fn last_text(&self, sel: &str) -> Result<Option<String>, ScraperError> {
        Ok(self.select_last(sel)?.map(text))
    }

    /// Attribute of the last match, if that element carries it.
    pub fn last_attr(&self, sel: &str, name: &str) -> Result<Option<String>, ScraperError> {
        Ok(self.select_last(sel)?.and_then(|el| attr(el, name)))
    }

    /// Whitespace-normalized text of every match.
    pub fn normalized_texts(&self, sel: &str) -> Result<Vec<String>, ScraperError> {
        Ok(self
            .select_all(sel)?
            .into_iter()
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .collect())
    }
}

/// Visible text of an element, trimmed.
pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub fn inner_html(el: ElementRef<'_>) -> String {
    el.inner_html()
}

pub fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value().attr(name).map(String::from)
}

/// Direct child elements (text and comment nodes skipped), in document order.
pub fn child_elements(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Lowercase tag name.
pub fn tag_name<'a>(el: ElementRef<'a>) -> &'a str {
    el.value().name()
}

/// Collapse every whitespace run (spaces, tabs, newlines) to a single space and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    const HTML: &str = r#"<html><body>
<h1 class="page-title">  First  </h1>
<h1 class="page-title">Second</h1>
<div class="box"><img src="/a.png"><img alt="no src"></div>
<ul class="tags"><li> one
    two </li><li>	three	</li></ul>
</body></html>"#;

    #[test]
    fn last_text_takes_last_match_trimmed() -> Result<(), ScraperError> {
        let page = Page::parse("https://example.com/p", HTML);
        assert_eq!(page.last_text("h1.page-title")?.as_deref(), Some("Second"));
        assert_eq!(page.url(), "https://example.com/p");
        Ok(())
    }

    #[test]
    fn missing_match_is_none() -> Result<(), ScraperError> {
        let page = Page::parse("u", HTML);
        assert!(page.last_text(".nothing-here")?.is_none());
        assert!(page.last_attr(".nothing-here > img", "src")?.is_none());
        assert!(page.normalized_texts(".nothing li")?.is_empty());
        Ok(())
    }

    #[test]
    fn last_attr_reads_last_element_only() -> Result<(), ScraperError> {
        let page = Page::parse("u", HTML);
        // Last img has no src.
        assert!(page.last_attr(".box > img", "src")?.is_none());
        let first = page.select_all(".box > img")?;
        assert_eq!(attr(first[0], "src").as_deref(), Some("/a.png"));
        Ok(())
    }

    #[test]
    fn normalized_texts_collapse_whitespace() -> Result<(), ScraperError> {
        let page = Page::parse("u", HTML);
        assert_eq!(page.normalized_texts(".tags li")?, vec!["one two", "three"]);
        Ok(())
    }

    #[test]
    fn normalize_whitespace_irregular_input() {
        let out = normalize_whitespace("\n\t  Barn  \t och\n\nunga \r\n ");
        assert_eq!(out, "Barn och unga");
        assert!(!out.contains("  "));
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn invalid_selector_errors() {
        let page = Page::parse("u", HTML);
        match page.select_all("div[") {
            Err(ScraperError::InvalidSelector { selector, .. }) => assert_eq!(selector, "div["),
            other => panic!("expected InvalidSelector, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn child_elements_and_tag_names() -> Result<(), Box<dyn Error>> {
        let page = Page::parse(
            "u",
            "<div id=\"z\">text<p>a</p><!-- c --><script>x()</script><span>b</span></div>",
        );
        let zone = page.select_last("#z")?.ok_or("zone missing")?;
        let names: Vec<_> = child_elements(zone).map(tag_name).collect();
        assert_eq!(names, vec!["p", "script", "span"]);
        Ok(())
    }
}
