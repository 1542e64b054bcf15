//! Records produced by page extraction, and the setter traits extractors write through.
//!
//! Every field is optional: CMS pages do not always carry every block, and a missing block
//! leaves the field unset. Unset fields are omitted from JSON output.

use serde::{Deserialize, Serialize};

/// Sink for event fields. Extractors only ever call setters.
pub trait EventContainer {
    fn set_title(&mut self, title: String);
    fn set_body(&mut self, body: String);
    fn set_list_image(&mut self, src: String);
    fn set_category(&mut self, category: String);
    fn set_date(&mut self, date: String);
    fn set_month(&mut self, month: String);
    fn set_time(&mut self, time: String);
    fn set_library(&mut self, library: String);
    fn set_price(&mut self, price: u32);
    fn set_target(&mut self, target: Vec<String>);
    fn set_tags(&mut self, tags: Vec<String>);
}

/// Sink for news article fields.
pub trait NewsContainer {
    fn set_title(&mut self, title: String);
    fn set_lead(&mut self, lead: String);
    fn set_list_image(&mut self, src: String);
    fn set_title_image(&mut self, src: String);
    /// Raw HTML of the main content block.
    fn set_body(&mut self, body: String);
    fn set_target(&mut self, target: Vec<String>);
    fn set_tags(&mut self, tags: Vec<String>);
}

/// Sink for library page fields.
pub trait LibraryContainer {
    fn set_title(&mut self, title: String);
    fn set_title_image(&mut self, src: String);
    fn set_body(&mut self, body: String);
}

/// One event page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Introduction text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Day as displayed on the page (e.g. "14").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Month as displayed on the page (e.g. "okt").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Name of the hosting library.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    /// Audience groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl EventContainer for EventRecord {
    fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }
    fn set_body(&mut self, body: String) {
        self.body = Some(body);
    }
    fn set_list_image(&mut self, src: String) {
        self.list_image = Some(src);
    }
    fn set_category(&mut self, category: String) {
        self.category = Some(category);
    }
    fn set_date(&mut self, date: String) {
        self.date = Some(date);
    }
    fn set_month(&mut self, month: String) {
        self.month = Some(month);
    }
    fn set_time(&mut self, time: String) {
        self.time = Some(time);
    }
    fn set_library(&mut self, library: String) {
        self.library = Some(library);
    }
    fn set_price(&mut self, price: u32) {
        self.price = Some(price);
    }
    fn set_target(&mut self, target: Vec<String>) {
        self.target = target;
    }
    fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }
}

/// One news article page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NewsContainer for NewsRecord {
    fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }
    fn set_lead(&mut self, lead: String) {
        self.lead = Some(lead);
    }
    fn set_list_image(&mut self, src: String) {
        self.list_image = Some(src);
    }
    fn set_title_image(&mut self, src: String) {
        self.title_image = Some(src);
    }
    fn set_body(&mut self, body: String) {
        self.body = Some(body);
    }
    fn set_target(&mut self, target: Vec<String>) {
        self.target = target;
    }
    fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }
}

/// One library page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_image: Option<String>,
    /// Cleaned HTML of the main content block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl LibraryContainer for LibraryRecord {
    fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }
    fn set_title_image(&mut self, src: String) {
        self.title_image = Some(src);
    }
    fn set_body(&mut self, body: String) {
        self.body = Some(body);
    }
}

/// A record of any of the three kinds, tagged with `"kind"` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResourceRecord {
    Event(EventRecord),
    News(NewsRecord),
    Library(LibraryRecord),
}

/// A detail page URL and the record extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harvested {
    pub url: String,
    #[serde(flatten)]
    pub record: ResourceRecord,
}
