//! Structural view over a fetched HTML page.
//!
//! Parsing never fails: malformed markup degrades to partial or empty
//! extraction. JSON-LD is kept verbatim; `@type` names are only read from
//! blocks that parse.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Elements that separate words in rendered text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "caption", "dd", "details",
    "dialog", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "html", "img", "input", "li", "main", "nav",
    "ol", "option", "p", "pre", "section", "select", "summary", "table", "tbody", "td",
    "textarea", "tfoot", "th", "thead", "tr", "ul",
];

/// Parsed page, immutable after construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDocument {
    /// Raw text of each `application/ld+json` script, in document order
    pub structured_data: Vec<String>,
    /// Text of the first `<title>`, whitespace-collapsed; None when empty
    pub title: Option<String>,
    /// Text of the first `<h1>`, whitespace-collapsed
    pub h1: Option<String>,
    /// Text of the first `<p>` following the first `<h1>`
    pub lead_paragraph: Option<String>,
    pub anchor_hrefs: BTreeSet<String>,
    /// Lowercased `name`/`property` -> `content`, last one wins
    pub meta: BTreeMap<String, String>,
    pub visible_text: String,
    pub word_count: usize,
}

impl PageDocument {
    /// Parse an HTML body
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let visible_text = extract_visible_text(&document);
        let word_count = count_words(&visible_text);
        let (h1, lead_paragraph) = extract_heading_and_lead(&document);

        Self {
            structured_data: extract_structured_data(&document),
            title: extract_title(&document),
            h1,
            lead_paragraph,
            anchor_hrefs: extract_anchor_hrefs(&document),
            meta: extract_meta(&document),
            visible_text,
            word_count,
        }
    }

    /// Parse a raw body that may not be valid UTF-8
    pub fn parse_bytes(body: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(body))
    }

    /// All structured-data blocks joined, for substring search
    pub fn schema_corpus(&self) -> String {
        self.structured_data.join("\n")
    }

    /// `@type` names from every block that parses as JSON.
    /// Blocks that fail to parse contribute nothing here.
    pub fn schema_types(&self) -> BTreeSet<String> {
        let mut types = BTreeSet::new();
        for block in &self.structured_data {
            if let Ok(value) = serde_json::from_str::<Value>(block) {
                collect_types(&value, &mut types);
            }
        }
        types
    }

    /// Content of a meta element by lowercased key
    pub fn meta_content(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(|s| s.as_str())
    }
}

/// Whitespace-split word count. No punctuation handling.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("valid static selector"))
}

fn extract_structured_data(document: &Html) -> Vec<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let sel = selector(&SELECTOR, r#"script[type="application/ld+json"]"#);

    document
        .select(sel)
        .map(|el| el.text().collect::<String>())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

fn extract_title(document: &Html) -> Option<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let sel = selector(&SELECTOR, "title");

    document
        .select(sel)
        .next()
        .map(|el| element_text(&el))
        .filter(|title| !title.is_empty())
}

fn extract_heading_and_lead(document: &Html) -> (Option<String>, Option<String>) {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let sel = selector(&SELECTOR, "h1, p");

    let mut h1 = None;
    for el in document.select(sel) {
        match (el.value().name(), &h1) {
            ("h1", None) => h1 = Some(element_text(&el)),
            ("p", Some(_)) => return (h1, Some(element_text(&el))),
            _ => {}
        }
    }
    (h1, None)
}

fn extract_anchor_hrefs(document: &Html) -> BTreeSet<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let sel = selector(&SELECTOR, "a[href]");

    document
        .select(sel)
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect()
}

fn extract_meta(document: &Html) -> BTreeMap<String, String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let sel = selector(&SELECTOR, "meta");

    let mut meta = BTreeMap::new();
    for el in document.select(sel) {
        let attrs = el.value();
        let Some(key) = attrs.attr("name").or_else(|| attrs.attr("property")) else {
            continue;
        };
        let content = attrs.attr("content").unwrap_or("").trim().to_string();
        meta.insert(key.trim().to_ascii_lowercase(), content);
    }
    meta
}

fn extract_visible_text(document: &Html) -> String {
    let mut raw = String::new();
    collect_visible_text(document.root_element(), &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Append text in document order. Inline elements add nothing between
/// their text and the surrounding text; block elements are word breaks.
fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if HIDDEN_ELEMENTS.contains(&name) {
        return;
    }
    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push(' ');
    }
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            collect_visible_text(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
    if block {
        out.push(' ');
    }
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_types(value: &Value, types: &mut BTreeSet<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_types(item, types);
            }
        }
        Value::Object(map) => {
            match map.get("@type") {
                Some(Value::String(t)) => {
                    types.insert(t.clone());
                }
                Some(Value::Array(ts)) => {
                    types.extend(ts.iter().filter_map(|t| t.as_str()).map(str::to_string));
                }
                _ => {}
            }
            if let Some(graph) = map.get("@graph") {
                collect_types(graph, types);
            }
        }
        _ => {}
    }
}
