//! HTML result extraction for the NDA search page.
//!
//! The site has no API, so this parses whatever HTML it currently renders.
//! Extraction is a cascade: try a fixed list of result-card selectors, fall
//! back to path-like links, and as a last resort accept any link with enough
//! visible text. Candidates that miss a required field are skipped, never
//! fatal, and a document that matches nothing yields an empty list.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::{ContentType, ResultRecord};

/// Result-card selectors, tried in order; the first one with any match wins.
const CONTAINER_SELECTORS: &[&str] = &[
    r#"div[class*="search-result"]"#,
    r#"div[class*="result"]"#,
    r#"div[class*="article"]"#,
    r#"div[class*="hotline"]"#,
    r#"div[class*="news"]"#,
    r#"div[class*="content-item"]"#,
    "article",
    r#"div[class*="list-item"]"#,
];

const TITLE_SELECTORS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "a",
    "strong",
    "span.title",
    "div.title",
];

const SNIPPET_SELECTORS: &[&str] = &[
    "p",
    "div.content",
    "div.description",
    "div.excerpt",
    "span.snippet",
];

const MIN_TITLE_CHARS: usize = 5;
const MAX_SNIPPET_CHARS: usize = 300;
const SNIPPET_KEEP_CHARS: usize = 297;
const SNIPPET_FRAGMENTS: usize = 3;
const MIN_FALLBACK_TEXT_CHARS: usize = 10;
const MAX_FALLBACK_LINKS: usize = 10;

const FALLBACK_SNIPPET: &str = "Content from Nishith Desai Associates";

/// Parse a search results page into normalized records.
///
/// `base_url` is the site origin used to absolutize relative hrefs.
pub fn parse_results(html: &str, base_url: &str) -> Vec<ResultRecord> {
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    for container in candidate_containers(&document) {
        if let Some(record) = extract_candidate(container, base_url) {
            records.push(record);
        }
    }

    // Last resort: scan every link on the page.
    if records.is_empty() {
        records = link_fallback(&document, base_url);
    }

    debug!(count = records.len(), "parsed search results");
    records
}

fn candidate_containers<'a>(document: &'a Html) -> Vec<ElementRef<'a>> {
    for selector in CONTAINER_SELECTORS {
        let sel = Selector::parse(selector).unwrap();
        let matches: Vec<_> = document.select(&sel).collect();
        if !matches.is_empty() {
            debug!(selector, count = matches.len(), "container selector matched");
            return matches;
        }
    }

    // No recognizable result cards; treat path-like links as candidates.
    let sel = Selector::parse(r#"a[href*="/"]"#).unwrap();
    document.select(&sel).collect()
}

/// Extract one candidate container into a record, or `None` to skip it.
///
/// Classification runs once on the normalized URL: PDF targets become
/// `File` records, everything else a `Link` with a content-type prefix.
fn extract_candidate(container: ElementRef, base_url: &str) -> Option<ResultRecord> {
    let title = extract_title(container)?;
    if title.chars().count() < MIN_TITLE_CHARS {
        return None;
    }

    let href = extract_href(container)?;
    let url = normalize_url(&href, base_url);
    let snippet = extract_snippet(container);

    match ContentType::classify(&url) {
        ContentType::PdfDocument => Some(ResultRecord::File {
            url,
            title,
            snippet,
        }),
        kind => Some(ResultRecord::Link {
            url,
            title: format!("[{}] {}", kind.label(), title),
            snippet,
        }),
    }
}

/// First non-empty text among the title selectors, in priority order.
fn extract_title(container: ElementRef) -> Option<String> {
    for selector in TITLE_SELECTORS {
        let sel = Selector::parse(selector).unwrap();
        for element in container.select(&sel) {
            let text = collapse_whitespace(element.text());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Descendant anchor href, else the container's own href, else any href
/// attribute in the subtree.
fn extract_href(container: ElementRef) -> Option<String> {
    let anchor = Selector::parse("a[href]").unwrap();
    if let Some(a) = container.select(&anchor).next() {
        return a.value().attr("href").map(str::to_string);
    }

    if let Some(own) = container.value().attr("href") {
        return Some(own.to_string());
    }

    let any_href = Selector::parse("[href]").unwrap();
    container
        .select(&any_href)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(str::to_string)
}

fn extract_snippet(container: ElementRef) -> String {
    for selector in SNIPPET_SELECTORS {
        let sel = Selector::parse(selector).unwrap();
        let fragments: Vec<&str> = container
            .select(&sel)
            .flat_map(|element| element.text())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .take(SNIPPET_FRAGMENTS)
            .collect();
        if !fragments.is_empty() {
            return clean_snippet(&fragments.join(" "));
        }
    }

    // Nothing matched; fall back to all text nodes in the subtree.
    let fragments: Vec<&str> = container
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .take(SNIPPET_FRAGMENTS)
        .collect();
    clean_snippet(&fragments.join(" "))
}

/// Collapse whitespace runs and truncate to 297 chars + "..." when over 300.
fn clean_snippet(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_SNIPPET_CHARS {
        let truncated: String = collapsed.chars().take(SNIPPET_KEEP_CHARS).collect();
        format!("{truncated}...")
    } else {
        collapsed
    }
}

/// Absolutize a scraped href against the site origin.
pub(crate) fn normalize_url(href: &str, base_url: &str) -> String {
    if href.starts_with('/') {
        format!("{base_url}{href}")
    } else if !href.starts_with("http") {
        format!("{base_url}/{href}")
    } else {
        href.to_string()
    }
}

/// Tier-2 fallback: accept any link with enough visible text, skipping
/// fragments, script pseudo-URLs, and mail links. Capped at 10 records.
fn link_fallback(document: &Html, base_url: &str) -> Vec<ResultRecord> {
    let anchor = Selector::parse("a[href]").unwrap();
    let mut records = Vec::new();

    for link in document.select(&anchor) {
        let href = match link.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
        {
            continue;
        }

        let text = collapse_whitespace(link.text());
        if text.chars().count() <= MIN_FALLBACK_TEXT_CHARS {
            continue;
        }

        records.push(ResultRecord::Link {
            url: normalize_url(href, base_url),
            title: text,
            snippet: FALLBACK_SNIPPET.to_string(),
        });

        if records.len() >= MAX_FALLBACK_LINKS {
            break;
        }
    }

    records
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
