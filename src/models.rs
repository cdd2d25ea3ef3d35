use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fully-built search request, ready to be executed by whatever HTTP
/// client the aggregator host supplies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Always "GET"; the NDA search page takes no request body.
    pub method: String,
    /// Absolute URL with the percent-encoded query string already attached
    pub url: String,
    /// Static browser-mimicking header bundle
    pub headers: HashMap<String, String>,
    /// 1-based page number (clamping is the host's job)
    pub page: u32,
}

/// One normalized search result.
///
/// `File` is emitted when the target URL points at a PDF; everything else
/// is a `Link` whose title carries a `[<content type>]` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultRecord {
    Link {
        url: String,
        title: String,
        snippet: String,
    },
    File {
        url: String,
        title: String,
        snippet: String,
    },
}

impl ResultRecord {
    pub fn url(&self) -> &str {
        match self {
            ResultRecord::Link { url, .. } | ResultRecord::File { url, .. } => url,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ResultRecord::Link { title, .. } | ResultRecord::File { title, .. } => title,
        }
    }

    pub fn snippet(&self) -> &str {
        match self {
            ResultRecord::Link { snippet, .. } | ResultRecord::File { snippet, .. } => snippet,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<ResultRecord>,
}

/// Locale/region capabilities the adapter declares to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineTraits {
    pub all_locale: Option<String>,
    pub languages: HashMap<String, String>,
    pub regions: HashMap<String, String>,
}

/// Content-type tag derived from the normalized result URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    LegalHotline,
    ResearchArticle,
    News,
    PdfDocument,
    LegalContent,
}

impl ContentType {
    /// Case-insensitive substring classification, in priority order.
    pub fn classify(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("hotline") {
            ContentType::LegalHotline
        } else if url.contains("research") || url.contains("article") {
            ContentType::ResearchArticle
        } else if url.contains("news") {
            ContentType::News
        } else if url.contains(".pdf") {
            ContentType::PdfDocument
        } else {
            ContentType::LegalContent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::LegalHotline => "Legal Hotline",
            ContentType::ResearchArticle => "Research Article",
            ContentType::News => "News",
            ContentType::PdfDocument => "PDF Document",
            ContentType::LegalContent => "Legal Content",
        }
    }
}
