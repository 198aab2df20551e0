pub mod error;
pub mod html_rewriter;
pub mod image;
pub mod model;
pub mod projection;
pub mod service;
pub mod timestamp;

pub use error::ArticleServiceError;
pub use projection::ProjectionSettings;
pub use service::{ArticleService, ArticleServiceApi};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Requests may ask for at most this many list items.
pub const MAX_LIMIT: u32 = 50;

/// Default number of items returned by the derived news feed.
pub const DEFAULT_FEED_LIMIT: u32 = 4;

/// Absolute image reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub alt: String,
}

/// List item projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    pub url: String,
}

/// Response for the article list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total: u32,
    pub items: Vec<ArticleSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedLink {
    pub title: String,
    pub url: String,
    pub thumb: String,
}

/// Response for the article detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetail {
    pub id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    pub related: Vec<RelatedLink>,
}

/// Minimal item shape handed to the SPA
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsFeedItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub image: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsFeed {
    pub items: Vec<NewsFeedItem>,
}

impl From<ArticleSummary> for NewsFeedItem {
    fn from(article: ArticleSummary) -> Self {
        Self {
            id: article.id,
            title: article.title,
            url: article.url,
            image: article.image.map(|img| img.src).unwrap_or_default(),
            published_at: article.published_at,
        }
    }
}

/// Parsed `page`/`limit` query values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    /// Lenient parse: non-numeric or non-positive values are ignored, fractions are
    /// floored and `limit` is capped at [`MAX_LIMIT`].
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: page.and_then(positive_int),
            limit: limit.and_then(positive_int).map(|l| l.min(MAX_LIMIT)),
        }
    }
}

fn positive_int(raw: &str) -> Option<u32> {
    let n = raw.trim().parse::<f64>().ok()?;
    if !n.is_finite() || n < 1.0 {
        return None;
    }
    Some(n.min(u32::MAX as f64).floor() as u32)
}
