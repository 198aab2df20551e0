//! Maps raw upstream payloads onto the stable response contract.

use super::html_rewriter::HtmlRewriter;
use super::image::{absolutize, resolve_image, ImageContext};
use super::model::{RawArticle, RawArticleDetail, RawArticleList, RawListResult, RawRelatedLink};
use super::{timestamp, ArticleDetail, ArticlePage, ArticleSummary, ImageRef, RelatedLink};
use crate::infrastructure::config::Config;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

const SUMMARY_MAX_CHARS: usize = 120;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static FIRST_IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\ssrc=["']([^"']+)["']"#).expect("valid img pattern")
});

/// Immutable per-process settings shared by every projection.
#[derive(Debug, Clone)]
pub struct ProjectionSettings {
    pub image_base: Option<Url>,
    pub headline_prefixes: Vec<String>,
    pub rewriter: HtmlRewriter,
}

impl ProjectionSettings {
    pub fn new(image_base: Option<Url>, headline_prefixes: Vec<String>, copyright_notice: &str) -> Self {
        Self {
            image_base,
            headline_prefixes,
            rewriter: HtmlRewriter::new(copyright_notice),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, url::ParseError> {
        let image_base = config.image_base.as_deref().map(Url::parse).transpose()?;
        Ok(Self::new(
            image_base,
            config.headline_prefixes.clone(),
            &config.copyright_notice,
        ))
    }

    /// Drop a leading category label such as `【ボートレース】` and trim.
    pub fn strip_prefix(&self, headline: &str) -> String {
        let stripped = self
            .headline_prefixes
            .iter()
            .find_map(|prefix| headline.strip_prefix(prefix.as_str()))
            .unwrap_or(headline);
        stripped.trim().to_string()
    }

    fn absolutize(&self, src: &str) -> String {
        absolutize(src, self.image_base.as_ref())
    }
}

/// First body paragraph with whitespace collapsed, cut to 120 characters.
pub fn summarize(body: Option<&[String]>) -> String {
    let first = body.and_then(|paragraphs| paragraphs.first()).map(String::as_str).unwrap_or("");
    WHITESPACE_RUN
        .replace_all(first, " ")
        .chars()
        .take(SUMMARY_MAX_CHARS)
        .collect()
}

/// Site-relative page path for an article id.
pub fn article_path(id: &str) -> String {
    format!("/articles/{}.html", urlencoding::encode(id))
}

/// Project one list item. Articles without an id are dropped.
pub fn project_summary(raw: &RawArticle, settings: &ProjectionSettings) -> Option<ArticleSummary> {
    let id = raw.news_item_id.as_deref().filter(|id| !id.is_empty())?;

    let image = raw.image.as_ref().and_then(|img| {
        resolve_image(
            img,
            ImageContext::List,
            img.headline.as_deref().unwrap_or(""),
            settings.image_base.as_ref(),
        )
    });

    Some(ArticleSummary {
        id: id.to_string(),
        title: settings.strip_prefix(raw.headline.as_deref().unwrap_or("")),
        summary: summarize(raw.body.as_deref()),
        published_at: timestamp::normalize(raw.date_published.as_deref()),
        updated_at: timestamp::normalize(updated_source(
            raw.date_modified.as_deref(),
            raw.date_published.as_deref(),
        )),
        image,
        url: article_path(id),
    })
}

/// Project a list payload into a page envelope.
///
/// `limit` slices the projected items; the pagination fallbacks are computed
/// from the sliced length.
pub fn project_list(
    raw: &RawArticleList,
    requested_page: Option<u32>,
    limit: Option<u32>,
    settings: &ProjectionSettings,
) -> ArticlePage {
    let empty = RawListResult::default();
    let result = raw.result.as_ref().unwrap_or(&empty);

    let mut items: Vec<ArticleSummary> = result
        .articles
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|article| {
            let projected = project_summary(article, settings);
            if projected.is_none() {
                tracing::warn!("Dropping upstream article without news_item_id");
            }
            projected
        })
        .collect();

    if let Some(limit) = limit {
        items.truncate(limit as usize);
    }

    let count = items.len() as u32;
    ArticlePage {
        page: result.current_page.or(requested_page).unwrap_or(1),
        per_page: result.per_page.unwrap_or(count),
        total_pages: result.last_page.unwrap_or(1),
        total: result.total.unwrap_or(count),
        items,
    }
}

/// Project a detail payload. `requested_id` fills in a missing upstream id.
pub fn project_detail(
    raw: &RawArticleDetail,
    requested_id: &str,
    settings: &ProjectionSettings,
) -> ArticleDetail {
    let title = settings.strip_prefix(raw.headline.as_deref().unwrap_or(""));
    let raw_body = [raw.pc_body.as_deref(), raw.sp_body.as_deref()]
        .into_iter()
        .flatten()
        .find(|body| !body.is_empty())
        .unwrap_or("");

    let image = hero_image(raw, &title, settings).or_else(|| first_html_image(raw_body, settings));

    ArticleDetail {
        id: raw
            .news_item_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| requested_id.to_string()),
        published_at: timestamp::normalize(raw.date_published.as_deref()),
        updated_at: timestamp::normalize(updated_source(
            raw.date_modified.as_deref(),
            raw.date_published.as_deref(),
        )),
        body_html: settings.rewriter.rewrite(raw_body, settings.image_base.as_ref()),
        image,
        related: raw
            .related_links
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|link| project_related(link, settings))
            .collect(),
        title,
    }
}

fn project_related(link: &RawRelatedLink, settings: &ProjectionSettings) -> RelatedLink {
    RelatedLink {
        title: settings.strip_prefix(link.title.as_deref().unwrap_or("")),
        url: link.url.clone().unwrap_or_default(),
        thumb: settings.absolutize(link.thumb.as_deref().unwrap_or("")),
    }
}

fn hero_image(raw: &RawArticleDetail, title: &str, settings: &ProjectionSettings) -> Option<ImageRef> {
    let group = raw.first_image_group()?;
    let alt = group
        .headline
        .as_deref()
        .filter(|h| !h.is_empty())
        .unwrap_or(title);
    resolve_image(group.items.as_ref()?, ImageContext::Hero, alt, settings.image_base.as_ref())
}

fn first_html_image(html: &str, settings: &ProjectionSettings) -> Option<ImageRef> {
    let src = FIRST_IMG_SRC.captures(html)?.get(1)?.as_str();
    Some(ImageRef {
        src: settings.absolutize(src),
        width: None,
        height: None,
        alt: String::new(),
    })
}

fn updated_source<'a>(modified: Option<&'a str>, published: Option<&'a str>) -> Option<&'a str> {
    modified.filter(|m| !m.trim().is_empty()).or(published)
}
