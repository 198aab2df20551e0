//! Raw payload shapes returned by the upstream content API.
//!
//! The upstream is loose about types, so ids and image dimensions are accepted as
//! either numbers or strings, and every nested block is optional.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Envelope returned by the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticleList {
    #[serde(default)]
    pub result: Option<RawListResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListResult {
    #[serde(default, deserialize_with = "positive_number")]
    pub current_page: Option<u32>,
    #[serde(default, deserialize_with = "positive_number")]
    pub last_page: Option<u32>,
    #[serde(default, deserialize_with = "positive_number")]
    pub total: Option<u32>,
    #[serde(default, deserialize_with = "positive_number")]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub articles: Option<Vec<RawArticle>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    #[serde(default, deserialize_with = "loose_id")]
    pub news_item_id: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "loose_paragraphs")]
    pub body: Option<Vec<String>>,
    #[serde(default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub date_modified: Option<String>,
    #[serde(default)]
    pub image: Option<RawImage>,
}

/// A set of size variants for one picture.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub size1: Option<RawImageSize>,
    #[serde(default)]
    pub size2: Option<RawImageSize>,
    #[serde(default)]
    pub thumb: Option<RawImageSize>,
    #[serde(default)]
    pub headline: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImageSize {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "Width", deserialize_with = "positive_number")]
    pub width: Option<u32>,
    #[serde(default, rename = "Height", deserialize_with = "positive_number")]
    pub height: Option<u32>,
}

/// Body returned by the detail endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticleDetail {
    #[serde(default, deserialize_with = "loose_id")]
    pub news_item_id: Option<String>,
    #[serde(default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub date_modified: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub pc_body: Option<String>,
    #[serde(default)]
    pub sp_body: Option<String>,
    #[serde(default)]
    pub related_links: Option<Vec<RawRelatedLink>>,
    /// Image groups keyed by upstream group id. Kept as raw JSON so one malformed
    /// group does not reject the whole article.
    #[serde(default)]
    pub images_detail: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImageGroup {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub items: Option<RawImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRelatedLink {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

impl RawArticleDetail {
    /// First image group in the order a JavaScript object would enumerate it:
    /// integer-like keys ascending, then the remaining keys in insertion order.
    pub fn first_image_group(&self) -> Option<RawImageGroup> {
        let groups = self.images_detail.as_ref()?;

        let first_key = groups
            .keys()
            .filter_map(|k| k.parse::<u32>().ok().filter(|n| n.to_string() == *k).map(|n| (n, k)))
            .min_by_key(|(n, _)| *n)
            .map(|(_, k)| k)
            .or_else(|| groups.keys().next())?;

        match serde_json::from_value::<RawImageGroup>(groups[first_key].clone()) {
            Ok(group) => Some(group),
            Err(e) => {
                tracing::warn!(group = %first_key, error = %e, "Skipping malformed image group");
                None
            }
        }
    }
}

fn loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Paragraph list. Non-string entries keep their slot as empty text so the first
/// paragraph stays first; a non-array body counts as absent.
fn loose_paragraphs<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    _ => String::new(),
                })
                .collect(),
        ),
        _ => None,
    })
}

fn positive_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite() && *n >= 1.0 && *n <= u32::MAX as f64)
        .map(|n| n.floor() as u32))
}
