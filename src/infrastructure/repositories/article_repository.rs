use crate::domain::article::model::{RawArticleDetail, RawArticleList};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{0} is not configured")]
    NotConfigured(String),
    #[error("{0}")]
    Unreachable(String),
    #[error("{0}")]
    Malformed(String),
}

/// Source of raw article payloads.
/// Abstracts the upstream content API so the service can be exercised without it.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Fetch one page of the article list. `page` is forwarded when present.
    async fn fetch_list(&self, page: Option<u32>) -> Result<RawArticleList, UpstreamError>;

    /// Fetch a single article by its upstream id.
    async fn fetch_detail(&self, id: &str) -> Result<RawArticleDetail, UpstreamError>;
}
