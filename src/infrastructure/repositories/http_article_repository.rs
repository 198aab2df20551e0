use super::article_repository::{ArticleRepository, UpstreamError};
use crate::domain::article::model::{RawArticleDetail, RawArticleList};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

/// reqwest-backed client for the upstream content API
pub struct HttpArticleRepository {
    list_api: Option<String>,
    detail_api: Option<String>,
    http_client: reqwest::Client,
}

impl HttpArticleRepository {
    pub fn new(list_api: Option<String>, detail_api: Option<String>) -> Self {
        Self {
            list_api,
            detail_api,
            http_client: reqwest::Client::new(),
        }
    }

    /// List URL with `page` set (replacing any `page` already in the base).
    fn list_url(&self, page: Option<u32>) -> Result<Url, UpstreamError> {
        let base = self
            .list_api
            .as_deref()
            .ok_or_else(|| UpstreamError::NotConfigured("NEWS_LIST_API".to_string()))?;
        let mut url = Url::parse(base)
            .map_err(|e| UpstreamError::NotConfigured(format!("NEWS_LIST_API ({})", e)))?;

        if let Some(page) = page {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(k, _)| k != "page")
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept)
                .append_pair("page", &page.to_string());
        }

        Ok(url)
    }

    fn detail_url(&self, id: &str) -> Result<String, UpstreamError> {
        let base = self
            .detail_api
            .as_deref()
            .ok_or_else(|| UpstreamError::NotConfigured("NEWS_DETAIL_API".to_string()))?;
        Ok(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            urlencoding::encode(id)
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        tracing::debug!(url = %url, "Fetching from news upstream");

        let response = self
            .http_client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Unreachable(format!(
                "{} responded with status {}",
                url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Unreachable(format!("reading body from {} failed: {}", url, e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::Malformed(format!("{} returned an unexpected body: {}", url, e)))
    }
}

#[async_trait]
impl ArticleRepository for HttpArticleRepository {
    async fn fetch_list(&self, page: Option<u32>) -> Result<RawArticleList, UpstreamError> {
        let url = self.list_url(page)?;
        self.get_json(url.as_str()).await
    }

    async fn fetch_detail(&self, id: &str) -> Result<RawArticleDetail, UpstreamError> {
        let url = self.detail_url(id)?;
        self.get_json(&url).await
    }
}
