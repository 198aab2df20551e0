use super::error::ArticleServiceError;
use super::model::{RawArticleDetail, RawArticleList};
use super::projection::{self, ProjectionSettings};
use super::{ArticleDetail, ArticlePage, ListParams, NewsFeed, NewsFeedItem, DEFAULT_FEED_LIMIT};
use crate::infrastructure::repositories::ArticleRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

const LIST_CACHE_TTL: Duration = Duration::from_secs(60);
const DETAIL_CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: u64 = 500;

pub struct ArticleService {
    article_repo: Arc<dyn ArticleRepository>,
    settings: ProjectionSettings,
    list_cache: Option<Cache<u32, Arc<RawArticleList>>>,
    detail_cache: Option<Cache<String, Arc<RawArticleDetail>>>,
}

impl ArticleService {
    pub fn new(
        article_repo: Arc<dyn ArticleRepository>,
        settings: ProjectionSettings,
        cache_enabled: bool,
    ) -> Self {
        let (list_cache, detail_cache) = if cache_enabled {
            (
                Some(
                    Cache::builder()
                        .max_capacity(CACHE_CAPACITY)
                        .time_to_live(LIST_CACHE_TTL)
                        .build(),
                ),
                Some(
                    Cache::builder()
                        .max_capacity(CACHE_CAPACITY)
                        .time_to_live(DETAIL_CACHE_TTL)
                        .build(),
                ),
            )
        } else {
            (None, None)
        };

        Self {
            article_repo,
            settings,
            list_cache,
            detail_cache,
        }
    }
}

#[async_trait]
pub trait ArticleServiceApi: Send + Sync {
    /// One page of articles projected into the list contract.
    ///
    /// `limit` slices the projected page; it is never sent upstream.
    async fn list_articles(&self, params: ListParams) -> Result<ArticlePage, ArticleServiceError>;

    /// A single article with its body rewritten for embedding.
    async fn get_article(&self, id: &str) -> Result<ArticleDetail, ArticleServiceError>;

    /// The list reduced to the minimal shape consumed by the SPA.
    async fn news_feed(&self, params: ListParams) -> Result<NewsFeed, ArticleServiceError>;
}

#[async_trait]
impl ArticleServiceApi for ArticleService {
    async fn list_articles(&self, params: ListParams) -> Result<ArticlePage, ArticleServiceError> {
        let raw = self.fetch_list(params.page).await?;
        let page = projection::project_list(&raw, params.page, params.limit, &self.settings);

        tracing::info!(
            page = page.page,
            items = page.items.len(),
            limit = ?params.limit,
            "Article list projected"
        );

        Ok(page)
    }

    async fn get_article(&self, id: &str) -> Result<ArticleDetail, ArticleServiceError> {
        let raw = self.fetch_detail(id).await?;
        let detail = projection::project_detail(&raw, id, &self.settings);

        tracing::info!(
            id = %detail.id,
            has_image = detail.image.is_some(),
            related = detail.related.len(),
            "Article detail projected"
        );

        Ok(detail)
    }

    async fn news_feed(&self, params: ListParams) -> Result<NewsFeed, ArticleServiceError> {
        let params = ListParams {
            page: Some(params.page.unwrap_or(1)),
            limit: Some(params.limit.unwrap_or(DEFAULT_FEED_LIMIT)),
        };
        let page = self.list_articles(params).await?;

        Ok(NewsFeed {
            items: page.items.into_iter().map(NewsFeedItem::from).collect(),
        })
    }
}

impl ArticleService {
    async fn fetch_list(&self, page: Option<u32>) -> Result<Arc<RawArticleList>, ArticleServiceError> {
        // Absent page and page 1 are the same upstream request.
        let key = page.unwrap_or(1);
        if let Some(cache) = &self.list_cache {
            if let Some(cached) = cache.get(&key).await {
                tracing::debug!(page = key, "Upstream list cache hit");
                return Ok(cached);
            }
        }

        let raw = self.article_repo.fetch_list(page).await?;
        let raw = Arc::new(raw);

        if let Some(cache) = &self.list_cache {
            cache.insert(key, raw.clone()).await;
        }

        Ok(raw)
    }

    async fn fetch_detail(&self, id: &str) -> Result<Arc<RawArticleDetail>, ArticleServiceError> {
        if let Some(cache) = &self.detail_cache {
            if let Some(cached) = cache.get(id).await {
                tracing::debug!(id = %id, "Upstream detail cache hit");
                return Ok(cached);
            }
        }

        let raw = self.article_repo.fetch_detail(id).await?;
        let raw = Arc::new(raw);

        if let Some(cache) = &self.detail_cache {
            cache.insert(id.to_string(), raw.clone()).await;
        }

        Ok(raw)
    }
}
