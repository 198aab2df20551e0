use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use crate::domain::article::{ArticleDetail, ArticlePage, ListParams, NewsFeed};
use crate::{
    domain::article::{ArticleService, ArticleServiceApi},
    error::AppResult,
    infrastructure::http::cache_policy::{cache_headers, RouteClass},
};

/// Raw query pairs. Parsed leniently so bad input is ignored, not rejected.
type ListQuery = Vec<(String, String)>;

fn list_params(query: &[(String, String)]) -> ListParams {
    ListParams::parse(single_value(query, "page"), single_value(query, "limit"))
}

/// A key given more than once has no usable number and counts as absent.
fn single_value<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    let mut values = query.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str());
    match (values.next(), values.next()) {
        (Some(value), None) => Some(value),
        _ => None,
    }
}

pub struct ArticleController {
    article_service: Arc<ArticleService>,
    production: bool,
}

impl ArticleController {
    pub fn new(article_service: Arc<ArticleService>, production: bool) -> Self {
        Self {
            article_service,
            production,
        }
    }

    /// GET {prefix}/articles - One page of articles
    pub async fn list_articles(
        State(controller): State<Arc<ArticleController>>,
        Query(query): Query<ListQuery>,
    ) -> AppResult<(HeaderMap, Json<ArticlePage>)> {
        let page = controller
            .article_service
            .list_articles(list_params(&query))
            .await?;
        Ok((
            cache_headers(RouteClass::ArticleList, controller.production),
            Json(page),
        ))
    }

    /// GET {prefix}/articles/:id - Single article
    pub async fn get_article(
        State(controller): State<Arc<ArticleController>>,
        Path(id): Path<String>,
    ) -> AppResult<(HeaderMap, Json<ArticleDetail>)> {
        let detail = controller.article_service.get_article(&id).await?;
        Ok((
            cache_headers(RouteClass::ArticleDetail, controller.production),
            Json(detail),
        ))
    }

    /// GET {prefix}/news-feed - Minimal list for the SPA
    pub async fn news_feed(
        State(controller): State<Arc<ArticleController>>,
        Query(query): Query<ListQuery>,
    ) -> AppResult<(HeaderMap, Json<NewsFeed>)> {
        let feed = controller.article_service.news_feed(list_params(&query)).await?;
        Ok((
            cache_headers(RouteClass::NewsFeed, controller.production),
            Json(feed),
        ))
    }
}
