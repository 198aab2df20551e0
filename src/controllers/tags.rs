use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::tags::{PageContext, TagBootstrap, TagService},
    infrastructure::http::cache_policy::{cache_headers, RouteClass},
};

#[derive(Debug, Default, Deserialize)]
pub struct BootstrapQuery {
    pub path: Option<String>,
    pub title: Option<String>,
    pub jwt: Option<String>,
}

pub struct TagsController {
    tag_service: Arc<TagService>,
}

impl TagsController {
    pub fn new(tag_service: Arc<TagService>) -> Self {
        Self { tag_service }
    }

    /// GET /api/tags/bootstrap - Vendor scripts and command queues for a page
    pub async fn bootstrap(
        State(controller): State<Arc<TagsController>>,
        headers: HeaderMap,
        Query(query): Query<BootstrapQuery>,
    ) -> (HeaderMap, Json<TagBootstrap>) {
        let page = page_context(&headers, query);
        let bootstrap = controller.tag_service.bootstrap(&page);
        (cache_headers(RouteClass::Uncacheable, false), Json(bootstrap))
    }
}

fn page_context(headers: &HeaderMap, query: BootstrapQuery) -> PageContext {
    let path = query
        .path
        .filter(|p| p.starts_with('/'))
        .unwrap_or_else(|| "/".to_string());
    let location = match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => {
            let scheme = headers
                .get("x-forwarded-proto")
                .and_then(|h| h.to_str().ok())
                .unwrap_or("https");
            format!("{}://{}{}", scheme, host, path)
        }
        None => path.clone(),
    };

    PageContext {
        path,
        title: query.title.unwrap_or_default(),
        location,
        jwt: query.jwt.filter(|t| !t.is_empty()),
    }
}
