use axum::http::{header, HeaderMap, HeaderValue};

pub const NO_STORE: &str = "no-store";

/// Caching classes. The class is chosen by route shape alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    ArticleList,
    ArticleDetail,
    NewsFeed,
    ArticlePage,
    StaticAsset,
    Uncacheable,
}

impl RouteClass {
    /// `Cache-Control` value for this class. API responses are only shared-cacheable in production.
    pub fn header_value(self, production: bool) -> &'static str {
        match self {
            RouteClass::ArticleList | RouteClass::NewsFeed if production => {
                "public, s-maxage=60, stale-while-revalidate=30"
            }
            RouteClass::ArticleDetail if production => {
                "public, s-maxage=300, stale-while-revalidate=60"
            }
            RouteClass::ArticlePage => {
                "public, max-age=0, s-maxage=300, stale-while-revalidate=30, stale-if-error=86400"
            }
            RouteClass::StaticAsset => "public, max-age=31536000, immutable",
            _ => NO_STORE,
        }
    }
}

/// Headers to attach once the body for `class` is ready.
pub fn cache_headers(class: RouteClass, production: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(class.header_value(production)),
    );
    headers
}
