pub mod article_repository;
pub mod http_article_repository;
pub mod ip_lookup_repository;

pub use article_repository::{ArticleRepository, UpstreamError};
pub use http_article_repository::HttpArticleRepository;
pub use ip_lookup_repository::{IpLookupRepository, JsonIpLookup, TextIpLookup};
