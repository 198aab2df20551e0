use crate::error::AppError;
use crate::infrastructure::repositories::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum ArticleServiceError {
    #[error("not configured: {0}")]
    NotConfigured(String),
    #[error("upstream unreachable: {0}")]
    Unreachable(String),
    #[error("upstream malformed: {0}")]
    Malformed(String),
}

impl From<UpstreamError> for ArticleServiceError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotConfigured(name) => ArticleServiceError::NotConfigured(name.to_string()),
            UpstreamError::Unreachable(msg) => ArticleServiceError::Unreachable(msg),
            UpstreamError::Malformed(msg) => ArticleServiceError::Malformed(msg),
        }
    }
}

impl From<ArticleServiceError> for AppError {
    fn from(err: ArticleServiceError) -> Self {
        match err {
            ArticleServiceError::NotConfigured(name) => AppError::ConfigurationMissing(name),
            ArticleServiceError::Unreachable(msg) => AppError::UpstreamUnreachable(msg),
            ArticleServiceError::Malformed(msg) => AppError::UpstreamMalformed(msg),
        }
    }
}
