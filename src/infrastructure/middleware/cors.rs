use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::infrastructure::config::Config;

/// Only paths under this prefix are cross-origin.
pub const CORS_PATH_PREFIX: &str = "/news-api/";

const ALLOW_METHODS: &str = "GET, HEAD, OPTIONS";
const DEFAULT_ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With";
const MAX_AGE_SECS: &str = "600";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
    /// Wildcard mode, origin is irrelevant
    Any,
    Allowed(String),
    Rejected,
}

/// Exact-match origin allow-list for the SPA endpoints.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: Vec<String>,
    allow_any: bool,
    allow_credentials: bool,
}

impl CorsPolicy {
    pub fn new(origins: Vec<String>, allow_credentials: bool) -> Self {
        let allow_any = origins.iter().any(|o| o == "*");
        Self {
            origins,
            allow_any,
            allow_credentials,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cors_allowed_origins.clone(), config.cors_allow_credentials)
    }

    pub fn decide(&self, origin: Option<&str>) -> OriginDecision {
        if self.allow_any {
            return OriginDecision::Any;
        }
        match origin {
            Some(origin) if self.origins.iter().any(|o| o == origin) => {
                OriginDecision::Allowed(origin.to_string())
            }
            _ => OriginDecision::Rejected,
        }
    }

    /// Writes the origin-dependent headers onto a response.
    pub fn apply(&self, decision: &OriginDecision, headers: &mut HeaderMap) {
        let allow_origin = match decision {
            OriginDecision::Any => Some(HeaderValue::from_static("*")),
            OriginDecision::Allowed(origin) => HeaderValue::from_str(origin).ok(),
            OriginDecision::Rejected => None,
        };

        if let Some(value) = allow_origin {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
            if self.allow_credentials {
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                    HeaderValue::from_static("true"),
                );
            }
        }

        if !self.allow_any {
            headers.append(header::VARY, HeaderValue::from_static("Origin"));
        }
    }

    /// Empty 204 answered for every preflight, whatever the origin.
    pub fn preflight(&self, decision: &OriginDecision, request_headers: &HeaderMap) -> Response {
        let mut headers = HeaderMap::new();
        self.apply(decision, &mut headers);

        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        let allow_headers = request_headers
            .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ALLOW_HEADERS));
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(MAX_AGE_SECS),
        );

        (StatusCode::NO_CONTENT, headers).into_response()
    }
}

/// CORS gate for `/news-api/` paths
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with(CORS_PATH_PREFIX) {
        return next.run(request).await;
    }

    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let decision = policy.decide(origin.as_deref());

    if decision == OriginDecision::Rejected {
        tracing::debug!(origin = ?origin, path = %request.uri().path(), "Origin not allowed");
    }

    if request.method() == Method::OPTIONS {
        return policy.preflight(&decision, request.headers());
    }

    let mut response = next.run(request).await;
    policy.apply(&decision, response.headers_mut());
    response
}
