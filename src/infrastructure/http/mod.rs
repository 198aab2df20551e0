pub mod cache_policy;

use axum::{
    http::{header, HeaderValue, Uri},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, set_header::SetResponseHeader, trace::TraceLayer};

use crate::infrastructure::config::Config;
use crate::{
    error::AppError,
    controllers::{articles::ArticleController, diag::DiagController, health, tags::TagsController},
    infrastructure::middleware::{cors_middleware, request_id_middleware, CorsPolicy},
};
use cache_policy::RouteClass;

/// Build the application router with all routes configured
pub fn build_router(
    config: Arc<Config>,
    article_controller: Arc<ArticleController>,
    diag_controller: Arc<DiagController>,
    tags_controller: Arc<TagsController>,
) -> Router {
    // Article routes, served to the page layer under /api and to the SPA under /news-api
    let article_routes = Router::new()
        .route("/articles", get(ArticleController::list_articles))
        .route("/articles/:id", get(ArticleController::get_article))
        .route("/news-feed", get(ArticleController::news_feed))
        .with_state(article_controller);

    let diag_routes = Router::new()
        .route("/_diag/ip", get(DiagController::egress_ip))
        .with_state(diag_controller);

    let tags_routes = Router::new()
        .route("/tags/bootstrap", get(TagsController::bootstrap))
        .with_state(tags_controller);

    let mut app = Router::new()
        .route("/health", get(health::health))
        .nest("/api", article_routes.clone().merge(tags_routes))
        .nest("/news-api", article_routes.merge(diag_routes));

    // Rendered article pages and built assets, when the rendering layer has written them
    if let Some(dir) = &config.pages_dir {
        tracing::info!(dir = %dir, "Serving rendered pages under /articles");
        app = app.nest_service("/articles", static_files(dir, RouteClass::ArticlePage, config.is_production()));
    }
    if let Some(dir) = &config.assets_dir {
        tracing::info!(dir = %dir, "Serving built assets under /_nuxt");
        app = app.nest_service("/_nuxt", static_files(dir, RouteClass::StaticAsset, config.is_production()));
    }

    let cors_policy = Arc::new(CorsPolicy::from_config(&config));

    app.fallback(not_found)
        .layer(middleware::from_fn_with_state(cors_policy, cors_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

fn static_files(dir: &str, class: RouteClass, production: bool) -> SetResponseHeader<ServeDir, HeaderValue> {
    SetResponseHeader::overriding(
        ServeDir::new(dir),
        header::CACHE_CONTROL,
        HeaderValue::from_static(class.header_value(production)),
    )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(config: Arc<Config>, app: Router) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
