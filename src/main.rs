use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use news_edge::infrastructure::config::{Config, LogFormat};
use news_edge::infrastructure::http::{build_router, start_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting news-edge on {}:{} ({:?})",
        config.host,
        config.port,
        config.environment
    );

    if config.news_list_api.is_none() || config.news_detail_api.is_none() {
        tracing::warn!(
            has_list_api = config.news_list_api.is_some(),
            has_detail_api = config.news_detail_api.is_some(),
            "News upstream not fully configured; article routes will answer 500"
        );
    }
    tracing::info!(
        origins = ?config.cors_allowed_origins,
        credentials = config.cors_allow_credentials,
        "CORS allow-list loaded"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let article_repo = Arc::new(news_edge::infrastructure::repositories::HttpArticleRepository::new(
        config.news_list_api.clone(),
        config.news_detail_api.clone(),
    ));
    let diag_timeout = Duration::from_millis(config.diag_ip_timeout_ms);
    let primary_ip_lookup = Arc::new(news_edge::infrastructure::repositories::JsonIpLookup::new(
        config.diag_ip_primary_url.clone(),
        diag_timeout,
    ));
    let secondary_ip_lookup = Arc::new(news_edge::infrastructure::repositories::TextIpLookup::new(
        config.diag_ip_secondary_url.clone(),
        diag_timeout,
    ));

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let projection_settings = news_edge::domain::article::ProjectionSettings::from_config(&config)?;
    let article_service = Arc::new(news_edge::domain::article::ArticleService::new(
        article_repo,
        projection_settings,
        config.upstream_cache_enabled,
    ));
    let diagnostics_service = Arc::new(news_edge::domain::diagnostics::DiagnosticsService::new(
        primary_ip_lookup,
        secondary_ip_lookup,
    ));
    let tag_service = Arc::new(news_edge::domain::tags::TagService::new(config.tags.clone()));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let article_controller = Arc::new(news_edge::controllers::articles::ArticleController::new(
        article_service,
        config.is_production(),
    ));
    let diag_controller = Arc::new(news_edge::controllers::diag::DiagController::new(diagnostics_service));
    let tags_controller = Arc::new(news_edge::controllers::tags::TagsController::new(tag_service));

    // Start HTTP server with all routes
    let app = build_router(config.clone(), article_controller, diag_controller, tags_controller);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "news_edge=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "news_edge=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
