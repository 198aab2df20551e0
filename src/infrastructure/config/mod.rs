use serde::Deserialize;
use std::env;

const DEFAULT_IMAGE_BASE: &str = "https://hochi.news/";
const DEFAULT_HEADLINE_PREFIX: &str = "【ボートレース】";
const DEFAULT_COPYRIGHT_NOTICE: &str = "(C) The Hochi Shimbun ";
const DEFAULT_DIAG_PRIMARY_URL: &str = "https://api64.ipify.org?format=json";
const DEFAULT_DIAG_SECONDARY_URL: &str = "https://checkip.amazonaws.com/";
const DEFAULT_PIANO_AID: &str = "oYdNX56vpj";
const DEFAULT_PIANO_ENDPOINT: &str = "https://buy-ap.piano.io/api/v3";
const DEFAULT_PIANO_ID_URL: &str = "https://id-ap.piano.io";
const DEFAULT_PIANO_ESP_ENDPOINT: &str = "https://api-esp-ap.piano.io";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Upstream content API
    pub news_list_api: Option<String>,
    pub news_detail_api: Option<String>,
    pub image_base: Option<String>,
    pub headline_prefixes: Vec<String>,
    pub copyright_notice: String,
    pub upstream_cache_enabled: bool,
    // CORS
    pub cors_allowed_origins: Vec<String>,
    pub cors_allow_credentials: bool,
    // Diagnostics
    pub diag_ip_primary_url: String,
    pub diag_ip_secondary_url: String,
    pub diag_ip_timeout_ms: u64,
    // Static files written by the rendering layer
    pub pages_dir: Option<String>,
    pub assets_dir: Option<String>,
    // Third-party tags
    pub tags: TagSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagSettings {
    pub ga_id: Option<String>,
    pub adsense_client: Option<String>,
    pub piano: PianoSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PianoSettings {
    pub aid: String,
    pub sandbox: bool,
    pub endpoint: String,
    pub piano_id_url: String,
    pub esp_endpoint: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .or_else(|_| env::var("NODE_ENV"))
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            news_list_api: non_empty_var("NEWS_LIST_API"),
            news_detail_api: non_empty_var("NEWS_DETAIL_API"),
            image_base: match env::var("NEWS_IMAGE_BASE") {
                Ok(value) if value.trim().is_empty() => None,
                Ok(value) => Some(value.trim().to_string()),
                Err(_) => Some(DEFAULT_IMAGE_BASE.to_string()),
            },
            headline_prefixes: env::var("HEADLINE_PREFIXES")
                .map(|raw| parse_list(&raw))
                .unwrap_or_else(|_| vec![DEFAULT_HEADLINE_PREFIX.to_string()]),
            copyright_notice: env::var("COPYRIGHT_NOTICE")
                .unwrap_or_else(|_| DEFAULT_COPYRIGHT_NOTICE.to_string()),
            upstream_cache_enabled: flag_var("UPSTREAM_CACHE_ENABLED"),
            cors_allowed_origins: non_empty_var("NEWS_CORS_ORIGINS")
                .or_else(|| non_empty_var("SPA_ORIGIN"))
                .map(|raw| parse_list(&raw))
                .unwrap_or_default(),
            cors_allow_credentials: flag_var("CORS_ALLOW_CREDENTIALS"),
            diag_ip_primary_url: env::var("DIAG_IP_PRIMARY_URL")
                .unwrap_or_else(|_| DEFAULT_DIAG_PRIMARY_URL.to_string()),
            diag_ip_secondary_url: env::var("DIAG_IP_SECONDARY_URL")
                .unwrap_or_else(|_| DEFAULT_DIAG_SECONDARY_URL.to_string()),
            diag_ip_timeout_ms: env::var("DIAG_IP_TIMEOUT_MS")
                .unwrap_or_else(|_| "1500".to_string())
                .parse()?,
            pages_dir: non_empty_var("PAGES_DIR"),
            assets_dir: non_empty_var("ASSETS_DIR"),
            tags: TagSettings {
                ga_id: non_empty_var("GA_ID"),
                adsense_client: non_empty_var("ADSENSE_CLIENT"),
                piano: PianoSettings {
                    aid: env::var("PIANO_AID").unwrap_or_else(|_| DEFAULT_PIANO_AID.to_string()),
                    sandbox: flag_var("PIANO_SANDBOX"),
                    endpoint: env::var("PIANO_ENDPOINT")
                        .unwrap_or_else(|_| DEFAULT_PIANO_ENDPOINT.to_string()),
                    piano_id_url: env::var("PIANO_ID_URL")
                        .unwrap_or_else(|_| DEFAULT_PIANO_ID_URL.to_string()),
                    esp_endpoint: env::var("PIANO_ESP_ENDPOINT")
                        .unwrap_or_else(|_| DEFAULT_PIANO_ESP_ENDPOINT.to_string()),
                },
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Rejects combinations a browser would refuse anyway.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.cors_allow_credentials && self.cors_allowed_origins.iter().any(|o| o == "*") {
            return Err(
                "NEWS_CORS_ORIGINS cannot contain '*' while CORS_ALLOW_CREDENTIALS is enabled"
                    .into(),
            );
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Splits a comma and/or whitespace separated list, dropping empty entries.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn flag_var(name: &str) -> bool {
    env::var(name)
        .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true"))
        .unwrap_or(false)
}

#[cfg(test)]
pub(crate) fn sample_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        news_list_api: None,
        news_detail_api: None,
        image_base: Some(DEFAULT_IMAGE_BASE.to_string()),
        headline_prefixes: vec![DEFAULT_HEADLINE_PREFIX.to_string()],
        copyright_notice: DEFAULT_COPYRIGHT_NOTICE.to_string(),
        upstream_cache_enabled: false,
        cors_allowed_origins: vec![],
        cors_allow_credentials: false,
        diag_ip_primary_url: DEFAULT_DIAG_PRIMARY_URL.to_string(),
        diag_ip_secondary_url: DEFAULT_DIAG_SECONDARY_URL.to_string(),
        diag_ip_timeout_ms: 1500,
        pages_dir: None,
        assets_dir: None,
        tags: TagSettings {
            ga_id: None,
            adsense_client: None,
            piano: PianoSettings {
                aid: DEFAULT_PIANO_AID.to_string(),
                sandbox: false,
                endpoint: DEFAULT_PIANO_ENDPOINT.to_string(),
                piano_id_url: DEFAULT_PIANO_ID_URL.to_string(),
                esp_endpoint: DEFAULT_PIANO_ESP_ENDPOINT.to_string(),
            },
        },
    }
}
