use super::{CommandLog, PageContext, ScriptTag, TagCommand};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;

pub const SCRIPT_ID: &str = "ga4-lib";

/// Google Analytics 4 (`gtag`) writer. Page views are sent manually.
pub struct GtagAdapter {
    measurement_id: String,
}

impl GtagAdapter {
    /// `None` when no measurement id is configured, which disables GA entirely.
    pub fn from_id(measurement_id: Option<&str>) -> Option<Self> {
        measurement_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Self {
                measurement_id: id.to_string(),
            })
    }

    pub fn script(&self) -> ScriptTag {
        ScriptTag {
            id: SCRIPT_ID.to_string(),
            src: format!(
                "https://www.googletagmanager.com/gtag/js?id={}",
                urlencoding::encode(&self.measurement_id)
            ),
            crossorigin: None,
        }
    }

    pub fn init(&self, log: &mut CommandLog, now: DateTime<Utc>) {
        log.push(TagCommand::new(
            "js",
            [json!(now.to_rfc3339_opts(SecondsFormat::Millis, true))],
        ));
        log.push(TagCommand::new(
            "config",
            [json!(self.measurement_id), json!({ "send_page_view": false })],
        ));
    }

    pub fn page_view(&self, log: &mut CommandLog, page: &PageContext) {
        log.push(TagCommand::new(
            "event",
            [
                json!("page_view"),
                json!({
                    "page_path": page.path,
                    "page_title": page.title,
                    "page_location": page.location,
                    "send_to": self.measurement_id,
                }),
            ],
        ));
    }
}
