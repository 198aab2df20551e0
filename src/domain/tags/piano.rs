use super::{CommandLog, PageContext, ScriptTag, TagCommand};
use crate::infrastructure::config::PianoSettings;
use serde_json::json;

pub const SCRIPT_ID: &str = "piano-xbuilder";

/// Piano paywall writer for the `tp` queue.
pub struct PianoAdapter {
    settings: PianoSettings,
}

impl PianoAdapter {
    pub fn new(settings: PianoSettings) -> Self {
        Self { settings }
    }

    pub fn script(&self) -> ScriptTag {
        ScriptTag {
            id: SCRIPT_ID.to_string(),
            src: format!(
                "https://experience-ap.piano.io/xbuilder/experience/load?aid={}",
                urlencoding::encode(&self.settings.aid)
            ),
            crossorigin: None,
        }
    }

    /// Account setup followed by `init`. The external JWT is only sent when present.
    pub fn init(&self, log: &mut CommandLog, jwt: Option<&str>) {
        log.push(TagCommand::new("setAid", [json!(self.settings.aid)]));
        log.push(TagCommand::new("setSandbox", [json!(self.settings.sandbox)]));
        log.push(TagCommand::new("setEndpoint", [json!(self.settings.endpoint)]));
        log.push(TagCommand::new("setPianoIdUrl", [json!(self.settings.piano_id_url)]));
        log.push(TagCommand::new("setEspEndpoint", [json!(self.settings.esp_endpoint)]));

        if let Some(jwt) = jwt.filter(|t| !t.is_empty()) {
            log.push(TagCommand::new("setExternalJWT", [json!(jwt)]));
        }

        log.push(TagCommand::new("setUseTinypassAccounts", [json!(false)]));
        log.push(TagCommand::new("setUsePianoIdUserProvider", [json!(false)]));
        log.push(TagCommand::new("setUsePianoIdLiteUserProvider", [json!(true)]));
        log.push(TagCommand::new("init", []));
    }

    /// Tags the page as `[title or path, path]`.
    pub fn page_view(&self, log: &mut CommandLog, page: &PageContext) {
        let title = page.title.trim();
        let label = if title.is_empty() { page.path.as_str() } else { title };
        log.push(TagCommand::new("setTags", [json!([label, page.path])]));
    }
}
