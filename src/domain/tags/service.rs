use super::{gtag, piano, CommandLog, GtagAdapter, PageContext, PianoAdapter, ScriptTag, TagBootstrap};
use crate::infrastructure::config::TagSettings;
use chrono::Utc;

const CXENSE_SCRIPT_ID: &str = "cxense-hochi";
const CXENSE_SCRIPT_SRC: &str = "//csm.cxpublic.com/hochi.js";
const ADSENSE_SCRIPT_ID: &str = "adsbygoogle-js";

pub struct TagService {
    settings: TagSettings,
}

impl TagService {
    pub fn new(settings: TagSettings) -> Self {
        Self { settings }
    }

    /// Scripts and command queues for one page view.
    pub fn bootstrap(&self, page: &PageContext) -> TagBootstrap {
        let mut scripts = Vec::new();
        let mut data_layer = CommandLog::new();
        let mut tp = CommandLog::new();

        match GtagAdapter::from_id(self.settings.ga_id.as_deref()) {
            Some(gtag) => {
                scripts.push(gtag.script());
                gtag.init(&mut data_layer, Utc::now());
                gtag.page_view(&mut data_layer, page);
            }
            None => tracing::debug!("GA measurement id not set, skipping {}", gtag::SCRIPT_ID),
        }

        let piano = PianoAdapter::new(self.settings.piano.clone());
        scripts.push(piano.script());
        piano.init(&mut tp, page.jwt.as_deref());
        piano.page_view(&mut tp, page);

        scripts.push(ScriptTag {
            id: CXENSE_SCRIPT_ID.to_string(),
            src: CXENSE_SCRIPT_SRC.to_string(),
            crossorigin: None,
        });

        if let Some(client) = self.settings.adsense_client.as_deref() {
            scripts.push(ScriptTag {
                id: ADSENSE_SCRIPT_ID.to_string(),
                src: format!(
                    "https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js?client={}",
                    urlencoding::encode(client)
                ),
                crossorigin: Some("anonymous".to_string()),
            });
        }

        tracing::debug!(
            path = %page.path,
            scripts = scripts.len(),
            data_layer = data_layer.len(),
            tp = tp.len(),
            piano_script = piano::SCRIPT_ID,
            "Tag bootstrap built"
        );

        TagBootstrap {
            scripts,
            data_layer,
            tp,
        }
    }
}
