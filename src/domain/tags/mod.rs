//! Third-party tag bootstrap.
//!
//! Analytics and paywall vendors expect a global command queue on the page. Here the
//! queue is an explicit [`CommandLog`] that adapters append to; the page layer replays
//! it verbatim. Nothing in the article pipeline reads it.

pub mod gtag;
pub mod piano;
pub mod service;

pub use gtag::GtagAdapter;
pub use piano::PianoAdapter;
pub use service::TagService;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single queued vendor call, serialized as `[name, ...args]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCommand(Vec<Value>);

impl TagCommand {
    pub fn new(name: &str, args: impl IntoIterator<Item = Value>) -> Self {
        let mut parts = vec![Value::String(name.to_string())];
        parts.extend(args);
        Self(parts)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.first().and_then(Value::as_str)
    }

    pub fn args(&self) -> &[Value] {
        self.0.get(1..).unwrap_or_default()
    }
}

/// Append-only list of commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandLog(Vec<TagCommand>);

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: TagCommand) {
        self.0.push(command);
    }

    pub fn commands(&self) -> &[TagCommand] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Script element the page layer should insert once, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptTag {
    pub id: String,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossorigin: Option<String>,
}

/// The page being viewed.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    pub path: String,
    pub title: String,
    pub location: String,
    pub jwt: Option<String>,
}

/// Response for GET /api/tags/bootstrap
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagBootstrap {
    pub scripts: Vec<ScriptTag>,
    pub data_layer: CommandLog,
    pub tp: CommandLog,
}
