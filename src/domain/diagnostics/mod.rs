pub mod service;

pub use service::{DiagnosticsService, DiagnosticsServiceApi};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response for the egress IP diagnostic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpReport {
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub ts: DateTime<Utc>,
}

impl IpReport {
    pub fn found(ip: String, source: &str) -> Self {
        Self {
            ip: Some(ip),
            source: Some(source.to_string()),
            error: None,
            ts: Utc::now(),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            ip: None,
            source: None,
            error: Some("unreachable".to_string()),
            ts: Utc::now(),
        }
    }
}
