use super::IpReport;
use crate::infrastructure::repositories::IpLookupRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct DiagnosticsService {
    providers: Vec<Arc<dyn IpLookupRepository>>,
}

impl DiagnosticsService {
    /// Providers are tried in order until one answers.
    pub fn new(primary: Arc<dyn IpLookupRepository>, secondary: Arc<dyn IpLookupRepository>) -> Self {
        Self {
            providers: vec![primary, secondary],
        }
    }
}

#[async_trait]
pub trait DiagnosticsServiceApi: Send + Sync {
    /// Public egress IP of this server. Never fails; exhaustion is reported in the body.
    async fn egress_ip(&self) -> IpReport;
}

#[async_trait]
impl DiagnosticsServiceApi for DiagnosticsService {
    async fn egress_ip(&self) -> IpReport {
        for provider in &self.providers {
            match provider.lookup().await {
                Ok(ip) => {
                    tracing::info!(source = provider.name(), ip = %ip, "Egress IP resolved");
                    return IpReport::found(ip, provider.name());
                }
                Err(e) => {
                    tracing::warn!(source = provider.name(), error = %e, "Egress IP provider failed");
                }
            }
        }

        tracing::error!("All egress IP providers failed");
        IpReport::unreachable()
    }
}
