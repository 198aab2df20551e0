use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// A service that reports this server's public egress IP.
#[async_trait]
pub trait IpLookupRepository: Send + Sync {
    /// Short label reported as `source` in the diagnostic response
    fn name(&self) -> &'static str;

    async fn lookup(&self) -> anyhow::Result<String>;
}

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

/// Provider answering with `{ "ip": "..." }` (ipify)
pub struct JsonIpLookup {
    url: String,
    http_client: reqwest::Client,
    timeout: Duration,
}

impl JsonIpLookup {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self {
            url,
            http_client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl IpLookupRepository for JsonIpLookup {
    fn name(&self) -> &'static str {
        "ipify"
    }

    async fn lookup(&self) -> anyhow::Result<String> {
        let body: IpifyResponse = self
            .http_client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .context("ipify request failed")?
            .error_for_status()?
            .json()
            .await
            .context("ipify returned an unexpected body")?;

        non_empty(body.ip)
    }
}

/// Provider answering with the bare address as text (checkip)
pub struct TextIpLookup {
    url: String,
    http_client: reqwest::Client,
    timeout: Duration,
}

impl TextIpLookup {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self {
            url,
            http_client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl IpLookupRepository for TextIpLookup {
    fn name(&self) -> &'static str {
        "checkip"
    }

    async fn lookup(&self) -> anyhow::Result<String> {
        let text = self
            .http_client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .context("checkip request failed")?
            .error_for_status()?
            .text()
            .await
            .context("checkip body could not be read")?;

        non_empty(text)
    }
}

fn non_empty(ip: String) -> anyhow::Result<String> {
    let ip = ip.trim();
    if ip.is_empty() {
        return Err(anyhow!("provider returned an empty address"));
    }
    Ok(ip.to_string())
}
