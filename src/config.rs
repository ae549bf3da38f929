//! Environment-driven configuration.
//!
//! Exactly one base URL is read at startup; every remote endpoint and every
//! absolute image path is constructed from it.

use std::env;

#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Root of the remote REST API, without a trailing slash.
    pub base_url: String,
}

impl PortalConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            env::var("BASE_URL").map_err(|_| anyhow::anyhow!("BASE_URL must be set"))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            anyhow::bail!("BASE_URL must not be empty");
        }
        Ok(Self { base_url })
    }
}
