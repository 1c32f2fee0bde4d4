//! Settings file
//!
//! Optional TOML with a `[tracker]` and a `[client]` table; missing keys keep
//! their defaults. Command-line flags are applied on top.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use waymark_net::ClientConfig;
use waymark_tracker::TrackerConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tracker: TrackerConfig,
    pub client: ClientConfig,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let settings = Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_server(mut self, server: Option<&str>) -> Self {
        if let Some(url) = server {
            self.client.base_url = url.to_string();
        }
        self
    }
}
