use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of rounds before a conversation is complete.
    pub max_rounds: u32,
    /// Maximum response time for one turn, in seconds.
    pub turn_timeout_secs: u64,
    /// Attach acting-agent metadata to each recorded action.
    pub send_task_data: bool,
    /// Run the onboarding gate before admitting an agent.
    pub require_onboarding: bool,
    /// Maximum duplicate replies tolerated before rejection.
    pub max_duplicates: usize,
    /// Replies at or below this length count as monotonous.
    pub min_reply_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_rounds: 2,
            turn_timeout_secs: 300,
            send_task_data: false,
            require_onboarding: true,
            max_duplicates: 1,
            min_reply_length: 5,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading config file {}", path.as_ref().display()))?;
        let config = toml::from_str(&raw).context("parsing config file")?;
        Ok(config)
    }

    pub fn turn_timeout(&self) -> Duration {
        Duration::from_secs(self.turn_timeout_secs)
    }
}
