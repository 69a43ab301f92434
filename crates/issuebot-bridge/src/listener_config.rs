//! Listener configuration file loading.

use std::path::Path;

use anyhow::{Context, Result};
use issuebot_github::RepoRef;
use issuebot_slack::normalize_command_name;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One slash command and the repository its issues land in.
pub struct ListenerConfig {
    pub command_name: String,
    pub owner: String,
    pub repo: String,
    pub labels: Vec<String>,
    pub modal_title: String,
    pub modal_description: String,
    pub modal_submission_message: String,
}

impl ListenerConfig {
    pub fn repo_ref(&self) -> RepoRef {
        RepoRef::new(self.owner.clone(), self.repo.clone())
    }

    /// Command name as Slack reports it, without the leading slash.
    pub fn normalized_command_name(&self) -> &str {
        normalize_command_name(&self.command_name)
    }

    /// Callback id carried by this listener's modal and echoed back on submit.
    pub fn view_callback_id(&self) -> String {
        format!("view_{}", self.normalized_command_name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub listeners: Vec<ListenerConfig>,
}

pub fn parse_bridge_config(raw: &str) -> Result<BridgeConfig> {
    serde_json::from_str::<BridgeConfig>(raw).context("failed to parse bridge config json")
}

pub fn load_bridge_config(path: &Path) -> Result<BridgeConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_bridge_config(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
