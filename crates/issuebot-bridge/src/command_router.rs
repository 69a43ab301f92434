//! Registry mapping slash commands and form callback ids to listeners.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use issuebot_github::IssueTracker;
use issuebot_slack::{normalize_command_name, ChatPlatform};

use crate::issue_listener::IssueListener;
use crate::listener_config::BridgeConfig;

#[derive(Default)]
pub struct CommandRouter {
    by_command: HashMap<String, Arc<IssueListener>>,
    by_callback_id: HashMap<String, Arc<IssueListener>>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one listener per configured command, sharing both collaborators.
    pub fn from_config(
        config: &BridgeConfig,
        tracker: Arc<dyn IssueTracker>,
        platform: Arc<dyn ChatPlatform>,
    ) -> Result<Self> {
        let mut router = Self::new();
        for listener_config in &config.listeners {
            router.register(IssueListener::new(
                listener_config.clone(),
                tracker.clone(),
                platform.clone(),
            ))?;
        }
        Ok(router)
    }

    pub fn register(&mut self, listener: IssueListener) -> Result<()> {
        let command_name = listener.command_name().to_string();
        let callback_id = listener.callback_id().to_string();
        if command_name.is_empty() {
            bail!("listener command name cannot be empty");
        }
        if self.by_command.contains_key(&command_name) {
            bail!("duplicate listener for command '/{command_name}'");
        }
        if self.by_callback_id.contains_key(&callback_id) {
            bail!("duplicate listener for view callback id '{callback_id}'");
        }

        tracing::info!(
            command = %command_name,
            callback_id = %callback_id,
            repo = %listener.config().repo_ref(),
            "registered issue listener"
        );
        let listener = Arc::new(listener);
        self.by_command.insert(command_name, listener.clone());
        self.by_callback_id.insert(callback_id, listener);
        Ok(())
    }

    /// Looks up a listener by command, with or without its leading slash.
    pub fn listener_for_command(&self, command: &str) -> Option<Arc<IssueListener>> {
        self.by_command
            .get(normalize_command_name(command))
            .cloned()
    }

    pub fn listener_for_callback(&self, callback_id: &str) -> Option<Arc<IssueListener>> {
        self.by_callback_id.get(callback_id).cloned()
    }

    pub fn command_names(&self) -> Vec<String> {
        let mut names = self.by_command.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.by_command.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_command.is_empty()
    }
}
