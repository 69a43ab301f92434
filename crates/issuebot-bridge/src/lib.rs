//! Slash-command to issue-tracker bridge.
//!
//! Wires configured listeners into a command router, serves the Slack request
//! endpoint, and turns inline command text or modal submissions into GitHub
//! issues.

pub mod bridge_runtime;
pub mod bridge_server;
pub mod command_router;
pub mod issue_listener;
pub mod issue_text;
pub mod listener_config;
pub mod modal_views;

#[cfg(test)]
mod test_support;

pub use bridge_runtime::{build_bridge_state, run_issue_bridge, BridgeRuntimeConfig};
pub use bridge_server::{build_bridge_router, BridgeServerState, SLACK_EVENTS_PATH};
pub use command_router::CommandRouter;
pub use issue_listener::{
    select_command_path, CommandAck, CommandInvocation, CommandPath, FormStage, FormSubmission,
    IssueListener, ListenerOutcome,
};
pub use issue_text::{build_inline_issue, build_modal_issue, IssueDraft, TITLE_MAX_CHARS};
pub use listener_config::{load_bridge_config, parse_bridge_config, BridgeConfig, ListenerConfig};
