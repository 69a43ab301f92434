//! Startup wiring: listener config, API clients, router and the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use issuebot_github::GithubApiClient;
use issuebot_slack::{SlackApiClient, SlackRequestVerifier};
use tokio::net::TcpListener;

use crate::bridge_server::{build_bridge_router, BridgeServerState, SLACK_EVENTS_PATH};
use crate::command_router::CommandRouter;
use crate::listener_config::load_bridge_config;

#[derive(Debug, Clone)]
pub struct BridgeRuntimeConfig {
    pub config_path: PathBuf,
    pub bind_addr: String,
    pub github_api_base: String,
    pub github_token: String,
    pub slack_api_base: String,
    pub slack_bot_token: String,
    pub slack_signing_secret: String,
    pub request_timeout_ms: u64,
    pub signature_max_skew_seconds: u64,
}

/// Loads the listener file and wires both API clients into a server state.
pub fn build_bridge_state(config: &BridgeRuntimeConfig) -> Result<Arc<BridgeServerState>> {
    if config.github_token.trim().is_empty() {
        bail!("github token cannot be empty");
    }
    if config.slack_bot_token.trim().is_empty() {
        bail!("slack bot token cannot be empty");
    }
    if config.slack_signing_secret.trim().is_empty() {
        bail!("slack signing secret cannot be empty");
    }

    let bridge_config = load_bridge_config(&config.config_path)?;
    let github = GithubApiClient::new(
        &config.github_api_base,
        &config.github_token,
        config.request_timeout_ms,
    )?;
    let slack = SlackApiClient::new(
        &config.slack_api_base,
        &config.slack_bot_token,
        config.request_timeout_ms,
    )?;
    let router = CommandRouter::from_config(&bridge_config, Arc::new(github), Arc::new(slack))
        .with_context(|| format!("invalid listener config {}", config.config_path.display()))?;
    if router.is_empty() {
        tracing::warn!(
            config = %config.config_path.display(),
            "no listeners configured; every command will be rejected"
        );
    }

    Ok(Arc::new(BridgeServerState::new(
        Arc::new(router),
        SlackRequestVerifier::new(&config.slack_signing_secret, config.signature_max_skew_seconds),
    )))
}

/// Serves the bridge until ctrl-c.
pub async fn run_issue_bridge(config: BridgeRuntimeConfig) -> Result<()> {
    let state = build_bridge_state(&config)?;
    let commands = state.command_names().join(",");

    let listener = TcpListener::bind(config.bind_addr.as_str())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bridge bound address")?;
    tracing::info!(
        addr = %local_addr,
        path = SLACK_EVENTS_PATH,
        commands = %commands,
        "issue bridge listening"
    );

    axum::serve(listener, build_bridge_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("issue bridge server exited unexpectedly")?;
    tracing::info!("issue bridge stopped");
    Ok(())
}
