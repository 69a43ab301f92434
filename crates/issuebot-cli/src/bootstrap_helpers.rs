use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use issuebot_bridge::BridgeRuntimeConfig;

use crate::cli_args::Cli;

pub(crate) fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

pub(crate) fn runtime_config_from_cli(cli: &Cli) -> BridgeRuntimeConfig {
    BridgeRuntimeConfig {
        config_path: cli.config.clone(),
        bind_addr: format!("{}:{}", cli.bind_host.trim(), cli.port),
        github_api_base: cli.github_base_url.clone(),
        github_token: cli.github_token.clone(),
        slack_api_base: cli.slack_api_base.clone(),
        slack_bot_token: cli.slack_bot_token.clone(),
        slack_signing_secret: cli.slack_signing_secret.clone(),
        request_timeout_ms: cli.request_timeout_ms,
        signature_max_skew_seconds: cli.signature_max_skew_seconds,
    }
}
