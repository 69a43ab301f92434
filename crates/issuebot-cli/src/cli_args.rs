use std::path::PathBuf;

use clap::Parser;
use issuebot_github::DEFAULT_GITHUB_API_BASE;
use issuebot_slack::DEFAULT_SLACK_API_BASE;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "issuebot",
    about = "Files GitHub issues from Slack slash commands",
    version
)]
pub(crate) struct Cli {
    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "GitHub token used to create issues"
    )]
    pub(crate) github_token: String,

    #[arg(
        long,
        env = "GITHUB_BASE_URL",
        default_value = DEFAULT_GITHUB_API_BASE,
        help = "GitHub REST API base URL"
    )]
    pub(crate) github_base_url: String,

    #[arg(
        long,
        env = "SLACK_BOT_TOKEN",
        hide_env_values = true,
        help = "Slack bot token for Web API calls"
    )]
    pub(crate) slack_bot_token: String,

    #[arg(
        long,
        env = "SLACK_SIGNING_SECRET",
        hide_env_values = true,
        help = "Slack signing secret used to verify inbound requests"
    )]
    pub(crate) slack_signing_secret: String,

    #[arg(
        long,
        env = "GITHUB_SLACK_CONFIG",
        help = "Path to the listener configuration JSON file"
    )]
    pub(crate) config: PathBuf,

    #[arg(long, env = "PORT", default_value_t = 3000, help = "HTTP listen port")]
    pub(crate) port: u16,

    #[arg(
        long,
        env = "ISSUEBOT_BIND_HOST",
        default_value = "0.0.0.0",
        help = "HTTP listen host"
    )]
    pub(crate) bind_host: String,

    #[arg(
        long,
        env = "ISSUEBOT_SLACK_API_BASE",
        default_value = DEFAULT_SLACK_API_BASE,
        help = "Slack Web API base URL"
    )]
    pub(crate) slack_api_base: String,

    #[arg(
        long,
        env = "ISSUEBOT_REQUEST_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = parse_positive_u64,
        help = "Timeout for outbound GitHub and Slack requests in milliseconds"
    )]
    pub(crate) request_timeout_ms: u64,

    #[arg(
        long,
        env = "ISSUEBOT_SIGNATURE_MAX_SKEW_SECONDS",
        default_value_t = 300,
        help = "Maximum accepted request timestamp skew in seconds (0 disables the check)"
    )]
    pub(crate) signature_max_skew_seconds: u64,
}
