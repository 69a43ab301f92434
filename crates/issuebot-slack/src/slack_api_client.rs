//! Slack Web API client used for view and message follow-ups.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::chat_platform::{ChatPlatform, ResponseVisibility};

pub const DEFAULT_SLACK_API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Clone, Deserialize)]
struct SlackApiResponse {
    ok: bool,
    error: Option<String>,
}

#[derive(Clone)]
pub struct SlackApiClient {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
}

impl SlackApiClient {
    pub fn new(api_base: &str, bot_token: &str, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("issuebot-slack-bridge"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create slack api client")?;

        Ok(Self {
            http,
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            bot_token: bot_token.trim().to_string(),
        })
    }

    async fn call_method(&self, method: &str, payload: &Value) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/{method}", self.api_base))
            .bearer_auth(&self.bot_token)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("slack api {method} request failed"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "slack api {method} failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 800)
            );
        }
        let parsed = response
            .json::<SlackApiResponse>()
            .await
            .with_context(|| format!("failed to decode slack {method}"))?;
        if !parsed.ok {
            bail!(
                "slack {method} failed: {}",
                parsed.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
        Ok(())
    }
}

#[async_trait]
impl ChatPlatform for SlackApiClient {
    async fn open_view(&self, trigger_id: &str, view: &Value) -> Result<()> {
        let payload = json!({
            "trigger_id": trigger_id,
            "view": view,
        });
        self.call_method("views.open", &payload).await
    }

    async fn update_view(&self, view_id: &str, view: &Value) -> Result<()> {
        let payload = json!({
            "view_id": view_id,
            "view": view,
        });
        self.call_method("views.update", &payload).await
    }

    async fn respond(
        &self,
        response_url: &str,
        text: &str,
        visibility: ResponseVisibility,
    ) -> Result<()> {
        // Response URLs answer with a plain "ok" body rather than the Web API envelope.
        let payload = json!({
            "text": text,
            "response_type": visibility.as_str(),
        });
        let response = self
            .http
            .post(response_url)
            .json(&payload)
            .send()
            .await
            .context("slack response_url request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "slack response_url failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 800)
            );
        }
        Ok(())
    }

    async fn post_message(&self, channel: &str, text: &str) -> Result<()> {
        let payload = json!({
            "channel": channel,
            "text": text,
        });
        self.call_method("chat.postMessage", &payload).await
    }
}

// Same helper as the GitHub client's; the two crates share no dependency.
fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}
