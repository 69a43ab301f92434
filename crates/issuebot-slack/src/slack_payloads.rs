//! Decoding of inbound Slack request bodies.
//!
//! Slash commands arrive as `application/x-www-form-urlencoded` fields;
//! interactions (view submissions among them) arrive as a single `payload`
//! form field holding JSON. URL verification handshakes arrive as raw JSON.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Reasons a Slack request body cannot be decoded.
pub enum SlackPayloadError {
    #[error("missing form field '{0}'")]
    MissingField(&'static str),
    #[error("invalid slack payload json: {0}")]
    InvalidJson(String),
    #[error("unsupported slack request body")]
    Unsupported,
}

/// Strips surrounding whitespace and the leading slash from a command name.
pub fn normalize_command_name(raw: &str) -> &str {
    raw.trim().trim_start_matches('/')
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fields of a slash-command invocation.
pub struct SlashCommandPayload {
    pub command: String,
    pub text: String,
    pub user_id: String,
    pub user_name: String,
    pub channel_id: String,
    pub channel_name: String,
    pub trigger_id: String,
    pub response_url: String,
}

impl SlashCommandPayload {
    /// Command name without its leading slash.
    pub fn command_name(&self) -> &str {
        normalize_command_name(&self.command)
    }

    fn from_form(fields: &HashMap<String, String>) -> Result<Self, SlackPayloadError> {
        let required = |name: &'static str| {
            fields
                .get(name)
                .cloned()
                .ok_or(SlackPayloadError::MissingField(name))
        };
        let optional = |name: &str| fields.get(name).cloned().unwrap_or_default();
        Ok(Self {
            command: required("command")?,
            text: optional("text"),
            user_id: required("user_id")?,
            user_name: optional("user_name"),
            channel_id: optional("channel_id"),
            channel_name: optional("channel_name"),
            trigger_id: optional("trigger_id"),
            response_url: optional("response_url"),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct InteractionEnvelope {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InteractionUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl InteractionUser {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(self.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewStateValue {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub values: BTreeMap<String, BTreeMap<String, ViewStateValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmittedView {
    pub id: String,
    #[serde(default)]
    pub callback_id: String,
    #[serde(default)]
    pub state: ViewState,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A `view_submission` interaction.
pub struct ViewSubmissionPayload {
    pub user: InteractionUser,
    pub view: SubmittedView,
}

impl ViewSubmissionPayload {
    pub fn callback_id(&self) -> &str {
        self.view.callback_id.as_str()
    }

    /// Value entered in the input identified by `block_id`/`action_id`.
    pub fn input_value(&self, block_id: &str, action_id: &str) -> Option<&str> {
        self.view
            .state
            .values
            .get(block_id)?
            .get(action_id)?
            .value
            .as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlackInboundRequest {
    SslCheck,
    UrlVerification { challenge: String },
    SlashCommand(SlashCommandPayload),
    ViewSubmission(ViewSubmissionPayload),
    OtherInteraction { kind: String },
}

/// Classifies and decodes a raw Slack request body.
pub fn parse_slack_request(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<SlackInboundRequest, SlackPayloadError> {
    let is_json = content_type
        .map(|value| value.trim().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false);
    if is_json {
        return parse_json_request(body);
    }

    let fields = url::form_urlencoded::parse(body)
        .into_owned()
        .collect::<HashMap<String, String>>();
    if fields.get("ssl_check").map(String::as_str) == Some("1") {
        return Ok(SlackInboundRequest::SslCheck);
    }
    if let Some(payload) = fields.get("payload") {
        return parse_interaction(payload);
    }
    if fields.contains_key("command") {
        return SlashCommandPayload::from_form(&fields).map(SlackInboundRequest::SlashCommand);
    }
    Err(SlackPayloadError::Unsupported)
}

fn parse_json_request(body: &[u8]) -> Result<SlackInboundRequest, SlackPayloadError> {
    let value = serde_json::from_slice::<Value>(body)
        .map_err(|error| SlackPayloadError::InvalidJson(error.to_string()))?;
    if value.get("type").and_then(Value::as_str) == Some("url_verification") {
        let challenge = value
            .get("challenge")
            .and_then(Value::as_str)
            .ok_or(SlackPayloadError::MissingField("challenge"))?;
        return Ok(SlackInboundRequest::UrlVerification {
            challenge: challenge.to_string(),
        });
    }
    Err(SlackPayloadError::Unsupported)
}

fn parse_interaction(raw: &str) -> Result<SlackInboundRequest, SlackPayloadError> {
    let envelope = serde_json::from_str::<InteractionEnvelope>(raw)
        .map_err(|error| SlackPayloadError::InvalidJson(error.to_string()))?;
    if envelope.kind != "view_submission" {
        return Ok(SlackInboundRequest::OtherInteraction {
            kind: envelope.kind,
        });
    }
    serde_json::from_str::<ViewSubmissionPayload>(raw)
        .map(SlackInboundRequest::ViewSubmission)
        .map_err(|error| SlackPayloadError::InvalidJson(error.to_string()))
}
