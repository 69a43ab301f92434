//! Slack boundary for the issue bridge.
//!
//! Covers inbound request decoding (slash commands and view submissions),
//! v0 request-signature verification, and the Web API operations the bridge
//! calls back into: opening and updating views, replying through response
//! URLs, and posting messages.

pub mod chat_platform;
pub mod slack_api_client;
pub mod slack_payloads;
pub mod slack_signature;

pub use chat_platform::{ChatPlatform, ResponseVisibility};
pub use slack_api_client::{SlackApiClient, DEFAULT_SLACK_API_BASE};
pub use slack_payloads::{
    normalize_command_name, parse_slack_request, SlackInboundRequest, SlackPayloadError,
    SlashCommandPayload, ViewSubmissionPayload,
};
pub use slack_signature::{
    compute_slack_v0_signature, SlackRequestVerifier, SlackSignatureError,
    SLACK_SIGNATURE_HEADER, SLACK_TIMESTAMP_HEADER,
};
