//! HTTP receiver for Slack slash commands and view submissions.
//!
//! Every request is signature-checked, decoded and acknowledged within the
//! request; the listener's follow-up calls run on a spawned task.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use issuebot_slack::{
    parse_slack_request, SlackInboundRequest, SlackRequestVerifier, SlashCommandPayload,
    ViewSubmissionPayload, SLACK_SIGNATURE_HEADER, SLACK_TIMESTAMP_HEADER,
};
use serde_json::json;

use crate::command_router::CommandRouter;
use crate::issue_listener::{CommandInvocation, FormSubmission};

pub const SLACK_EVENTS_PATH: &str = "/slack/events";

pub struct BridgeServerState {
    router: Arc<CommandRouter>,
    verifier: SlackRequestVerifier,
}

impl BridgeServerState {
    pub fn new(router: Arc<CommandRouter>, verifier: SlackRequestVerifier) -> Self {
        Self { router, verifier }
    }

    pub fn command_names(&self) -> Vec<String> {
        self.router.command_names()
    }
}

pub fn build_bridge_router(state: Arc<BridgeServerState>) -> Router {
    Router::new()
        .route(SLACK_EVENTS_PATH, post(handle_slack_request))
        .route("/healthz", get(handle_health))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({"error": {"code": code, "message": message}})),
    )
        .into_response()
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn current_unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

async fn handle_slack_request(
    State(state): State<Arc<BridgeServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(error) = state.verifier.verify(
        header_value(&headers, SLACK_SIGNATURE_HEADER),
        header_value(&headers, SLACK_TIMESTAMP_HEADER),
        &body,
        current_unix_timestamp(),
    ) {
        tracing::warn!(reason = error.as_str(), %error, "rejected slack request");
        return error_response(StatusCode::UNAUTHORIZED, error.as_str(), &error.to_string());
    }

    let content_type = header_value(&headers, header::CONTENT_TYPE.as_str());
    let request = match parse_slack_request(content_type, &body) {
        Ok(request) => request,
        Err(error) => {
            tracing::warn!(%error, "failed to decode slack request");
            return error_response(StatusCode::BAD_REQUEST, "parse_failed", &error.to_string());
        }
    };

    match request {
        SlackInboundRequest::SslCheck => StatusCode::OK.into_response(),
        SlackInboundRequest::UrlVerification { challenge } => {
            (StatusCode::OK, Json(json!({"challenge": challenge}))).into_response()
        }
        SlackInboundRequest::SlashCommand(payload) => dispatch_command(&state.router, payload),
        SlackInboundRequest::ViewSubmission(payload) => {
            dispatch_submission(&state.router, &payload)
        }
        SlackInboundRequest::OtherInteraction { kind } => {
            tracing::debug!(kind = %kind, "ignoring unhandled slack interaction");
            StatusCode::OK.into_response()
        }
    }
}

fn dispatch_command(router: &CommandRouter, payload: SlashCommandPayload) -> Response {
    let Some(listener) = router.listener_for_command(payload.command_name()) else {
        tracing::warn!(command = %payload.command, "no listener registered for command");
        return error_response(
            StatusCode::NOT_FOUND,
            "unknown_command",
            "no listener registered for command",
        );
    };

    let invocation = CommandInvocation::from(payload);
    let ack = listener.acknowledge_command(&invocation);
    // The ack body is fixed before spawning; its flush is not ordered ahead of
    // the task's first outbound call.
    tokio::spawn(async move {
        listener.handle_command(invocation).await;
    });

    match ack.response_body() {
        Some(body) => (StatusCode::OK, Json(body)).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

fn dispatch_submission(router: &CommandRouter, payload: &ViewSubmissionPayload) -> Response {
    let Some(listener) = router.listener_for_callback(payload.callback_id()) else {
        tracing::warn!(
            callback_id = %payload.callback_id(),
            "no listener registered for view callback id"
        );
        return error_response(
            StatusCode::NOT_FOUND,
            "unknown_callback_id",
            "no listener registered for view callback id",
        );
    };

    let submission = FormSubmission::from(payload);
    let ack = listener.acknowledge_submission();
    // Same ordering as commands: ack decided first, flush races the task.
    tokio::spawn(async move {
        listener.handle_submission(submission).await;
    });
    (StatusCode::OK, Json(ack)).into_response()
}
