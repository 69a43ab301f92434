//! Block Kit views for the issue form and its follow-up states.

use serde_json::{json, Value};

use crate::listener_config::ListenerConfig;

pub const INPUT_TITLE_BLOCK_ID: &str = "input_title";
pub const INPUT_BODY_BLOCK_ID: &str = "input_body";
pub const INPUT_ACTION_ID: &str = "input";
pub const SUBMITTING_NOTICE: &str = "Now submitting... :outbox_tray:";

fn plain_text(text: &str) -> Value {
    json!({"type": "plain_text", "text": text})
}

fn mrkdwn_section(text: &str) -> Value {
    json!({
        "type": "section",
        "text": {"type": "mrkdwn", "text": text},
    })
}

fn status_view(config: &ListenerConfig, blocks: Vec<Value>) -> Value {
    json!({
        "type": "modal",
        "title": plain_text(&config.modal_title),
        "blocks": blocks,
    })
}

pub fn render_issue_form_view(config: &ListenerConfig, callback_id: &str) -> Value {
    json!({
        "type": "modal",
        "callback_id": callback_id,
        "title": plain_text(&config.modal_title),
        "submit": plain_text("Submit"),
        "blocks": [
            mrkdwn_section(&config.modal_description),
            {
                "type": "input",
                "block_id": INPUT_TITLE_BLOCK_ID,
                "element": {
                    "action_id": INPUT_ACTION_ID,
                    "type": "plain_text_input",
                },
                "label": {"type": "plain_text", "text": "Title", "emoji": true},
            },
            {
                "type": "input",
                "block_id": INPUT_BODY_BLOCK_ID,
                "element": {
                    "action_id": INPUT_ACTION_ID,
                    "type": "plain_text_input",
                    "multiline": true,
                },
                "label": {"type": "plain_text", "text": "Body", "emoji": true},
                "optional": true,
            },
        ],
    })
}

pub fn render_submitting_view(config: &ListenerConfig) -> Value {
    status_view(config, vec![mrkdwn_section(SUBMITTING_NOTICE)])
}

pub fn render_reported_view(config: &ListenerConfig, issue_url: &str) -> Value {
    status_view(
        config,
        vec![
            mrkdwn_section(&format!("Opened <{issue_url}|{issue_url}>")),
            mrkdwn_section(&config.modal_submission_message),
        ],
    )
}
