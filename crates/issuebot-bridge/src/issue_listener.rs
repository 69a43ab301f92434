//! Per-command listener: dispatch, issue submission and reporting.
//!
//! Each handler runs its collaborator calls as a strict sequence. A failed
//! call is logged and ends the sequence; nothing is surfaced to the user.

use std::sync::Arc;

use issuebot_github::{IssueTracker, NewIssue, RepoRef};
use issuebot_slack::{
    ChatPlatform, ResponseVisibility, SlashCommandPayload, ViewSubmissionPayload,
};
use serde_json::{json, Value};

use crate::issue_text::{build_inline_issue, build_modal_issue, render_opened_message, IssueDraft};
use crate::listener_config::ListenerConfig;
use crate::modal_views::{
    render_issue_form_view, render_reported_view, render_submitting_view, INPUT_ACTION_ID,
    INPUT_BODY_BLOCK_ID, INPUT_TITLE_BLOCK_ID,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandPath {
    Modal,
    Inline,
}

/// Exact empty text opens the form; anything else, whitespace included, is inline.
pub fn select_command_path(text: &str) -> CommandPath {
    if text.is_empty() {
        CommandPath::Modal
    } else {
        CommandPath::Inline
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Immediate acknowledgement returned for a command invocation.
pub enum CommandAck {
    Silent,
    InChannel,
}

impl CommandAck {
    /// JSON body for the acknowledgement, `None` for an empty response.
    pub fn response_body(self) -> Option<Value> {
        match self {
            Self::Silent => None,
            Self::InChannel => Some(json!({
                "response_type": ResponseVisibility::InChannel.as_str(),
                "text": "",
            })),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Modal lifecycle; a failed submission never leaves `Submitting`.
pub enum FormStage {
    Closed,
    Open,
    Submitting,
    Reported,
}

impl FormStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::Submitting => "submitting",
            Self::Reported => "reported",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerOutcome {
    FormOpened,
    Reported { issue_url: String },
    Failed { stage: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub command: String,
    pub text: String,
    pub user_id: String,
    pub user_name: String,
    pub channel_id: String,
    pub channel_name: String,
    pub trigger_id: String,
    pub response_url: String,
}

impl From<SlashCommandPayload> for CommandInvocation {
    fn from(payload: SlashCommandPayload) -> Self {
        Self {
            command: payload.command,
            text: payload.text,
            user_id: payload.user_id,
            user_name: payload.user_name,
            channel_id: payload.channel_id,
            channel_name: payload.channel_name,
            trigger_id: payload.trigger_id,
            response_url: payload.response_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub callback_id: String,
    pub view_id: String,
    pub user_id: String,
    pub user_name: String,
    pub title: String,
    pub body: String,
}

impl From<&ViewSubmissionPayload> for FormSubmission {
    fn from(payload: &ViewSubmissionPayload) -> Self {
        let input = |block_id: &str| {
            payload
                .input_value(block_id, INPUT_ACTION_ID)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            callback_id: payload.callback_id().to_string(),
            view_id: payload.view.id.clone(),
            user_id: payload.user.id.clone(),
            user_name: payload.user.display_name().to_string(),
            title: input(INPUT_TITLE_BLOCK_ID),
            body: input(INPUT_BODY_BLOCK_ID),
        }
    }
}

pub struct IssueListener {
    config: ListenerConfig,
    callback_id: String,
    repo: RepoRef,
    tracker: Arc<dyn IssueTracker>,
    platform: Arc<dyn ChatPlatform>,
}

impl IssueListener {
    pub fn new(
        config: ListenerConfig,
        tracker: Arc<dyn IssueTracker>,
        platform: Arc<dyn ChatPlatform>,
    ) -> Self {
        let callback_id = config.view_callback_id();
        let repo = config.repo_ref();
        Self {
            config,
            callback_id,
            repo,
            tracker,
            platform,
        }
    }

    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }

    pub fn command_name(&self) -> &str {
        self.config.normalized_command_name()
    }

    pub fn callback_id(&self) -> &str {
        &self.callback_id
    }

    pub fn acknowledge_command(&self, invocation: &CommandInvocation) -> CommandAck {
        match select_command_path(&invocation.text) {
            CommandPath::Modal => CommandAck::Silent,
            CommandPath::Inline => CommandAck::InChannel,
        }
    }

    /// `response_action: update` body that swaps the form for the submitting notice.
    pub fn acknowledge_submission(&self) -> Value {
        json!({
            "response_action": "update",
            "view": render_submitting_view(&self.config),
        })
    }

    pub async fn handle_command(&self, invocation: CommandInvocation) -> ListenerOutcome {
        match select_command_path(&invocation.text) {
            CommandPath::Modal => self.open_form(&invocation).await,
            CommandPath::Inline => self.submit_inline(&invocation).await,
        }
    }

    async fn open_form(&self, invocation: &CommandInvocation) -> ListenerOutcome {
        let view = render_issue_form_view(&self.config, &self.callback_id);
        if let Err(error) = self.platform.open_view(&invocation.trigger_id, &view).await {
            tracing::error!(
                command = self.command_name(),
                user = %invocation.user_name,
                error = %format!("{error:#}"),
                "failed to open issue form"
            );
            return ListenerOutcome::Failed { stage: "open_form" };
        }
        tracing::debug!(
            command = self.command_name(),
            stage = FormStage::Open.as_str(),
            "issue form opened"
        );
        ListenerOutcome::FormOpened
    }

    async fn submit_inline(&self, invocation: &CommandInvocation) -> ListenerOutcome {
        let draft = build_inline_issue(
            &invocation.text,
            &invocation.user_name,
            &invocation.channel_name,
        );
        let Some(issue_url) = self.create_issue(draft, &invocation.user_name).await else {
            return ListenerOutcome::Failed {
                stage: "create_issue",
            };
        };

        if let Err(error) = self
            .platform
            .respond(
                &invocation.response_url,
                &render_opened_message(&issue_url),
                ResponseVisibility::InChannel,
            )
            .await
        {
            tracing::error!(
                command = self.command_name(),
                issue_url = %issue_url,
                error = %format!("{error:#}"),
                "failed to reply to command"
            );
            return ListenerOutcome::Failed { stage: "reply" };
        }
        ListenerOutcome::Reported { issue_url }
    }

    /// Files the issue for a submitted form; call after returning
    /// [`Self::acknowledge_submission`].
    pub async fn handle_submission(&self, submission: FormSubmission) -> ListenerOutcome {
        tracing::debug!(
            command = self.command_name(),
            stage = FormStage::Submitting.as_str(),
            callback_id = %submission.callback_id,
            view_id = %submission.view_id,
            "issue form submitted"
        );
        let draft = build_modal_issue(&submission.user_name, &submission.title, &submission.body);
        let Some(issue_url) = self.create_issue(draft, &submission.user_name).await else {
            return ListenerOutcome::Failed {
                stage: "create_issue",
            };
        };

        let view = render_reported_view(&self.config, &issue_url);
        if let Err(error) = self
            .platform
            .update_view(&submission.view_id, &view)
            .await
        {
            tracing::error!(
                command = self.command_name(),
                view_id = %submission.view_id,
                error = %format!("{error:#}"),
                "failed to update issue form"
            );
            return ListenerOutcome::Failed {
                stage: "update_form",
            };
        }

        if let Err(error) = self
            .platform
            .post_message(&submission.user_id, &render_opened_message(&issue_url))
            .await
        {
            tracing::error!(
                command = self.command_name(),
                user_id = %submission.user_id,
                error = %format!("{error:#}"),
                "failed to send direct message"
            );
            return ListenerOutcome::Failed {
                stage: "direct_message",
            };
        }

        tracing::debug!(
            command = self.command_name(),
            stage = FormStage::Reported.as_str(),
            issue_url = %issue_url,
            "issue form reported"
        );
        ListenerOutcome::Reported { issue_url }
    }

    async fn create_issue(&self, draft: IssueDraft, user_name: &str) -> Option<String> {
        let request = NewIssue {
            repo: self.repo.clone(),
            title: draft.title,
            body: draft.body,
            labels: self.config.labels.clone(),
        };
        match self.tracker.create_issue(&request).await {
            Ok(created) => {
                tracing::info!(
                    command = self.command_name(),
                    repo = %self.repo,
                    user = %user_name,
                    issue_url = %created.html_url,
                    "issue created"
                );
                Some(created.html_url)
            }
            Err(error) => {
                tracing::error!(
                    command = self.command_name(),
                    repo = %self.repo,
                    user = %user_name,
                    error = %format!("{error:#}"),
                    "failed to create issue"
                );
                None
            }
        }
    }
}
