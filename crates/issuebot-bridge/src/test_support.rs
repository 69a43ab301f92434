//! Recording collaborators shared by bridge tests.

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use issuebot_github::{CreatedIssue, IssueTracker, NewIssue};
use issuebot_slack::{ChatPlatform, ResponseVisibility};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::issue_listener::IssueListener;
use crate::listener_config::ListenerConfig;

pub(crate) fn sample_listener_config() -> ListenerConfig {
    ListenerConfig {
        command_name: "issue".to_string(),
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        labels: vec!["from-slack".to_string(), "triage".to_string()],
        modal_title: "File an issue".to_string(),
        modal_description: "Describe the problem.".to_string(),
        modal_submission_message: "Thanks, we will take a look.".to_string(),
    }
}

#[derive(Default)]
pub(crate) struct RecordingTracker {
    pub(crate) requests: Mutex<Vec<NewIssue>>,
    pub(crate) fail: bool,
}

impl RecordingTracker {
    pub(crate) fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) async fn requests(&self) -> Vec<NewIssue> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl IssueTracker for RecordingTracker {
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        let mut requests = self.requests.lock().await;
        requests.push(issue.clone());
        if self.fail {
            bail!("github api create issue failed with status 502: bad gateway");
        }
        let number = requests.len() as u64;
        Ok(CreatedIssue {
            number,
            html_url: format!(
                "https://github.com/{}/{}/issues/{number}",
                issue.repo.owner, issue.repo.name
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformCall {
    OpenView {
        trigger_id: String,
        view: Value,
    },
    UpdateView {
        view_id: String,
        view: Value,
    },
    Respond {
        response_url: String,
        text: String,
        visibility: ResponseVisibility,
    },
    PostMessage {
        channel: String,
        text: String,
    },
}

#[derive(Default)]
pub(crate) struct RecordingPlatform {
    pub(crate) calls: Mutex<Vec<PlatformCall>>,
    pub(crate) fail_update_view: bool,
}

impl RecordingPlatform {
    pub(crate) async fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn open_view(&self, trigger_id: &str, view: &Value) -> Result<()> {
        self.calls.lock().await.push(PlatformCall::OpenView {
            trigger_id: trigger_id.to_string(),
            view: view.clone(),
        });
        Ok(())
    }

    async fn update_view(&self, view_id: &str, view: &Value) -> Result<()> {
        self.calls.lock().await.push(PlatformCall::UpdateView {
            view_id: view_id.to_string(),
            view: view.clone(),
        });
        if self.fail_update_view {
            bail!("slack views.update failed: not_found");
        }
        Ok(())
    }

    async fn respond(
        &self,
        response_url: &str,
        text: &str,
        visibility: ResponseVisibility,
    ) -> Result<()> {
        self.calls.lock().await.push(PlatformCall::Respond {
            response_url: response_url.to_string(),
            text: text.to_string(),
            visibility,
        });
        Ok(())
    }

    async fn post_message(&self, channel: &str, text: &str) -> Result<()> {
        self.calls.lock().await.push(PlatformCall::PostMessage {
            channel: channel.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}

pub(crate) fn listener_with(
    tracker: Arc<RecordingTracker>,
    platform: Arc<RecordingPlatform>,
) -> IssueListener {
    IssueListener::new(sample_listener_config(), tracker, platform)
}
