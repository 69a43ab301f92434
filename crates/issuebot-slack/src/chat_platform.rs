use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Who can see a reply sent through a response URL.
pub enum ResponseVisibility {
    InChannel,
}

impl ResponseVisibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InChannel => "in_channel",
        }
    }
}

/// Chat-platform operations the bridge calls after acknowledging an event.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Opens a modal view for the interaction identified by `trigger_id`.
    async fn open_view(&self, trigger_id: &str, view: &Value) -> Result<()>;

    /// Replaces the content of an open view in place.
    async fn update_view(&self, view_id: &str, view: &Value) -> Result<()>;

    /// Sends a delayed reply to a slash-command invocation.
    async fn respond(
        &self,
        response_url: &str,
        text: &str,
        visibility: ResponseVisibility,
    ) -> Result<()>;

    /// Posts a message to a channel; passing a user id sends a direct message.
    async fn post_message(&self, channel: &str, text: &str) -> Result<()>;
}
