//! Title/body construction for issues filed from Slack.

/// Longest command text kept in an inline issue title before it spills into the body.
pub const TITLE_MAX_CHARS: usize = 40;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    pub title: String,
    pub body: String,
}

/// Builds the issue for inline command text.
///
/// Text longer than [`TITLE_MAX_CHARS`] is split: the title keeps the first
/// characters followed by `...`, and the body continues with `...` and the
/// rest. The body always ends with a separator and the originating channel.
pub fn build_inline_issue(text: &str, user_name: &str, channel_name: &str) -> IssueDraft {
    let mut title = format!("@{user_name}: ");
    let mut body = String::new();
    match text.char_indices().nth(TITLE_MAX_CHARS) {
        None => title.push_str(text),
        Some((split_at, _)) => {
            let (head, tail) = text.split_at(split_at);
            title.push_str(head);
            title.push_str(ELLIPSIS);
            body.push_str(ELLIPSIS);
            body.push_str(tail);
        }
    }
    body.push_str(&format!("\n---\nPosted from #{channel_name}"));
    IssueDraft { title, body }
}

/// Builds the issue for a modal submission; neither field is truncated.
pub fn build_modal_issue(user_name: &str, title: &str, body: &str) -> IssueDraft {
    IssueDraft {
        title: format!("@{user_name}: {title}"),
        body: body.to_string(),
    }
}

pub fn render_opened_message(issue_url: &str) -> String {
    format!("Opened {issue_url}")
}
