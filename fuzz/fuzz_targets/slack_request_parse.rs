#![no_main]

use issuebot_slack::{parse_slack_request, SlackInboundRequest};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for content_type in [None, Some("application/json")] {
        if let Ok(SlackInboundRequest::ViewSubmission(payload)) =
            parse_slack_request(content_type, data)
        {
            let _ = payload.callback_id();
            let _ = payload.user.display_name();
        }
    }
});
