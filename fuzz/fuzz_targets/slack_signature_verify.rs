#![no_main]

use issuebot_slack::{compute_slack_v0_signature, SlackRequestVerifier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let verifier = SlackRequestVerifier::new("fuzz-secret", 0);
    let split = data.len() / 2;
    let signature = String::from_utf8_lossy(&data[..split]);
    let _ = verifier.verify(
        Some(&signature),
        Some("1700000000"),
        &data[split..],
        1_700_000_000,
    );

    let signed = compute_slack_v0_signature("fuzz-secret", "1700000000", data)
        .expect("hmac accepts any key length");
    assert!(verifier
        .verify(Some(&signed), Some("1700000000"), data, 1_700_000_000)
        .is_ok());
});
