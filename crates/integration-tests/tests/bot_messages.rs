//! Integration tests for the bot's user-facing messages.
//!
//! These verify the texts carry what the protocol depends on: the
//! correlation link, the completion keyword, and remediation guidance.

use url::Url;

use bouncer_bot::messages;
use bouncer_core::{COMPLETION_KEYWORD, DiscordUserId, VerificationLink};

#[test]
fn test_instructions_contain_the_encoded_link() {
    let link = VerificationLink::Direct {
        game_url: Url::parse("https://game.example.com/verify").expect("valid url"),
    };
    let user = DiscordUserId::parse("155149108183695360").expect("valid snowflake");
    let url = link.encode(&user, None).expect("encodes");

    let text = messages::verification_instructions(&url);

    assert!(text.contains(url.as_str()));
    assert!(text.contains(user.as_str()));
}

#[test]
fn test_instructions_tell_the_user_what_to_reply() {
    let url = Url::parse("https://game.example.com/verify?userId=42").expect("valid url");
    let text = messages::verification_instructions(&url);

    assert!(text.contains(COMPLETION_KEYWORD));
}

#[test]
fn test_remediation_points_at_privacy_settings() {
    assert!(messages::DM_BLOCKED_REMEDIATION.contains("Privacy & Safety"));
}

#[test]
fn test_rejoin_guidance_repeats_the_keyword() {
    assert!(messages::REJOIN_GUIDANCE.contains(COMPLETION_KEYWORD));
}

#[test]
fn test_outcome_messages_are_distinct() {
    let outcomes = [
        messages::VERIFICATION_SUCCESS,
        messages::REJOIN_GUIDANCE,
        messages::GENERIC_ERROR,
        messages::DM_SENT_ACK,
        messages::DM_BLOCKED_REMEDIATION,
    ];

    for (i, a) in outcomes.iter().enumerate() {
        for b in outcomes.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}
