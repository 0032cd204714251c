//! Integration tests for the core verification protocol types.
//!
//! These cover the protocol contracts the two processes rely on:
//! correlation links must round-trip the user identifier, the phase
//! machine must stay linear, and reply matching must be exactly as
//! tolerant as documented.

use url::Url;

use bouncer_core::{
    DiscordUserId, SessionPhase, VerificationLink, is_completion_reply,
};

fn user() -> DiscordUserId {
    DiscordUserId::parse("155149108183695360").expect("valid snowflake")
}

// =============================================================================
// Correlation Link Tests
// =============================================================================

#[test]
fn test_direct_link_round_trips_user_id() {
    let link = VerificationLink::Direct {
        game_url: Url::parse("https://game.example.com/verify").expect("valid url"),
    };

    let url = link.encode(&user(), Some("gamer")).expect("encodes");
    let decoded = VerificationLink::decode_user_id(&url).expect("decodes");

    assert_eq!(decoded, user());
}

#[test]
fn test_roblox_link_round_trips_user_id() {
    let link = VerificationLink::RobloxPlace { place_id: 1818 };

    let url = link.encode(&user(), Some("gamer")).expect("encodes");
    let decoded = VerificationLink::decode_user_id(&url).expect("decodes");

    assert_eq!(decoded, user());
}

#[test]
fn test_encodings_are_not_interchangeable() {
    // A direct link has no launchData; a Roblox link has no bare userId.
    let direct = VerificationLink::Direct {
        game_url: Url::parse("https://game.example.com/verify").expect("valid url"),
    };
    let roblox = VerificationLink::RobloxPlace { place_id: 1818 };

    let direct_url = direct.encode(&user(), None).expect("encodes");
    let roblox_url = roblox.encode(&user(), None).expect("encodes");

    assert!(direct_url.as_str().contains("userId="));
    assert!(!direct_url.as_str().contains("launchData="));
    assert!(roblox_url.as_str().contains("launchData="));
    assert!(!roblox_url.as_str().contains("userId="));
}

#[test]
fn test_reissued_link_is_identical() {
    // Re-running the command restarts the session with a fresh but
    // identical token.
    let link = VerificationLink::Direct {
        game_url: Url::parse("https://game.example.com/verify").expect("valid url"),
    };

    let first = link.encode(&user(), Some("gamer")).expect("encodes");
    let second = link.encode(&user(), Some("gamer")).expect("encodes");

    assert_eq!(first, second);
}

// =============================================================================
// Session Phase Machine Tests
// =============================================================================

#[test]
fn test_phase_machine_is_linear() {
    assert!(SessionPhase::Issued.can_advance_to(SessionPhase::Confirmed));
    assert!(SessionPhase::Confirmed.can_advance_to(SessionPhase::Completed));

    assert!(!SessionPhase::Issued.can_advance_to(SessionPhase::Completed));
    assert!(!SessionPhase::Completed.can_advance_to(SessionPhase::Confirmed));
}

#[test]
fn test_phase_wire_form_round_trips() {
    for phase in [
        SessionPhase::Issued,
        SessionPhase::Confirmed,
        SessionPhase::Completed,
    ] {
        assert_eq!(
            phase.as_str().parse::<SessionPhase>().expect("round trip"),
            phase
        );
    }
}

// =============================================================================
// Reply Matching Tests
// =============================================================================

#[test]
fn test_reply_matching_is_case_insensitive_and_whitespace_tolerant() {
    assert!(is_completion_reply("done"));
    assert!(is_completion_reply(" Done "));
    assert!(is_completion_reply("DONE"));
}

#[test]
fn test_reply_matching_rejects_near_misses() {
    assert!(!is_completion_reply("done!"));
    assert!(!is_completion_reply("i'm done"));
    assert!(!is_completion_reply(""));
}

// =============================================================================
// Identifier Tests
// =============================================================================

#[test]
fn test_user_id_accepts_real_snowflakes() {
    assert!(DiscordUserId::parse("155149108183695360").is_ok());
    assert!(DiscordUserId::parse("1").is_ok());
}

#[test]
fn test_user_id_rejects_invalid_input() {
    assert!(DiscordUserId::parse("").is_err());
    assert!(DiscordUserId::parse("0").is_err());
    assert!(DiscordUserId::parse("abc").is_err());
    assert!(DiscordUserId::parse(&"9".repeat(21)).is_err());
}
