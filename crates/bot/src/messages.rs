//! User-facing message texts for the verification flow.
//!
//! Kept in one place so the command handler and the reply listener stay
//! consistent about what the user is told at each step.

use url::Url;

use bouncer_core::COMPLETION_KEYWORD;

/// DM sent with the correlation link when the command runs.
#[must_use]
pub fn verification_instructions(link: &Url) -> String {
    format!(
        "Hello! To verify your account, please complete the task at the following link:\n\n\
         {link}\n\n\
         After you are kicked from the game, come back to this DM and reply with the word \
         `{COMPLETION_KEYWORD}`."
    )
}

/// Ephemeral acknowledgment after the DM went out.
pub const DM_SENT_ACK: &str =
    "I have sent you a DM with your personal verification link. Please check your messages!";

/// Ephemeral remediation when the user's DMs are closed.
pub const DM_BLOCKED_REMEDIATION: &str = "I could not send you a DM. Please enable \"Allow \
    direct messages from server members\" in your User Settings > Privacy & Safety, then try \
    again.";

/// DM sent when the verified role has been granted.
pub const VERIFICATION_SUCCESS: &str =
    "✅ **Verification Successful!** You now have access to the server. Welcome!";

/// DM sent when the keyword arrives but the user has not rejoined yet.
pub const REJOIN_GUIDANCE: &str = "I could not find you in the server. Please make sure you \
    have rejoined the server, then send `DONE` again.";

/// DM sent when the completion step fails unexpectedly.
pub const GENERIC_ERROR: &str =
    "An unexpected error occurred. Please contact an administrator for help.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_embed_the_link_and_keyword() {
        let link = Url::parse("https://game.example.com/verify?userId=42").expect("valid url");
        let text = verification_instructions(&link);

        assert!(text.contains(link.as_str()));
        assert!(text.contains(COMPLETION_KEYWORD));
    }

    #[test]
    fn test_rejoin_guidance_repeats_the_keyword() {
        assert!(REJOIN_GUIDANCE.contains(COMPLETION_KEYWORD));
    }
}
