//! Completion keyword matching.
//!
//! The final protocol step is a free-text DM from the user. Only an
//! exact keyword (after trimming and case folding) counts; everything
//! else is silently dropped by the listener.

/// The literal the user must send to complete verification.
pub const COMPLETION_KEYWORD: &str = "DONE";

/// Whether a DM's content is the completion signal.
///
/// Matching is whitespace-tolerant and ASCII-case-insensitive: the
/// trimmed content must equal [`COMPLETION_KEYWORD`] exactly. Extra
/// words or punctuation do not match.
#[must_use]
pub fn is_completion_reply(content: &str) -> bool {
    content.trim().eq_ignore_ascii_case(COMPLETION_KEYWORD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_matches_case_insensitively() {
        assert!(is_completion_reply("done"));
        assert!(is_completion_reply("DONE"));
        assert!(is_completion_reply("Done"));
        assert!(is_completion_reply("dOnE"));
    }

    #[test]
    fn test_keyword_matches_with_surrounding_whitespace() {
        assert!(is_completion_reply(" Done "));
        assert!(is_completion_reply("\tdone\n"));
        assert!(is_completion_reply("  DONE"));
    }

    #[test]
    fn test_non_keyword_content_does_not_match() {
        assert!(!is_completion_reply("done!"));
        assert!(!is_completion_reply(""));
        assert!(!is_completion_reply("   "));
        assert!(!is_completion_reply("done please"));
        assert!(!is_completion_reply("i am done"));
        assert!(!is_completion_reply("d o n e"));
    }
}
