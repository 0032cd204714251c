//! Session phase state machine.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a stored phase value is not recognized.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown session phase: {0:?}")]
pub struct PhaseParseError(pub String);

/// Progress of a verification session.
///
/// The machine is linear with no branching and no failure state:
///
/// ```text
/// Issued -> Confirmed -> Completed
/// ```
///
/// - `Issued`: the command handler delivered the correlation link by DM.
/// - `Confirmed`: the webhook kicked the user after the in-game step.
/// - `Completed`: the user replied with the keyword, got the verified
///   role, and the verification record was upserted.
///
/// A session that fails mid-flight simply stays where it is; re-running
/// the command re-enters `Issued`, and resending the keyword re-runs the
/// completion step idempotently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Issued,
    Confirmed,
    Completed,
}

impl SessionPhase {
    /// Wire/storage form of the phase (lowercase).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issued => "issued",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
        }
    }

    /// The next phase in the linear machine, if any.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Issued => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Whether `next` is a legal forward transition from `self`.
    ///
    /// Only the two linear steps are forward transitions. Re-entering
    /// `Issued` (command re-run) and re-running `Completed` (keyword
    /// resent) are modeled as upserts, not transitions.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Issued, Self::Confirmed) | (Self::Confirmed, Self::Completed)
        )
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionPhase {
    type Err = PhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issued" => Ok(Self::Issued),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            other => Err(PhaseParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_transitions_only() {
        assert!(SessionPhase::Issued.can_advance_to(SessionPhase::Confirmed));
        assert!(SessionPhase::Confirmed.can_advance_to(SessionPhase::Completed));

        // No skipping, no going back, no self-loops
        assert!(!SessionPhase::Issued.can_advance_to(SessionPhase::Completed));
        assert!(!SessionPhase::Confirmed.can_advance_to(SessionPhase::Issued));
        assert!(!SessionPhase::Completed.can_advance_to(SessionPhase::Issued));
        assert!(!SessionPhase::Completed.can_advance_to(SessionPhase::Confirmed));
        assert!(!SessionPhase::Issued.can_advance_to(SessionPhase::Issued));
    }

    #[test]
    fn test_successor_chain_terminates() {
        let mut phase = SessionPhase::Issued;
        let mut steps = 0;
        while let Some(next) = phase.successor() {
            phase = next;
            steps += 1;
        }
        assert_eq!(phase, SessionPhase::Completed);
        assert_eq!(steps, 2);
    }

    #[test]
    fn test_wire_round_trip() {
        for phase in [
            SessionPhase::Issued,
            SessionPhase::Confirmed,
            SessionPhase::Completed,
        ] {
            let parsed: SessionPhase = phase.as_str().parse().expect("round trip");
            assert_eq!(parsed, phase);
        }
    }

    #[test]
    fn test_unknown_phase_is_rejected() {
        assert!("pending".parse::<SessionPhase>().is_err());
        assert!("ISSUED".parse::<SessionPhase>().is_err());
        assert!("".parse::<SessionPhase>().is_err());
    }
}
