//! Correlation link encoding.
//!
//! The link handed to the user carries their Discord identifier into the
//! game so the game server can report back which user to act on. Two
//! encodings exist, selected by deployment configuration:
//!
//! - **Direct**: the identifier is appended to a generic game URL as a
//!   `userId` query parameter.
//! - **Roblox place**: identifier (and optionally username) are packed
//!   into a JSON payload and percent-encoded into the `launchData`
//!   parameter of a Roblox start URL.
//!
//! The two encodings are not interchangeable; the game must agree on the
//! deployed format ahead of time. The token is a bare carrier of intent -
//! no signature, no expiry.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{DiscordUserId, IdError};

/// Query parameter carrying the raw identifier in the direct encoding.
pub const USER_ID_PARAM: &str = "userId";

/// Query parameter carrying the JSON payload in the Roblox encoding.
pub const LAUNCH_DATA_PARAM: &str = "launchData";

/// Roblox web-join entry point. `placeId` and `launchData` are appended
/// as query parameters.
const ROBLOX_START_URL: &str = "https://www.roblox.com/games/start";

/// Errors that can occur while encoding or decoding a correlation link.
#[derive(thiserror::Error, Debug)]
pub enum LinkError {
    /// URL construction or parsing failed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The launch-data payload could not be (de)serialized.
    #[error("invalid launch data: {0}")]
    LaunchData(#[from] serde_json::Error),

    /// The identifier carried by the link is not a valid snowflake.
    #[error("invalid user id in link: {0}")]
    UserId(#[from] IdError),

    /// The link carries no recognizable user identifier.
    #[error("no user identifier in link")]
    MissingUserId,
}

/// Structured payload carried by the Roblox `launchData` parameter.
///
/// Field names follow the wire contract the game reads back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchData {
    /// Discord user identifier to echo back in the webhook call.
    pub user_id: DiscordUserId,
    /// Discord username at issue time, for display inside the game.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Deployment-selected correlation link encoding.
#[derive(Debug, Clone)]
pub enum VerificationLink {
    /// Generic game URL; the identifier rides as a raw query parameter.
    Direct {
        /// Base URL of the game, without the `userId` parameter.
        game_url: Url,
    },
    /// Roblox experience; identifier and username ride in `launchData`.
    RobloxPlace {
        /// Numeric Roblox place identifier.
        place_id: u64,
    },
}

impl VerificationLink {
    /// Encode the outbound link for one user.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] if URL construction or payload
    /// serialization fails.
    pub fn encode(
        &self,
        user_id: &DiscordUserId,
        username: Option<&str>,
    ) -> Result<Url, LinkError> {
        match self {
            Self::Direct { game_url } => {
                let mut url = game_url.clone();
                url.query_pairs_mut()
                    .append_pair(USER_ID_PARAM, user_id.as_str());
                Ok(url)
            }
            Self::RobloxPlace { place_id } => {
                let data = LaunchData {
                    user_id: user_id.clone(),
                    username: username.map(str::to_owned),
                };
                let payload = serde_json::to_string(&data)?;

                let mut url = Url::parse(ROBLOX_START_URL)?;
                url.query_pairs_mut()
                    .append_pair("placeId", &place_id.to_string())
                    .append_pair(LAUNCH_DATA_PARAM, &payload);
                Ok(url)
            }
        }
    }

    /// Extract the user identifier from a link in either encoding.
    ///
    /// This is the round-trip contract the game side relies on: whatever
    /// [`encode`](Self::encode) produced must decode back to the same
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::MissingUserId`] if neither parameter is
    /// present, or a parse error if the carried identifier is invalid.
    pub fn decode_user_id(url: &Url) -> Result<DiscordUserId, LinkError> {
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                USER_ID_PARAM => return Ok(DiscordUserId::parse(&value)?),
                LAUNCH_DATA_PARAM => {
                    let data: LaunchData = serde_json::from_str(&value)?;
                    return Ok(data.user_id);
                }
                _ => {}
            }
        }
        Err(LinkError::MissingUserId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> DiscordUserId {
        DiscordUserId::parse("155149108183695360").expect("valid snowflake")
    }

    #[test]
    fn test_direct_encoding_appends_user_id() {
        let link = VerificationLink::Direct {
            game_url: Url::parse("https://game.example.com/verify").expect("valid url"),
        };

        let url = link.encode(&user(), None).expect("encodes");
        assert!(
            url.as_str()
                .starts_with("https://game.example.com/verify?userId=")
        );
        assert_eq!(VerificationLink::decode_user_id(&url).expect("decodes"), user());
    }

    #[test]
    fn test_direct_encoding_preserves_existing_query() {
        let link = VerificationLink::Direct {
            game_url: Url::parse("https://game.example.com/play?mode=verify").expect("valid url"),
        };

        let url = link.encode(&user(), None).expect("encodes");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(VerificationLink::decode_user_id(&url).expect("decodes"), user());
    }

    #[test]
    fn test_roblox_encoding_round_trips_with_username() {
        let link = VerificationLink::RobloxPlace { place_id: 1_818 };

        let url = link.encode(&user(), Some("gamer")).expect("encodes");
        assert_eq!(url.host_str(), Some("www.roblox.com"));

        // The payload is a single percent-encoded query parameter
        let launch_data = url
            .query_pairs()
            .find(|(k, _)| k == LAUNCH_DATA_PARAM)
            .map(|(_, v)| v.into_owned())
            .expect("launchData present");
        let data: LaunchData = serde_json::from_str(&launch_data).expect("valid payload");
        assert_eq!(data.user_id, user());
        assert_eq!(data.username.as_deref(), Some("gamer"));

        assert_eq!(VerificationLink::decode_user_id(&url).expect("decodes"), user());
    }

    #[test]
    fn test_roblox_encoding_omits_absent_username() {
        let link = VerificationLink::RobloxPlace { place_id: 1_818 };

        let url = link.encode(&user(), None).expect("encodes");
        let launch_data = url
            .query_pairs()
            .find(|(k, _)| k == LAUNCH_DATA_PARAM)
            .map(|(_, v)| v.into_owned())
            .expect("launchData present");
        assert!(!launch_data.contains("username"));
    }

    #[test]
    fn test_decode_rejects_link_without_identifier() {
        let url = Url::parse("https://game.example.com/verify?mode=1").expect("valid url");
        assert!(matches!(
            VerificationLink::decode_user_id(&url),
            Err(LinkError::MissingUserId)
        ));
    }

    #[test]
    fn test_decode_rejects_tampered_identifier() {
        let url =
            Url::parse("https://game.example.com/verify?userId=not-a-snowflake").expect("valid");
        assert!(matches!(
            VerificationLink::decode_user_id(&url),
            Err(LinkError::UserId(_))
        ));
    }

    #[test]
    fn test_identical_input_produces_identical_token() {
        // Re-running the command must restart the session with the same
        // token, so encoding is deterministic.
        let link = VerificationLink::RobloxPlace { place_id: 99 };
        let first = link.encode(&user(), Some("gamer")).expect("encodes");
        let second = link.encode(&user(), Some("gamer")).expect("encodes");
        assert_eq!(first, second);
    }
}
