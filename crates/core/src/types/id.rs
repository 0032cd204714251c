//! Discord user identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DiscordUserId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum IdError {
    /// The input string is empty.
    #[error("user id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("user id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a non-digit character.
    #[error("user id must contain only ASCII digits")]
    NonNumeric,
    /// The input is all zeroes.
    #[error("user id cannot be zero")]
    Zero,
}

/// A Discord user identifier (snowflake), kept in its string form.
///
/// The persistence schema keys everything by the textual snowflake, so
/// this type wraps the string rather than the numeric value. Parsing
/// still enforces that the input is a plausible snowflake.
///
/// ## Constraints
///
/// - Length: 1-20 characters (u64 decimal digits)
/// - ASCII digits only
/// - Must not be zero
///
/// ## Examples
///
/// ```
/// use bouncer_core::DiscordUserId;
///
/// assert!(DiscordUserId::parse("155149108183695360").is_ok());
///
/// assert!(DiscordUserId::parse("").is_err());      // empty
/// assert!(DiscordUserId::parse("abc123").is_err()); // non-numeric
/// assert!(DiscordUserId::parse("0").is_err());      // zero
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DiscordUserId(String);

impl DiscordUserId {
    /// Maximum length of a snowflake (decimal digits of a u64).
    pub const MAX_LENGTH: usize = 20;

    /// Parse a `DiscordUserId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 20 characters
    /// - Contains a non-digit character
    /// - Is zero
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(IdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::NonNumeric);
        }

        if s.bytes().all(|b| b == b'0') {
            return Err(IdError::Zero);
        }

        Ok(Self(s.to_owned()))
    }

    /// Build a `DiscordUserId` from an already-resolved numeric snowflake
    /// (e.g. one handed out by the gateway library).
    #[must_use]
    pub fn from_u64(id: u64) -> Self {
        Self(id.to_string())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiscordUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DiscordUserId> for String {
    fn from(id: DiscordUserId) -> Self {
        id.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for DiscordUserId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for DiscordUserId {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(raw))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for DiscordUserId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'_, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
