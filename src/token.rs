//! Token data model and signed-message framing
//!
//! The signed message is the delimiter-joined triple
//! `data:expiration:salt`, where `expiration` is in Unix epoch seconds and
//! `salt` is base64. Issued credentials carry it in two encodings:
//!
//! ```text
//! access_token   := base64( signed_message ":" mac )
//! basic_login    := base64( signed_message )
//! basic_password := mac
//! ```

use crate::constants::{schemes, DELIMITER};
use crate::error::Error;
use crate::utils::{encode_base64, epoch_secs, from_epoch_secs};
use std::time::SystemTime;

/// Seed data embedded into a token
///
/// A sequence is joined with the field delimiter before signing and comes
/// back from extraction as [`TokenData::Multiple`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedData {
    /// A single string, signed as-is
    Single(String),
    /// An ordered sequence of fields
    Sequence(Vec<String>),
}

impl SeedData {
    /// Flatten into the data segment of the signed message
    ///
    /// Sequence elements must not contain the delimiter, otherwise the field
    /// boundaries could not be recovered on extraction. A single string is
    /// taken verbatim.
    pub fn flatten(self) -> Result<String, Error> {
        match self {
            SeedData::Single(data) => Ok(data),
            SeedData::Sequence(fields) => {
                if let Some(field) = fields.iter().find(|f| f.contains(DELIMITER)) {
                    return Err(Error::InvalidSeedData(format!(
                        "sequence element '{field}' contains the '{DELIMITER}' delimiter"
                    )));
                }
                let separator = DELIMITER.to_string();
                Ok(fields.join(separator.as_str()))
            }
        }
    }
}

impl From<&str> for SeedData {
    fn from(data: &str) -> Self {
        SeedData::Single(data.to_string())
    }
}

impl From<String> for SeedData {
    fn from(data: String) -> Self {
        SeedData::Single(data)
    }
}

impl From<&String> for SeedData {
    fn from(data: &String) -> Self {
        SeedData::Single(data.clone())
    }
}

impl From<Vec<String>> for SeedData {
    fn from(fields: Vec<String>) -> Self {
        SeedData::Sequence(fields)
    }
}

impl From<Vec<&str>> for SeedData {
    fn from(fields: Vec<&str>) -> Self {
        SeedData::Sequence(fields.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for SeedData {
    fn from(fields: &[&str]) -> Self {
        SeedData::Sequence(fields.iter().map(|f| f.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SeedData {
    fn from(fields: [&str; N]) -> Self {
        SeedData::Sequence(fields.iter().map(|f| f.to_string()).collect())
    }
}

/// Data recovered from a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenData {
    /// Exactly one data field remained after removing expiration and salt
    Single(String),
    /// Zero or several data fields remained, in order
    Multiple(Vec<String>),
}

impl TokenData {
    /// The data as a single string, if it is one
    pub fn as_single(&self) -> Option<&str> {
        match self {
            TokenData::Single(s) => Some(s.as_str()),
            TokenData::Multiple(_) => None,
        }
    }

    /// The data as a field sequence, if it is one
    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            TokenData::Single(_) => None,
            TokenData::Multiple(fields) => Some(fields.as_slice()),
        }
    }

    /// All data fields in order
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TokenData::Single(s) => vec![s],
            TokenData::Multiple(fields) => fields,
        }
    }
}

/// A freshly issued credential
///
/// The same signed message is offered both as an opaque bearer token and as
/// a basic-auth style login/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Expiration time (seconds since Unix epoch)
    pub expiration: u64,
    /// Opaque bearer token
    pub access_token: String,
    /// Base64 signed message, usable as a login
    pub basic_login: String,
    /// Base64 MAC, usable as a password
    pub basic_password: String,
}

impl Credential {
    /// Expiration as a point in time
    pub fn expires_at(&self) -> Option<SystemTime> {
        from_epoch_secs(self.expiration)
    }

    /// Render the access token as an HTTP `Authorization` header value
    ///
    /// # Example
    ///
    /// ```
    /// use bearer_token::TokenGenerator;
    ///
    /// let generator = TokenGenerator::from_parts("secret", Some(60), None).unwrap();
    /// let credential = generator.create("user42").unwrap();
    /// assert_eq!(
    ///     credential.authorization_header(),
    ///     format!("Bearer {}", credential.access_token)
    /// );
    /// ```
    pub fn authorization_header(&self) -> String {
        format!("{} {}", schemes::BEARER, self.access_token)
    }

    /// Render the login/password pair as an HTTP basic `Authorization` header value
    pub fn basic_authorization_header(&self) -> Result<String, Error> {
        let pair = format!("{}:{}", self.basic_login, self.basic_password);
        Ok(format!("{} {}", schemes::BASIC, encode_base64(pair.as_bytes())?))
    }
}

/// Result of extracting a token
///
/// `data` and `expiration` are filled in on a best-effort basis even when the
/// token is not valid. Why a token is invalid is deliberately not reported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// Whether the token is well-formed, unexpired and authentic
    pub is_valid: bool,
    /// Embedded expiration time
    pub expiration: Option<SystemTime>,
    /// Embedded seed data
    pub data: Option<TokenData>,
}

impl Extraction {
    /// An invalid result with no recovered fields
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Embedded expiration in seconds since Unix epoch
    pub fn expiration_secs(&self) -> Option<u64> {
        self.expiration.map(epoch_secs)
    }
}

/// Build the signed message for the given data segment, expiration and salt
pub(crate) fn frame_message(data: &str, expiration: u64, salt: &str) -> String {
    format!("{data}{DELIMITER}{expiration}{DELIMITER}{salt}")
}

/// Append the MAC to a signed message to form the access token payload
pub(crate) fn frame_access_token(message: &str, mac: &str) -> String {
    format!("{message}{DELIMITER}{mac}")
}

/// Split a decoded access token into its signed message and MAC
///
/// The MAC is the last field. A payload without any delimiter is taken to be
/// all MAC with an empty message.
pub(crate) fn split_access_token(payload: &str) -> (&str, &str) {
    payload.rsplit_once(DELIMITER).unwrap_or(("", payload))
}

/// Fields recovered from a signed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedMessage {
    pub data: TokenData,
    pub expiration: Option<u64>,
    /// At least data, expiration and salt were present
    pub complete: bool,
}

impl ParsedMessage {
    /// Decompose a signed message, dropping the salt
    pub fn parse(message: &str) -> Self {
        let mut fields: Vec<&str> = message.split(DELIMITER).collect();
        let complete = fields.len() >= 3;

        // Salt is never handed back
        fields.pop();

        let expiration = fields.pop().and_then(|f| f.parse::<u64>().ok());

        let data = match fields.as_slice() {
            [single] => TokenData::Single(single.to_string()),
            rest => TokenData::Multiple(rest.iter().map(|f| f.to_string()).collect()),
        };

        Self {
            data,
            expiration,
            complete,
        }
    }
}
