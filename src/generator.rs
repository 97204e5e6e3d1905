//! # Token Generator
//!
//! [`TokenGenerator`] issues credentials and validates them again, using one
//! immutable [`Config`]. No state is kept between calls.
//!
//! Validation follows a fixed sequence: the signed message is decoded and
//! decomposed, an expired token is rejected without computing a MAC, and only
//! then is the MAC recomputed and compared. Every failure is folded into
//! [`Extraction::is_valid`] being `false`.

use crate::config::{Config, TokenOptions};
use crate::constants::SALT_LENGTH;
use crate::error::Error;
use crate::token::{
    frame_access_token, frame_message, split_access_token, Credential, Extraction, ParsedMessage,
    SeedData,
};
use crate::utils::{
    current_time, decode_base64, encode_base64, epoch_secs, from_epoch_secs, verify_mac,
};
use rand::rngs::OsRng;
use rand::RngCore;
use std::time::SystemTime;
use tracing::debug;

/// Issues and validates bearer tokens for one configuration.
///
/// # Example
///
/// ```
/// use bearer_token::{TokenGenerator, TokenData};
///
/// let generator = TokenGenerator::from_parts("secret", Some(60), Some("sha1")).unwrap();
/// let credential = generator.create("user42").unwrap();
///
/// let extraction = generator.extract_token(&credential.access_token);
/// assert!(extraction.is_valid);
/// assert_eq!(extraction.data, Some(TokenData::Single("user42".to_string())));
/// assert_eq!(extraction.expiration_secs(), Some(credential.expiration));
///
/// // The basic-auth pair carries the same information
/// let extraction = generator.extract_basic(&credential.basic_login, &credential.basic_password);
/// assert!(extraction.is_valid);
/// ```
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    config: Config,
}

impl TokenGenerator {
    /// Create a generator from a validated configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create a generator from structured options
    pub fn from_options(options: TokenOptions) -> Result<Self, Error> {
        Config::from_options(options).map(Self::new)
    }

    /// Create a generator from a key, an optional lifetime and an optional algorithm name
    pub fn from_parts<K: AsRef<[u8]>>(
        private_key: K,
        lifetime: Option<u64>,
        algorithm: Option<&str>,
    ) -> Result<Self, Error> {
        Config::from_parts(private_key, lifetime, algorithm).map(Self::new)
    }

    /// Get the generator configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issue a credential for the given seed data
    ///
    /// The salt is drawn from the operating system's random source.
    pub fn create<D: Into<SeedData>>(&self, data: D) -> Result<Credential, Error> {
        self.create_with_rng(data, &mut OsRng, current_time())
    }

    /// Issue a credential using the given random source and current time
    ///
    /// A failing random source is reported as [`Error::Entropy`] and nothing
    /// is issued; retrying is up to the caller.
    pub fn create_with_rng<D, R>(
        &self,
        data: D,
        rng: &mut R,
        now: SystemTime,
    ) -> Result<Credential, Error>
    where
        D: Into<SeedData>,
        R: RngCore + ?Sized,
    {
        let data = data.into().flatten()?;

        // 48-bit salt
        let mut salt = [0u8; SALT_LENGTH];
        rng.try_fill_bytes(&mut salt)?;
        let salt = encode_base64(&salt)?;

        let expiration = epoch_secs(now).saturating_add(self.config.lifetime());
        let message = frame_message(&data, expiration, &salt);
        let password = self.config.mac(message.as_bytes())?;

        debug!(expiration, "issued token");

        Ok(Credential {
            expiration,
            access_token: encode_base64(frame_access_token(&message, &password).as_bytes())?,
            basic_login: encode_base64(message.as_bytes())?,
            basic_password: password,
        })
    }

    /// Extract from either call shape
    ///
    /// One part is treated as an access token, two parts as a basic login and
    /// password. Any other number of parts yields [`Extraction::invalid`].
    pub fn extract(&self, parts: &[&str]) -> Extraction {
        self.extract_at(parts, current_time())
    }

    /// Extract from either call shape, checking expiry against `now`
    pub fn extract_at(&self, parts: &[&str], now: SystemTime) -> Extraction {
        match parts {
            [token] => self.extract_token_at(token, now),
            [login, password] => self.extract_basic_at(login, password, now),
            _ => Extraction::invalid(),
        }
    }

    /// Extract an access token
    pub fn extract_token(&self, token: &str) -> Extraction {
        self.extract_token_at(token, current_time())
    }

    /// Extract an access token, checking expiry against `now`
    pub fn extract_token_at(&self, token: &str, now: SystemTime) -> Extraction {
        // Undecodable input is treated as an empty payload
        let payload = decode_base64(token).unwrap_or_default();
        let payload = String::from_utf8_lossy(&payload);

        // The MAC is the last field, everything before it is the signed message
        let (message, password) = split_access_token(&payload);
        self.check_message(message, password, now)
    }

    /// Extract a basic login/password pair
    pub fn extract_basic(&self, login: &str, password: &str) -> Extraction {
        self.extract_basic_at(login, password, current_time())
    }

    /// Extract a basic login/password pair, checking expiry against `now`
    pub fn extract_basic_at(&self, login: &str, password: &str, now: SystemTime) -> Extraction {
        let message = decode_base64(login).unwrap_or_default();
        let message = String::from_utf8_lossy(&message);

        self.check_message(&message, password, now)
    }

    fn check_message(&self, message: &str, password: &str, now: SystemTime) -> Extraction {
        let parsed = ParsedMessage::parse(message);

        let mut output = Extraction {
            is_valid: false,
            expiration: parsed.expiration.and_then(from_epoch_secs),
            data: Some(parsed.data),
        };

        let expiration = match output.expiration {
            Some(expiration) if parsed.complete => expiration,
            _ => {
                debug!(reason = "malformed", "rejected token");
                return output;
            }
        };

        // Expired tokens are rejected before any MAC is computed
        if now > expiration {
            debug!(reason = "expired", "rejected token");
            return output;
        }

        output.is_valid = match self.config.mac(message.as_bytes()) {
            Ok(mac) => verify_mac(mac.as_bytes(), password.as_bytes()),
            Err(_) => false,
        };

        if !output.is_valid {
            debug!(reason = "mac_mismatch", "rejected token");
        }

        output
    }
}
