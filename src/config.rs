//! # Generator Configuration
//!
//! A [`Config`] holds the shared secret, the token lifetime and the MAC
//! algorithm for one generator. It is validated once when it is built and is
//! read-only afterwards, so a single value can back any number of concurrent
//! `create`/`extract` calls.
//!
//! Two construction forms are provided:
//!
//! - **Structured**: [`Config::from_options`] takes a [`TokenOptions`] value,
//!   which can also be deserialized from any serde configuration source.
//! - **Positional**: [`Config::from_parts`] takes the key, lifetime and
//!   algorithm name directly.

use crate::algorithm::Algorithm;
use crate::constants::{DEFAULT_ALGORITHM, DEFAULT_LIFETIME};
use crate::error::Error;
use crate::utils::{compute_hmac, encode_base64};
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// Structured generator options.
///
/// Unset (or zero) lifetime falls back to one hour and an unset algorithm
/// falls back to `sha1`.
///
/// # Example
///
/// ```
/// use bearer_token::{Config, TokenOptions};
///
/// let options: TokenOptions = TokenOptions::new("secret").lifetime(60).algorithm("sha256");
/// let config = Config::from_options(options).unwrap();
/// assert_eq!(config.lifetime(), 60);
/// assert_eq!(config.algorithm().name(), "sha256");
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenOptions {
    /// Shared secret used to key the MAC
    #[serde(alias = "private_key")]
    pub private_key: String,
    /// Token lifetime in seconds
    pub lifetime: Option<u64>,
    /// Hash algorithm name
    pub algorithm: Option<String>,
}

impl TokenOptions {
    /// Create options with the given private key and default lifetime/algorithm
    pub fn new<S: Into<String>>(private_key: S) -> Self {
        Self {
            private_key: private_key.into(),
            lifetime: None,
            algorithm: None,
        }
    }

    /// Set the token lifetime in seconds
    pub fn lifetime(mut self, seconds: u64) -> Self {
        self.lifetime = Some(seconds);
        self
    }

    /// Set the hash algorithm by name
    pub fn algorithm<S: Into<String>>(mut self, name: S) -> Self {
        self.algorithm = Some(name.into());
        self
    }
}

impl fmt::Debug for TokenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenOptions")
            .field("private_key", &"<redacted>")
            .field("lifetime", &self.lifetime)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Validated, immutable generator configuration
#[derive(Clone)]
pub struct Config {
    private_key: Vec<u8>,
    lifetime: u64,
    algorithm: Algorithm,
}

impl Config {
    /// Build a configuration from structured options
    ///
    /// Options are only recognized when they carry a private key; an empty key
    /// is rejected as an unrecognized argument shape.
    pub fn from_options(options: TokenOptions) -> Result<Self, Error> {
        if options.private_key.is_empty() {
            return Err(Error::InvalidArguments(
                "options must carry a private key".to_string(),
            ));
        }

        Self::from_parts(
            options.private_key.as_bytes(),
            options.lifetime,
            options.algorithm.as_deref(),
        )
    }

    /// Build a configuration from a key, an optional lifetime and an optional algorithm name
    ///
    /// # Example
    ///
    /// ```
    /// use bearer_token::{Config, Error};
    ///
    /// let config = Config::from_parts("secret", None, None).unwrap();
    /// assert_eq!(config.lifetime(), 3600);
    /// assert_eq!(config.algorithm().name(), "sha1");
    ///
    /// assert!(matches!(
    ///     Config::from_parts("secret", Some(60), Some("not-a-real-hash")),
    ///     Err(Error::UnsupportedAlgorithm(_))
    /// ));
    /// ```
    pub fn from_parts<K: AsRef<[u8]>>(
        private_key: K,
        lifetime: Option<u64>,
        algorithm: Option<&str>,
    ) -> Result<Self, Error> {
        let private_key = private_key.as_ref();
        if private_key.is_empty() {
            return Err(Error::MissingPrivateKey);
        }

        let lifetime = match lifetime {
            Some(seconds) if seconds > 0 => seconds,
            _ => DEFAULT_LIFETIME,
        };

        let name = match algorithm {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_ALGORITHM,
        };
        let algorithm: Algorithm = name.parse()?;

        debug!(algorithm = %algorithm, lifetime, "token generator configured");

        Ok(Self {
            private_key: private_key.to_vec(),
            lifetime,
            algorithm,
        })
    }

    /// Token lifetime in seconds
    pub fn lifetime(&self) -> u64 {
        self.lifetime
    }

    /// MAC hash algorithm
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Compute the base64 MAC of a message under the configured key and algorithm
    pub fn mac(&self, message: &[u8]) -> Result<String, Error> {
        encode_base64(&compute_hmac(self.algorithm, &self.private_key, message))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("private_key", &"<redacted>")
            .field("lifetime", &self.lifetime)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
