//! # MAC Algorithms
//!
//! This module provides the set of hash algorithms the MAC engine can key.
//!
//! The set is a fixed capability of the cryptographic backend linked into this
//! crate rather than a process-wide registry, so it can be queried with
//! [`Algorithm::supported`] and parsed from configuration with [`str::parse`].

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Supported hash algorithms for computing token MACs.
///
/// Every variant is used as HMAC over the signed message. Names follow the
/// conventional lowercase digest names (`sha1`, `sha256`, `sha512`) and must
/// match exactly.
///
/// # Example
///
/// ```
/// use bearer_token::Algorithm;
///
/// let alg: Algorithm = "sha256".parse().unwrap();
/// assert_eq!(alg, Algorithm::Sha256);
/// assert_eq!(alg.name(), "sha256");
/// assert!("not-a-real-hash".parse::<Algorithm>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// HMAC with SHA-1 (20-byte tag)
    #[default]
    Sha1,
    /// HMAC with SHA-256 (32-byte tag)
    Sha256,
    /// HMAC with SHA-512 (64-byte tag)
    Sha512,
}

impl Algorithm {
    /// All algorithms the backend can compute
    pub const fn supported() -> &'static [Algorithm] {
        &[Algorithm::Sha1, Algorithm::Sha256, Algorithm::Sha512]
    }

    /// Canonical algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Look up an algorithm by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::supported()
            .iter()
            .copied()
            .find(|alg| alg.name() == name)
    }

    /// Length of the raw MAC tag in bytes
    pub fn tag_len(&self) -> usize {
        match self {
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 => 32,
            Algorithm::Sha512 => 64,
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
