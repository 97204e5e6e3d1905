//! Error types for the bearer token library

use thiserror::Error;

/// Errors that can occur when configuring a generator or issuing tokens
///
/// Validation never produces an error: a token that fails to parse, has
/// expired or carries a wrong MAC simply extracts as invalid.
#[derive(Error, Debug)]
pub enum Error {
    /// No private key was supplied
    #[error("No private key specified")]
    MissingPrivateKey,

    /// Construction arguments were not in a recognized shape
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Hash algorithm is not supported by the MAC backend
    #[error("Unsupported hash algorithm '{0}'")]
    UnsupportedAlgorithm(String),

    /// Seed data cannot be framed into a signed message
    #[error("Invalid seed data: {0}")]
    InvalidSeedData(String),

    /// The random source failed to produce a salt
    #[error("Entropy source failure: {0}")]
    Entropy(#[from] rand::Error),

    /// Base64 encoding failed
    #[error("Encoding error: {0}")]
    Encoding(String),
}
