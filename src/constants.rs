//! # Constants for bearer tokens
//!
//! This module provides centralized constants used throughout the library.
//! They fix the wire framing of the signed message and the configuration
//! defaults, so changing any of them breaks interoperability with tokens
//! issued by other implementations.

/// Field delimiter inside the signed message (`data:expiration:salt`)
pub const DELIMITER: char = ':';

/// Number of random salt bytes mixed into every signed message (48 bits)
pub const SALT_LENGTH: usize = 6;

/// Token lifetime in seconds used when none (or zero) is configured
pub const DEFAULT_LIFETIME: u64 = 3600;

/// MAC hash algorithm used when none is configured
pub const DEFAULT_ALGORITHM: &str = "sha1";

/// HTTP authorization schemes for rendering credentials
pub mod schemes {
    /// Scheme for the opaque access token
    pub const BEARER: &str = "Bearer";
    /// Scheme for the login/password pair
    pub const BASIC: &str = "Basic";
}
