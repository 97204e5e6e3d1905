//! # Bearer Token
//!
//! Stateless, self-describing bearer credentials authenticated with an HMAC.
//!
//! ## Overview
//!
//! A caller hands in arbitrary seed data (a user identifier, or an ordered
//! list of fields). The generator embeds it together with an expiration time
//! and a random salt into a signed message and authenticates that message
//! with a keyed MAC. Validation recomputes the MAC, so no session storage is
//! needed to tell a genuine token from a forged or tampered one.
//!
//! ## Features
//!
//! - HMAC-SHA1 (default), HMAC-SHA256 and HMAC-SHA512
//! - An opaque bearer token and an equivalent basic-auth login/password pair
//! - Multi-field seed data recovered as an ordered sequence
//! - Expired tokens rejected without computing a MAC
//! - Invalid tokens never reveal why they are invalid
//!
//! ## Wire Format
//!
//! ```text
//! signed_message := data ":" expiration_epoch_seconds ":" salt_base64
//! mac            := base64( HMAC(algorithm, private_key, signed_message) )
//! access_token   := base64( signed_message ":" mac )
//! basic_login    := base64( signed_message )
//! basic_password := mac
//! ```
//!
//! All base64 is the standard alphabet with padding.
//!
//! ## Basic Example
//!
//! ```rust
//! use bearer_token::{TokenData, TokenGenerator, TokenOptions};
//!
//! let generator = TokenGenerator::from_options(
//!     TokenOptions::new("my-private-key").lifetime(3600).algorithm("sha256"),
//! )
//! .expect("Failed to configure generator");
//!
//! // Issue a token for a user with a role
//! let credential = generator
//!     .create(vec!["alice", "admin"])
//!     .expect("Failed to issue token");
//!
//! // Validate the opaque form
//! let extraction = generator.extract_token(&credential.access_token);
//! assert!(extraction.is_valid);
//! assert_eq!(
//!     extraction.data,
//!     Some(TokenData::Multiple(vec!["alice".to_string(), "admin".to_string()]))
//! );
//!
//! // A tampered password is rejected
//! let extraction = generator.extract_basic(&credential.basic_login, "AAAA");
//! assert!(!extraction.is_valid);
//! ```

pub mod algorithm;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod token;
pub mod utils;

pub use algorithm::Algorithm;
pub use config::{Config, TokenOptions};
pub use error::Error;
pub use generator::TokenGenerator;
pub use token::{Credential, Extraction, SeedData, TokenData};
pub use utils::current_time;

#[cfg(test)]
mod tests;
