//! Utility functions for bearer tokens

use crate::algorithm::Algorithm;
use crate::error::Error;
use ct_codecs::{Base64, Base64NoPadding, Decoder, Encoder};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Compute the raw HMAC tag of `data` under `key`
pub fn compute_hmac(alg: Algorithm, key: &[u8], data: &[u8]) -> Vec<u8> {
    match alg {
        Algorithm::Sha1 => hmac_sha1_compact::HMAC::mac(data, key).to_vec(),
        Algorithm::Sha256 => hmac_sha256::HMAC::mac(data, key).to_vec(),
        Algorithm::Sha512 => hmac_sha512::HMAC::mac(data, key).to_vec(),
    }
}

/// Compare two MAC values in constant time
///
/// Values of different lengths never match.
pub fn verify_mac(expected: &[u8], supplied: &[u8]) -> bool {
    ct_codecs::verify(expected, supplied)
}

/// Standard (padded) base64 encoding
pub fn encode_base64(bin: &[u8]) -> Result<String, Error> {
    Base64::encode_to_string(bin).map_err(|e| Error::Encoding(format!("{e:?}")))
}

/// Standard base64 decoding, `None` on malformed input
///
/// Padding is optional, so values whose trailing `=` were stripped in
/// transit still decode.
pub fn decode_base64(encoded: &str) -> Option<Vec<u8>> {
    let encoded = encoded.trim();
    Base64::decode_to_vec(encoded, None)
        .or_else(|_| Base64NoPadding::decode_to_vec(encoded.trim_end_matches('='), None))
        .ok()
}

/// Get the current time
pub fn current_time() -> SystemTime {
    SystemTime::now()
}

/// Whole seconds since the Unix epoch, clamped to zero for earlier times
pub fn epoch_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Convert Unix epoch seconds to a point in time, `None` if unrepresentable
pub fn from_epoch_secs(secs: u64) -> Option<SystemTime> {
    UNIX_EPOCH.checked_add(Duration::from_secs(secs))
}
