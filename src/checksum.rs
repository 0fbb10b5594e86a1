//! Checksum used to authenticate the token exchange.
//!
//! The checksum proves possession of the API secret without sending it:
//! `hex(SHA-256(api_key + token + api_secret))`, where `token` is the
//! `request_token` from the login redirect (or a `refresh_token` when
//! renewing).

use sha2::{Digest, Sha256};

use crate::error::{Result, SasError};

/// Compute the token-exchange checksum.
///
/// All three arguments must be non-empty. Returns a 64-character lowercase
/// hex digest.
///
/// ```
/// let a = sasonline_rs::checksum::sign("key", "request", "secret").unwrap();
/// let b = sasonline_rs::checksum::sign("key", "request", "secret").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn sign(api_key: &str, request_token: &str, api_secret: &str) -> Result<String> {
    for (name, value) in [
        ("api_key", api_key),
        ("request_token", request_token),
        ("api_secret", api_secret),
    ] {
        if value.is_empty() {
            return Err(SasError::InvalidArgument(format!("{name} must not be empty")));
        }
    }

    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hasher.update(request_token.as_bytes());
    hasher.update(api_secret.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
