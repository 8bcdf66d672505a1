//! HMAC-SHA1 as used by OAuth 1.0a.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::{CryptoError, Result};

type HmacSha1 = Hmac<Sha1>;

/// Generate an HMAC-SHA1 digest.
///
/// # Arguments
/// * `key` - Secret key bytes
/// * `message` - Message to sign
///
/// # Returns
/// The raw 20-byte digest
pub fn hmac_sha1(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha1::new_from_slice(key).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Generate an HMAC-SHA1 digest and encode it with standard (padded) base64.
pub fn hmac_sha1_base64(key: &[u8], message: &[u8]) -> Result<String> {
    let digest = hmac_sha1(key, message)?;
    Ok(STANDARD.encode(digest))
}

/// Verify a signature against an expected value.
///
/// Both values are compared as opaque strings, so they must use the same
/// encoding (for OAuth, both percent-encoded or both raw base64).
pub fn verify_signature(signature: &str, expected: &str) -> Result<()> {
    if crate::constant_time_compare(signature.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(CryptoError::SignatureMismatch)
    }
}
