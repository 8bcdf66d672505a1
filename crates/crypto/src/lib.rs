//! Cryptographic primitives for FatSecret request signing.
//!
//! This crate provides:
//! - HMAC-SHA1 digests, raw or base64-encoded
//! - RFC 3986 percent-encoding as required by OAuth 1.0a
//! - Constant-time comparison for signature checks

#![warn(missing_docs)]

mod encoding;
mod error;
mod hmac_impl;
mod timing;

pub use encoding::{percent_decode, percent_encode};
pub use error::{CryptoError, Result};
pub use hmac_impl::{hmac_sha1, hmac_sha1_base64, verify_signature};
pub use timing::constant_time_compare;
