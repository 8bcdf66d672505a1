//! OAuth 1.0a request signing (HMAC-SHA1, two-legged)
//!
//! The signature covers the HTTP method, the endpoint URL and the canonical
//! parameter string:
//!
//! ```text
//! base      = "GET" & enc(base_url) & enc(k1=v1&k2=v2...)
//! signature = enc(base64(HMAC-SHA1(consumer_secret + "&", base)))
//! ```
//!
//! where `enc` is RFC 3986 percent-encoding. There is no token secret, so
//! the HMAC key is always the consumer secret followed by a bare `&`.

use crate::error::ApiResult;
use crate::params::ParameterStore;
use fatsecret_crypto::{hmac_sha1_base64, percent_encode, verify_signature};
use uuid::Uuid;

/// HTTP method covered by every signature
pub const HTTP_METHOD: &str = "GET";

/// Value of `oauth_signature_method`
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// Value of `oauth_version`
pub const OAUTH_VERSION: &str = "1.0";

/// Source of the `oauth_timestamp` value
pub trait Clock: Send + Sync {
    /// Current time in whole seconds since the Unix epoch
    fn now_secs(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Source of the `oauth_nonce` value
pub trait NonceSource: Send + Sync {
    /// A fresh single-use token
    fn nonce(&self) -> String;
}

/// 32 lowercase hex characters from a random v4 UUID
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn nonce(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Computes OAuth 1.0a signatures for one consumer secret
#[derive(Clone)]
pub struct SignatureEngine {
    consumer_secret: String,
}

impl SignatureEngine {
    /// Create an engine keyed by `consumer_secret`
    pub fn new(consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_secret: consumer_secret.into(),
        }
    }

    /// The signature base string for a request
    #[must_use]
    pub fn base_string(method: &str, base_url: &str, params: &ParameterStore) -> String {
        format!(
            "{method}&{}&{}",
            percent_encode(base_url),
            percent_encode(&params.to_query_string())
        )
    }

    /// Sign a request, returning the percent-encoded `oauth_signature` value
    pub fn sign(&self, method: &str, base_url: &str, params: &ParameterStore) -> ApiResult<String> {
        let base = Self::base_string(method, base_url, params);
        let key = format!("{}&", self.consumer_secret);
        let digest = hmac_sha1_base64(key.as_bytes(), base.as_bytes())?;
        Ok(percent_encode(&digest))
    }

    /// Check a percent-encoded signature against a freshly computed one
    pub fn verify(
        &self,
        method: &str,
        base_url: &str,
        params: &ParameterStore,
        signature: &str,
    ) -> ApiResult<()> {
        let expected = self.sign(method, base_url, params)?;
        verify_signature(signature, &expected)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://platform.fatsecret.com/rest/server.api";

    fn sample_params() -> ParameterStore {
        ParameterStore::new()
            .with("format", "json")
            .with("method", "foods.search")
            .with("oauth_consumer_key", "demokey")
            .with("oauth_nonce", "abc123")
            .with("oauth_signature_method", SIGNATURE_METHOD)
            .with("oauth_timestamp", 1_700_000_000)
            .with("oauth_version", OAUTH_VERSION)
            .with("search_expression", "banana")
            .with("page_number", 0)
            .with("max_results", 10)
    }

    #[test]
    fn test_base_string() {
        let base = SignatureEngine::base_string(HTTP_METHOD, BASE_URL, &sample_params());
        assert_eq!(
            base,
            "GET&https%3A%2F%2Fplatform.fatsecret.com%2Frest%2Fserver.api&\
             format%3Djson%26max_results%3D10%26method%3Dfoods.search%26\
             oauth_consumer_key%3Ddemokey%26oauth_nonce%3Dabc123%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1700000000%26\
             oauth_version%3D1.0%26page_number%3D0%26search_expression%3Dbanana"
        );
    }

    #[test]
    fn test_known_signature() {
        let engine = SignatureEngine::new("demosecret");
        let sig = engine.sign(HTTP_METHOD, BASE_URL, &sample_params()).unwrap();
        assert_eq!(sig, "6SOmk04xQn46Dhnsz0UOTONjLFE%3D");
    }

    #[test]
    fn test_signature_is_deterministic() {
        let engine = SignatureEngine::new("demosecret");
        let a = engine.sign(HTTP_METHOD, BASE_URL, &sample_params()).unwrap();
        let b = engine.sign(HTTP_METHOD, BASE_URL, &sample_params()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_any_change_changes_signature() {
        let engine = SignatureEngine::new("demosecret");
        let original = engine.sign(HTTP_METHOD, BASE_URL, &sample_params()).unwrap();

        let changed_value = sample_params().with("search_expression", "bananas");
        let changed_nonce = sample_params().with("oauth_nonce", "abc124");
        let extra_param = sample_params().with("region", "US");

        for params in [changed_value, changed_nonce, extra_param] {
            let sig = engine.sign(HTTP_METHOD, BASE_URL, &params).unwrap();
            assert_ne!(sig, original);
        }

        let other_secret = SignatureEngine::new("othersecret")
            .sign(HTTP_METHOD, BASE_URL, &sample_params())
            .unwrap();
        assert_ne!(other_secret, original);

        let other_url = engine
            .sign(HTTP_METHOD, "http://platform.fatsecret.com/rest/server.api", &sample_params())
            .unwrap();
        assert_ne!(other_url, original);
    }

    #[test]
    fn test_verify() {
        let engine = SignatureEngine::new("demosecret");
        let params = sample_params();
        assert!(engine
            .verify(HTTP_METHOD, BASE_URL, &params, "6SOmk04xQn46Dhnsz0UOTONjLFE%3D")
            .is_ok());
        assert!(engine.verify(HTTP_METHOD, BASE_URL, &params, "forged%3D").is_err());
    }

    #[test]
    fn test_random_nonce_shape() {
        let a = RandomNonce.nonce();
        let b = RandomNonce.nonce();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_secs() > 1_577_836_800);
    }
}
