//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{FoodsApi, RecipesApi};
use crate::error::{ApiError, ApiResult};
use crate::oauth::{
    Clock, NonceSource, RandomNonce, SignatureEngine, SystemClock, HTTP_METHOD, OAUTH_VERSION,
    SIGNATURE_METHOD,
};
use crate::params::ParameterStore;
use crate::request::{build_signed_url, build_url, ApiRequest, Resource, SearchQuery};
use crate::transport::{ReqwestTransport, Transport};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use url::Url;

/// Query parameter carrying the signature
const SIGNATURE_PARAM: &str = "oauth_signature";

/// FatSecret REST client.
///
/// Holds immutable configuration and collaborators only; every call builds
/// its own [`ApiRequest`], so one client can be cloned and shared freely.
#[derive(Clone)]
pub struct FatSecretClient {
    config: Arc<ClientConfig>,
    signer: SignatureEngine,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    nonce: Arc<dyn NonceSource>,
}

impl FatSecretClient {
    /// Create a new client with configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client around an injected transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> ApiResult<Self> {
        config.validate()?;
        let signer = SignatureEngine::new(config.credentials.consumer_secret.clone());

        Ok(Self {
            config: Arc::new(config),
            signer,
            transport,
            clock: Arc::new(SystemClock),
            nonce: Arc::new(RandomNonce),
        })
    }

    /// Replace the timestamp source
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the nonce generator
    #[must_use]
    pub fn with_nonce_source(mut self, nonce: Arc<dyn NonceSource>) -> Self {
        self.nonce = nonce;
        self
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the endpoint URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access food endpoints
    #[must_use]
    pub fn foods(&self) -> FoodsApi {
        FoodsApi::new(self.clone())
    }

    /// Access recipe endpoints
    #[must_use]
    pub fn recipes(&self) -> RecipesApi {
        RecipesApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // URL construction
    // -------------------------------------------------------------------------

    /// Parameters sent with every request
    fn base_params(&self) -> ParameterStore {
        let mut params = ParameterStore::new()
            .with("format", self.config.format.as_str())
            .with("oauth_consumer_key", &self.config.credentials.consumer_key)
            .with("oauth_signature_method", SIGNATURE_METHOD)
            .with("oauth_version", OAUTH_VERSION);

        if let Some(ref region) = self.config.region {
            params.set("region", region);
        }
        if let Some(ref language) = self.config.language {
            params.set("language", language);
        }
        params
    }

    /// Full parameter set for `request` with a fresh timestamp and nonce
    fn stamped_params(&self, request: &ApiRequest) -> ParameterStore {
        let mut params = self.base_params();
        params.extend(&request.params);
        params
            .set("method", request.method.as_str())
            .set("oauth_timestamp", self.clock.now_secs())
            .set("oauth_nonce", self.nonce.nonce());
        params
    }

    /// URL with every parameter but no signature
    #[must_use]
    pub fn unsigned_url(&self, request: &ApiRequest) -> String {
        build_url(&self.config.base_url, &self.stamped_params(request))
    }

    /// Fully signed request URL; nonce and timestamp are regenerated on
    /// every call
    pub fn signed_url(&self, request: &ApiRequest) -> ApiResult<String> {
        let params = self.stamped_params(request);
        let signature = self.signer.sign(HTTP_METHOD, &self.config.base_url, &params)?;
        debug!(method = %request.method, params = params.len(), "Signed request");
        Ok(build_signed_url(&self.config.base_url, &params, &signature))
    }

    /// Check that `url` carries a valid signature for this client's secret
    pub fn verify_signed_url(&self, url: &str) -> ApiResult<()> {
        let parsed = Url::parse(url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let mut signature = None;
        let mut params = ParameterStore::new();
        for (key, value) in parsed.query_pairs() {
            if key == SIGNATURE_PARAM {
                signature = Some(fatsecret_crypto::percent_encode(&value));
            } else {
                params.set(key, value);
            }
        }

        let signature = signature
            .ok_or_else(|| ApiError::InvalidUrl(format!("missing {SIGNATURE_PARAM}")))?;

        let mut base = parsed.clone();
        base.set_query(None);

        self.signer.verify(HTTP_METHOD, base.as_str(), &params, &signature)
    }

    // -------------------------------------------------------------------------
    // Execution
    // -------------------------------------------------------------------------

    /// Sign and send `request`, returning the body text unparsed
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn fetch_raw(&self, request: &ApiRequest) -> ApiResult<String> {
        let url = self.signed_url(request)?;
        self.transport.get(&url).await
    }

    /// Sign and send `request`, decoding the body as JSON.
    ///
    /// An empty or non-JSON body yields `Value::Null`. API error payloads
    /// are returned as-is.
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn execute(&self, request: &ApiRequest) -> ApiResult<Value> {
        let body = self.fetch_raw(request).await?;
        Ok(decode_body(&body))
    }
}

impl FatSecretClient {
    // -------------------------------------------------------------------------
    // Resource operations
    // -------------------------------------------------------------------------

    /// `<resource>s.search`
    pub async fn search(&self, resource: Resource, query: &SearchQuery) -> ApiResult<Value> {
        self.execute(&ApiRequest::search(resource, query)).await
    }

    /// `<resource>.get`
    pub async fn get(&self, resource: Resource, id: u64) -> ApiResult<Value> {
        self.execute(&ApiRequest::get(resource, id)).await
    }

    /// `foods.autocomplete`; the API has no recipe counterpart
    pub async fn autocomplete(
        &self,
        resource: Resource,
        expression: &str,
        max_results: i64,
    ) -> ApiResult<Value> {
        if resource != Resource::Food {
            return Err(ApiError::UnsupportedOperation {
                operation: "autocomplete",
                resource: resource.as_str(),
            });
        }
        self.execute(&ApiRequest::autocomplete(expression, max_results)).await
    }
}

fn decode_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Response body is not valid JSON");
            Value::Null
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    pub const BASE_URL: &str = "https://platform.fatsecret.com/rest/server.api";

    /// Transport double that records URLs and replays a canned result
    pub struct MockTransport {
        pub urls: Mutex<Vec<String>>,
        response: Result<String, String>,
    }

    impl MockTransport {
        pub fn body(body: &str) -> Arc<Self> {
            Arc::new(Self {
                urls: Mutex::new(Vec::new()),
                response: Ok(body.to_string()),
            })
        }

        pub fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                urls: Mutex::new(Vec::new()),
                response: Err(message.to_string()),
            })
        }

        pub fn last_url(&self) -> String {
            self.urls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &str) -> ApiResult<String> {
            self.urls.lock().unwrap().push(url.to_string());
            self.response.clone().map_err(ApiError::transport)
        }
    }

    pub struct FixedClock(pub i64);

    impl Clock for FixedClock {
        fn now_secs(&self) -> i64 {
            self.0
        }
    }

    /// Hands out `nonce0`, `nonce1`, ...
    #[derive(Default)]
    pub struct CountingNonce(Mutex<u32>);

    impl NonceSource for CountingNonce {
        fn nonce(&self) -> String {
            let mut n = self.0.lock().unwrap();
            let value = format!("nonce{n}");
            *n += 1;
            value
        }
    }

    pub fn client_with(transport: Arc<MockTransport>) -> FatSecretClient {
        FatSecretClient::with_transport(ClientConfig::new("demokey", "demosecret"), transport)
            .unwrap()
            .with_clock(Arc::new(FixedClock(1_700_000_000)))
            .with_nonce_source(Arc::new(CountingNonce::default()))
    }

    /// Query parameters of `url`, percent-decoded
    pub fn query_params(url: &str) -> std::collections::BTreeMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}
