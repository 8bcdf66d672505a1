//! Telemetry for FatSecret tools
//!
//! - Structured logging with tracing (compact or JSON lines)
//! - A process-wide session id for correlating log lines
//! - Per-method request counters and timings

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global request statistics
static REQUESTS: Lazy<RequestStats> = Lazy::new(RequestStats::default);

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize the telemetry system
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::default())
}

/// Initialize with custom configuration
///
/// `RUST_LOG` takes precedence over `config.log_level` when set.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.show_target)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(config.show_target)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            show_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Debug-level logging for the given crates
    pub fn verbose(crates: &[&str]) -> Self {
        let directives: Vec<String> = crates.iter().map(|c| format!("{c}=debug")).collect();
        Self {
            log_level: directives.join(","),
            ..Self::default()
        }
    }
}

/// Counts and durations of API calls, keyed by method name
#[derive(Default)]
pub struct RequestStats {
    inner: Mutex<BTreeMap<String, MethodStats>>,
}

/// Aggregates for one API method
#[derive(Debug, Clone, Default, Serialize)]
pub struct MethodStats {
    pub calls: u64,
    pub failures: u64,
    pub total_ms: u64,
}

impl RequestStats {
    /// Record one finished call
    pub fn record(&self, method: &str, elapsed: Duration, success: bool) {
        let mut stats = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let entry = stats.entry(method.to_string()).or_default();
        entry.calls += 1;
        entry.total_ms += u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if !success {
            entry.failures += 1;
        }
    }

    /// Stats for one method
    pub fn get(&self, method: &str) -> Option<MethodStats> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(method)
            .cloned()
    }

    /// Export as JSON
    pub fn export_json(&self) -> serde_json::Value {
        let stats = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        serde_json::json!({
            "session_id": session_id(),
            "methods": &*stats,
        })
    }
}

/// Get the global request statistics
pub fn requests() -> &'static RequestStats {
    &REQUESTS
}

/// Timer for one API call
pub struct RequestTimer {
    method: String,
    start: Instant,
}

impl RequestTimer {
    /// Start timing `method`
    pub fn start(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            start: Instant::now(),
        }
    }

    /// Stop the timer and record the outcome
    pub fn stop(self, success: bool) -> Duration {
        let duration = self.start.elapsed();
        requests().record(&self.method, duration, success);
        tracing::debug!(
            method = %self.method,
            duration_ms = duration.as_millis(),
            success,
            "Request completed"
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts() {
        let stats = RequestStats::default();
        stats.record("foods.search", Duration::from_millis(20), true);
        stats.record("foods.search", Duration::from_millis(30), false);

        let search = stats.get("foods.search").unwrap();
        assert_eq!(search.calls, 2);
        assert_eq!(search.failures, 1);
        assert_eq!(search.total_ms, 50);
        assert!(stats.get("food.get").is_none());
    }

    #[test]
    fn test_export_json() {
        let stats = RequestStats::default();
        stats.record("recipe.get", Duration::from_millis(5), true);
        let json = stats.export_json();
        assert_eq!(json["methods"]["recipe.get"]["calls"], 1);
        assert_eq!(json["session_id"], session_id());
    }

    #[test]
    fn test_timer_records_globally() {
        let timer = RequestTimer::start("test.timer");
        std::thread::sleep(Duration::from_millis(10));
        let duration = timer.stop(true);
        assert!(duration.as_millis() >= 10);
        assert!(requests().get("test.timer").unwrap().calls >= 1);
    }

    #[test]
    fn test_verbose_config() {
        let config = TelemetryConfig::verbose(&["fatsecret", "fatsecret_api_client"]);
        assert_eq!(config.log_level, "fatsecret=debug,fatsecret_api_client=debug");
    }

    #[test]
    fn test_session_id() {
        let id = session_id();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
