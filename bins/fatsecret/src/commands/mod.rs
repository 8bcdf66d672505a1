//! CLI command implementations

pub mod query;
pub mod servings;
pub mod url;

use anyhow::Result;
use fatsecret_api_client::ApiResult;
use fatsecret_telemetry::RequestTimer;
use std::future::Future;

/// Run one API call under a request timer
pub(crate) async fn timed<T, F>(method: &str, call: F) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    let timer = RequestTimer::start(method);
    let result = call.await;
    timer.stop(result.is_ok());
    result
}

/// Print a JSON value, pretty in both output formats
pub(crate) fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
