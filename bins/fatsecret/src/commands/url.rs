//! URL command - print the request URL for an API method

use anyhow::{bail, Context, Result};
use fatsecret_api_client::{ApiMethod, ApiRequest, FatSecretClient};

/// Run url command
pub fn run(method: &str, params: &[String], unsigned: bool) -> Result<()> {
    let client = FatSecretClient::new()?;
    let request = build_request(method, params)?;

    let url = if unsigned {
        client.unsigned_url(&request)
    } else {
        client.signed_url(&request).context("Failed to sign request")?
    };

    println!("{url}");
    Ok(())
}

fn build_request(method: &str, params: &[String]) -> Result<ApiRequest> {
    let Some(method) = ApiMethod::from_name(method) else {
        bail!("Unknown API method: {method}");
    };

    let mut request = ApiRequest::new(method);
    for param in params {
        let Some((key, value)) = param.split_once('=') else {
            bail!("Expected key=value, got: {param}");
        };
        request = request.with_param(key, value);
    }
    Ok(request)
}
