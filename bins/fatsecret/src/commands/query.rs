//! Search, get and autocomplete commands

use super::{print_json, timed};
use anyhow::Result;
use fatsecret_api_client::{ApiMethod, FatSecretClient, Resource, SearchQuery};
use owo_colors::OwoColorize;

fn resource(recipes: bool) -> Resource {
    if recipes { Resource::Recipe } else { Resource::Food }
}

/// Run search command
pub async fn search(
    expression: &str,
    recipes: bool,
    page: u32,
    max: i64,
    format: &str,
) -> Result<()> {
    let client = FatSecretClient::new()?;
    let resource = resource(recipes);
    let query = SearchQuery::new(expression).with_page(page).with_max_results(max);

    let method = ApiMethod::search(resource);
    let value = timed(method.as_str(), client.search(resource, &query)).await?;

    if format != "json" {
        eprintln!(
            "{} {} page {}",
            method.as_str().cyan().bold(),
            expression.green(),
            page
        );
    }
    print_json(&value)
}

/// Run get command
pub async fn get(id: u64, recipe: bool, format: &str) -> Result<()> {
    let client = FatSecretClient::new()?;
    let resource = resource(recipe);

    let method = ApiMethod::get(resource);
    let value = timed(method.as_str(), client.get(resource, id)).await?;

    if format != "json" {
        eprintln!("{} {}", method.as_str().cyan().bold(), id.to_string().green());
    }
    print_json(&value)
}

/// Run autocomplete command
pub async fn autocomplete(expression: &str, max: i64, format: &str) -> Result<()> {
    let client = FatSecretClient::new()?;
    let method = ApiMethod::FoodsAutocomplete;
    let value = timed(
        method.as_str(),
        client.autocomplete(Resource::Food, expression, max),
    )
    .await?;

    if format == "json" {
        return print_json(&value);
    }

    let suggestions = value
        .pointer("/suggestions/suggestion")
        .cloned()
        .unwrap_or_default();
    let items: Vec<String> = match suggestions {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        serde_json::Value::String(single) => vec![single],
        _ => Vec::new(),
    };

    if items.is_empty() {
        println!("  {}", "No suggestions".dimmed());
    }
    for item in items {
        println!("  {item}");
    }
    Ok(())
}
