//! Servings and measurements commands

use super::timed;
use anyhow::Result;
use fatsecret_api_client::FatSecretClient;
use owo_colors::OwoColorize;

/// Run servings command
pub async fn run(food_id: u64, format: &str) -> Result<()> {
    let client = FatSecretClient::new()?;
    let table = timed("food.get", client.foods().servings(food_id)).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    if table.is_empty() {
        println!("  {}", "No servings".dimmed());
        return Ok(());
    }

    println!(
        "  {:<28} {:>10} {:>10} {:>10} {:>10}",
        "Serving".dimmed(),
        "kcal".dimmed(),
        "Carbs".dimmed(),
        "Protein".dimmed(),
        "Fat".dimmed()
    );
    println!("  {}", "─".repeat(72).dimmed());

    for (key, serving) in table.iter() {
        println!(
            "  {:<28} {:>10} {:>10} {:>10} {:>10}",
            key.cyan(),
            cell(serving.calories),
            cell(serving.carbohydrate),
            cell(serving.protein),
            cell(serving.fat)
        );
    }

    println!();
    println!("  Total: {} servings", table.len().to_string().green());
    Ok(())
}

/// Run measurements command
pub async fn measurements(food_id: u64, format: &str) -> Result<()> {
    let client = FatSecretClient::new()?;
    let units = timed("food.get", client.foods().measurements(food_id)).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&units)?);
        return Ok(());
    }

    for unit in &units {
        println!("  {unit}");
    }
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}"))
}

