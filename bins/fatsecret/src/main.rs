//! FatSecret CLI - query foods and recipes from the terminal
//!
//! Credentials come from `FATSECRET_CONSUMER_KEY` and
//! `FATSECRET_CONSUMER_SECRET`.

use clap::{Parser, Subcommand};
use fatsecret_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::process::ExitCode;

mod commands;

use commands::{query, servings, url};

/// Query the FatSecret Platform API
#[derive(Parser)]
#[command(name = "fatsecret")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search foods (or recipes)
    Search {
        /// Search expression
        expression: String,

        /// Search recipes instead of foods
        #[arg(short, long)]
        recipes: bool,

        /// Zero-based result page
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Results per page
        #[arg(short, long, default_value = "10")]
        max: i64,
    },

    /// Fetch a food (or recipe) by id
    Get {
        /// Food or recipe id
        id: u64,

        /// Fetch a recipe instead of a food
        #[arg(short, long)]
        recipe: bool,
    },

    /// Suggest food names for a partial expression
    Autocomplete {
        /// Partial search expression
        expression: String,

        /// Number of suggestions (1-10, anything else means 10)
        #[arg(short, long, default_value = "10", allow_hyphen_values = true)]
        max: i64,
    },

    /// Show a food's servings, including per-metric-unit nutrients
    Servings {
        /// Food id
        food_id: u64,
    },

    /// List the measurement units available for a food
    Measurements {
        /// Food id
        food_id: u64,
    },

    /// Print a signed request URL without sending it
    Url {
        /// API method, e.g. foods.search
        method: String,

        /// Extra parameters as key=value
        params: Vec<String>,

        /// Leave out the signature
        #[arg(long)]
        unsigned: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        let config = TelemetryConfig::verbose(&["fatsecret", "fatsecret_api_client"]);
        if let Err(e) = fatsecret_telemetry::init_with_config(config) {
            eprintln!("{} {}", "Warning:".yellow().bold(), e);
        }
    }

    let result = match cli.command {
        Commands::Search { expression, recipes, page, max } => {
            query::search(&expression, recipes, page, max, &cli.format).await
        }

        Commands::Get { id, recipe } => query::get(id, recipe, &cli.format).await,

        Commands::Autocomplete { expression, max } => {
            query::autocomplete(&expression, max, &cli.format).await
        }

        Commands::Servings { food_id } => servings::run(food_id, &cli.format).await,

        Commands::Measurements { food_id } => servings::measurements(food_id, &cli.format).await,

        Commands::Url { method, params, unsigned } => url::run(&method, &params, unsigned),
    };

    if cli.verbose {
        tracing::debug!(stats = %fatsecret_telemetry::requests().export_json(), "Session stats");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
