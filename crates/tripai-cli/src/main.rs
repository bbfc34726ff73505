// TripAI CLI - operator tool for the travel recommendation API

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};
use serde::{Deserialize, Serialize};

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(name = "tripai")]
#[command(version = "0.1.0")]
#[command(about = "Travel product recommendation CLI", long_about = None)]
struct Cli {
    /// API server URL
    #[arg(short, long, default_value = DEFAULT_API_URL, env = "TRIPAI_API_URL")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get product recommendations for a travel intent
    Recommend {
        /// Destination region (exact match against log places)
        #[arg(short, long)]
        region: String,

        /// Travel theme/category (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Traveler gender
        #[arg(short, long, default_value = "")]
        gender: String,

        /// Traveler age bracket (e.g. 20, 30)
        #[arg(short = 'A', long, default_value = "")]
        age: String,

        /// Trip length in days
        #[arg(short, long, default_value = "1")]
        days: u32,

        /// Companion relation (repeatable)
        #[arg(long = "companion-relation")]
        companion_relations: Vec<String>,

        /// Companion age group (repeatable)
        #[arg(long = "companion-age-group")]
        companion_age_groups: Vec<String>,
    },

    /// Show corpus and index statistics
    Stats,

    /// Check API health
    Health,
}

// Request/response types (mirror the API models)

#[derive(Serialize)]
struct RecommendRequest {
    region: String,
    categories: Vec<String>,
    gender: String,
    age: String,
    days: u32,
    companion_relations: Vec<String>,
    companion_age_groups: Vec<String>,
}

#[derive(Deserialize)]
struct RecommendResponse {
    products: Vec<ProductOut>,
    report: Option<String>,
}

#[derive(Deserialize)]
struct ProductOut {
    product_id: String,
    region: String,
    product_name: String,
    place_type: String,
    category: String,
    options: Vec<OptionOut>,
}

#[derive(Deserialize)]
struct OptionOut {
    option_name: String,
    prices: Vec<PriceOut>,
}

#[derive(Deserialize)]
struct PriceOut {
    age_type: String,
    price_text: String,
}

#[derive(Deserialize)]
struct StatsResponse {
    log_count: usize,
    product_count: usize,
    price_count: usize,
    embedded_count: usize,
    dimension: usize,
    partial_coverage: bool,
    snapshot_built_at: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Recommend {
            region,
            categories,
            gender,
            age,
            days,
            companion_relations,
            companion_age_groups,
        } => {
            let request = RecommendRequest {
                region,
                categories,
                gender,
                age,
                days,
                companion_relations,
                companion_age_groups,
            };
            recommend(&client, &cli.api_url, &request).await?;
        }
        Commands::Stats => {
            show_stats(&client, &cli.api_url).await?;
        }
        Commands::Health => {
            check_health(&client, &cli.api_url).await?;
        }
    }

    Ok(())
}

async fn recommend(
    client: &reqwest::Client,
    api_url: &str,
    request: &RecommendRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "\n{} {}",
        "Recommending for region:".cyan().bold(),
        request.region
    );
    println!("{}", "─".repeat(60).dimmed());

    let url = format!("{}/api/recommend", api_url);
    let response = client.post(&url).json(request).send().await?;

    if !response.status().is_success() {
        let error = response.text().await?;
        println!("{} {}", "Error:".red().bold(), error);
        return Ok(());
    }

    let result: RecommendResponse = response.json().await?;

    if result.products.is_empty() {
        println!(
            "{}",
            "No recommendation - no historical logs matched this region.".yellow()
        );
        return Ok(());
    }

    for (i, product) in result.products.iter().enumerate() {
        println!(
            "\n{} {} {}",
            format!("{}.", i + 1).green().bold(),
            product.product_name.bold(),
            format!(
                "({} / {} / {})",
                product.region, product.place_type, product.category
            )
            .dimmed()
        );
        println!("   {} {}", "id:".dimmed(), product.product_id);

        if product.options.is_empty() {
            continue;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Option", "Age type", "Price"]);

        for option in &product.options {
            for price in &option.prices {
                table.add_row(vec![
                    option.option_name.clone(),
                    price.age_type.clone(),
                    price.price_text.clone(),
                ]);
            }
        }
        println!("{table}");
    }

    if let Some(report) = result.report {
        println!("\n{}", "Report:".green().bold());
        println!("{}", report);
    }

    Ok(())
}

async fn show_stats(
    client: &reqwest::Client,
    api_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("{}/api/stats", api_url);
    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        let error = response.text().await?;
        println!("{} {}", "Error:".red().bold(), error);
        return Ok(());
    }

    let stats: StatsResponse = response.json().await?;

    println!("\n{}", "TripAI Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("Travel logs:     {}", stats.log_count.to_string().yellow());
    println!("Products:        {}", stats.product_count.to_string().yellow());
    println!("Price rows:      {}", stats.price_count.to_string().yellow());
    println!("Embedded logs:   {}", stats.embedded_count.to_string().yellow());
    println!("Vector dim:      {}", stats.dimension.to_string().yellow());
    println!("Snapshot built:  {}", stats.snapshot_built_at.dimmed());

    if stats.partial_coverage {
        println!(
            "{}",
            "⚠ Coverage is PARTIAL - the embedding corpus was capped at build time".red()
        );
    }

    Ok(())
}

async fn check_health(
    client: &reqwest::Client,
    api_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("{}/health", api_url);

    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            println!("{} {}", "API:".bold(), "healthy".green());
        }
        Ok(response) => {
            println!("{} {} ({})", "API:".bold(), "unhealthy".red(), response.status());
        }
        Err(e) => {
            println!("{} {} ({})", "API:".bold(), "unreachable".red(), e);
        }
    }

    Ok(())
}
