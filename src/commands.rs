//! Command-line surface
//!
//! Every command runs on the caller's runtime and scrapes its URLs one after
//! another.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::application::{
    AlertStatus, DEFAULT_CHART_HEIGHT, Dashboard, PriceComparator, ProductScraper, render_record, render_summary,
    render_trend_chart,
};
use crate::domain::{PriceWatchError, PriceWatchResult, PricingAnalyzer, ProductTarget};
use crate::infrastructure::{AppConfig, HttpClient, ProductPageParser, notifier_from_config};

/// Price Watch CLI
#[derive(Parser, Debug)]
#[command(name = "price-watch")]
#[command(version)]
#[command(about = "Compare product prices across shops and alert on wide gaps", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive, overriding the configuration
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the configured products and their pages
    Products,

    /// Print every scraped record of a product
    View(ProductArgs),

    /// Scrape current prices of a product and chart them
    Trends(TrendsArgs),

    /// Compare a product's prices across its pages and alert on wide gaps
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
pub struct ProductArgs {
    /// Product name as listed in the catalog
    pub product: String,

    /// Page to scrape; repeat to replace the configured list
    #[arg(long = "url")]
    pub urls: Vec<String>,
}

#[derive(Args, Debug)]
pub struct TrendsArgs {
    #[command(flatten)]
    pub target: ProductArgs,

    /// Chart height in rows
    #[arg(long, default_value_t = DEFAULT_CHART_HEIGHT)]
    pub height: usize,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub target: ProductArgs,

    /// Number of sequential comparison rounds
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: u32,

    /// Print each round's report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute CLI command
pub async fn execute(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Commands::Products => list_products(&config),
        Commands::View(args) => view(&config, args).await,
        Commands::Trends(args) => trends(&config, args).await,
        Commands::Compare(args) => compare(&config, args).await,
    }
}

fn build_scraper(config: &AppConfig) -> Result<ProductScraper> {
    let fetcher = HttpClient::from_settings(&config.http).context("Failed to build HTTP client")?;
    let extractor = ProductPageParser::with_config(&config.selectors).context("Failed to build product page parser")?;
    Ok(ProductScraper::new(Arc::new(fetcher), Arc::new(extractor)))
}

/// Dashboard over the configured catalog, with `--url` overrides applied
fn build_dashboard(config: &AppConfig, target: &ProductArgs) -> Result<Dashboard> {
    let mut dashboard = Dashboard::with_catalog(build_scraper(config)?, &config.products);
    if !target.urls.is_empty() {
        dashboard.add_product(&target.product, target.urls.clone());
    }
    Ok(dashboard)
}

/// Pages of `target.product`: the `--url` list when given, else the catalog entry
fn resolve_urls(config: &AppConfig, target: &ProductArgs) -> PriceWatchResult<Vec<String>> {
    if !target.urls.is_empty() {
        return Ok(target.urls.clone());
    }
    config
        .product(&target.product)
        .map(|entry| entry.urls.clone())
        .ok_or_else(|| PriceWatchError::unknown_product(&target.product))
}

fn list_products(config: &AppConfig) -> Result<()> {
    if config.products.is_empty() {
        println!("No products configured");
        return Ok(());
    }

    let mut products: Vec<&ProductTarget> = config.products.iter().collect();
    products.sort_by(|a, b| a.name.cmp(&b.name));
    for product in products {
        println!("{} ({} page(s))", product.name, product.urls.len());
        for url in &product.urls {
            println!("  {url}");
        }
    }
    Ok(())
}

async fn view(config: &AppConfig, args: ProductArgs) -> Result<()> {
    let dashboard = build_dashboard(config, &args)?;
    let records = dashboard.view_scraped_data(&args.product).await?;

    info!("Scraped {} record(s) for '{}'", records.len(), args.product);
    for record in &records {
        println!("{}", render_record(record));
    }
    Ok(())
}

async fn trends(config: &AppConfig, args: TrendsArgs) -> Result<()> {
    let dashboard = build_dashboard(config, &args.target)?;
    let prices = dashboard.pricing_trends(&args.target.product).await?;

    let title = format!("Pricing trends for {}", args.target.product);
    print!("{}", render_trend_chart(&title, &prices, args.height));
    Ok(())
}

async fn compare(config: &AppConfig, args: CompareArgs) -> Result<()> {
    let product = args.target.product.as_str();
    let urls = resolve_urls(config, &args.target)?;

    let notifier = notifier_from_config(&config.alert).context("Failed to build notifier")?;
    let analyzer = PricingAnalyzer::with_threshold(config.alert.alert_threshold);
    let mut comparator = PriceComparator::new(build_scraper(config)?, Arc::from(notifier), analyzer)
        .with_subject(config.alert.subject.clone());

    for round in 1..=args.rounds {
        let report = comparator.compare_detailed(product, &urls).await?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            continue;
        }

        println!("Round {round}/{}", args.rounds);
        print!("{}", render_summary(product, &report.summary, report.strategy));
        match &report.alert {
            AlertStatus::NotTriggered => println!("  alert: not triggered"),
            AlertStatus::Sent => println!("  alert: sent"),
            AlertStatus::Failed(reason) => println!("  alert: failed ({reason})"),
        }
        println!();
    }

    if args.json {
        return Ok(());
    }

    let title = format!("Price history for {product}");
    print!(
        "{}",
        render_trend_chart(&title, comparator.history().history(product), DEFAULT_CHART_HEIGHT)
    );
    Ok(())
}
