//! CLI commands implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::ProgressBar;

use crate::aggregate;
use crate::config::Config;
use crate::extract;
use crate::models::{Category, PageData, Product};
use crate::scrapers::HttpClient;
use crate::server;
use crate::utils::format_price;

#[derive(Parser)]
#[command(name = "vegprice")]
#[command(about = "Vegetable price scraper and per-jin price normalizer")]
#[command(version)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch current prices for all categories (or one)
    Fetch {
        /// Only fetch this category id
        #[arg(short, long)]
        category: Option<String>,
        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Fetch one category page and show container diagnostics
    Debug {
        /// Category id to inspect (default: the first configured one)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Start the web server
    Serve {
        /// Bind address: port, host, or host:port
        #[arg(short, long, default_value = "3030")]
        bind: String,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Commands::Fetch { category, json } => cmd_fetch(&config, category.as_deref(), json).await,
        Commands::Debug { category } => cmd_debug(&config, category.as_deref()).await,
        Commands::Serve { bind } => cmd_serve(config, &bind).await,
    }
}

/// Fetch and print prices.
async fn cmd_fetch(config: &Config, category: Option<&str>, json: bool) -> anyhow::Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Fetching category pages...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let page = match category {
        None => aggregate::fetch_all_categories(config).await,
        Some(id) => {
            let source = config
                .category(id)
                .ok_or_else(|| anyhow::anyhow!("unknown category: {id}"))?
                .clone();
            let client = HttpClient::new(&config.user_agent, &config.cookie, config.timeout())?;
            let fetch = aggregate::fetch_category(client, source).await;
            if let Some(diagnostic) = &fetch.diagnostic {
                eprintln!("  {} {}", style("✗").red(), diagnostic);
            }
            PageData {
                categories: vec![Category::new(
                    fetch.source.id,
                    fetch.source.name,
                    fetch.products,
                )],
            }
        }
    };

    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.product_count() == 0 {
        println!("{} No products found", style("✗").red());
        return Ok(());
    }

    for category in &page.categories {
        println!(
            "\n{} {} ({})",
            style("→").cyan(),
            style(&category.name).bold(),
            category.products.len()
        );
        for product in &category.products {
            print_product(product);
        }
    }
    println!(
        "\n{} {} products total",
        style("✓").green(),
        page.product_count()
    );

    Ok(())
}

fn print_product(product: &Product) {
    let normalized = if product.price_per_jin > 0.0 {
        format!("{}{}", format_price(product.price_per_jin), product.unit)
    } else {
        "无法计算".to_string()
    };
    println!(
        "  {}  {}元  [{}]  {}",
        product.name,
        format_price(product.price),
        if product.spec.is_empty() {
            "-"
        } else {
            &product.spec
        },
        normalized
    );
}

/// Fetch one page and print container diagnostics.
async fn cmd_debug(config: &Config, category: Option<&str>) -> anyhow::Result<()> {
    let source = match category {
        Some(id) => config
            .category(id)
            .ok_or_else(|| anyhow::anyhow!("unknown category: {id}"))?,
        None => &config.categories[0],
    };

    println!("{} Target URL: {}", style("→").cyan(), source.url);
    println!("  timeout: {}s", config.timeout);
    println!("  retry count: {} (not applied)", config.retry_count);

    let client = HttpClient::new(&config.user_agent, &config.cookie, config.timeout())?;
    let html = client.get_text(&source.url).await?;
    println!("  page length: {} chars", html.len());

    let report = extract::debug_report(&html);
    if !report.container_found {
        println!(
            "{} Container '{}' not found",
            style("✗").red(),
            extract::CONTAINER_CLASS
        );
        let similar = extract::similar_classes(&html, "pic");
        if !similar.is_empty() {
            println!("  classes containing 'pic':");
            for (tag, class) in similar {
                println!("    <{tag} class=\"{class}\">");
            }
        }
        return Ok(());
    }

    println!(
        "{} Container found with {} child entries",
        style("✓").green(),
        report.child_count
    );

    let doc = scraper::Html::parse_document(&html);
    if let Some(container) =
        extract::find_container(&doc, extract::CONTAINER_TAG, extract::CONTAINER_CLASS)
    {
        for entry in extract::child_entries(container).take(3) {
            let product = extract::build_product(entry);
            println!("\n  name: '{}'", product.name);
            println!("  price: {}元", format_price(product.price));
            println!("  spec: '{}'", product.spec);
            println!(
                "  normalized: {}{}",
                format_price(product.price_per_jin),
                product.unit
            );
            println!("  raw text: '{}'", extract::fields::text_content(entry));
        }
    }

    Ok(())
}

/// Start the web server.
async fn cmd_serve(config: Config, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind)?;

    println!(
        "{} Starting vegprice server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    server::serve(config, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3030" -> 127.0.0.1:3030
/// - Just a host: "0.0.0.0" -> 0.0.0.0:3030
/// - Host and port: "0.0.0.0:3030" -> 0.0.0.0:3030
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    Ok((bind.to_string(), 3030))
}
