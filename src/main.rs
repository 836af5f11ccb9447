mod aha;
mod cli;
mod config;
mod groom;
mod model;
mod output;
mod summary;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::summary::Summary;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let args = cli::parse_args(&raw_args)?;
    if args.help {
        cli::print_help();
        return Ok(());
    }

    let config = config::load_config()?;

    let base_url = match args.base_url.or_else(|| config.aha_base_url()) {
        Some(url) => url,
        None => cli::prompt("Enter your Aha! base URL (e.g., https://yourcompany.aha.io): ")?,
    };
    if base_url.trim().is_empty() {
        bail!("An Aha! base URL is required");
    }

    let product_id = match args.product_id {
        Some(id) => id,
        None => cli::prompt("Enter your Aha! product ID: ")?,
    };
    if product_id.trim().is_empty() {
        bail!("A product ID is required");
    }

    let client = aha::AhaClient::new(&base_url, config.aha_api_key()).context(
        "Aha! access is not configured. Add api_key under [aha] in ~/.groom/config.toml or set AHA_API_KEY",
    )?;

    if !args.json {
        println!("Fetching features for product: {product_id}");
    }
    let per_page = args.page_size.unwrap_or(aha::DEFAULT_PER_PAGE);
    let features = client
        .fetch_features(&product_id, per_page)
        .await
        .context("Failed to fetch features from Aha!")?;
    debug!("fetched {} features", features.len());
    debug!("raw features: {features:?}");

    if features.is_empty() {
        if args.json {
            output::print_json(&output::JsonReport {
                features: &[],
                summary: output::SummaryReport {
                    source: "keywords",
                    text: String::new(),
                },
            })?;
        } else {
            println!("No features found for product {product_id}.");
        }
        return Ok(());
    }

    let groomed = groom::groom_features(&features);

    let openai_key = if args.no_ai {
        None
    } else {
        config.openai_api_key()
    };
    let summary = summary::summarize(&features, openai_key.as_deref()).await;

    if args.json {
        let source = match &summary {
            Summary::Generated(_) => "openai",
            Summary::Failed(_) => "error",
            Summary::Unavailable => "keywords",
        };
        let text = summary
            .into_text()
            .unwrap_or_else(|| summary::summarize_local(&features));
        output::print_json(&output::JsonReport {
            features: &groomed,
            summary: output::SummaryReport { source, text },
        })?;
    } else {
        output::print_table(output::FEATURE_HEADERS, &output::feature_rows(&groomed));
        match summary.into_text() {
            Some(text) => println!("\nAI Product Summary: {text}"),
            None => println!(
                "\nProduct Summary (Top Keywords): {}",
                summary::summarize_local(&features)
            ),
        }
    }

    Ok(())
}
