//! pricelist-preview - group a saved price list without calling the upstream API
//!
//! Usage: pricelist-preview <FILE> [--format json|text] [--all]

use anyhow::{Context, Result};
use clap::Parser;
use pricelist_common::config::TomlConfig;
use pricelist_common::{group, VisibilityFilter};
use pricelist_server::preview::{load_records, render, PreviewFormat};
use std::path::PathBuf;
use tracing::info;

/// Command-line arguments for pricelist-preview
#[derive(Parser, Debug)]
#[command(name = "pricelist-preview")]
#[command(about = "Preview the grouped price list from a saved JSON file")]
#[command(version)]
struct Args {
    /// JSON file: array of products or {"data": [...]} payload
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: PreviewFormat,

    /// Show codes normally hidden from the text tables
    #[arg(long)]
    all: bool,

    /// TOML config file supplying the visibility filter
    #[arg(short, long, env = "PRICELIST_CONFIG", default_value = "pricelist.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricelist_server=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let records = load_records(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let grouped = group(&records);
    info!(
        records = records.len(),
        products = grouped.product_count(),
        "Grouped saved price list"
    );

    let filter = if args.all || args.format == PreviewFormat::Json {
        VisibilityFilter::none()
    } else {
        TomlConfig::load_optional(&args.config)
            .context("Failed to load config file")?
            .visibility
            .unwrap_or_default()
    };

    print!("{}", render(&grouped, args.format, &filter)?);
    Ok(())
}
