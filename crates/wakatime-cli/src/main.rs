// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wakatime_client::WakaTimeClient;
use wakatime_config::{load as load_config, ApiConfig};

/// Fetch WakaTime coding summaries for a date range and print them as JSON.
#[derive(Debug, Parser)]
#[command(name = "wakatime-cli", version)]
struct Args {
    /// First day of the range (YYYY-MM-DD).
    #[arg(long)]
    start: NaiveDate,

    /// Last day of the range (YYYY-MM-DD).
    #[arg(long)]
    end: NaiveDate,

    /// Only show time logged to this project.
    #[arg(long)]
    project: Option<String>,

    /// Comma-separated branch names.
    #[arg(long)]
    branches: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// API key; takes precedence over the configured one.
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    init_tracing(&config.telemetry.log_level);

    let client = build_client(&config.api, args.api_key.clone())?;
    let start = format_date(args.start);
    let end = format_date(args.end);
    info!(target: "cli", "fetching summaries from {} to {}", start, end);

    let summaries = client
        .get_summaries(&start, &end, args.project.as_deref(), args.branches.as_deref())
        .await?;

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_client(api: &ApiConfig, api_key: Option<String>) -> Result<WakaTimeClient> {
    let mut builder = WakaTimeClient::builder()
        .base_url(api.base_url.clone())
        .connect_timeout(Duration::from_secs(api.connect_timeout_secs))
        .timeout(Duration::from_secs(api.timeout_secs))
        .accept_invalid_certs(api.accept_invalid_certs);

    if let Some(key) = api_key.or_else(|| api.api_key.clone()) {
        builder = builder.api_key(key);
    }

    Ok(builder.build()?)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
