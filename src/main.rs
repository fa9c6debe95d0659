use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use steam_reviews::{
    info_time, process::run, FetchOptions, Result, SteamClient, DEFAULT_JOBS, DEFAULT_LIMIT,
    DEFAULT_RATE_DELAY_MS, FILE_PATH,
};

/// Downloads the first N reviews for a list of Steam app ids into one CSV file
#[derive(Parser, Debug)]
#[command(name = "steam-reviews")]
#[command(about = "Steam review scraper")]
struct Cli {
    /// One or more Steam app ids (e.g. 730 570)
    #[arg(long, required = true, num_args = 1..)]
    apps: Vec<u32>,

    /// Maximum reviews per app
    #[arg(long, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    limit: i64,

    /// Output CSV file path
    #[arg(long, default_value = FILE_PATH)]
    outfile: PathBuf,

    /// Pause between two requests for the same app, in milliseconds
    #[arg(long, default_value_t = DEFAULT_RATE_DELAY_MS)]
    rate_delay_ms: u64,

    /// How many apps to fetch at the same time. Each worker waits
    /// `rate-delay-ms * jobs` between its own requests, so the overall request rate stays the same
    #[arg(long, default_value_t = DEFAULT_JOBS)]
    jobs: usize,

    /// Base url of the store, handy for pointing at a local mirror [default: Steam store]
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let cli = Cli::parse();

    let client = match cli.base_url {
        Some(base_url) => SteamClient::with_base_url(base_url)?,
        None => SteamClient::new()?,
    };
    let opts = FetchOptions::new(cli.limit, Duration::from_millis(cli.rate_delay_ms), cli.jobs);
    run(&client, &cli.apps, &opts, &cli.outfile).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
