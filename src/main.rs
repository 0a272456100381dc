use std::{path::PathBuf, process};

use clap::Parser;
use lixget::common::logger;
use lixget::configs::Config;
use lixget::lixstream::{self, LixClient, ResolvedVideo};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about = "Resolve a Lixstream video ID or share URL into a direct media URL")]
struct Cli {
    /// Video ID or share URL, e.g. https://lixstream.com/v/XyZ987
    input: String,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (config, config_path) = match Config::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    logger::init(config.logging.as_ref());
    match &config_path {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }

    let client = match LixClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            process::exit(1);
        }
    };

    match lixstream::resolve(&client, &cli.input).await {
        Ok(resolved) => {
            if let Err(e) = print_resolved(&resolved, cli.json) {
                error!("Failed to print result: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{}", e.status_message());
            error!("{}", e);
            process::exit(e.exit_code());
        }
    }
}

fn print_resolved(resolved: &ResolvedVideo, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(resolved)?);
        return Ok(());
    }

    if let Some(file) = resolved.primary_file() {
        println!("Title:     {}", file.display_name);
        println!("Duration:  {}", file.formatted_duration());
        println!("Size:      {} bytes", file.size);
        if !file.thumbnail.is_empty() {
            println!("Thumbnail: {}", file.thumbnail);
        }
    }
    println!("URL:       {}", resolved.asset.embed_url);
    Ok(())
}
