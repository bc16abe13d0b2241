//! Status command handler
//!
//! Shows dataset readiness and boundary index statistics.

use crate::boundary::dataset::FileDataset;
use crate::boundary::index::BoundaryIndex;
use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Build the boundary index and print region statistics
    #[arg(long)]
    pub index: bool,

    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    println!("roam-point v{}", env!("CARGO_PKG_VERSION"));
    println!();

    // Check server status if requested
    if args.server {
        check_server_status(&config).await;
    }

    let data_dir = config.dataset_dir()?;
    let dataset = FileDataset::new(&data_dir);

    println!("Dataset directory: {}", data_dir.display());
    println!(
        "  countries:     {}",
        file_status(&dataset.countries_path())
    );
    println!(
        "  minor islands: {}",
        file_status(&dataset.minor_islands_path())
    );

    if config.oracle.api_key.is_empty() {
        println!("Oracle: API key NOT configured");
    } else {
        println!("Oracle: API key configured");
    }

    if args.index {
        println!();
        println!("Building boundary index...");
        let index = BoundaryIndex::new(Box::new(dataset));
        match index.stats().await {
            Ok(stats) => {
                println!("  regions:           {}", stats.total_regions);
                println!("  minor islands:     {}", stats.minor_island_regions);
                println!("  distinct countries: {}", stats.distinct_countries);
                println!("  total area:        {:.1} deg^2", stats.total_area);
                println!(
                    "  area range:        {:.6} - {:.1} deg^2",
                    stats.min_area, stats.max_area
                );
            }
            Err(e) => {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}

fn file_status(path: &std::path::Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) => format!("present ({} KB)", meta.len() / 1024),
        Err(_) => "missing".to_string(),
    }
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
