//! Generate command handler
//!
//! Generates validated random locations from the command line.

use crate::boundary::dataset::FileDataset;
use crate::boundary::index::BoundaryIndex;
use crate::boundary::{fetch, PreferenceRegion};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geom::Bounds;
use crate::oracle::streetview::StreetViewOracle;
use crate::pipeline::LocationPipeline;
use clap::Args;
use std::time::Duration;

/// Generate command arguments
#[derive(Args)]
pub struct GenerateArgs {
    /// Number of locations to generate
    #[arg(long, short = 'n', default_value = "1")]
    pub count: usize,

    /// Preference rectangle as "north,south,east,west[:label]"; repeatable
    #[arg(long, short = 'b')]
    pub bounds: Vec<String>,

    /// Google Maps API key (overrides config)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Output as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Skip downloading missing dataset files
    #[arg(long)]
    pub no_fetch: bool,
}

/// Run the generate command
pub async fn run(args: GenerateArgs) -> Result<()> {
    let config = Config::load()?;

    let api_key = args
        .api_key
        .unwrap_or_else(|| config.oracle.api_key.clone());
    if api_key.is_empty() {
        eprintln!("Error: No API key configured. Set oracle.api_key or pass --api-key");
        std::process::exit(1);
    }

    let preferences = parse_preferences(&args.bounds)?;

    let data_dir = config.dataset_dir()?;
    // Preference-based sampling never touches the dataset
    if preferences.is_empty() && !args.no_fetch && config.dataset.auto_fetch {
        fetch::ensure_datasets(&data_dir).await?;
    }

    let index = BoundaryIndex::new(Box::new(FileDataset::new(data_dir)));
    let oracle =
        StreetViewOracle::with_timeout(api_key, Duration::from_secs(config.oracle.timeout_secs))?;
    let pipeline = LocationPipeline::new(index, oracle);

    for i in 0..args.count {
        let location = pipeline.generate(&preferences).await?;

        if args.json {
            println!("{}", serde_json::to_string(&location)?);
        } else {
            println!(
                "{:>3}. ({:.6}, {:.6})  imagery={}  tier={:?}",
                i + 1,
                location.latitude,
                location.longitude,
                location.imagery_id,
                location.tier,
            );
        }
    }

    Ok(())
}

/// Parse "north,south,east,west[:label]" into a preference region
fn parse_preferences(specs: &[String]) -> Result<Vec<PreferenceRegion>> {
    specs
        .iter()
        .map(|spec| {
            let (coords, label) = match spec.split_once(':') {
                Some((coords, label)) => (coords, label.to_string()),
                None => (spec.as_str(), String::new()),
            };

            let parts: Vec<f64> = coords
                .split(',')
                .map(|p| {
                    p.trim().parse().map_err(|_| {
                        Error::Config(format!("Invalid bounds component in '{}'", spec))
                    })
                })
                .collect::<Result<_>>()?;

            let [north, south, east, west] = parts.as_slice() else {
                return Err(Error::Config(format!(
                    "Bounds '{}' must have exactly 4 components: north,south,east,west",
                    spec
                )));
            };

            Ok(PreferenceRegion {
                label,
                bounds: Bounds::new(*north, *south, *east, *west)?,
            })
        })
        .collect()
}
