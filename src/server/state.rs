//! Server shared state
//!
//! Holds configuration and the location pipeline for the HTTP server.

use crate::boundary::dataset::FileDataset;
use crate::boundary::index::BoundaryIndex;
use crate::config::Config;
use crate::error::Result;
use crate::oracle::streetview::StreetViewOracle;
use crate::pipeline::LocationPipeline;
use std::time::Duration;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration the server was started with
    pub config: Config,

    /// The sampling and validation engine
    pub pipeline: LocationPipeline<StreetViewOracle>,
}

impl AppState {
    /// Create application state from configuration
    pub fn new(config: Config) -> Result<Self> {
        let dataset = FileDataset::new(config.dataset_dir()?);
        let index = BoundaryIndex::new(Box::new(dataset));
        let oracle = StreetViewOracle::with_timeout(
            config.oracle.api_key.clone(),
            Duration::from_secs(config.oracle.timeout_secs),
        )?;

        Ok(Self {
            config,
            pipeline: LocationPipeline::new(index, oracle),
        })
    }
}
