//! roam-point: Random Real-World Location Generator
//!
//! A library and CLI tool for generating random geographic coordinates
//! that lie on actual land and are validated against an external
//! street-level imagery oracle.
//!
//! ## Features
//!
//! - Landmass boundary index over Natural Earth data, with a
//!   time-expiring concurrent cache
//! - Two-stage weighted sampling: uniform across countries, area-weighted
//!   within a country
//! - Rejection sampling inside real polygon geometry with hole support
//! - Progressive-radius imagery search with a guaranteed fallback
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roam_point::boundary::dataset::FileDataset;
//! use roam_point::boundary::index::BoundaryIndex;
//! use roam_point::oracle::streetview::StreetViewOracle;
//! use roam_point::pipeline::LocationPipeline;
//!
//! # async fn example() -> roam_point::Result<()> {
//! let index = BoundaryIndex::new(Box::new(FileDataset::new("data/maps")));
//! let oracle = StreetViewOracle::new("api-key")?;
//! let pipeline = LocationPipeline::new(index, oracle);
//!
//! // Global sampling: always returns a validated location
//! let location = pipeline.generate(&[]).await?;
//! println!("({}, {}) -> {}", location.latitude, location.longitude, location.imagery_id);
//! # Ok(())
//! # }
//! ```

pub mod boundary;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod geom;
pub mod oracle;
pub mod pipeline;
pub mod sampler;
pub mod server;

// Re-export commonly used types
pub use boundary::{BoundaryRegion, PreferenceRegion};
pub use config::Config;
pub use error::{Error, Result};
pub use geom::{Bounds, Polygon, Ring};
pub use pipeline::{LocationPipeline, ValidatedLocation};
