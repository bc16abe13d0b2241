//! Location generation pipeline
//!
//! Wires the region selector, weighted sampler, point generator and
//! validity resolver into the single operation callers use: produce a
//! validated location, always, as long as the boundary index can be built
//! (and unconditionally when preference rectangles are supplied).

use crate::boundary::index::BoundaryIndex;
use crate::boundary::PreferenceRegion;
use crate::error::{Error, Result};
use crate::oracle::resolver::{find_valid_point, SearchTier};
use crate::oracle::ImageryOracle;
use crate::sampler::{sample_point, select_region, select_source, SampleMethod};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

/// A validated location: the oracle's coordinate and imagery identifier
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Opaque imagery identifier from the oracle, or the fixed-fallback
    /// sentinel
    pub imagery_id: String,
    /// Which search tier validated the point
    pub tier: SearchTier,
    /// Whether the candidate came from polygon geometry or a bounding box
    pub sample_method: SampleMethod,
    pub generated_at: DateTime<Utc>,
}

/// The geospatial sampling and validation engine
pub struct LocationPipeline<O: ImageryOracle> {
    index: BoundaryIndex,
    oracle: O,
}

impl<O: ImageryOracle> LocationPipeline<O> {
    /// Create a pipeline over a boundary index and an imagery oracle
    pub fn new(index: BoundaryIndex, oracle: O) -> Self {
        Self { index, oracle }
    }

    /// The underlying boundary index
    pub fn index(&self) -> &BoundaryIndex {
        &self.index
    }

    /// Generate one validated location
    ///
    /// Never fails for "no imagery found": the resolver's tier sequence is
    /// total. The only error path is `IndexUnavailable` when sampling
    /// globally and the boundary index cannot be built.
    pub async fn generate(
        &self,
        preferences: &[PreferenceRegion],
    ) -> Result<ValidatedLocation> {
        for pref in preferences {
            pref.bounds.validate().map_err(|e| match e {
                Error::InvalidBounds(msg) => {
                    Error::InvalidBounds(format!("preference '{}': {}", pref.label, msg))
                }
                other => other,
            })?;
        }

        let candidates = select_source(&self.index, preferences).await?;

        // Sampling is pure and synchronous; the RNG never crosses an await
        let sampled = {
            let mut rng = StdRng::from_entropy();
            let region = select_region(&mut rng, &candidates);
            sample_point(&mut rng, &region)
        };

        let has_narrow_preference = !preferences.is_empty();
        let resolved =
            find_valid_point(&self.oracle, sampled.lat, sampled.lng, has_narrow_preference).await;

        info!(
            candidate_lat = sampled.lat,
            candidate_lng = sampled.lng,
            final_lat = resolved.lat,
            final_lng = resolved.lng,
            tier = ?resolved.tier,
            method = ?sampled.method,
            has_narrow_preference,
            "location generated"
        );

        Ok(ValidatedLocation {
            latitude: resolved.lat,
            longitude: resolved.lng,
            imagery_id: resolved.imagery_id,
            tier: resolved.tier,
            sample_method: sampled.method,
            generated_at: Utc::now(),
        })
    }
}
