//! Boundary index cache
//!
//! Builds the flat region list from the boundary datasets and serves it
//! from a time-expiring cache. Many readers share the fast path; rebuilds
//! take the write lock and re-check validity so concurrent misses
//! collapse into a single rebuild.

use crate::boundary::dataset::BoundaryDataset;
use crate::boundary::{regions_from_collection, BoundaryRegion};
use crate::constants::cache::REGION_CACHE_TTL_SECS;
use crate::error::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{info, warn};

struct CacheState {
    regions: Arc<Vec<BoundaryRegion>>,
    built_at: Option<Instant>,
}

impl CacheState {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.built_at.is_some_and(|t| t.elapsed() < ttl)
    }
}

/// Process-wide cache of landmass boundary regions
pub struct BoundaryIndex {
    dataset: Box<dyn BoundaryDataset>,
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl BoundaryIndex {
    /// Create an index with the default 1-hour expiry
    pub fn new(dataset: Box<dyn BoundaryDataset>) -> Self {
        Self::with_ttl(dataset, Duration::from_secs(REGION_CACHE_TTL_SECS))
    }

    /// Create an index with a custom expiry window
    pub fn with_ttl(dataset: Box<dyn BoundaryDataset>, ttl: Duration) -> Self {
        Self {
            dataset,
            ttl,
            state: RwLock::new(CacheState {
                regions: Arc::new(Vec::new()),
                built_at: None,
            }),
        }
    }

    /// Get the cached region list, rebuilding it if expired or empty
    ///
    /// The returned `Arc` is the cache's own list; two calls within the
    /// expiry window return the same allocation without touching the
    /// dataset provider.
    pub async fn regions(&self) -> Result<Arc<Vec<BoundaryRegion>>> {
        {
            let state = self.state.read().await;
            if state.is_fresh(self.ttl) {
                return Ok(Arc::clone(&state.regions));
            }
        }

        let mut state = self.state.write().await;
        // Another task may have rebuilt while we waited for the write lock
        if state.is_fresh(self.ttl) {
            return Ok(Arc::clone(&state.regions));
        }

        let regions = Arc::new(self.build()?);
        state.regions = Arc::clone(&regions);
        state.built_at = Some(Instant::now());
        Ok(regions)
    }

    /// Drop the cached list so the next call rebuilds
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.regions = Arc::new(Vec::new());
        state.built_at = None;
    }

    /// Summary statistics over the current region list
    pub async fn stats(&self) -> Result<IndexStats> {
        let regions = self.regions().await?;
        Ok(IndexStats::from_regions(&regions))
    }

    fn build(&self) -> Result<Vec<BoundaryRegion>> {
        let countries = self.dataset.load_countries().map_err(|e| {
            Error::IndexUnavailable(format!("primary boundary dataset failed: {}", e))
        })?;
        let mut regions = regions_from_collection(&countries, false);
        let country_count = regions.len();

        // The minor-islands collection is best-effort
        match self.dataset.load_minor_islands() {
            Ok(islands) => {
                regions.extend(regions_from_collection(&islands, true));
            }
            Err(e) => {
                warn!(error = %e, "minor islands dataset unavailable, continuing without it");
            }
        }

        if regions.is_empty() {
            return Err(Error::IndexUnavailable(
                "no usable regions after filtering".to_string(),
            ));
        }

        info!(
            total = regions.len(),
            countries = country_count,
            minor_islands = regions.len() - country_count,
            "boundary index built"
        );
        Ok(regions)
    }
}

/// Aggregate information about the indexed regions
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub total_regions: usize,
    pub minor_island_regions: usize,
    pub distinct_countries: usize,
    pub total_area: f64,
    pub min_area: f64,
    pub max_area: f64,
}

impl IndexStats {
    fn from_regions(regions: &[BoundaryRegion]) -> Self {
        let mut countries = std::collections::BTreeSet::new();
        let mut minor = 0usize;
        let mut total_area = 0.0;
        let mut min_area = f64::INFINITY;
        let mut max_area: f64 = 0.0;

        for region in regions {
            if region.is_minor_island {
                minor += 1;
            }
            if !region.country_code.is_empty() {
                countries.insert(region.country_code.as_str());
            }
            let area = region.polygon_area().unwrap_or_else(|| region.bounds.area());
            total_area += area;
            min_area = min_area.min(area);
            max_area = max_area.max(area);
        }

        Self {
            total_regions: regions.len(),
            minor_island_regions: minor,
            distinct_countries: countries.len(),
            total_area,
            min_area: if regions.is_empty() { 0.0 } else { min_area },
            max_area,
        }
    }
}
