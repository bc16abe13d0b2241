//! Landmass boundary regions
//!
//! Turns the Natural Earth country and minor-island collections into flat
//! lists of [`BoundaryRegion`] sampling units, and serves them from a
//! time-expiring cache ([`index::BoundaryIndex`]).

pub mod dataset;
pub mod fetch;
pub mod index;

use crate::constants::geo;
use crate::geom::{Bounds, Polygon};
use dataset::{Feature, FeatureCollection, Geometry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One sampling unit: a bounding box, optional real polygon geometry and
/// country identity
///
/// A multi-polygon country is split into one region per constituent
/// polygon so that a country made of scattered islands is not treated as
/// one region with a disproportionately large combined bounding box.
#[derive(Debug, Clone)]
pub struct BoundaryRegion {
    /// Validated bounding box
    pub bounds: Bounds,
    /// Real polygon geometry; empty for synthetic regions
    pub polygons: Vec<Polygon>,
    /// Sampling-weight multiplier flag for the minor-islands collection
    pub is_minor_island: bool,
    /// Country name from the dataset (`NAME`), may be empty
    pub country_name: String,
    /// ISO alpha-3 code from the dataset (`ISO_A3`), may be empty
    pub country_code: String,
}

impl BoundaryRegion {
    /// The guaranteed fallback region covering the whole sampled world
    pub fn world_fallback() -> Self {
        Self {
            bounds: Bounds::world(),
            polygons: Vec::new(),
            is_minor_island: false,
            country_name: String::new(),
            country_code: String::new(),
        }
    }

    /// Build a synthetic single-polygon region from a preference rectangle
    ///
    /// Country identity is left empty so all preference regions fall into
    /// one bucket and area weighting alone governs selection among them.
    pub fn from_preference(pref: &PreferenceRegion) -> Self {
        Self {
            bounds: pref.bounds,
            polygons: vec![Polygon::rectangle(pref.bounds)],
            is_minor_island: false,
            country_name: String::new(),
            country_code: String::new(),
        }
    }

    /// Sum of true polygon areas, or `None` when the region carries no
    /// usable polygon geometry
    pub fn polygon_area(&self) -> Option<f64> {
        if self.polygons.is_empty() {
            return None;
        }
        Some(self.polygons.iter().map(Polygon::area).sum())
    }
}

/// A caller-supplied preference rectangle with an opaque label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceRegion {
    /// Free-text label; opaque to the engine
    #[serde(default)]
    pub label: String,
    /// The rectangle itself
    #[serde(flatten)]
    pub bounds: Bounds,
}

/// Extract one [`BoundaryRegion`] per polygon from a parsed collection
///
/// Features with missing, unsupported or degenerate geometry are skipped,
/// as are regions failing bounds validation or the polar exclusion.
pub fn regions_from_collection(
    collection: &FeatureCollection,
    is_minor_island: bool,
) -> Vec<BoundaryRegion> {
    let mut regions = Vec::new();
    let mut skipped = 0usize;

    for feature in &collection.features {
        let polygons = feature_polygons(feature);
        for rings in polygons {
            let Ok(polygon) = Polygon::from_rings(rings) else {
                skipped += 1;
                continue;
            };
            let Ok(bounds) = polygon.bounds() else {
                skipped += 1;
                continue;
            };
            // Antarctica and sub-polar fragments carry no imagery
            if bounds.north < geo::POLAR_CUTOFF_LAT {
                skipped += 1;
                continue;
            }
            regions.push(BoundaryRegion {
                bounds,
                polygons: vec![polygon],
                is_minor_island,
                country_name: feature.properties.name.clone().unwrap_or_default(),
                country_code: feature.properties.iso_a3.clone().unwrap_or_default(),
            });
        }
    }

    debug!(
        regions = regions.len(),
        skipped, is_minor_island, "extracted boundary regions"
    );
    regions
}

/// Flatten a feature's geometry into per-polygon ring lists
fn feature_polygons(feature: &Feature) -> Vec<Vec<Vec<[f64; 2]>>> {
    match &feature.geometry {
        Some(Geometry::Polygon { coordinates }) => vec![coordinates.clone()],
        Some(Geometry::MultiPolygon { coordinates }) => coordinates.clone(),
        Some(Geometry::Unsupported) | None => Vec::new(),
    }
}
