//! Point-in-region generation
//!
//! Rejection sampling against real polygon geometry, with a visible
//! bounding-box fallback when the region has no geometry or the attempt
//! budget runs out. Pure geometry plus a caller-supplied random source.

use crate::boundary::BoundaryRegion;
use crate::constants::sampling::REJECTION_ATTEMPTS;
use rand::Rng;
use serde::Serialize;

/// How the returned coordinate was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMethod {
    /// Rejection sampling hit inside real polygon geometry
    Polygon,
    /// Uniform draw inside a bounding box, either because the region has
    /// no geometry or because the attempt budget was exhausted
    BoundingBox,
}

/// A sampled coordinate with its provenance tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampledPoint {
    pub lat: f64,
    pub lng: f64,
    pub method: SampleMethod,
}

/// Draw a random coordinate inside the region
///
/// With polygon geometry, one polygon is chosen uniformly and up to
/// [`REJECTION_ATTEMPTS`] candidates are drawn from that polygon's own
/// bounding box, keeping the first that passes the containment test.
/// Exhaustion falls back to the *region's* bounding box, accepting a
/// small amount of water contamination rather than blocking generation.
pub fn sample_point<R: Rng + ?Sized>(rng: &mut R, region: &BoundaryRegion) -> SampledPoint {
    if region.polygons.is_empty() {
        let (lat, lng) = region.bounds.sample_uniform(rng);
        return SampledPoint {
            lat,
            lng,
            method: SampleMethod::BoundingBox,
        };
    }

    let polygon = &region.polygons[rng.gen_range(0..region.polygons.len())];

    // A polygon whose outer ring collapses to a line has no sampleable
    // bounding box of its own
    if let Ok(bounds) = polygon.bounds() {
        for _ in 0..REJECTION_ATTEMPTS {
            let (lat, lng) = bounds.sample_uniform(rng);
            if polygon.contains(lng, lat) {
                return SampledPoint {
                    lat,
                    lng,
                    method: SampleMethod::Polygon,
                };
            }
        }
    }

    let (lat, lng) = region.bounds.sample_uniform(rng);
    SampledPoint {
        lat,
        lng,
        method: SampleMethod::BoundingBox,
    }
}
