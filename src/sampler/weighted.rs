//! Two-stage weighted region selection
//!
//! Stage one picks a country uniformly at random, so a country with
//! thousands of island regions cannot drown out a country with a single
//! large one. Stage two picks a region within that country with
//! probability proportional to its true polygon area.

use crate::boundary::BoundaryRegion;
use crate::constants::sampling::{MINOR_ISLAND_WEIGHT, UNKNOWN_COUNTRY};
use rand::Rng;
use std::collections::BTreeMap;

/// Select one region from the candidate set
///
/// Empty input returns the world fallback region; a single candidate is
/// returned directly without randomness.
pub fn select_region<R: Rng + ?Sized>(rng: &mut R, regions: &[BoundaryRegion]) -> BoundaryRegion {
    match regions {
        [] => BoundaryRegion::world_fallback(),
        [only] => only.clone(),
        _ => {
            let buckets = group_by_country(regions);
            let bucket = if buckets.len() == 1 {
                buckets.into_values().next().unwrap_or_default()
            } else {
                let keys: Vec<&str> = buckets.keys().copied().collect();
                let chosen = keys[rng.gen_range(0..keys.len())];
                buckets.get(chosen).cloned().unwrap_or_default()
            };
            match pick_by_area(rng, &bucket) {
                Some(region) => region.clone(),
                None => BoundaryRegion::world_fallback(),
            }
        }
    }
}

/// Bucket key: ISO code, then name, then the shared unknown bucket
fn bucket_key(region: &BoundaryRegion) -> &str {
    if !region.country_code.is_empty() {
        &region.country_code
    } else if !region.country_name.is_empty() {
        &region.country_name
    } else {
        UNKNOWN_COUNTRY
    }
}

/// BTreeMap keeps bucket order deterministic for seeded draws
fn group_by_country<'a>(
    regions: &'a [BoundaryRegion],
) -> BTreeMap<&'a str, Vec<&'a BoundaryRegion>> {
    let mut buckets: BTreeMap<&str, Vec<&BoundaryRegion>> = BTreeMap::new();
    for region in regions {
        buckets.entry(bucket_key(region)).or_default().push(region);
    }
    buckets
}

/// Sampling weight: true polygon area when geometry exists, bounding-box
/// area otherwise, boosted for minor islands
fn region_weight(region: &BoundaryRegion) -> f64 {
    let area = region
        .polygon_area()
        .unwrap_or_else(|| region.bounds.area());
    if region.is_minor_island {
        area * MINOR_ISLAND_WEIGHT
    } else {
        area
    }
}

/// Cumulative-weight draw within one bucket
fn pick_by_area<'a, R: Rng + ?Sized>(
    rng: &mut R,
    bucket: &[&'a BoundaryRegion],
) -> Option<&'a BoundaryRegion> {
    match bucket {
        [] => None,
        [only] => Some(only),
        _ => {
            let weights: Vec<f64> = bucket.iter().map(|r| region_weight(r)).collect();
            let total: f64 = weights.iter().sum();
            if total <= 0.0 {
                // All-degenerate bucket: uniform choice
                return Some(bucket[rng.gen_range(0..bucket.len())]);
            }

            let mut target = rng.gen_range(0.0..total);
            for (region, weight) in bucket.iter().zip(&weights) {
                if target < *weight {
                    return Some(region);
                }
                target -= weight;
            }
            Some(bucket[bucket.len() - 1])
        }
    }
}
