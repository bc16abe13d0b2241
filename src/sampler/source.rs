//! Candidate region selection
//!
//! Preference rectangles bypass the boundary index entirely; world
//! sampling draws from the full index.

use crate::boundary::index::BoundaryIndex;
use crate::boundary::{BoundaryRegion, PreferenceRegion};
use crate::error::Result;

/// Produce the candidate set of regions to sample from
///
/// Non-empty `preferences` yield one synthetic region per rectangle,
/// independent of the index. An empty list delegates to the boundary
/// index; its failure propagates so world-sampling callers can surface
/// `IndexUnavailable`.
pub async fn select_source(
    index: &BoundaryIndex,
    preferences: &[PreferenceRegion],
) -> Result<Vec<BoundaryRegion>> {
    if !preferences.is_empty() {
        return Ok(preferences
            .iter()
            .map(BoundaryRegion::from_preference)
            .collect());
    }

    let regions = index.regions().await?;
    Ok(regions.as_ref().clone())
}
