//! Progressive-radius validity search
//!
//! A finite state machine over an ordered tier list: ascending search
//! radii, one unbounded query, then a fixed known-good coordinate. The
//! final tier makes the search total; reaching it is the signal condition
//! for an operational alert, logged at error level.

use crate::constants::search::{
    FALLBACK_IMAGERY_ID, FALLBACK_LAT, FALLBACK_LNG, GLOBAL_RADII_M, PREFERENCE_RADII_M,
};
use crate::oracle::ImageryOracle;
use serde::Serialize;
use tracing::{debug, error, warn};

/// One step of the escalation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTier {
    /// Oracle query bounded to a radius in meters
    Radius(u32),
    /// Oracle query with no radius constraint
    Unbounded,
    /// The hardcoded known-good coordinate; terminal, always succeeds
    Fixed,
}

/// A coordinate validated against the imagery oracle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPoint {
    pub lat: f64,
    pub lng: f64,
    /// The oracle's imagery identifier, or the sentinel for the fixed tier
    pub imagery_id: String,
    /// Which tier produced the hit
    pub tier: SearchTier,
}

/// The ordered tier sequence for a search
///
/// Narrow preference implies tight geographic intent, so the sequence
/// starts at 100 m; global sampling starts at 10 km. Both end with the
/// unbounded query and the fixed terminal tier.
pub fn search_tiers(has_narrow_preference: bool) -> Vec<SearchTier> {
    let radii: &[u32] = if has_narrow_preference {
        &PREFERENCE_RADII_M
    } else {
        &GLOBAL_RADII_M
    };
    let mut tiers: Vec<SearchTier> = radii.iter().copied().map(SearchTier::Radius).collect();
    tiers.push(SearchTier::Unbounded);
    tiers.push(SearchTier::Fixed);
    tiers
}

/// Find a validated point near the candidate coordinate
///
/// Tries each tier in order and returns the first hit's oracle-reported
/// coordinate and imagery id. A transport error at a tier is logged and
/// treated as a miss for that tier; no same-radius retry is attempted.
/// Never fails: the fixed terminal tier guarantees a result.
pub async fn find_valid_point<O: ImageryOracle>(
    oracle: &O,
    lat: f64,
    lng: f64,
    has_narrow_preference: bool,
) -> ResolvedPoint {
    for tier in search_tiers(has_narrow_preference) {
        let radius_m = match tier {
            SearchTier::Radius(r) => Some(r),
            SearchTier::Unbounded => None,
            SearchTier::Fixed => break,
        };

        match oracle.find_imagery(lat, lng, radius_m).await {
            Ok(Some(hit)) => {
                debug!(?tier, hit_lat = hit.lat, hit_lng = hit.lng, "imagery found");
                return ResolvedPoint {
                    lat: hit.lat,
                    lng: hit.lng,
                    imagery_id: hit.imagery_id,
                    tier,
                };
            }
            Ok(None) => {
                debug!(?tier, lat, lng, "imagery miss, escalating");
            }
            Err(e) => {
                // The remaining tiers and the fixed terminal tier absorb
                // oracle unavailability
                warn!(?tier, error = %e, "oracle error treated as miss");
            }
        }
    }

    error!(
        lat,
        lng, "all imagery search tiers missed, returning fixed fallback coordinate"
    );
    ResolvedPoint {
        lat: FALLBACK_LAT,
        lng: FALLBACK_LNG,
        imagery_id: FALLBACK_IMAGERY_ID.to_string(),
        tier: SearchTier::Fixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::oracle::ImageryHit;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted oracle: misses or errors until `hit_on_call`, counts calls
    struct ScriptedOracle {
        calls: AtomicUsize,
        hit_on_call: Option<usize>,
        error_calls: bool,
    }

    impl ScriptedOracle {
        fn always_miss() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                hit_on_call: None,
                error_calls: false,
            }
        }

        fn hit_on(call: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                hit_on_call: Some(call),
                error_calls: false,
            }
        }

        fn always_error() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                hit_on_call: None,
                error_calls: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ImageryOracle for ScriptedOracle {
        async fn find_imagery(
            &self,
            _lat: f64,
            _lng: f64,
            _radius_m: Option<u32>,
        ) -> Result<Option<ImageryHit>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.error_calls {
                return Err(Error::Oracle("transport failure".to_string()));
            }
            if Some(call) == self.hit_on_call {
                return Ok(Some(ImageryHit {
                    lat: 1.5,
                    lng: 2.5,
                    imagery_id: "pano-001".to_string(),
                }));
            }
            Ok(None)
        }
    }

    #[test]
    fn test_tier_sequences() {
        let narrow = search_tiers(true);
        assert_eq!(
            narrow,
            vec![
                SearchTier::Radius(100),
                SearchTier::Radius(5_000),
                SearchTier::Radius(50_000),
                SearchTier::Radius(500_000),
                SearchTier::Radius(5_000_000),
                SearchTier::Unbounded,
                SearchTier::Fixed,
            ]
        );

        let global = search_tiers(false);
        assert_eq!(global[0], SearchTier::Radius(10_000));
        assert_eq!(global.len(), 7);
        assert_eq!(global[5], SearchTier::Unbounded);
        assert_eq!(global[6], SearchTier::Fixed);
    }

    #[tokio::test]
    async fn test_first_tier_hit_returns_oracle_coordinate() {
        let oracle = ScriptedOracle::hit_on(1);
        let resolved = find_valid_point(&oracle, 10.0, 20.0, false).await;

        // The oracle's snapped coordinate, not the query point
        assert_eq!(resolved.lat, 1.5);
        assert_eq!(resolved.lng, 2.5);
        assert_eq!(resolved.imagery_id, "pano-001");
        assert_eq!(resolved.tier, SearchTier::Radius(10_000));
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn test_hit_terminates_escalation() {
        let oracle = ScriptedOracle::hit_on(3);
        let resolved = find_valid_point(&oracle, 10.0, 20.0, true).await;
        assert_eq!(resolved.tier, SearchTier::Radius(50_000));
        assert_eq!(oracle.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unbounded_tier_hit() {
        let oracle = ScriptedOracle::hit_on(6);
        let resolved = find_valid_point(&oracle, 10.0, 20.0, false).await;
        assert_eq!(resolved.tier, SearchTier::Unbounded);
        assert_eq!(oracle.call_count(), 6);
    }

    #[tokio::test]
    async fn test_all_misses_reach_fixed_fallback() {
        let oracle = ScriptedOracle::always_miss();
        let resolved = find_valid_point(&oracle, 10.0, 20.0, false).await;

        assert_eq!(resolved.tier, SearchTier::Fixed);
        assert_eq!(resolved.imagery_id, FALLBACK_IMAGERY_ID);
        assert_eq!(resolved.lat, FALLBACK_LAT);
        assert_eq!(resolved.lng, FALLBACK_LNG);
        // Five radii plus one unbounded query; the fixed tier makes no call
        assert_eq!(oracle.call_count(), 6);
    }

    #[tokio::test]
    async fn test_transport_errors_escalate_like_misses() {
        let oracle = ScriptedOracle::always_error();
        let resolved = find_valid_point(&oracle, 10.0, 20.0, true).await;

        assert_eq!(resolved.tier, SearchTier::Fixed);
        assert_eq!(oracle.call_count(), 6);
    }
}
