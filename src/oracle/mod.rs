//! Imagery oracle
//!
//! The external point-query capability: "is there usable outdoor imagery
//! within radius R of (lat, lng)?". The [`resolver`] escalates through an
//! ordered tier list against any [`ImageryOracle`] implementation.

pub mod resolver;
pub mod streetview;

use crate::error::Result;

/// A hit from the imagery oracle
///
/// The coordinate is the oracle's own, which may be snapped to the
/// nearest available imagery point rather than the query point.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageryHit {
    pub lat: f64,
    pub lng: f64,
    /// Opaque imagery identifier
    pub imagery_id: String,
}

/// Trait for imagery point-query backends
///
/// Implementations must be thread-safe (Send + Sync) to work with the
/// async server.
pub trait ImageryOracle: Send + Sync {
    /// Query for usable imagery near a coordinate
    ///
    /// `radius_m` of `None` means an unbounded search. A clean miss is
    /// `Ok(None)`; transport-level failure is `Err`, which the resolver
    /// treats as a miss for the current tier.
    fn find_imagery(
        &self,
        lat: f64,
        lng: f64,
        radius_m: Option<u32>,
    ) -> impl std::future::Future<Output = Result<Option<ImageryHit>>> + Send;
}
