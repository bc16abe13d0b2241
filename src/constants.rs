//! Centralized constants for the roam-point crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Northern edge of the world fallback sampling box
    pub const WORLD_NORTH: f64 = 85.0;

    /// Southern edge of the world fallback sampling box
    pub const WORLD_SOUTH: f64 = -85.0;

    /// Eastern edge of the world fallback sampling box
    pub const WORLD_EAST: f64 = 180.0;

    /// Western edge of the world fallback sampling box
    pub const WORLD_WEST: f64 = -180.0;

    /// Regions whose northern edge lies below this latitude belong to the
    /// Antarctic landmass and are excluded from sampling
    pub const POLAR_CUTOFF_LAT: f64 = -60.0;
}

/// Sampling parameters
pub mod sampling {
    /// Weight multiplier applied to minor-island regions
    pub const MINOR_ISLAND_WEIGHT: f64 = 1.2;

    /// Maximum rejection-sampling attempts before falling back to the
    /// region bounding box
    pub const REJECTION_ATTEMPTS: usize = 100;

    /// Bucket key for regions without country identity
    pub const UNKNOWN_COUNTRY: &str = "UNKNOWN";
}

/// Imagery search tiers
pub mod search {
    /// Radii (meters) tried in order when the caller supplied explicit
    /// preference regions (tight geographic intent)
    pub const PREFERENCE_RADII_M: [u32; 5] = [100, 5_000, 50_000, 500_000, 5_000_000];

    /// Radii (meters) tried in order for global sampling
    pub const GLOBAL_RADII_M: [u32; 5] = [10_000, 50_000, 200_000, 1_000_000, 5_000_000];

    /// Last-resort coordinate, a spot known to have outdoor imagery
    /// (Times Square, New York)
    pub const FALLBACK_LAT: f64 = 40.758896;
    pub const FALLBACK_LNG: f64 = -73.985130;

    /// Sentinel imagery id returned with the last-resort coordinate
    pub const FALLBACK_IMAGERY_ID: &str = "fallback";
}

/// External API endpoints
pub mod api {
    /// Google Street View metadata endpoint (the imagery oracle)
    pub const STREETVIEW_METADATA_URL: &str =
        "https://maps.googleapis.com/maps/api/streetview/metadata";

    /// Natural Earth 1:10m admin-0 countries (primary boundary dataset)
    pub const WORLD_MAP_URL: &str =
        "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_10m_admin_0_countries.geojson";

    /// Natural Earth 1:10m minor islands (secondary boundary dataset)
    pub const MINOR_ISLANDS_URL: &str =
        "https://raw.githubusercontent.com/martynafford/natural-earth-geojson/master/10m/physical/ne_10m_minor_islands.json";
}

/// Cache settings
pub mod cache {
    /// Boundary region cache duration in seconds (1 hour)
    pub const REGION_CACHE_TTL_SECS: u64 = 3600;

    /// Local file name for the primary boundary dataset
    pub const WORLD_MAP_FILE: &str = "world.geojson";

    /// Local file name for the secondary minor-islands dataset
    pub const MINOR_ISLANDS_FILE: &str = "minor_islands.json";
}
