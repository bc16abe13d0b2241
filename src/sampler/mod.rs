//! Region selection and point sampling
//!
//! This module handles:
//! - Choosing the candidate region set (preference rectangles vs. the
//!   boundary index)
//! - Two-stage weighted selection: uniform over countries, then
//!   area-weighted within the chosen country
//! - Rejection sampling of a coordinate inside real polygon geometry

pub mod point;
pub mod source;
pub mod weighted;

pub use point::{sample_point, SampleMethod, SampledPoint};
pub use source::select_source;
pub use weighted::select_region;
