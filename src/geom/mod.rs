//! Planar geometry primitives
//!
//! Bounding boxes, rings and polygons with validated construction,
//! ray-casting containment (with hole support) and shoelace areas.
//! Everything here is pure: no I/O, no panics, degenerate input is
//! rejected at construction time.

use crate::error::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A validated axis-aligned bounding box in degrees
///
/// Invariants: `north > south`, `east > west`, latitudes in [-90, 90],
/// longitudes in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Create validated bounds
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&north) || !(-90.0..=90.0).contains(&south) {
            return Err(Error::InvalidBounds(format!(
                "latitude out of range: north={}, south={}",
                north, south
            )));
        }
        if !(-180.0..=180.0).contains(&east) || !(-180.0..=180.0).contains(&west) {
            return Err(Error::InvalidBounds(format!(
                "longitude out of range: east={}, west={}",
                east, west
            )));
        }
        if north <= south {
            return Err(Error::InvalidBounds(format!(
                "north ({}) must be greater than south ({})",
                north, south
            )));
        }
        if east <= west {
            return Err(Error::InvalidBounds(format!(
                "east ({}) must be greater than west ({})",
                east, west
            )));
        }
        Ok(Self { north, south, east, west })
    }

    /// Re-check the invariants on bounds that arrived via deserialization
    pub fn validate(&self) -> Result<()> {
        Self::new(self.north, self.south, self.east, self.west)?;
        Ok(())
    }

    /// The world fallback sampling box
    pub fn world() -> Self {
        use crate::constants::geo;
        Self {
            north: geo::WORLD_NORTH,
            south: geo::WORLD_SOUTH,
            east: geo::WORLD_EAST,
            west: geo::WORLD_WEST,
        }
    }

    /// Width in degrees of longitude
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height in degrees of latitude
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Bounding box area in square degrees
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Draw a uniform random point inside the box, returned as (lat, lng)
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let lat = rng.gen_range(self.south..self.north);
        let lng = rng.gen_range(self.west..self.east);
        (lat, lng)
    }
}

/// A closed ring of (lng, lat) vertices
///
/// Construction rejects rings with fewer than 3 vertices. Vertex order
/// follows GeoJSON: `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<[f64; 2]>,
}

impl Ring {
    /// Create a validated ring
    pub fn new(vertices: Vec<[f64; 2]>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::DegenerateGeometry(format!(
                "ring has {} vertices, need at least 3",
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    /// Ray-casting point-in-ring test (even-odd rule)
    ///
    /// Casts a horizontal ray from the point and counts edge crossings.
    /// Points exactly on the boundary may land on either side.
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let [xi, yi] = self.vertices[i];
            let [xj, yj] = self.vertices[j];
            if ((yi > lat) != (yj > lat))
                && (lng < (xj - xi) * (lat - yi) / (yj - yi) + xi)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Unsigned area via the shoelace formula, in square degrees
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let mut sum = 0.0;
        let mut j = n - 1;
        for i in 0..n {
            let [xi, yi] = self.vertices[i];
            let [xj, yj] = self.vertices[j];
            sum += (xj + xi) * (yj - yi);
            j = i;
        }
        (sum / 2.0).abs()
    }

    /// Axis-aligned bounds of the ring, if non-degenerate
    pub fn bounds(&self) -> Result<Bounds> {
        let mut west = f64::INFINITY;
        let mut east = f64::NEG_INFINITY;
        let mut south = f64::INFINITY;
        let mut north = f64::NEG_INFINITY;
        for [lng, lat] in &self.vertices {
            west = west.min(*lng);
            east = east.max(*lng);
            south = south.min(*lat);
            north = north.max(*lat);
        }
        Bounds::new(north, south, east, west)
    }
}

/// A polygon: one outer ring plus zero or more interior hole rings
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    outer: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    /// Build a polygon from raw GeoJSON-style ring coordinate lists
    ///
    /// The first ring is the outer boundary, the rest are holes. Fails if
    /// the outer ring is degenerate; degenerate hole rings are skipped
    /// since they cannot enclose any point.
    pub fn from_rings(mut rings: Vec<Vec<[f64; 2]>>) -> Result<Self> {
        if rings.is_empty() {
            return Err(Error::DegenerateGeometry("polygon has no rings".to_string()));
        }
        let outer = Ring::new(rings.remove(0))?;
        let holes = rings
            .into_iter()
            .filter_map(|r| Ring::new(r).ok())
            .collect();
        Ok(Self { outer, holes })
    }

    /// Build the axis-aligned rectangle polygon for a bounding box
    pub fn rectangle(bounds: Bounds) -> Self {
        let outer = Ring {
            vertices: vec![
                [bounds.west, bounds.south],
                [bounds.east, bounds.south],
                [bounds.east, bounds.north],
                [bounds.west, bounds.north],
            ],
        };
        Self { outer, holes: Vec::new() }
    }

    /// Point-in-polygon test honoring holes
    ///
    /// A point is inside iff it is inside the outer ring and inside none
    /// of the hole rings.
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        if !self.outer.contains(lng, lat) {
            return false;
        }
        !self.holes.iter().any(|hole| hole.contains(lng, lat))
    }

    /// True polygon area: outer ring minus hole rings, never negative
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(Ring::area).sum();
        (self.outer.area() - holes).max(0.0)
    }

    /// Bounds of the outer ring, if non-degenerate
    pub fn bounds(&self) -> Result<Bounds> {
        self.outer.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square(min: f64, max: f64) -> Vec<[f64; 2]> {
        vec![[min, min], [max, min], [max, max], [min, max]]
    }

    #[test]
    fn test_bounds_validation() {
        assert!(Bounds::new(10.0, -10.0, 20.0, -20.0).is_ok());
        // north <= south
        assert!(Bounds::new(-10.0, 10.0, 20.0, -20.0).is_err());
        // east <= west
        assert!(Bounds::new(10.0, -10.0, -20.0, 20.0).is_err());
        // out of range
        assert!(Bounds::new(95.0, -10.0, 20.0, -20.0).is_err());
        assert!(Bounds::new(10.0, -10.0, 200.0, -20.0).is_err());
    }

    #[test]
    fn test_bounds_dimensions() {
        let b = Bounds::new(10.0, -10.0, 30.0, -10.0).unwrap();
        assert_relative_eq!(b.height(), 20.0);
        assert_relative_eq!(b.width(), 40.0);
        assert_relative_eq!(b.area(), 800.0);
    }

    #[test]
    fn test_bounds_sample_uniform_stays_inside() {
        let b = Bounds::new(5.0, -5.0, 60.0, 40.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let (lat, lng) = b.sample_uniform(&mut rng);
            assert!(lat >= b.south && lat < b.north);
            assert!(lng >= b.west && lng < b.east);
        }
    }

    #[test]
    fn test_ring_rejects_too_few_vertices() {
        assert!(Ring::new(vec![]).is_err());
        assert!(Ring::new(vec![[0.0, 0.0], [1.0, 1.0]]).is_err());
        assert!(Ring::new(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).is_ok());
    }

    #[test]
    fn test_square_containment() {
        let ring = Ring::new(square(0.0, 10.0)).unwrap();

        assert!(ring.contains(5.0, 5.0));
        assert!(ring.contains(0.1, 0.1));
        assert!(ring.contains(9.9, 9.9));

        assert!(!ring.contains(-1.0, 5.0));
        assert!(!ring.contains(11.0, 5.0));
        assert!(!ring.contains(5.0, -1.0));
        assert!(!ring.contains(5.0, 11.0));
    }

    #[test]
    fn test_hole_containment() {
        let polygon = Polygon::from_rings(vec![square(0.0, 10.0), square(4.0, 6.0)]).unwrap();

        // Inside the hole: outside the polygon
        assert!(!polygon.contains(5.0, 5.0));
        // Between hole and outer edge: inside
        assert!(polygon.contains(2.0, 2.0));
        assert!(polygon.contains(8.0, 8.0));
        // Outside the outer ring
        assert!(!polygon.contains(12.0, 5.0));
    }

    #[test]
    fn test_shoelace_area() {
        let ring = Ring::new(square(0.0, 10.0)).unwrap();
        assert_relative_eq!(ring.area(), 100.0);

        // Winding order must not affect unsigned area
        let mut reversed = square(0.0, 10.0);
        reversed.reverse();
        assert_relative_eq!(Ring::new(reversed).unwrap().area(), 100.0);

        // Triangle with base 4, height 3
        let tri = Ring::new(vec![[0.0, 0.0], [4.0, 0.0], [0.0, 3.0]]).unwrap();
        assert_relative_eq!(tri.area(), 6.0);
    }

    #[test]
    fn test_polygon_area_subtracts_holes() {
        let polygon = Polygon::from_rings(vec![square(0.0, 10.0), square(4.0, 6.0)]).unwrap();
        assert_relative_eq!(polygon.area(), 100.0 - 4.0);
    }

    #[test]
    fn test_polygon_area_never_negative() {
        // A hole larger than the outer ring is malformed input; the area
        // clamps to zero instead of going negative.
        let polygon = Polygon::from_rings(vec![square(4.0, 6.0), square(0.0, 10.0)]).unwrap();
        assert_relative_eq!(polygon.area(), 0.0);
    }

    #[test]
    fn test_polygon_rejects_empty_and_degenerate_outer() {
        assert!(Polygon::from_rings(vec![]).is_err());
        assert!(Polygon::from_rings(vec![vec![[0.0, 0.0], [1.0, 1.0]]]).is_err());
    }

    #[test]
    fn test_polygon_skips_degenerate_holes() {
        let polygon =
            Polygon::from_rings(vec![square(0.0, 10.0), vec![[4.0, 4.0], [6.0, 6.0]]]).unwrap();
        // The two-vertex hole is dropped, so the center stays inside
        assert!(polygon.contains(5.0, 5.0));
        assert_relative_eq!(polygon.area(), 100.0);
    }

    #[test]
    fn test_ring_bounds() {
        let ring = Ring::new(square(2.0, 8.0)).unwrap();
        let b = ring.bounds().unwrap();
        assert_relative_eq!(b.south, 2.0);
        assert_relative_eq!(b.north, 8.0);
        assert_relative_eq!(b.west, 2.0);
        assert_relative_eq!(b.east, 8.0);
    }

    #[test]
    fn test_degenerate_ring_bounds() {
        // All vertices on a vertical line: zero width, invalid bounds
        let ring = Ring::new(vec![[3.0, 0.0], [3.0, 5.0], [3.0, 10.0]]).unwrap();
        assert!(ring.bounds().is_err());
    }

    #[test]
    fn test_rectangle_polygon() {
        let b = Bounds::new(10.0, 0.0, 10.0, 0.0).unwrap();
        let polygon = Polygon::rectangle(b);
        assert!(polygon.contains(5.0, 5.0));
        assert!(!polygon.contains(15.0, 5.0));
        assert_relative_eq!(polygon.area(), 100.0);
    }
}
