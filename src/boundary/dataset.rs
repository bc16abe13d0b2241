//! Boundary dataset access
//!
//! GeoJSON wire types for the Natural Earth collections, plus the
//! [`BoundaryDataset`] trait that lets tests substitute synthetic
//! collections for the on-disk files.

use crate::constants::cache::{MINOR_ISLANDS_FILE, WORLD_MAP_FILE};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// A parsed GeoJSON feature collection
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One feature: properties plus optional geometry
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// The property fields used for country identity
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    #[serde(rename = "NAME", default)]
    pub name: Option<String>,
    #[serde(rename = "ISO_A3", default)]
    pub iso_a3: Option<String>,
}

/// Feature geometry; only polygonal types carry sampling data
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    #[serde(other)]
    Unsupported,
}

/// Source of the two boundary collections
///
/// The primary collection (admin-0 countries) is required; the secondary
/// (minor islands) is best-effort and its failure must never fail index
/// construction.
pub trait BoundaryDataset: Send + Sync {
    /// Load the primary country-boundaries collection
    fn load_countries(&self) -> Result<FeatureCollection>;

    /// Load the secondary minor-islands collection
    fn load_minor_islands(&self) -> Result<FeatureCollection>;
}

/// Dataset backed by pre-fetched GeoJSON files in a local directory
#[derive(Debug, Clone)]
pub struct FileDataset {
    dir: PathBuf,
}

impl FileDataset {
    /// Create a dataset reading from the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the primary dataset file
    pub fn countries_path(&self) -> PathBuf {
        self.dir.join(WORLD_MAP_FILE)
    }

    /// Path of the secondary dataset file
    pub fn minor_islands_path(&self) -> PathBuf {
        self.dir.join(MINOR_ISLANDS_FILE)
    }

    fn load(&self, path: &PathBuf) -> Result<FeatureCollection> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Dataset(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Dataset(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}

impl BoundaryDataset for FileDataset {
    fn load_countries(&self) -> Result<FeatureCollection> {
        self.load(&self.countries_path())
    }

    fn load_minor_islands(&self) -> Result<FeatureCollection> {
        self.load(&self.minor_islands_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const TINY_FC: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"NAME": "Testland", "ISO_A3": "TST"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]
            }
        }]
    }"#;

    #[test]
    fn test_file_dataset_loads_collections() {
        let dir = TempDir::new().unwrap();
        let mut f = fs::File::create(dir.path().join(WORLD_MAP_FILE)).unwrap();
        f.write_all(TINY_FC.as_bytes()).unwrap();

        let dataset = FileDataset::new(dir.path());
        let fc = dataset.load_countries().unwrap();
        assert_eq!(fc.features.len(), 1);
        assert_eq!(fc.features[0].properties.name.as_deref(), Some("Testland"));

        // Secondary file missing: an error, which the index treats as
        // non-fatal
        assert!(dataset.load_minor_islands().is_err());
    }

    #[test]
    fn test_file_dataset_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(WORLD_MAP_FILE), "not geojson").unwrap();

        let dataset = FileDataset::new(dir.path());
        assert!(dataset.load_countries().is_err());
    }

    #[test]
    fn test_unsupported_geometry_parses() {
        let fc: FeatureCollection = serde_json::from_str(
            r#"{"type": "FeatureCollection", "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "GeometryCollection", "geometries": []}
            }]}"#,
        )
        .unwrap();
        assert!(matches!(
            fc.features[0].geometry,
            Some(Geometry::Unsupported)
        ));
    }
}
