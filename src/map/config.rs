use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use geo::{Coord, Rect};
use serde::Deserialize;

/// Map rendering configuration, optionally loaded from a JSON file.
/// Command-line flags override individual fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Title drawn in the top-left corner.
    pub title: String,
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Inset margin around the projected boundary, in pixels.
    pub padding: f64,
    /// Draw a name label above every marker.
    pub labels: bool,
    /// Small attribution line in the bottom-left corner.
    pub attribution: Option<String>,
    /// Fixed provincial bounds; computed from the boundary when absent.
    pub bounds: Option<BoundsConfig>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: "Water Resources".to_string(),
            width: 500.0,
            height: 500.0,
            padding: 40.0,
            labels: false,
            attribution: None,
            bounds: None,
        }
    }
}

impl MapConfig {
    /// Load a configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// A fixed geographic bounding box, in degrees.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsConfig {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundsConfig {
    /// Parse a "minLon,minLat,maxLon,maxLat" list, as given on the command line.
    pub fn from_list(list: &str) -> Result<Self> {
        let parts: Vec<&str> = list.split(',').collect();
        if parts.len() != 4 {
            return Err(anyhow!("Bounds must have 4 comma-separated values"));
        }

        let mut values = [0.0; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid bounds value: {part:?}"))?;
        }

        let [min_lon, min_lat, max_lon, max_lat] = values;
        if min_lon > max_lon || min_lat > max_lat {
            return Err(anyhow!("Bounds minima must not exceed maxima"));
        }

        Ok(Self { min_lon, max_lon, min_lat, max_lat })
    }

    /// Convert to the geometry core's bounds type.
    pub fn to_rect(self) -> Rect<f64> {
        Rect::new(
            Coord { x: self.min_lon, y: self.min_lat },
            Coord { x: self.max_lon, y: self.max_lat },
        )
    }
}
