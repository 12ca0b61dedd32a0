use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use geo::Coord;
use log::debug;
use serde_json::Value;

/// Surface area assumed when a feature carries none, in km².
pub const DEFAULT_AREA_KM2: f64 = 5.0;

/// Fullness assumed when a feature carries none, in percent.
pub const DEFAULT_LEVEL_PCT: f64 = 50.0;

/// One monitored reservoir, as exported by the water utility.
#[derive(Debug, Clone)]
pub struct Reservoir {
    pub name: String,
    /// Dam location (lon, lat).
    pub location: Coord<f64>,
    /// Reservoir surface area in km²; drives marker size.
    pub area_km2: f64,
    /// Current fullness in percent; drives the marker's water disc.
    pub level_pct: f64,
    /// Historical observations, oldest first.
    pub timeline: Vec<LevelRecord>,
}

/// One historical fullness observation.
#[derive(Debug, Clone, Copy)]
pub struct LevelRecord {
    pub year: i32,
    pub level_pct: f64,
}

/// Read reservoirs from a GeoJSON-like FeatureCollection file. Only Point
/// features are kept; anything else in the collection is skipped.
pub fn read_reservoirs(path: &Path) -> Result<Vec<Reservoir>> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read reservoir file: {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
    parse_reservoirs(&value)
        .with_context(|| format!("No usable reservoir features in {}", path.display()))
}

/// Parse reservoirs from a FeatureCollection value.
pub(crate) fn parse_reservoirs(value: &Value) -> Result<Vec<Reservoir>> {
    let features = value["features"]
        .as_array()
        .ok_or_else(|| anyhow!("Expected a FeatureCollection with features"))?;

    let mut reservoirs = Vec::with_capacity(features.len());
    for feature in features {
        let geometry = &feature["geometry"];
        if geometry["type"].as_str() != Some("Point") {
            debug!("skipping non-Point feature");
            continue;
        }

        let coords = geometry["coordinates"]
            .as_array()
            .ok_or_else(|| anyhow!("Point feature without coordinates"))?;
        if coords.len() < 2 {
            return Err(anyhow!("Point coordinates must hold [lon, lat]"));
        }
        let location = Coord {
            x: coords[0].as_f64().ok_or_else(|| anyhow!("Invalid lon"))?,
            y: coords[1].as_f64().ok_or_else(|| anyhow!("Invalid lat"))?,
        };

        let properties = &feature["properties"];
        let name = properties["name"].as_str().unwrap_or("Unnamed").to_string();
        let area_km2 = properties["area"].as_f64().unwrap_or(DEFAULT_AREA_KM2);
        let level_pct = properties["currentWaterLevel"].as_f64().unwrap_or(DEFAULT_LEVEL_PCT);
        let timeline = parse_timeline(&properties["timeline"]);

        reservoirs.push(Reservoir { name, location, area_km2, level_pct, timeline });
    }

    Ok(reservoirs)
}

fn parse_timeline(value: &Value) -> Vec<LevelRecord> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let year = entry["year"].as_i64()? as i32;
            let level_pct = entry["level"].as_f64()?;
            Some(LevelRecord { year, level_pct })
        })
        .collect()
}
