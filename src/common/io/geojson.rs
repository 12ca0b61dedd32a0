use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

/// Read a boundary/shape MultiPolygon from a GeoJSON-like file.
///
/// Accepted shapes, in order of preference:
///   - a geometry object with `coordinates` (MultiPolygon or Polygon nesting),
///   - a `Feature` / `FeatureCollection` wrapping one,
///   - the workshop export `{ "boundaryPoints": [[lon, lat], ...] }`,
///   - a single-key wrapper object around any of the above.
pub fn read_boundary(path: &Path) -> Result<MultiPolygon<f64>> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read geometry file: {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
    parse_geometry(&value)
        .with_context(|| format!("No usable geometry in {}", path.display()))
}

/// Parse a GeoJSON-like value into a MultiPolygon.
pub(crate) fn parse_geometry(value: &Value) -> Result<MultiPolygon<f64>> {
    if let Some(coords) = value["coordinates"].as_array() {
        return match value["type"].as_str() {
            Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon_coords(coords)?])),
            // Untyped geometry objects get the deeper nesting by default.
            _ => parse_multipolygon_coords(coords),
        };
    }

    if let Some(points) = value["boundaryPoints"].as_array() {
        let ring = parse_ring_coords(points)?;
        return Ok(MultiPolygon(vec![Polygon::new(ring, vec![])]));
    }

    match value["type"].as_str() {
        Some("Feature") => return parse_geometry(&value["geometry"]),
        Some("FeatureCollection") => {
            let features = value["features"]
                .as_array()
                .ok_or_else(|| anyhow!("FeatureCollection without features"))?;
            let mut polygons = Vec::new();
            for feature in features {
                polygons.extend(parse_geometry(&feature["geometry"])?.0);
            }
            if polygons.is_empty() {
                return Err(anyhow!("FeatureCollection contains no polygon geometry"));
            }
            return Ok(MultiPolygon(polygons));
        }
        _ => {}
    }

    // Named wrapper such as { "balcovaData": { ... } }: descend if the value
    // is an object with exactly one key.
    if let Some(object) = value.as_object() {
        if object.len() == 1 {
            if let Some(inner) = object.values().next() {
                return parse_geometry(inner);
            }
        }
    }

    Err(anyhow!("Unrecognized geometry shape"))
}

/// Parse GeoJSON MultiPolygon coordinates: polygons -> rings -> [lon, lat].
/// The first ring of each polygon is the exterior; the rest are holes.
fn parse_multipolygon_coords(coords: &[Value]) -> Result<MultiPolygon<f64>> {
    let mut polygons = Vec::new();

    for polygon_coords in coords {
        let rings = polygon_coords
            .as_array()
            .ok_or_else(|| anyhow!("Invalid MultiPolygon: polygon is not an array"))?;
        polygons.push(parse_polygon_coords(rings)?);
    }

    Ok(MultiPolygon(polygons))
}

/// Parse GeoJSON Polygon coordinates: rings -> [lon, lat].
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let exterior_coords = rings
        .first()
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))?;
    let exterior = parse_ring_coords(exterior_coords)?;

    let mut interiors = Vec::new();
    for interior_ring in &rings[1..] {
        let ring_array = interior_ring
            .as_array()
            .ok_or_else(|| anyhow!("Invalid Polygon: hole ring is not an array"))?;
        interiors.push(parse_ring_coords(ring_array)?);
    }

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring from GeoJSON coordinates: [[lon, lat], [lon, lat], ...].
/// Rings are implicitly closed; no closing vertex is appended.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());

    for coord_pair in coords {
        if let Some(coord_array) = coord_pair.as_array() {
            if coord_array.len() >= 2 {
                let x = coord_array[0]
                    .as_f64()
                    .ok_or_else(|| anyhow!("Invalid coordinate: lon must be a number"))?;
                let y = coord_array[1]
                    .as_f64()
                    .ok_or_else(|| anyhow!("Invalid coordinate: lat must be a number"))?;
                points.push(Coord { x, y });
            }
        }
    }

    Ok(LineString(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_multipolygon_geometry_with_holes() {
        let value = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [
                    [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
                    [[2.0, 2.0], [2.0, 4.0], [4.0, 4.0], [4.0, 2.0]]
                ],
                [
                    [[20.0, 20.0], [21.0, 20.0], [21.0, 21.0]]
                ]
            ]
        });

        let shape = parse_geometry(&value).unwrap();
        assert_eq!(shape.0.len(), 2);
        assert_eq!(shape.0[0].exterior().0.len(), 4);
        assert_eq!(shape.0[0].interiors().len(), 1);
        assert_eq!(shape.0[0].interiors()[0].0.len(), 4);
        assert_eq!(shape.0[1].interiors().len(), 0);
        assert_eq!(shape.0[1].exterior().0[0], Coord { x: 20.0, y: 20.0 });
    }

    #[test]
    fn parses_polygon_geometry() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[26.0, 38.0], [28.0, 38.0], [27.0, 39.0]]]
        });

        let shape = parse_geometry(&value).unwrap();
        assert_eq!(shape.0.len(), 1);
        assert_eq!(shape.0[0].exterior().0.len(), 3);
    }

    #[test]
    fn parses_boundary_points_export() {
        let value = json!({
            "boundaryPoints": [[26.35, 37.89], [28.56, 37.89], [28.56, 39.46], [26.35, 39.46]]
        });

        let shape = parse_geometry(&value).unwrap();
        assert_eq!(shape.0.len(), 1);
        assert_eq!(shape.0[0].exterior().0.len(), 4);
        assert_eq!(shape.0[0].exterior().0[2], Coord { x: 28.56, y: 39.46 });
    }

    #[test]
    fn descends_into_named_wrapper() {
        let value = json!({
            "balcova": {
                "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]]
            }
        });

        let shape = parse_geometry(&value).unwrap();
        assert_eq!(shape.0.len(), 1);
    }

    #[test]
    fn rejects_unrecognized_shapes() {
        assert!(parse_geometry(&json!({"type": "Point", "coordinates": [1.0, 2.0]})).is_err());
        assert!(parse_geometry(&json!(42)).is_err());
    }
}
