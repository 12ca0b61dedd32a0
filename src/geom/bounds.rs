use geo::{Coord, CoordsIter, MultiPolygon, Rect};
use thiserror::Error;

/// Errors produced by the geometry core.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// The input geometry cannot be projected or rendered: an empty
    /// MultiPolygon, or a ring with no points.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),
}

/// Compute the tightest axis-aligned geographic bounding box containing every
/// point of every ring of `shape`, holes included.
///
/// Bounds are derived fresh on each call; the input is never mutated. Errors
/// if `shape` has no polygons or any ring has no points, since the result
/// would be degenerate/infinite.
pub fn calculate_bounds(shape: &MultiPolygon<f64>) -> Result<Rect<f64>, GeometryError> {
    if shape.0.is_empty() {
        return Err(GeometryError::InvalidGeometry("multipolygon has no polygons"));
    }

    let mut min = Coord { x: f64::INFINITY, y: f64::INFINITY };
    let mut max = Coord { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY };

    for polygon in &shape.0 {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors().iter()) {
            if ring.0.is_empty() {
                return Err(GeometryError::InvalidGeometry("ring has no points"));
            }
            for coord in ring.coords_iter() {
                min.x = min.x.min(coord.x);
                min.y = min.y.min(coord.y);
                max.x = max.x.max(coord.x);
                max.y = max.y.max(coord.y);
            }
        }
    }

    Ok(Rect::new(min, max))
}
