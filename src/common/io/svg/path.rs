use std::fmt::Write as _;

use crate::geom::PathSink;

/// Accumulates path-builder calls into compact SVG path data
/// ("M x,y L x,y ... Z"). Every ring becomes its own closed subpath; drawn
/// with `fill-rule="evenodd"`, hole subpaths subtract from the outer ring's
/// fill.
///
/// The path-builder contract closes a polygon's outer ring after its holes,
/// while SVG path data closes each subpath inline, so contours are buffered
/// per polygon and flushed in outer-then-holes order on `close`.
#[derive(Debug, Default)]
pub struct SvgPathSink {
    data: String,
    outer: String,
    holes: String,
    in_hole: bool,
}

impl SvgPathSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the sink and return the accumulated path data.
    pub fn into_data(mut self) -> String {
        // Flush anything left by a caller that never closed the polygon.
        self.data.push_str(&self.outer);
        self.data.push_str(&self.holes);
        self.data
    }

    fn current(&mut self) -> &mut String {
        if self.in_hole { &mut self.holes } else { &mut self.outer }
    }
}

impl PathSink for SvgPathSink {
    fn move_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.current(), " M{x:.3},{y:.3}");
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.current(), " L{x:.3},{y:.3}");
    }

    fn begin_hole(&mut self) {
        self.in_hole = true;
    }

    fn end_hole(&mut self) {
        self.holes.push('Z');
        self.in_hole = false;
    }

    fn close(&mut self) {
        self.data.push_str(&self.outer);
        self.data.push('Z');
        self.data.push_str(&self.holes);
        self.outer.clear();
        self.holes.clear();
        self.in_hole = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, LineString, MultiPolygon, Polygon, Rect};

    use crate::geom::{ScreenRect, fill_projection, render_multi_polygon};

    #[test]
    fn builds_closed_subpaths_for_outer_ring_and_hole() {
        let shape = MultiPolygon(vec![Polygon::new(
            LineString(vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 10.0, y: 0.0 },
                Coord { x: 10.0, y: 10.0 },
            ]),
            vec![LineString(vec![
                Coord { x: 4.0, y: 2.0 },
                Coord { x: 4.0, y: 4.0 },
                Coord { x: 6.0, y: 4.0 },
            ])],
        )]);

        let bounds = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 });
        let project = fill_projection(bounds, ScreenRect::new(10.0, 10.0, 0.0));
        let mut sink = SvgPathSink::new();
        render_multi_polygon(&shape, &project, &mut sink).unwrap();

        assert_eq!(
            sink.into_data(),
            " M0.000,10.000 L10.000,10.000 L10.000,0.000Z M4.000,8.000 L4.000,6.000 L6.000,6.000Z"
        );
    }

    #[test]
    fn polygons_flush_independently() {
        let mut sink = SvgPathSink::new();
        sink.move_to(0.0, 0.0);
        sink.line_to(1.0, 0.0);
        sink.close();
        sink.move_to(5.0, 5.0);
        sink.line_to(6.0, 5.0);
        sink.close();

        assert_eq!(
            sink.into_data(),
            " M0.000,0.000 L1.000,0.000Z M5.000,5.000 L6.000,5.000Z"
        );
    }
}
