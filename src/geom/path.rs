use geo::{CoordsIter, LineString, MultiPolygon};

use super::{GeometryError, Projection};

/// Immediate-mode path-building capability supplied by the host rendering
/// surface. The geometry core drives it; it never owns a surface itself.
///
/// Hole contours arrive bracketed by `begin_hole`/`end_hole` between the
/// outer ring's vertices and the final `close`.
pub trait PathSink {
    /// Start a new contour at the given pixel position.
    fn move_to(&mut self, x: f64, y: f64);

    /// Extend the current contour to the given pixel position.
    fn line_to(&mut self, x: f64, y: f64);

    /// The following vertices describe a hole in the current polygon.
    fn begin_hole(&mut self);

    /// Finish the current hole contour.
    fn end_hole(&mut self);

    /// Close the current polygon's outer path.
    fn close(&mut self);
}

/// Project every ring of `shape` and emit it into `sink`, one polygon at a
/// time: the outer ring's vertices in their original order, then each hole
/// ring as a bracketed contour, then the closing of the outer path.
///
/// Correct hole rendering depends on hole rings being wound opposite to
/// their outer ring. The input winding is passed through untouched; getting
/// it right is the caller's responsibility, not a renderer error.
pub fn render_multi_polygon(
    shape: &MultiPolygon<f64>,
    project: &Projection,
    sink: &mut dyn PathSink,
) -> Result<(), GeometryError> {
    if shape.0.is_empty() {
        return Err(GeometryError::InvalidGeometry("multipolygon has no polygons"));
    }

    for polygon in &shape.0 {
        emit_ring(polygon.exterior(), project, sink)?;
        for hole in polygon.interiors() {
            sink.begin_hole();
            emit_ring(hole, project, sink)?;
            sink.end_hole();
        }
        sink.close();
    }

    Ok(())
}

fn emit_ring(
    ring: &LineString<f64>,
    project: &Projection,
    sink: &mut dyn PathSink,
) -> Result<(), GeometryError> {
    let mut coords = ring.coords_iter().map(|coord| project(&coord));
    match coords.next() {
        Some((x, y)) => sink.move_to(x, y),
        None => return Err(GeometryError::InvalidGeometry("ring has no points")),
    }
    for (x, y) in coords {
        sink.line_to(x, y);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, Polygon, Rect};

    use crate::geom::{ScreenRect, fill_projection};

    #[derive(Debug, Clone, PartialEq)]
    enum Cmd {
        MoveTo(f64, f64),
        LineTo(f64, f64),
        BeginHole,
        EndHole,
        Close,
    }

    #[derive(Default)]
    struct Recorder(Vec<Cmd>);

    impl PathSink for Recorder {
        fn move_to(&mut self, x: f64, y: f64) {
            self.0.push(Cmd::MoveTo(x, y));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.0.push(Cmd::LineTo(x, y));
        }
        fn begin_hole(&mut self) {
            self.0.push(Cmd::BeginHole);
        }
        fn end_hole(&mut self) {
            self.0.push(Cmd::EndHole);
        }
        fn close(&mut self) {
            self.0.push(Cmd::Close);
        }
    }

    fn ring(coords: &[(f64, f64)]) -> LineString<f64> {
        LineString(coords.iter().map(|&(x, y)| Coord { x, y }).collect())
    }

    fn unit_target() -> (Rect<f64>, ScreenRect) {
        (
            Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 }),
            ScreenRect::new(10.0, 10.0, 0.0),
        )
    }

    #[test]
    fn emits_outer_then_holes_then_close() {
        let shape = MultiPolygon(vec![Polygon::new(
            ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            vec![ring(&[(2.0, 2.0), (2.0, 4.0), (4.0, 4.0), (4.0, 2.0)])],
        )]);

        let (bounds, target) = unit_target();
        let project = fill_projection(bounds, target);
        let mut sink = Recorder::default();
        render_multi_polygon(&shape, &project, &mut sink).unwrap();

        // Outer ring first (Y flipped), then the bracketed hole, close last.
        assert_eq!(
            sink.0,
            vec![
                Cmd::MoveTo(0.0, 10.0),
                Cmd::LineTo(10.0, 10.0),
                Cmd::LineTo(10.0, 0.0),
                Cmd::LineTo(0.0, 0.0),
                Cmd::BeginHole,
                Cmd::MoveTo(2.0, 8.0),
                Cmd::LineTo(2.0, 6.0),
                Cmd::LineTo(4.0, 6.0),
                Cmd::LineTo(4.0, 8.0),
                Cmd::EndHole,
                Cmd::Close,
            ]
        );
    }

    #[test]
    fn polygons_are_emitted_in_insertion_order() {
        let shape = MultiPolygon(vec![
            Polygon::new(ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]), vec![]),
            Polygon::new(ring(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)]), vec![]),
        ]);

        let (bounds, target) = unit_target();
        let project = fill_projection(bounds, target);
        let mut sink = Recorder::default();
        render_multi_polygon(&shape, &project, &mut sink).unwrap();

        let closes = sink.0.iter().filter(|c| **c == Cmd::Close).count();
        assert_eq!(closes, 2);
        assert_eq!(sink.0[0], Cmd::MoveTo(0.0, 10.0));
        assert_eq!(sink.0[4], Cmd::MoveTo(5.0, 5.0));
    }

    #[test]
    fn hole_subtracts_from_enclosed_area() {
        // Outer 10x10 square wound one way, 2x2 hole wound the other. Under
        // an even-odd or nonzero fill rule the net enclosed area is the
        // outer area minus the hole's.
        let shape = MultiPolygon(vec![Polygon::new(
            ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            vec![ring(&[(2.0, 2.0), (2.0, 4.0), (4.0, 4.0), (4.0, 2.0)])],
        )]);

        let (bounds, target) = unit_target();
        let project = fill_projection(bounds, target);
        let mut sink = Recorder::default();
        render_multi_polygon(&shape, &project, &mut sink).unwrap();

        // Reassemble contours from the recorded commands and sum their
        // signed areas: opposite windings cancel, leaving outer - hole.
        let mut contours: Vec<Vec<(f64, f64)>> = Vec::new();
        for cmd in &sink.0 {
            match *cmd {
                Cmd::MoveTo(x, y) => contours.push(vec![(x, y)]),
                Cmd::LineTo(x, y) => contours.last_mut().unwrap().push((x, y)),
                _ => {}
            }
        }
        let net: f64 = contours.iter().map(|pts| signed_area(pts)).sum();
        assert!((net.abs() - 96.0).abs() < 1e-9);
    }

    fn signed_area(pts: &[(f64, f64)]) -> f64 {
        let mut a = 0.0;
        for i in 0..pts.len() {
            let (x0, y0) = pts[i];
            let (x1, y1) = pts[(i + 1) % pts.len()];
            a += x0 * y1 - x1 * y0;
        }
        a / 2.0
    }

    #[test]
    fn empty_multipolygon_is_invalid() {
        let shape: MultiPolygon<f64> = MultiPolygon(vec![]);
        let (bounds, target) = unit_target();
        let project = fill_projection(bounds, target);
        let mut sink = Recorder::default();
        assert!(matches!(
            render_multi_polygon(&shape, &project, &mut sink),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn empty_hole_ring_is_invalid() {
        let shape = MultiPolygon(vec![Polygon::new(
            ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]),
            vec![ring(&[])],
        )]);
        let (bounds, target) = unit_target();
        let project = fill_projection(bounds, target);
        let mut sink = Recorder::default();
        assert!(matches!(
            render_multi_polygon(&shape, &project, &mut sink),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }
}
