use geo::{Coord, Rect};

/// Projection function: lon/lat -> screen coords (x, y).
pub type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Target drawing area: pixel dimensions plus an inset margin kept empty
/// around the projected content. Pixel origin is top-left.
#[derive(Debug, Clone, Copy)]
pub struct ScreenRect {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ScreenRect {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self { width, height, padding }
    }

    /// Width left over inside the padding.
    #[inline]
    pub fn inner_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// Height left over inside the padding.
    #[inline]
    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }
}

/// Build a projection that stretches `bounds` to fill the padded target
/// rectangle, scaling each axis independently.
///
/// Longitude grows left to right (`min lon -> padding`, `max lon -> width -
/// padding`). Latitude grows bottom to top, so the Y axis is flipped against
/// the top-left pixel origin (`min lat -> height - padding`, `max lat ->
/// padding`). A tall-and-narrow geography gets stretched; use
/// [`fit_projection`] when distortion matters.
///
/// A zero-width range on an axis maps every coordinate to the center of the
/// padded rectangle on that axis instead of dividing by zero.
pub fn fill_projection(bounds: Rect<f64>, target: ScreenRect) -> impl Fn(&Coord<f64>) -> (f64, f64) {
    let lon_range = bounds.width();
    let lat_range = bounds.height();
    let x_scale = if lon_range > 0.0 { target.inner_width() / lon_range } else { 0.0 };
    let y_scale = if lat_range > 0.0 { target.inner_height() / lat_range } else { 0.0 };

    move |coord: &Coord<f64>| {
        let x = if lon_range > 0.0 {
            target.padding + (coord.x - bounds.min().x) * x_scale
        } else {
            target.width / 2.0
        };
        let y = if lat_range > 0.0 {
            target.height - (target.padding + (coord.y - bounds.min().y) * y_scale)
        } else {
            target.height / 2.0
        };
        (x, y)
    }
}

/// Build a projection that scales `bounds` uniformly so the whole shape fits
/// undistorted inside the padded target box, centered on the slack axis.
///
/// The tighter-fitting axis governs: `scale = min(x_scale, y_scale)`. The
/// shape is centered around the box midpoint shifted by `offset` (the box's
/// origin in the surrounding canvas). Same Y flip and degenerate-range
/// policy as [`fill_projection`]; `bounds` is caller-provided, so a panel can
/// fit a sub-shape with bounds different from the main map's.
pub fn fit_projection(
    bounds: Rect<f64>,
    target: ScreenRect,
    offset: (f64, f64),
) -> impl Fn(&Coord<f64>) -> (f64, f64) {
    let lon_range = bounds.width();
    let lat_range = bounds.height();

    let scale = match (lon_range > 0.0, lat_range > 0.0) {
        (true, true) => (target.inner_width() / lon_range).min(target.inner_height() / lat_range),
        (true, false) => target.inner_width() / lon_range,
        (false, true) => target.inner_height() / lat_range,
        (false, false) => 0.0,
    };

    let center_x = offset.0 + target.width / 2.0;
    let center_y = offset.1 + target.height / 2.0;
    let scaled_width = lon_range * scale;
    let scaled_height = lat_range * scale;

    move |coord: &Coord<f64>| {
        let x = center_x - scaled_width / 2.0 + (coord.x - bounds.min().x) * scale;
        let y = center_y + scaled_height / 2.0 - (coord.y - bounds.min().y) * scale;
        (x, y)
    }
}

/// Project a single lon/lat through the stretching projection.
pub fn project_point(lon: f64, lat: f64, bounds: Rect<f64>, target: ScreenRect) -> (f64, f64) {
    fill_projection(bounds, target)(&Coord { x: lon, y: lat })
}

/// Project a single lon/lat through the aspect-preserving projection.
pub fn project_point_fit(
    lon: f64,
    lat: f64,
    bounds: Rect<f64>,
    target: ScreenRect,
    offset: (f64, f64),
) -> (f64, f64) {
    fit_projection(bounds, target, offset)(&Coord { x: lon, y: lat })
}
