//! Color values for the map's SVG output.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// RGB color with an alpha channel in [0.0, 1.0].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rgba {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: f64,
}

impl fmt::Display for Rgba {
    /// Format as CSS: rgba(r,g,b,a)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{:.2})", self.r, self.g, self.b, self.a.clamp(0.0, 1.0))
    }
}

/// Canvas background.
pub(crate) const CANVAS_BG: Rgb = Rgb { r: 240, g: 240, b: 240 };

/// Province boundary stroke over a white fill.
pub(crate) const BOUNDARY_STROKE: Rgb = Rgb { r: 100, g: 100, b: 100 };

/// Reservoir marker outline and chart series stroke.
pub(crate) const MARKER_STROKE: Rgb = Rgb { r: 0, g: 100, b: 200 };

/// Translucent water fill for marker discs and level bars.
pub(crate) const WATER_FILL: Rgba = Rgba { r: 0, g: 100, b: 255, a: 0.59 };

/// Fill for reservoir shape thumbnails.
pub(crate) const SHAPE_FILL: Rgb = Rgb { r: 200, g: 230, b: 255 };
