use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Ok, Result};
use geo::Rect;

use super::{BOUNDARY_STROKE, CANVAS_BG, MARKER_STROKE, SHAPE_FILL, WATER_FILL};

/// Streaming SVG document writer over any `io::Write` destination.
pub struct SvgWriter<W: Write> {
    writer: W,
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl<W: Write> Write for SvgWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl SvgWriter<BufWriter<File>> {
    /// Create a new SVG writer to a file path.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[render] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }
}

impl<W: Write> SvgWriter<W> {
    /// Wrap an existing writer (e.g. an in-memory buffer).
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write the SVG header: XML declaration, opening <svg> tag and canvas
    /// background. When drawing a geographic view, `bounds` is recorded as
    /// data attributes so the mapping stays inspectable in the output.
    pub fn write_header(&mut self, width: f64, height: f64, bounds: Option<&Rect<f64>>) -> Result<()> {
        writeln!(self, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
        match bounds {
            Some(bounds) => writeln!(
                self,
                r##"<svg xmlns="http://www.w3.org/2000/svg"
            width="{width}" height="{height}"
            viewBox="0 0 {width} {height}"
            data-lon-min="{lon_min}" data-lon-max="{lon_max}"
            data-lat-min="{lat_min}" data-lat-max="{lat_max}">"##,
                lon_min = bounds.min().x,
                lon_max = bounds.max().x,
                lat_min = bounds.min().y,
                lat_max = bounds.max().y,
            )?,
            None => writeln!(
                self,
                r##"<svg xmlns="http://www.w3.org/2000/svg"
            width="{width}" height="{height}"
            viewBox="0 0 {width} {height}">"##,
            )?,
        }
        writeln!(self, r##"<rect width="100%" height="100%" fill="{CANVAS_BG}"/>"##)?;
        Ok(())
    }

    /// Write SVG styles for map and panel features.
    pub fn write_styles(&mut self) -> Result<()> {
        writeln!(self, r##"<defs>
<style>
    .boundary {{ fill: #ffffff; stroke: {BOUNDARY_STROKE}; stroke-width: 1; }}
    .dam {{ fill: #ffffff; stroke: {MARKER_STROKE}; stroke-width: 2; }}
    .water {{ fill: {WATER_FILL}; }}
    .shape {{ fill: {SHAPE_FILL}; stroke: {MARKER_STROKE}; stroke-width: 1; }}
    .thumb {{ fill: {CANVAS_BG}; }}
    .panel {{ fill: #ffffff; stroke: #000000; stroke-width: 1; }}
    .frame {{ fill: none; stroke: #000000; stroke-width: 1; }}
    .axis {{ stroke: #000000; stroke-width: 1; }}
    .series {{ fill: none; stroke: {MARKER_STROKE}; stroke-width: 2; }}
    .glyph {{ stroke: #000000; stroke-width: 2; }}
    .label {{ font-family: Arial, sans-serif; fill: #000000; }}
</style>
</defs>"##)?;
        Ok(())
    }

    /// Write the closing </svg> tag.
    pub fn write_footer(&mut self) -> Result<()> {
        writeln!(self, "</svg>")?;
        Ok(())
    }
}

/// Escape text content for embedding in SVG markup.
pub(crate) fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
