use std::io::Write;

use anyhow::Result;
use geo::MultiPolygon;
use log::debug;

use crate::common::io::svg::{SvgPathSink, SvgWriter, xml_escape};
use crate::geom::{
    Projection, ScreenRect, calculate_bounds, fill_projection, fit_projection,
    render_multi_polygon,
};

use super::config::MapConfig;
use super::reservoir::Reservoir;

// Marker sizing: reservoir surface area in km² maps linearly onto the
// circle's diameter in pixels.
const MARKER_AREA_DOMAIN: (f64, f64) = (0.0, 25.0);
const MARKER_DIAMETER_RANGE: (f64, f64) = (10.0, 40.0);

// Detail panel layout.
const PANEL_WIDTH: f64 = 280.0;
const PANEL_HEIGHT: f64 = 300.0;
const PANEL_MARGIN: f64 = 10.0;
const THUMB_WIDTH: f64 = 260.0;
const THUMB_HEIGHT: f64 = 80.0;
const THUMB_PADDING: f64 = 5.0;
const CHART_WIDTH: f64 = 230.0;
const CHART_HEIGHT: f64 = 50.0;

/// Render the full map view: the province boundary plus one marker per
/// reservoir, sized by surface area and filled by current water level.
pub fn render_map<W: Write>(
    out: &mut SvgWriter<W>,
    boundary: &MultiPolygon<f64>,
    reservoirs: &[Reservoir],
    config: &MapConfig,
) -> Result<()> {
    let bounds = match config.bounds {
        Some(fixed) => fixed.to_rect(),
        None => calculate_bounds(boundary)?,
    };
    debug!(
        "map bounds: lon {}..{} lat {}..{}",
        bounds.min().x,
        bounds.max().x,
        bounds.min().y,
        bounds.max().y
    );

    let target = ScreenRect::new(config.width, config.height, config.padding);
    let project = fill_projection(bounds, target);

    out.write_header(config.width, config.height, Some(&bounds))?;
    out.write_styles()?;

    let mut sink = SvgPathSink::new();
    render_multi_polygon(boundary, &project, &mut sink)?;
    writeln!(
        out,
        r#"<path class="boundary" fill-rule="evenodd" d="{}"/>"#,
        sink.into_data()
    )?;

    for reservoir in reservoirs {
        draw_marker(out, reservoir, &project, config.labels)?;
    }

    writeln!(
        out,
        r#"<text class="label" x="20" y="30" font-size="20">{}</text>"#,
        xml_escape(&config.title)
    )?;
    draw_legend(out, config.height)?;
    if let Some(attribution) = &config.attribution {
        writeln!(
            out,
            r#"<text class="label" x="20" y="{:.0}" font-size="8">{}</text>"#,
            config.height - 10.0,
            xml_escape(attribution)
        )?;
    }

    out.write_footer()?;
    out.flush()?;
    Ok(())
}

/// One reservoir marker: an outlined circle whose diameter encodes surface
/// area, with an inner translucent disc scaled by current fullness.
fn draw_marker<W: Write>(
    out: &mut SvgWriter<W>,
    reservoir: &Reservoir,
    project: &Projection,
    label: bool,
) -> Result<()> {
    let (x, y) = project(&reservoir.location);
    let diameter = marker_diameter(reservoir.area_km2);
    let water_diameter = reservoir.level_pct / 100.0 * diameter;

    writeln!(
        out,
        r#"<circle class="dam" cx="{x:.3}" cy="{y:.3}" r="{:.3}"/>"#,
        diameter / 2.0
    )?;
    writeln!(
        out,
        r#"<circle class="water" cx="{x:.3}" cy="{y:.3}" r="{:.3}"/>"#,
        water_diameter / 2.0
    )?;

    if label {
        writeln!(
            out,
            r#"<text class="label" x="{x:.3}" y="{:.3}" font-size="12" text-anchor="middle">{}</text>"#,
            y - diameter / 2.0 - 5.0,
            xml_escape(&reservoir.name)
        )?;
    }

    Ok(())
}

fn draw_legend<W: Write>(out: &mut SvgWriter<W>, canvas_height: f64) -> Result<()> {
    let cx = 30.0;
    let cy = canvas_height - 60.0;
    writeln!(out, r#"<circle class="dam" cx="{cx}" cy="{cy}" r="7.5"/>"#)?;
    writeln!(out, r#"<circle class="water" cx="{cx}" cy="{cy}" r="3.75"/>"#)?;
    writeln!(
        out,
        r#"<text class="label" x="45" y="{:.0}" font-size="12">Dam</text>"#,
        cy + 4.0
    )?;
    Ok(())
}

/// Render a reservoir's standalone detail panel: stat lines, water-level
/// bar, an aspect-true shape thumbnail when the dam geometry is known, and
/// the historical timeline.
pub fn render_detail<W: Write>(
    out: &mut SvgWriter<W>,
    reservoir: &Reservoir,
    shape: Option<&MultiPolygon<f64>>,
) -> Result<()> {
    let canvas_width = PANEL_WIDTH + 2.0 * PANEL_MARGIN;
    let canvas_height = PANEL_HEIGHT + 2.0 * PANEL_MARGIN;
    let px = PANEL_MARGIN;
    let py = PANEL_MARGIN;

    out.write_header(canvas_width, canvas_height, None)?;
    out.write_styles()?;

    writeln!(
        out,
        r#"<rect class="panel" x="{px}" y="{py}" width="{PANEL_WIDTH}" height="{PANEL_HEIGHT}"/>"#
    )?;

    writeln!(
        out,
        r#"<text class="label" x="{:.0}" y="{:.0}" font-size="16">{}</text>"#,
        px + 10.0,
        py + 25.0,
        xml_escape(&reservoir.name)
    )?;
    writeln!(
        out,
        r#"<text class="label" x="{:.0}" y="{:.0}" font-size="12">Area: {} km²</text>"#,
        px + 10.0,
        py + 50.0,
        reservoir.area_km2
    )?;
    writeln!(
        out,
        r#"<text class="label" x="{:.0}" y="{:.0}" font-size="12">Current Water Level: {}%</text>"#,
        px + 10.0,
        py + 70.0,
        reservoir.level_pct
    )?;

    draw_level_bar(out, reservoir.level_pct, px + 10.0, py + 85.0)?;

    if let Some(shape) = shape {
        draw_shape_thumbnail(out, shape, px + 10.0, py + 130.0)?;
    }

    // The timeline slides up into the thumbnail's slot when no shape is
    // available.
    let timeline_y = if shape.is_some() { py + 220.0 } else { py + 130.0 };
    draw_timeline(out, reservoir, px, timeline_y)?;

    draw_close_glyph(out, px, py)?;

    out.write_footer()?;
    out.flush()?;
    Ok(())
}

fn draw_level_bar<W: Write>(out: &mut SvgWriter<W>, level_pct: f64, x: f64, y: f64) -> Result<()> {
    let width = PANEL_WIDTH - 20.0;
    let height = 20.0;
    let fill_width = (level_pct / 100.0 * width).clamp(0.0, width);

    writeln!(
        out,
        r#"<rect class="water" x="{x:.0}" y="{y:.0}" width="{fill_width:.3}" height="{height}"/>"#
    )?;
    writeln!(
        out,
        r#"<rect class="frame" x="{x:.0}" y="{y:.0}" width="{width}" height="{height}"/>"#
    )?;
    Ok(())
}

fn draw_shape_thumbnail<W: Write>(
    out: &mut SvgWriter<W>,
    shape: &MultiPolygon<f64>,
    x: f64,
    y: f64,
) -> Result<()> {
    writeln!(
        out,
        r#"<rect class="thumb" x="{x:.0}" y="{y:.0}" width="{THUMB_WIDTH}" height="{THUMB_HEIGHT}"/>"#
    )?;

    // The thumbnail fits the dam's own bounds, not the map's, so the shape
    // fills its box regardless of where the dam sits in the province.
    let bounds = calculate_bounds(shape)?;
    let target = ScreenRect::new(THUMB_WIDTH, THUMB_HEIGHT, THUMB_PADDING);
    let project = fit_projection(bounds, target, (x, y));

    let mut sink = SvgPathSink::new();
    render_multi_polygon(shape, &project, &mut sink)?;
    writeln!(
        out,
        r#"<path class="shape" fill-rule="evenodd" d="{}"/>"#,
        sink.into_data()
    )?;
    Ok(())
}

fn draw_timeline<W: Write>(
    out: &mut SvgWriter<W>,
    reservoir: &Reservoir,
    px: f64,
    y: f64,
) -> Result<()> {
    let timeline = &reservoir.timeline;
    let (Some(first), Some(last)) = (timeline.first(), timeline.last()) else {
        return Ok(());
    };

    writeln!(
        out,
        r#"<text class="label" x="{:.0}" y="{y:.0}" font-size="12">Historical Water Levels:</text>"#,
        px + 10.0
    )?;

    let chart_x = px + 25.0;
    let chart_y = y + 10.0;

    writeln!(
        out,
        r#"<line class="axis" x1="{chart_x:.0}" y1="{:.0}" x2="{:.0}" y2="{:.0}"/>"#,
        chart_y + CHART_HEIGHT,
        chart_x + CHART_WIDTH,
        chart_y + CHART_HEIGHT
    )?;
    writeln!(
        out,
        r#"<line class="axis" x1="{chart_x:.0}" y1="{chart_y:.0}" x2="{chart_x:.0}" y2="{:.0}"/>"#,
        chart_y + CHART_HEIGHT
    )?;

    if timeline.len() > 1 {
        let points: Vec<String> = timeline
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let x = chart_x + i as f64 / (timeline.len() - 1) as f64 * CHART_WIDTH;
                let y = chart_y + CHART_HEIGHT - record.level_pct / 100.0 * CHART_HEIGHT;
                format!("{x:.3},{y:.3}")
            })
            .collect();
        writeln!(out, r#"<polyline class="series" points="{}"/>"#, points.join(" "))?;
    }

    // Year labels on the endpoints only.
    writeln!(
        out,
        r#"<text class="label" x="{chart_x:.0}" y="{:.0}" font-size="10" text-anchor="middle">{}</text>"#,
        chart_y + CHART_HEIGHT + 12.0,
        first.year
    )?;
    if timeline.len() > 1 {
        writeln!(
            out,
            r#"<text class="label" x="{:.0}" y="{:.0}" font-size="10" text-anchor="middle">{}</text>"#,
            chart_x + CHART_WIDTH,
            chart_y + CHART_HEIGHT + 12.0,
            last.year
        )?;
    }

    Ok(())
}

fn draw_close_glyph<W: Write>(out: &mut SvgWriter<W>, px: f64, py: f64) -> Result<()> {
    let right = px + PANEL_WIDTH;
    writeln!(
        out,
        r#"<line class="glyph" x1="{:.0}" y1="{:.0}" x2="{:.0}" y2="{:.0}"/>"#,
        right - 18.0,
        py + 8.0,
        right - 8.0,
        py + 18.0
    )?;
    writeln!(
        out,
        r#"<line class="glyph" x1="{:.0}" y1="{:.0}" x2="{:.0}" y2="{:.0}"/>"#,
        right - 8.0,
        py + 8.0,
        right - 18.0,
        py + 18.0
    )?;
    Ok(())
}

/// Linear map from one range onto another, extrapolating past the ends.
fn lin_map(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Marker diameter in pixels for a reservoir's surface area.
fn marker_diameter(area_km2: f64) -> f64 {
    let (d0, d1) = MARKER_AREA_DOMAIN;
    let (r0, r1) = MARKER_DIAMETER_RANGE;
    lin_map(area_km2, d0, d1, r0, r1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_diameter_spans_its_range() {
        assert_eq!(marker_diameter(0.0), 10.0);
        assert_eq!(marker_diameter(25.0), 40.0);
        assert_eq!(marker_diameter(12.5), 25.0);
    }

    #[test]
    fn marker_diameter_extrapolates_like_the_sizing_map() {
        // No clamping: unusually large reservoirs keep growing.
        assert_eq!(marker_diameter(30.0), 46.0);
    }

    #[test]
    fn lin_map_handles_inverted_output_ranges() {
        assert_eq!(lin_map(25.0, 0.0, 100.0, 100.0, 0.0), 75.0);
    }
}
