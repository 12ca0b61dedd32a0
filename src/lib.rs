#![doc = "Watermap public API"]
pub mod cli;
pub mod commands;
mod common;
mod geom;
mod map;

#[doc(inline)]
pub use geom::{
    GeometryError, PathSink, Projection, ScreenRect, calculate_bounds, fill_projection,
    fit_projection, project_point, project_point_fit, render_multi_polygon,
};

#[doc(inline)]
pub use map::{
    BoundsConfig, LevelRecord, MapConfig, Reservoir, read_reservoirs, render_detail, render_map,
};

#[doc(inline)]
pub use common::io::geojson::read_boundary;

#[doc(inline)]
pub use common::io::svg::{SvgPathSink, SvgWriter};
