mod bounds;
mod path;
mod proj;

pub use bounds::{GeometryError, calculate_bounds};
pub use path::{PathSink, render_multi_polygon};
pub use proj::{
    Projection, ScreenRect, fill_projection, fit_projection, project_point, project_point_fit,
};
