mod color;
mod path;
mod writer;

pub(crate) use color::*;
pub use path::SvgPathSink;
pub use writer::SvgWriter;
pub(crate) use writer::xml_escape;
