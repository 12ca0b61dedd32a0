pub(crate) mod geojson;
pub(crate) mod svg;
