pub mod earthquake;
pub mod geojson;
