//! LV95 (EPSG:2056) planar coordinates and the swisstopo
//! approximation formulas for converting to and from WGS84.
//!
//! All routing maths is done in LV95 metres; WGS84 only appears
//! at the HTTP boundary (request coordinates, GeoJSON and GPX output).

pub mod lv95;

#[doc(inline)]
pub use lv95::{Coord3, Lv95, SWISS_EXTENT};
