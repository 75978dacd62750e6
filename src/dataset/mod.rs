//! Reads the two source layers — Veloland cycling-path segments and
//! swissTLMRegio named locations — from GeoJSON into validated
//! in-memory collections. Nothing downstream touches the files again;
//! a failed load never leaks partial state.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod location;
#[doc(hidden)]
pub mod reader;
#[doc(hidden)]
pub mod segment;

#[doc(inline)]
pub use location::NamedLocation;
#[doc(inline)]
pub use reader::{load_locations, load_segments};
#[doc(inline)]
pub use segment::{RouteSegment, Surface};
