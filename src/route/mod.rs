//! Routing graph over the cycling-path network, built once at startup
//! and queried read-only. Can be actioned upon using `route(stops)`.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod gpx;
#[doc(hidden)]
pub mod graph;
#[doc(hidden)]
pub mod itinerary;
#[doc(hidden)]
#[cfg(test)]
mod test;

#[doc(inline)]
pub use graph::{Graph, Junction, JunctionId};
#[doc(inline)]
pub use itinerary::{Anchor, Itinerary, ProfilePoint, Stop, Summary, TraversedSegment};
