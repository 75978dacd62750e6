#[derive(Debug)]
pub enum RouteError {
    /// The name did not resolve against the gazetteer.
    UnknownLocation(String),
    /// Two consecutive stops resolved to the same junction.
    IdenticalStops(String),
    /// A coordinate anchor was non-finite or outside valid lat/lng ranges.
    InvalidCoordinate(String),
    /// The anchor lies further from the network than the snapping tolerance.
    OutsideNetwork { label: String, distance_m: f64 },
    /// The stops lie in disconnected components of the network.
    NoPath { from: String, to: String },
    /// Fewer than two stops were supplied.
    NotEnoughStops,
    /// The segment collection produced a graph with no edges.
    EmptyNetwork,
    /// An edge on the computed path had no stored geometry.
    MissingSegment,
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::UnknownLocation(name) => write!(f, "location {name:?} not found"),
            RouteError::IdenticalStops(name) => {
                write!(f, "consecutive stops both resolve to {name:?}")
            }
            RouteError::InvalidCoordinate(reason) => write!(f, "invalid coordinate: {reason}"),
            RouteError::OutsideNetwork { label, distance_m } => write!(
                f,
                "{label:?} is {distance_m:.0}m from the nearest junction, beyond the snapping tolerance"
            ),
            RouteError::NoPath { from, to } => {
                write!(f, "no path between {from:?} and {to:?}")
            }
            RouteError::NotEnoughStops => write!(f, "at least two stops are required"),
            RouteError::EmptyNetwork => write!(f, "the segment layer produced an empty network"),
            RouteError::MissingSegment => write!(f, "path edge without stored geometry"),
        }
    }
}

impl std::error::Error for RouteError {}
