use geo::Point;
use serde::Serialize;

use crate::crs::Lv95;
use crate::dataset::RouteSegment;
use crate::route::error::RouteError;

/// A routing endpoint as supplied by the caller: either a place name
/// resolved through the gazetteer, or a WGS84 coordinate snapped to
/// the nearest junction.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    Named(String),
    Coordinate(Point<f64>),
}

impl Anchor {
    /// Parses a query token. A `lat,lng` decimal pair becomes a
    /// coordinate anchor, anything else is treated as a place name.
    pub fn parse(token: &str) -> Anchor {
        if let Some((lat, lng)) = token.split_once(',') {
            if let (Ok(lat), Ok(lng)) = (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) {
                return Anchor::Coordinate(Point::new(lng, lat));
            }
        }

        Anchor::Named(token.trim().to_string())
    }

    /// Human-readable form, used in error messages and GPX filenames.
    pub fn label(&self) -> String {
        match self {
            Anchor::Named(name) => name.clone(),
            Anchor::Coordinate(point) => format!("{:.5},{:.5}", point.y(), point.x()),
        }
    }

    /// Projects a coordinate anchor into LV95, validating ranges first.
    pub fn to_lv95(&self) -> Result<Lv95, RouteError> {
        let Anchor::Coordinate(point) = self else {
            return Err(RouteError::InvalidCoordinate(
                "not a coordinate anchor".to_string(),
            ));
        };

        let (lng, lat) = (point.x(), point.y());
        if !lng.is_finite() || !lat.is_finite() {
            return Err(RouteError::InvalidCoordinate(
                "non-finite coordinate".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(RouteError::InvalidCoordinate(format!(
                "({lat}, {lng}) outside valid lat/lng ranges"
            )));
        }

        let position = Lv95::from_wgs84(point);
        if !position.within_swiss_extent() {
            return Err(RouteError::InvalidCoordinate(format!(
                "({lat}, {lng}) lies outside Switzerland"
            )));
        }

        Ok(position)
    }
}

/// A resolved stop along the itinerary: the requested label and the
/// junction it snapped to.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub label: String,
    pub position: Lv95,
}

/// One network segment on the computed path, with its geometry already
/// oriented along the direction of travel.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversedSegment {
    pub leg: usize,
    pub seq: usize,
    pub segment: RouteSegment,
}

/// Route totals as shown in the results table.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub length_km: f64,
    pub length_unpaved_km: f64,
    pub height_gain_m: f64,
    pub height_loss_m: f64,
}

/// A sample of the height profile: cumulative distance against the
/// mean elevation of the segment ending there.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ProfilePoint {
    pub km: f64,
    pub elevation_m: f64,
}

/// The result of a route query: ordered traversed segments plus the
/// resolved stops. Read-only; all statistics derive from the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub stops: Vec<Stop>,
    pub segments: Vec<TraversedSegment>,
}

impl Itinerary {
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            length_km: 0.0,
            length_unpaved_km: 0.0,
            height_gain_m: 0.0,
            height_loss_m: 0.0,
        };

        for traversed in &self.segments {
            let length = traversed.segment.length_km();
            let (gain, loss) = traversed.segment.height_diff();

            summary.length_km += length;
            if !traversed.segment.surface.is_paved() {
                summary.length_unpaved_km += length;
            }
            summary.height_gain_m += gain;
            summary.height_loss_m += loss;
        }

        summary
    }

    /// Height profile over the whole itinerary: one sample per segment,
    /// at the cumulative distance including that segment.
    pub fn profile(&self) -> Vec<ProfilePoint> {
        let mut km = 0.0;

        self.segments
            .iter()
            .map(|traversed| {
                km += traversed.segment.length_km();
                ProfilePoint {
                    km,
                    elevation_m: traversed.segment.mean_elevation(),
                }
            })
            .collect()
    }

    /// WGS84 bounding box over every vertex, as
    /// `(lng_min, lat_min, lng_max, lat_max)`.
    pub fn wgs84_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;

        for traversed in &self.segments {
            for coord in &traversed.segment.geometry {
                let point = coord.planar().to_wgs84();
                bounds = Some(match bounds {
                    None => (point.x(), point.y(), point.x(), point.y()),
                    Some((w, s, e, n)) => (
                        w.min(point.x()),
                        s.min(point.y()),
                        e.max(point.x()),
                        n.max(point.y()),
                    ),
                });
            }
        }

        bounds
    }
}
