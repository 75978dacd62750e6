//! Serialises an itinerary as a GPX 1.1 track for the
//! "Download GPX" action.

use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::route::itinerary::Itinerary;

/// Converts the itinerary into a GPX document: one waypoint per stop
/// and a single track with one track segment per leg.
pub fn to_gpx(itinerary: &Itinerary) -> Gpx {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("velorouter".to_string()),
        ..Default::default()
    };

    for stop in &itinerary.stops {
        let mut waypoint = Waypoint::new(stop.position.to_wgs84());
        waypoint.name = Some(stop.label.clone());
        gpx.waypoints.push(waypoint);
    }

    let mut track = Track::default();
    track.name = Some(
        itinerary
            .stops
            .iter()
            .map(|stop| stop.label.as_str())
            .collect::<Vec<_>>()
            .join(" - "),
    );

    let mut current_leg = None;
    for traversed in &itinerary.segments {
        if current_leg != Some(traversed.leg) {
            track.segments.push(TrackSegment::default());
            current_leg = Some(traversed.leg);
        }

        let points = &mut track
            .segments
            .last_mut()
            .expect("track segment was just inserted")
            .points;

        for coord in &traversed.segment.geometry {
            let mut waypoint = Waypoint::new(coord.planar().to_wgs84());
            waypoint.elevation = Some(coord.z);

            // Consecutive traversed segments share their joint vertex
            if points.last().map(|last: &Waypoint| last.point()) != Some(waypoint.point()) {
                points.push(waypoint);
            }
        }
    }

    gpx.tracks.push(track);
    gpx
}

/// Writes the itinerary as GPX 1.1 XML.
pub fn write_gpx(itinerary: &Itinerary) -> crate::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    gpx::write(&to_gpx(itinerary), &mut buffer)?;
    Ok(buffer)
}

/// Download filename: stop labels joined with `-`,
/// spaces replaced by underscores.
pub fn filename(itinerary: &Itinerary) -> String {
    let joined = itinerary
        .stops
        .iter()
        .map(|stop| stop.label.as_str())
        .collect::<Vec<_>>()
        .join("-");

    format!("{}.gpx", joined.replace(' ', "_"))
}
