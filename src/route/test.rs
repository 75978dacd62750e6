use approx::assert_relative_eq;
use test_log::test;

use crate::crs::{Coord3, Lv95};
use crate::dataset::{NamedLocation, RouteSegment, Surface};
use crate::route::error::RouteError;
use crate::route::gpx::{filename, to_gpx, write_gpx};
use crate::route::{Anchor, Graph};

const SNAP_M: f64 = 500.0;

fn seg(coords: &[(f64, f64, f64)], surface: Surface) -> RouteSegment {
    RouteSegment::new(
        coords.iter().map(|(e, n, z)| Coord3::new(*e, *n, *z)).collect(),
        surface,
    )
}

const A: (f64, f64, f64) = (2_600_000.0, 1_200_000.0, 500.0);
const B: (f64, f64, f64) = (2_600_500.0, 1_200_000.0, 520.0);
const C: (f64, f64, f64) = (2_601_000.0, 1_200_000.0, 510.0);
const D: (f64, f64, f64) = (2_600_500.0, 1_200_500.0, 540.0);
const X: (f64, f64, f64) = (2_700_000.0, 1_250_000.0, 800.0);
const Y: (f64, f64, f64) = (2_700_500.0, 1_250_000.0, 820.0);

/// A small network in two components: a T around `B`,
/// and a disconnected island `X`-`Y`.
fn segments() -> Vec<RouteSegment> {
    vec![
        seg(&[A, B], Surface::Paved),
        seg(&[B, C], Surface::Unpaved),
        seg(&[B, D], Surface::Paved),
        seg(&[X, Y], Surface::Paved),
        // A longer parallel connection A-B which must collapse away
        seg(
            &[A, (2_600_250.0, 1_200_350.0, 530.0), B],
            Surface::Paved,
        ),
    ]
}

fn gazetteer() -> Vec<NamedLocation> {
    vec![
        NamedLocation::new("Aarberg", Lv95::new(2_600_010.0, 1_200_030.0)),
        NamedLocation::new("Bern", Lv95::new(2_601_020.0, 1_200_010.0)),
        // A second, further-away "Bern" must lose the resolution
        NamedLocation::new("Bern", Lv95::new(2_700_100.0, 1_250_100.0)),
        NamedLocation::new("Dorf", Lv95::new(2_600_490.0, 1_200_480.0)),
        NamedLocation::new("Brugg", Lv95::new(2_600_510.0, 1_200_020.0)),
        NamedLocation::new("Xanadu", Lv95::new(2_700_010.0, 1_250_020.0)),
    ]
}

fn init_graph() -> Graph {
    Graph::new(segments(), gazetteer()).expect("could not build graph")
}

fn named(name: &str) -> Anchor {
    Anchor::Named(name.to_string())
}

#[test]
fn direct_route_with_statistics() {
    let graph = init_graph();

    let itinerary = graph
        .route(&[named("Aarberg"), named("Bern")], SNAP_M)
        .expect("could not route");

    assert_eq!(itinerary.segments.len(), 2);
    assert_eq!(itinerary.stops[0].position, Lv95::new(A.0, A.1));
    assert_eq!(itinerary.stops[1].position, Lv95::new(C.0, C.1));

    let summary = itinerary.summary();
    assert_relative_eq!(summary.length_km, 1.0);
    assert_relative_eq!(summary.length_unpaved_km, 0.5);
    assert_relative_eq!(summary.height_gain_m, 20.0); // 500 -> 520
    assert_relative_eq!(summary.height_loss_m, 10.0); // 520 -> 510
}

#[test]
fn via_route_is_split_into_legs() {
    let graph = init_graph();

    let itinerary = graph
        .route(&[named("Aarberg"), named("Dorf"), named("Bern")], SNAP_M)
        .expect("could not route");

    // A-B, B-D then back D-B, B-C
    assert_eq!(itinerary.segments.len(), 4);
    assert_eq!(
        itinerary
            .segments
            .iter()
            .map(|traversed| traversed.leg)
            .collect::<Vec<_>>(),
        vec![0, 0, 1, 1]
    );

    // The second leg departs from the via junction
    assert_eq!(itinerary.segments[2].segment.first(), Lv95::new(D.0, D.1));

    assert_relative_eq!(itinerary.summary().length_km, 2.0);
}

#[test]
fn geometry_is_oriented_along_travel() {
    let graph = init_graph();

    // Bern -> Aarberg traverses both segments against storage order
    let itinerary = graph
        .route(&[named("Bern"), named("Aarberg")], SNAP_M)
        .expect("could not route");

    assert_eq!(itinerary.segments[0].segment.first(), Lv95::new(C.0, C.1));
    assert_eq!(itinerary.segments[1].segment.last(), Lv95::new(A.0, A.1));

    // Gain and loss swap when walking the other way
    let summary = itinerary.summary();
    assert_relative_eq!(summary.height_gain_m, 10.0);
    assert_relative_eq!(summary.height_loss_m, 20.0);
}

#[test]
fn parallel_segments_collapse_to_shortest() {
    let graph = init_graph();

    let itinerary = graph
        .route(&[named("Aarberg"), named("Brugg")], SNAP_M)
        .expect("could not route");

    assert_eq!(itinerary.segments.len(), 1);
    // The straight 500m connection wins over the 860m detour
    assert_eq!(itinerary.segments[0].segment.geometry.len(), 2);
    assert_relative_eq!(itinerary.summary().length_km, 0.5);
}

#[test]
fn disconnected_components_yield_no_path() {
    let graph = init_graph();

    let result = graph.route(&[named("Aarberg"), named("Xanadu")], SNAP_M);
    assert!(matches!(result, Err(RouteError::NoPath { .. })));
}

#[test]
fn unknown_location_is_reported() {
    let graph = init_graph();

    let result = graph.route(&[named("Atlantis"), named("Bern")], SNAP_M);
    assert!(matches!(result, Err(RouteError::UnknownLocation(name)) if name == "Atlantis"));
}

#[test]
fn identical_stops_are_rejected() {
    let graph = init_graph();

    let result = graph.route(&[named("Aarberg"), named("Aarberg")], SNAP_M);
    assert!(matches!(result, Err(RouteError::IdenticalStops(_))));
}

#[test]
fn duplicate_gazetteer_names_keep_nearest() {
    let graph = init_graph();

    // The second "Bern" sits next to the island but further away,
    // so the name must still resolve onto the main component
    let itinerary = graph
        .route(&[named("Aarberg"), named("Bern")], SNAP_M)
        .expect("could not route");
    assert_eq!(itinerary.stops[1].position, Lv95::new(C.0, C.1));
}

#[test]
fn coordinate_anchor_snaps_to_junction() {
    let graph = init_graph();

    let start = Anchor::Coordinate(Lv95::new(A.0 + 30.0, A.1 + 40.0).to_wgs84());
    let itinerary = graph
        .route(&[start, named("Bern")], SNAP_M)
        .expect("could not route");

    // Snapped onto the A junction, within projection tolerance
    assert!(itinerary.stops[0].position.distance(&Lv95::new(A.0, A.1)) < 5.0);
    assert_eq!(itinerary.segments.len(), 2);
}

#[test]
fn off_network_coordinate_is_rejected() {
    let graph = init_graph();

    let remote = Anchor::Coordinate(Lv95::new(2_650_000.0, 1_203_000.0).to_wgs84());
    let result = graph.route(&[remote, named("Bern")], SNAP_M);
    assert!(matches!(result, Err(RouteError::OutsideNetwork { .. })));
}

#[test]
fn out_of_range_coordinate_is_rejected() {
    let graph = init_graph();

    let invalid = Anchor::parse("95.0,7.0");
    let result = graph.route(&[invalid, named("Bern")], SNAP_M);
    assert!(matches!(result, Err(RouteError::InvalidCoordinate(_))));
}

#[test]
fn anchor_parsing() {
    assert_eq!(Anchor::parse("Bern"), Anchor::Named("Bern".to_string()));
    assert_eq!(
        Anchor::parse("Romont FR"),
        Anchor::Named("Romont FR".to_string())
    );
    assert!(matches!(Anchor::parse("46.95, 7.44"), Anchor::Coordinate(_)));
    // A trailing comma is not a coordinate
    assert!(matches!(Anchor::parse("Bern,"), Anchor::Named(_)));
}

#[test]
fn graph_construction_is_deterministic() {
    let first = init_graph();
    let second = init_graph();

    assert_eq!(first.size(), second.size());
    assert_eq!(first.location_names(), second.location_names());

    let route_a = first
        .route(&[named("Aarberg"), named("Bern")], SNAP_M)
        .expect("could not route");
    let route_b = second
        .route(&[named("Aarberg"), named("Bern")], SNAP_M)
        .expect("could not route");
    assert_eq!(route_a, route_b);
}

#[test]
fn location_names_are_sorted() {
    let graph = init_graph();
    let names = graph.location_names();

    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(names.contains(&"Aarberg".to_string()));
}

#[test]
fn profile_distances_are_cumulative() {
    let graph = init_graph();

    let itinerary = graph
        .route(&[named("Aarberg"), named("Bern")], SNAP_M)
        .expect("could not route");
    let profile = itinerary.profile();

    assert_eq!(profile.len(), 2);
    assert_relative_eq!(profile[0].km, 0.5);
    assert_relative_eq!(profile[1].km, 1.0);
    assert!(profile.windows(2).all(|pair| pair[0].km < pair[1].km));
}

#[test]
fn gpx_export() {
    let graph = init_graph();

    let itinerary = graph
        .route(&[named("Aarberg"), named("Dorf"), named("Bern")], SNAP_M)
        .expect("could not route");

    let gpx = to_gpx(&itinerary);
    assert_eq!(gpx.tracks.len(), 1);
    assert_eq!(gpx.tracks[0].segments.len(), 2); // one per leg
    assert_eq!(gpx.waypoints.len(), 3); // one per stop

    assert_eq!(filename(&itinerary), "Aarberg-Dorf-Bern.gpx");

    let bytes = write_gpx(&itinerary).expect("could not serialise");
    let xml = String::from_utf8(bytes).expect("gpx output is not utf-8");
    assert!(xml.contains("<gpx"));
    assert!(xml.contains("<trkseg"));
}
