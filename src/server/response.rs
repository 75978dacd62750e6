//! GeoJSON assembly for the map client: the traversed segments as
//! LineStrings, the stops as markers, and the summary/profile data
//! carried as foreign members.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use crate::route::Itinerary;

pub fn feature_collection(itinerary: &Itinerary) -> FeatureCollection {
    let mut features = Vec::with_capacity(itinerary.segments.len() + itinerary.stops.len());

    for traversed in &itinerary.segments {
        let coordinates = traversed
            .segment
            .geometry
            .iter()
            .map(|coord| {
                let point = coord.planar().to_wgs84();
                vec![point.x(), point.y(), coord.z]
            })
            .collect();

        let (gain, loss) = traversed.segment.height_diff();
        let mut properties = JsonObject::new();
        properties.insert("leg".to_string(), traversed.leg.into());
        properties.insert("seq".to_string(), traversed.seq.into());
        properties.insert(
            "paved".to_string(),
            traversed.segment.surface.is_paved().into(),
        );
        properties.insert("length_km".to_string(), traversed.segment.length_km().into());
        properties.insert("height_gain_m".to_string(), gain.into());
        properties.insert("height_loss_m".to_string(), loss.into());

        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(coordinates))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    for (index, stop) in itinerary.stops.iter().enumerate() {
        let point = stop.position.to_wgs84();
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), stop.label.clone().into());
        properties.insert("stop".to_string(), index.into());

        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![point.x(), point.y()]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        "summary".to_string(),
        serde_json::json!(itinerary.summary()),
    );
    foreign_members.insert(
        "profile".to_string(),
        serde_json::json!(itinerary.profile()),
    );

    FeatureCollection {
        bbox: itinerary
            .wgs84_bounds()
            .map(|(w, s, e, n)| vec![w, s, e, n]),
        features,
        foreign_members: Some(foreign_members),
    }
}
