use std::fs;
use std::path::Path;

use geojson::{FeatureCollection, GeoJson, Value};
use log::{debug, info, warn};

use crate::crs::Coord3;
use crate::dataset::error::DataLoadError;
use crate::dataset::location::NamedLocation;
use crate::dataset::segment::{RouteSegment, Surface};

/// Veloland attribute carrying the surface classification.
const SURFACE_FIELD: &str = "BelagTLM";
/// swissTLMRegio attribute carrying the location name.
const NAME_FIELD: &str = "NAMN1";

/// Loads the cycling-path layer. MultiLineString features are exploded
/// into one [`RouteSegment`] per part, matching how the source data is
/// flattened before graph construction.
pub fn load_segments(path: &Path) -> Result<Vec<RouteSegment>, DataLoadError> {
    let collection = read_feature_collection(path)?;
    let mut segments = Vec::new();

    for (index, feature) in collection.features.iter().enumerate() {
        let surface = Surface::from_belag(
            feature
                .property(SURFACE_FIELD)
                .and_then(|value| value.as_str()),
        );

        let geometry = feature.geometry.as_ref().ok_or_else(|| {
            DataLoadError::InvalidGeometry(format!("feature {index} has no geometry"))
        })?;

        match &geometry.value {
            Value::LineString(line) => {
                segments.push(into_segment(line, surface, index)?);
            }
            Value::MultiLineString(lines) => {
                for line in lines {
                    segments.push(into_segment(line, surface, index)?);
                }
            }
            other => {
                return Err(DataLoadError::InvalidGeometry(format!(
                    "feature {index}: expected LineString, got {}",
                    geometry_kind(other)
                )));
            }
        }
    }

    if segments.is_empty() {
        return Err(DataLoadError::EmptyLayer(path.to_path_buf()));
    }

    info!(
        "Loaded {} path segments from {}",
        segments.len(),
        path.display()
    );
    Ok(segments)
}

/// Loads the named-location layer. Features without a usable name
/// are skipped, everything else must be a valid point.
pub fn load_locations(path: &Path) -> Result<Vec<NamedLocation>, DataLoadError> {
    let collection = read_feature_collection(path)?;
    let mut locations = Vec::new();

    for (index, feature) in collection.features.iter().enumerate() {
        let Some(name) = feature
            .property(NAME_FIELD)
            .and_then(|value| value.as_str())
            .filter(|name| !name.is_empty())
        else {
            debug!("Skipping unnamed location feature {index}");
            continue;
        };

        let geometry = feature.geometry.as_ref().ok_or_else(|| {
            DataLoadError::InvalidGeometry(format!("location {name:?} has no geometry"))
        })?;

        let Value::Point(position) = &geometry.value else {
            return Err(DataLoadError::InvalidGeometry(format!(
                "location {name:?}: expected Point, got {}",
                geometry_kind(&geometry.value)
            )));
        };

        let coord = validated_coord(position, &format!("location {name:?}"))?;
        locations.push(NamedLocation::new(name, coord.planar()));
    }

    if locations.is_empty() {
        return Err(DataLoadError::EmptyLayer(path.to_path_buf()));
    }

    info!(
        "Loaded {} named locations from {}",
        locations.len(),
        path.display()
    );
    Ok(locations)
}

fn read_feature_collection(path: &Path) -> Result<FeatureCollection, DataLoadError> {
    let raw =
        fs::read_to_string(path).map_err(|err| DataLoadError::Io(path.to_path_buf(), err))?;

    let geojson: GeoJson = raw
        .parse()
        .map_err(|err| DataLoadError::Parse(path.to_path_buf(), err))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(DataLoadError::NotAFeatureCollection(path.to_path_buf()));
    };

    validate_crs(&collection)?;
    Ok(collection)
}

/// Source layers are expected in LV95. A legacy `crs` member, when the
/// producer wrote one, must name EPSG:2056; an absent member is accepted
/// since the coordinate-extent validation catches lon/lat data anyway.
fn validate_crs(collection: &FeatureCollection) -> Result<(), DataLoadError> {
    let Some(crs) = collection
        .foreign_members
        .as_ref()
        .and_then(|members| members.get("crs"))
    else {
        return Ok(());
    };

    let name = crs
        .get("properties")
        .and_then(|properties| properties.get("name"))
        .and_then(|name| name.as_str())
        .unwrap_or_default();

    if name.contains("2056") {
        Ok(())
    } else {
        warn!("Rejecting layer with CRS {name:?}");
        Err(DataLoadError::UnsupportedCrs(name.to_string()))
    }
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn into_segment(
    line: &[Vec<f64>],
    surface: Surface,
    index: usize,
) -> Result<RouteSegment, DataLoadError> {
    if line.len() < 2 {
        return Err(DataLoadError::InvalidGeometry(format!(
            "feature {index}: line with fewer than two vertices"
        )));
    }

    let geometry = line
        .iter()
        .map(|position| validated_coord(position, &format!("feature {index}")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RouteSegment::new(geometry, surface))
}

fn validated_coord(position: &[f64], context: &str) -> Result<Coord3, DataLoadError> {
    let [e, n, rest @ ..] = position else {
        return Err(DataLoadError::InvalidGeometry(format!(
            "{context}: position with fewer than two ordinates"
        )));
    };

    let coord = Coord3::new(*e, *n, rest.first().copied().unwrap_or(0.0));

    if !coord.is_finite() {
        return Err(DataLoadError::InvalidGeometry(format!(
            "{context}: non-finite coordinate"
        )));
    }

    if !coord.planar().within_swiss_extent() {
        return Err(DataLoadError::InvalidGeometry(format!(
            "{context}: coordinate ({}, {}) outside the LV95 Swiss extent",
            coord.e, coord.n
        )));
    }

    Ok(coord)
}
