use std::path::PathBuf;

#[derive(Debug)]
pub enum DataLoadError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, geojson::Error),
    NotAFeatureCollection(PathBuf),
    UnsupportedCrs(String),
    InvalidGeometry(String),
    EmptyLayer(PathBuf),
}

impl std::fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLoadError::Io(path, err) => write!(f, "could not read {}: {err}", path.display()),
            DataLoadError::Parse(path, err) => {
                write!(f, "could not parse {}: {err}", path.display())
            }
            DataLoadError::NotAFeatureCollection(path) => {
                write!(f, "{} is not a GeoJSON FeatureCollection", path.display())
            }
            DataLoadError::UnsupportedCrs(crs) => {
                write!(f, "unsupported CRS {crs:?}, expected EPSG:2056 (LV95)")
            }
            DataLoadError::InvalidGeometry(reason) => write!(f, "invalid geometry: {reason}"),
            DataLoadError::EmptyLayer(path) => {
                write!(f, "{} contains no usable features", path.display())
            }
        }
    }
}

impl std::error::Error for DataLoadError {}
