//! Runtime settings, read from an optional `params.json` in the
//! working directory. A missing file falls back to defaults with a
//! warning; a present but malformed file is a startup error.

use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, err) => write!(f, "could not read {}: {err}", path.display()),
            ConfigError::Parse(path, err) => {
                write!(f, "could not parse {}: {err}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Bind address of the HTTP server.
    pub host: String,
    pub port: u16,
    /// Veloland cycling-path layer (GeoJSON, LV95).
    pub segments_file: PathBuf,
    /// swissTLMRegio named-location layer (GeoJSON, LV95).
    pub locations_file: PathBuf,
    /// Maximum distance a coordinate anchor may sit from
    /// the nearest junction.
    pub max_snap_m: f64,
    /// Comma-separated origins allowed by CORS; empty allows none.
    pub allowed_origins: String,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            host: "0.0.0.0".to_string(),
            port: 8050,
            segments_file: PathBuf::from("data/veloland.geojson"),
            locations_file: PathBuf::from("data/locations.geojson"),
            max_snap_m: 500.0,
            allowed_origins: String::new(),
        }
    }
}

impl Params {
    /// Reads parameters from `path`, defaulting when the file is absent.
    pub fn load(path: &Path) -> Result<Params, ConfigError> {
        if !path.exists() {
            warn!(
                "The {} file is missing: using default settings.",
                path.display()
            );
            return Ok(Params::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        serde_json::from_str(&raw).map_err(|err| ConfigError::Parse(path.to_path_buf(), err))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let params = Params::load(Path::new("/nonexistent/params.json")).expect("load failed");
        assert_eq!(params.port, 8050);
        assert_eq!(params.host, "0.0.0.0");
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("velorouter-params-{}", std::process::id()));
        std::fs::write(&path, r#"{ "port": 9000 }"#).expect("could not write fixture");

        let params = Params::load(&path).expect("load failed");
        assert_eq!(params.port, 9000);
        assert_eq!(params.max_snap_m, 500.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path =
            std::env::temp_dir().join(format!("velorouter-params-bad-{}", std::process::id()));
        std::fs::write(&path, r#"{ "port": "not a number" }"#).expect("could not write fixture");

        assert!(matches!(
            Params::load(&path),
            Err(ConfigError::Parse(_, _))
        ));
    }
}
