#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod config;
pub mod crs;
pub mod dataset;
pub mod route;
pub mod server;
pub mod util;

#[doc(inline)]
pub use config::Params;
#[doc(inline)]
pub use dataset::{NamedLocation, RouteSegment};
#[doc(inline)]
pub use route::Graph;

use crate::config::ConfigError;
use crate::dataset::error::DataLoadError;
use crate::route::error::RouteError;
use crate::server::error::ServerError;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error, aggregating the error types
/// of each submodule.
#[derive(Debug)]
pub enum Error {
    Dataset(DataLoadError),
    Route(RouteError),
    Config(ConfigError),
    Server(ServerError),
    Gpx(gpx::errors::GpxError),
}

impl_err!(DataLoadError, Dataset);
impl_err!(RouteError, Route);
impl_err!(ConfigError, Config);
impl_err!(ServerError, Server);
impl_err!(gpx::errors::GpxError, Gpx);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Dataset(err) => write!(f, "dataset: {err}"),
            Error::Route(err) => write!(f, "route: {err}"),
            Error::Config(err) => write!(f, "config: {err}"),
            Error::Server(err) => write!(f, "server: {err}"),
            Error::Gpx(err) => write!(f, "gpx: {err}"),
        }
    }
}

impl std::error::Error for Error {}
