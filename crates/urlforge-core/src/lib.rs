pub mod config;
pub mod logging;

pub mod params;
pub mod url_builder;

pub use params::{ParamError, ParameterValue, ParametersMap, PathPart, PathParts, Scalar};
pub use url_builder::{build_url, BuildOptions};
