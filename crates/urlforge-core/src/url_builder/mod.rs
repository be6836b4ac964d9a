//! URL assembly from path fragments and query parameters.
//!
//! [`build_url`] runs five stages on every call:
//! - set aside a `scheme://` or leading `/` from the first fragment,
//! - flatten all fragments into one `/`-joined path without empty segments,
//!   replacing `:name` placeholders with scalar parameters (which are consumed),
//! - split off any `?query` already in the path and merge it into the parameters,
//! - restore the scheme or leading slash,
//! - append the parameters as a query string (`key[]=v` for sequences).

mod encode;
mod path;
mod query;

pub use encode::{encode_uri, serialize_parameters};

use crate::params::{ParameterValue, ParametersMap, PathParts};
use path::Prefix;

/// Options for [`build_url`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOptions {
    /// Query parameters; also the source for `:name` placeholders.
    pub parameters: ParametersMap,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(parameters: ParametersMap) -> Self {
        Self { parameters }
    }

    /// Adds (or replaces) one parameter, keeping the key's original position.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Builds a normalized URL from `path` and the parameters in `options`.
///
/// Never fails: degenerate input (no fragments, empty strings, empty
/// sequences, malformed embedded query entries) yields a well-defined string.
///
/// # Examples
///
/// - `build_url("///my///test-path///", BuildOptions::new())` → `"/my/test-path"`
/// - `build_url(["https://h/", "a/:id"], BuildOptions::new().param("id", 1).param("other", 2))`
///   → `"https://h/a/1?other=2"`
pub fn build_url(path: impl Into<PathParts>, options: BuildOptions) -> String {
    let mut parts = path.into().into_strings();
    let mut parameters = options.parameters;

    if parts.is_empty() {
        parts.push(String::new());
    }

    let prefix = Prefix::detect(&mut parts[0]);
    let normalized = path::normalize(&parts, &mut parameters);
    let bare = query::extract_existing_parameters(&normalized, &mut parameters);

    let mut url = prefix.restore(&bare);
    encode::append_query(&mut url, &parameters);

    tracing::debug!(%url, "built url");
    url
}
