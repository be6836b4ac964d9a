//! Path normalization, scheme / leading-slash detection and placeholder substitution.

use crate::params::{ParameterValue, ParametersMap};

pub(super) const SEPARATOR: char = '/';
pub(super) const PROTOCOL_SEPARATOR: &str = "://";

/// What was set aside from the first path part before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Prefix {
    None,
    LeadingSlash,
    /// May be empty (`"://host"`); an empty scheme is stripped and not restored.
    Scheme(String),
}

impl Prefix {
    /// Inspects the first part only. A `scheme://` is cut off the part; a leading
    /// separator is only recorded, normalization strips it anyway.
    pub(super) fn detect(first: &mut String) -> Self {
        if let Some((scheme, rest)) = first.split_once(PROTOCOL_SEPARATOR) {
            let prefix = Prefix::Scheme(scheme.to_string());
            *first = rest.to_string();
            return prefix;
        }
        if first.starts_with(SEPARATOR) {
            Prefix::LeadingSlash
        } else {
            Prefix::None
        }
    }

    pub(super) fn restore(&self, path: &str) -> String {
        match self {
            Prefix::Scheme(scheme) if !scheme.is_empty() => {
                format!("{scheme}{PROTOCOL_SEPARATOR}{path}")
            }
            Prefix::LeadingSlash => format!("{SEPARATOR}{path}"),
            _ => path.to_string(),
        }
    }
}

/// Joins every non-empty segment of every part with a single separator,
/// substituting placeholders along the way.
pub(super) fn normalize(parts: &[String], parameters: &mut ParametersMap) -> String {
    let mut segments: Vec<String> = Vec::new();
    for part in parts {
        for segment in part.split(SEPARATOR).filter(|s| !s.is_empty()) {
            segments.push(replace_placeholder(segment, parameters));
        }
    }
    segments.join(&SEPARATOR.to_string())
}

/// Replaces a `:name` segment with the scalar bound to `name`, consuming it.
pub(super) fn replace_placeholder(segment: &str, parameters: &mut ParametersMap) -> String {
    let Some(name) = placeholder_name(segment) else {
        return segment.to_string();
    };
    if !matches!(parameters.get(name), Some(ParameterValue::Scalar(_))) {
        return segment.to_string();
    }
    match parameters.shift_remove(name) {
        Some(ParameterValue::Scalar(value)) => {
            tracing::trace!(placeholder = name, %value, "substituted path placeholder");
            value.to_string()
        }
        _ => segment.to_string(),
    }
}

/// `:` followed by one or more `[A-Za-z0-9_]`.
fn placeholder_name(segment: &str) -> Option<&str> {
    let name = segment.strip_prefix(':')?;
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        Some(name)
    } else {
        None
    }
}
