//! Embedded query extraction and merge into the caller's parameters.

use crate::params::{ParameterValue, ParametersMap, Scalar, ARRAY_KEY_SUFFIX};

pub(super) const QUERY_START: char = '?';
pub(super) const PAIR_SEPARATOR: char = '&';
pub(super) const KEY_VALUE_SEPARATOR: char = '=';

/// Splits `path` at its first `?` and merges the query behind it into
/// `parameters`. Returns the path without the query.
///
/// Values already in `parameters` win: a plain key that is present is left
/// alone, and an array key is only appended to an existing sequence. Keys not
/// yet present are added after the existing ones, in order of first appearance.
pub(super) fn extract_existing_parameters(path: &str, parameters: &mut ParametersMap) -> String {
    let Some((path, query)) = path.split_once(QUERY_START) else {
        return path.to_string();
    };

    for entry in query.split(PAIR_SEPARATOR).filter(|e| !e.is_empty()) {
        let (key, value) = entry.split_once(KEY_VALUE_SEPARATOR).unwrap_or((entry, ""));
        let value = Scalar::Text(value.to_string());

        if let Some(key) = key.strip_suffix(ARRAY_KEY_SUFFIX) {
            match parameters.get_mut(key) {
                None => {
                    parameters.insert(key.to_string(), ParameterValue::Sequence(vec![value]));
                }
                Some(ParameterValue::Sequence(items)) => items.push(value),
                Some(_) => {
                    tracing::trace!(key, "dropped embedded array value for non-array key");
                }
            }
        } else if parameters.contains_key(key) {
            tracing::trace!(key, "embedded value shadowed by supplied parameter");
        } else {
            parameters.insert(key.to_string(), ParameterValue::Scalar(value));
        }
    }

    path.to_string()
}
