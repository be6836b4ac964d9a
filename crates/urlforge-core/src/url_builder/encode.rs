//! Query string serialization.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::query::{KEY_VALUE_SEPARATOR, PAIR_SEPARATOR, QUERY_START};
use crate::params::{ParameterValue, ParametersMap, ARRAY_KEY_SUFFIX};

/// Bytes left untouched when encoding a value: unreserved and reserved URI characters.
const URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Percent-encodes everything outside [`URI_SET`]; non-ASCII goes out as UTF-8 bytes.
///
/// A `%` that already starts a `%XX` escape is kept, so encoding twice is a no-op;
/// any other `%` becomes `%25`.
pub fn encode_uri(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find('%') {
        out.extend(utf8_percent_encode(&rest[..pos], URI_SET));
        let tail = &rest[pos..];
        if starts_with_escape(tail) {
            out.push_str(&tail[..3]);
            rest = &tail[3..];
        } else {
            out.push_str("%25");
            rest = &tail[1..];
        }
    }
    out.extend(utf8_percent_encode(rest, URI_SET));
    out
}

fn starts_with_escape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 3 && b[1].is_ascii_hexdigit() && b[2].is_ascii_hexdigit()
}

/// Serializes `parameters` in map order, one entry per key joined by `&`.
/// Sequences become repeated `key[]=v` pairs (an empty sequence is an empty
/// entry); an absent value is `key=`.
pub fn serialize_parameters(parameters: &ParametersMap) -> String {
    let entries: Vec<String> = parameters
        .iter()
        .map(|(key, value)| match value {
            ParameterValue::Scalar(scalar) => {
                format!("{key}{KEY_VALUE_SEPARATOR}{}", encode_uri(&scalar.to_string()))
            }
            ParameterValue::Sequence(items) => items
                .iter()
                .map(|item| {
                    format!(
                        "{key}{ARRAY_KEY_SUFFIX}{KEY_VALUE_SEPARATOR}{}",
                        encode_uri(&item.to_string())
                    )
                })
                .collect::<Vec<_>>()
                .join(&PAIR_SEPARATOR.to_string()),
            ParameterValue::Absent => format!("{key}{KEY_VALUE_SEPARATOR}"),
        })
        .collect();
    entries.join(&PAIR_SEPARATOR.to_string())
}

/// Appends `?query` to `url` whenever `parameters` has at least one key.
pub(super) fn append_query(url: &mut String, parameters: &ParametersMap) {
    if parameters.is_empty() {
        return;
    }
    url.push(QUERY_START);
    url.push_str(&serialize_parameters(parameters));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_encode_uri() {
        assert_eq!(encode_uri("text with spaces"), "text%20with%20spaces");
        assert_eq!(encode_uri("a/b?c=d&e#f"), "a/b?c=d&e#f");
        assert_eq!(encode_uri("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri("<\"[]{}|\\^`>"), "%3C%22%5B%5D%7B%7D%7C%5C%5E%60%3E");
        assert_eq!(encode_uri("café"), "caf%C3%A9");
    }

    #[test]
    fn keeps_existing_escapes() {
        assert_eq!(encode_uri("a%20b"), "a%20b");
        assert_eq!(encode_uri("caf%C3%a9"), "caf%C3%a9");
    }

    #[test]
    fn escapes_lone_percent() {
        assert_eq!(encode_uri("100%"), "100%25");
        assert_eq!(encode_uri("%zz"), "%25zz");
        assert_eq!(encode_uri("%4"), "%254");
        assert_eq!(encode_uri("50% off"), "50%25%20off");
        assert_eq!(encode_uri(&encode_uri("100%")), "100%25");
    }

    #[test]
    fn serializes_every_value_shape() {
        let mut params = ParametersMap::new();
        params.insert("s".into(), ParameterValue::from("a b"));
        params.insert("n".into(), ParameterValue::from(3));
        params.insert("ss".into(), ParameterValue::from(vec!["x", "y z"]));
        params.insert("ns".into(), ParameterValue::from(vec![1, 2]));
        params.insert("empty".into(), ParameterValue::from(Vec::<i32>::new()));
        params.insert("none".into(), ParameterValue::Absent);
        assert_eq!(
            serialize_parameters(&params),
            "s=a%20b&n=3&ss[]=x&ss[]=y%20z&ns[]=1&ns[]=2&&none="
        );
    }

    #[test]
    fn append_query_follows_key_count() {
        let mut url = "a/b".to_string();
        append_query(&mut url, &ParametersMap::new());
        assert_eq!(url, "a/b");

        let mut only_empty = ParametersMap::new();
        only_empty.insert("t".into(), ParameterValue::Sequence(Vec::new()));
        append_query(&mut url, &only_empty);
        assert_eq!(url, "a/b?");

        let mut trailing_empty = ParametersMap::new();
        trailing_empty.insert("x".into(), ParameterValue::from(1));
        trailing_empty.insert("t".into(), ParameterValue::Sequence(Vec::new()));
        let mut url = "a/b".to_string();
        append_query(&mut url, &trailing_empty);
        assert_eq!(url, "a/b?x=1&");
    }
}
