//! Helpers shared by the DTO modules of every API generation.
//!
//! DTO fields are `Option<T>` throughout so a partially populated value
//! serializes only the fields that were set. That is what the partial-update
//! endpoints rely on to tell "leave unchanged" apart from "reset to default".

use serde::{Deserialize, Deserializer};

/// Implements `Display` as pretty-printed JSON for each listed DTO.
macro_rules! json_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    let rendered = serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?;
                    f.write_str(&rendered)
                }
            }
        )+
    };
}

pub(crate) use json_display;

/// Append `segment` to `prefix` as a single path component.
///
/// Identifiers are taken verbatim; the URL parser applies standard path
/// encoding when the request is resolved.
pub(crate) fn path(prefix: &str, segment: &str) -> String {
    format!("{prefix}/{segment}")
}

/// Reads an explicit JSON `null` as an empty list.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
    }

    json_display!(Sample);

    #[test]
    fn display_is_pretty_json() {
        let rendered = Sample { name: "readers" }.to_string();
        assert_eq!(rendered, "{\n  \"name\": \"readers\"\n}");
    }

    #[test]
    fn path_joins_with_single_slash() {
        assert_eq!(super::path("ui/users", "jane"), "ui/users/jane");
    }
}
