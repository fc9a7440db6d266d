//! Decoders for the server's nullable column encodings.
//!
//! Depending on the endpoint, the server sends a nullable value either as a
//! plain JSON value, as `null`, or wrapped as `{"Bool": true, "Valid": true}`,
//! `{"String": "db1", "Valid": true}` or `{"Int64": 5432, "Valid": true}`.
//! These helpers fold all of them into `bool` / `Option<_>`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Plain(bool),
    Wrapped {
        #[serde(rename = "Bool", default)]
        value: bool,
        #[serde(rename = "Valid", default)]
        valid: bool,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Plain(String),
    Wrapped {
        #[serde(rename = "String", default)]
        value: String,
        #[serde(rename = "Valid", default)]
        valid: bool,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntRepr {
    Plain(i64),
    Wrapped {
        #[serde(rename = "Int64", default)]
        value: i64,
        #[serde(rename = "Valid", default)]
        valid: bool,
    },
}

/// Decodes a flag; a wrapped flag is true only when it is both valid and set.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<FlagRepr>::deserialize(deserializer)? {
        Some(FlagRepr::Plain(b)) => b,
        Some(FlagRepr::Wrapped { value, valid }) => valid && value,
        None => false,
    })
}

/// Decodes optional text; invalid wrappers and empty strings become `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<TextRepr>::deserialize(deserializer)? {
        Some(TextRepr::Plain(s)) => Some(s),
        Some(TextRepr::Wrapped { value, valid }) if valid => Some(value),
        _ => None,
    };
    Ok(value.filter(|s| !s.is_empty()))
}

/// Decodes an optional integer; invalid wrappers become `None`.
pub fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<IntRepr>::deserialize(deserializer)? {
        Some(IntRepr::Plain(n)) => Some(n),
        Some(IntRepr::Wrapped { value, valid }) if valid => Some(value),
        _ => None,
    })
}
