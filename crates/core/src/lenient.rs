//! Decoders for the backend's loosely typed scalar columns.
//!
//! Flags arrive as `true`, `1` or `"1"`; amounts as `2.5` or `"2.5000"`;
//! nullable text as `null`. Use with `#[serde(default, deserialize_with = ...)]`
//! so a missing field and `null` both fall back to the default.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Num(f64),
    Str(String),
}

/// Boolean flag: `true`/`false`, `0`/`1`, or their text forms. `null` is `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Scalar::Bool(b)) => Ok(b),
        Some(Scalar::Num(n)) => Ok(n != 0.0),
        Some(Scalar::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "false" | "no" => Ok(false),
            "1" | "true" | "yes" => Ok(true),
            other => Err(D::Error::custom(format!("invalid flag `{other}`"))),
        },
    }
}

/// Amount or quantity: a number or numeric text. `null` and blank text are `0`.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_number(deserializer)?.unwrap_or_default())
}

/// Like [`number`], but `null` and blank text are `None`.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Num(n)) => Ok(Some(n)),
        Some(Scalar::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(Scalar::Str(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid number `{s}`"))),
        Some(Scalar::Bool(b)) => Err(D::Error::custom(format!("expected a number, got `{b}`"))),
    }
}

/// Text where the backend may send `null` (read as empty) or a bare number.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(String::new()),
        Some(Scalar::Str(s)) => Ok(s),
        Some(Scalar::Num(n)) => Ok(n.to_string()),
        Some(Scalar::Bool(b)) => Ok(b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "flag")]
        inactive: bool,
        #[serde(default, deserialize_with = "number")]
        price: f64,
        #[serde(default, deserialize_with = "optional_number")]
        discount: Option<f64>,
        #[serde(default, deserialize_with = "text")]
        action: String,
    }

    fn row(raw: &str) -> Row {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn flags_accept_tinyint_and_text() {
        assert!(row(r#"{"inactive":1}"#).inactive);
        assert!(row(r#"{"inactive":"1"}"#).inactive);
        assert!(row(r#"{"inactive":true}"#).inactive);
        assert!(!row(r#"{"inactive":0}"#).inactive);
        assert!(!row(r#"{"inactive":"false"}"#).inactive);
        assert!(!row(r#"{"inactive":null}"#).inactive);
        assert!(!row("{}").inactive);
        assert!(serde_json::from_str::<Row>(r#"{"inactive":"maybe"}"#).is_err());
    }

    #[test]
    fn amounts_accept_decimal_strings() {
        assert_eq!(row(r#"{"price":"2.5000"}"#).price, 2.5);
        assert_eq!(row(r#"{"price":3}"#).price, 3.0);
        assert_eq!(row(r#"{"price":null}"#).price, 0.0);
        assert_eq!(row(r#"{"discount":""}"#).discount, None);
        assert_eq!(row(r#"{"discount":"0.10"}"#).discount, Some(0.1));
        assert!(serde_json::from_str::<Row>(r#"{"price":"n/a"}"#).is_err());
    }

    #[test]
    fn null_text_reads_as_empty() {
        assert_eq!(row(r#"{"action":null}"#).action, "");
        assert_eq!(row(r#"{"action":"invoice"}"#).action, "invoice");
    }
}
