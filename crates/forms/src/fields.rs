//! Field-level validation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use ledgerdesk_core::RecordId;

/// Dates are entered as `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-field error messages, keyed by field name (`items[0].qty_issued` for
/// lines). The first message recorded for a field wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field errors from a backend validation body:
    /// `{"errors": {"price": ["The price field is required."]}}`.
    pub fn from_backend(body: &Value) -> Option<Self> {
        let fields = body.get("errors")?.as_object()?;

        let mut errors = Self::new();
        for (field, messages) in fields {
            let message = match messages {
                Value::Array(list) => list.iter().find_map(Value::as_str),
                Value::String(s) => Some(s.as_str()),
                _ => None,
            };
            if let Some(message) = message {
                errors.add(field.as_str(), message);
            }
        }

        (!errors.is_empty()).then_some(errors)
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Collects field errors while a draft is parsed.
///
/// Every check returns `None` exactly when it recorded an error, so a form
/// can match all its parsed fields at once and fall back to
/// [`Validator::into_errors`].
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blank text, trimmed.
    pub fn required(&mut self, field: &str, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.errors.add(field, "is required");
            return None;
        }
        Some(trimmed.to_string())
    }

    /// Trimmed text, `None` when blank. Never records an error.
    pub fn optional(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn id(&mut self, field: &str, raw: &str) -> Option<RecordId> {
        let raw = self.required(field, raw)?;
        match raw.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                self.errors.add(field, "is not a valid identifier");
                None
            }
        }
    }

    /// Identifier that may be left blank: `Some(None)` when blank, `None`
    /// when it was recorded invalid.
    pub fn optional_id(&mut self, field: &str, raw: &str) -> Option<Option<RecordId>> {
        match Self::optional(raw) {
            None => Some(None),
            Some(_) => self.id(field, raw).map(Some),
        }
    }

    pub fn number(&mut self, field: &str, raw: &str) -> Option<f64> {
        let raw = self.required(field, raw)?;
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                self.errors.add(field, "must be a number");
                None
            }
        }
    }

    pub fn non_negative(&mut self, field: &str, raw: &str) -> Option<f64> {
        let n = self.number(field, raw)?;
        self.ensure(field, n >= 0.0, "must not be negative").then_some(n)
    }

    pub fn positive(&mut self, field: &str, raw: &str) -> Option<f64> {
        let n = self.number(field, raw)?;
        self.ensure(field, n > 0.0, "must be greater than zero").then_some(n)
    }

    pub fn date(&mut self, field: &str, raw: &str) -> Option<NaiveDate> {
        let raw = self.required(field, raw)?;
        match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors.add(field, "must be a date (YYYY-MM-DD)");
                None
            }
        }
    }

    /// Record `message` for `field` unless `ok` holds. Returns `ok`.
    pub fn ensure(&mut self, field: &str, ok: bool, message: &str) -> bool {
        if !ok {
            self.errors.add(field, message);
        }
        ok
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_required_fields_are_reported() {
        let mut v = Validator::new();
        assert_eq!(v.required("name", "  "), None);
        assert_eq!(v.required("ref", " ACME "), Some("ACME".into()));

        let errors = v.into_errors();
        assert_eq!(errors.get("name"), Some("is required"));
        assert!(!errors.contains("ref"));
    }

    #[test]
    fn numbers_and_dates_are_parsed() {
        let mut v = Validator::new();
        assert_eq!(v.positive("qty", "2.5"), Some(2.5));
        assert_eq!(v.positive("factor", "0"), None);
        assert_eq!(v.non_negative("price", "abc"), None);
        assert_eq!(v.date("date", "2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(v.date("due", "29/02/2024"), None);

        let errors = v.into_errors();
        assert_eq!(errors.get("factor"), Some("must be greater than zero"));
        assert_eq!(errors.get("price"), Some("must be a number"));
        assert!(errors.contains("due"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn ids_prefer_integers() {
        let mut v = Validator::new();
        assert_eq!(v.id("supplier_id", "7"), Some(RecordId::Int(7)));
        assert_eq!(v.id("stock_id", "BOLT"), Some(RecordId::from("BOLT")));
        assert_eq!(v.optional_id("parent", ""), Some(None));
        assert!(v.is_valid());
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("price", "is required");
        errors.add("price", "must be a number");
        assert_eq!(errors.to_string(), "price: is required");
    }

    #[test]
    fn backend_validation_body_maps_to_fields() {
        let body = json!({
            "message": "The given data was invalid.",
            "errors": {"price": ["The price field is required.", "ignored"], "stock_id": "Unknown item."}
        });
        let errors = FieldErrors::from_backend(&body).unwrap();
        assert_eq!(errors.get("price"), Some("The price field is required."));
        assert_eq!(errors.get("stock_id"), Some("Unknown item."));

        assert!(FieldErrors::from_backend(&json!({"message": "boom"})).is_none());
    }
}
