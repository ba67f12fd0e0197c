//! Record identifiers as the backend emits them.
//!
//! The backend is inconsistent about id encoding: the same foreign key can
//! arrive as `7` in one payload and `"7"` in another. `RecordId` keeps
//! whichever shape was sent (so records re-serialize unchanged) and offers
//! [`RecordId::loosely_eq`] for comparisons across shapes.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a backend record (numeric or textual).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Numeric reading of this id, if it has one.
    ///
    /// Text ids count as numeric when their trimmed form parses as a number;
    /// blank text never does.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RecordId::Int(n) => Some(*n as f64),
            RecordId::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
                }
            }
        }
    }

    /// Equality after string/number coercion.
    ///
    /// Two integers compare exactly. Integer text against an integer also
    /// compares exactly; otherwise both sides numeric compare as numbers
    /// (`7 == "7" == "7.0"`), and anything else by exact string form.
    pub fn loosely_eq(&self, other: &RecordId) -> bool {
        match (self, other) {
            (RecordId::Int(a), RecordId::Int(b)) => a == b,
            (RecordId::Int(n), RecordId::Text(s)) | (RecordId::Text(s), RecordId::Int(n)) => {
                match s.trim().parse::<i64>() {
                    Ok(m) => m == *n,
                    Err(_) => self.numeric_or_text_eq(other),
                }
            }
            _ => self.numeric_or_text_eq(other),
        }
    }

    fn numeric_or_text_eq(&self, other: &RecordId) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }

    /// URL path segment for this id.
    pub fn as_path_segment(&self) -> String {
        self.to_string()
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, RecordId::Text(s) if s.trim().is_empty())
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecordId::Int(n) => core::fmt::Display::fmt(n, f),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Int(value.into())
    }
}

impl From<u32> for RecordId {
    fn from(value: u32) -> Self {
        RecordId::Int(value.into())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

impl From<&RecordId> for RecordId {
    fn from(value: &RecordId) -> Self {
        value.clone()
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    /// Parses user input: integers become `Int`, anything else non-blank `Text`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("RecordId: empty"));
        }
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Text(trimmed.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn deserializes_both_shapes() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[7, "7", "ABC-1"]"#).unwrap();
        assert_eq!(ids[0], RecordId::Int(7));
        assert_eq!(ids[1], RecordId::Text("7".into()));
        assert_eq!(ids[2], RecordId::Text("ABC-1".into()));
    }

    #[test]
    fn serializes_back_to_the_original_shape() {
        let json = serde_json::to_string(&vec![RecordId::Int(7), RecordId::from("7")]).unwrap();
        assert_eq!(json, r#"[7,"7"]"#);
    }

    #[test]
    fn number_and_numeric_text_are_loosely_equal() {
        assert!(RecordId::Int(7).loosely_eq(&RecordId::from("7")));
        assert!(RecordId::from("7.0").loosely_eq(&RecordId::Int(7)));
        assert!(!RecordId::Int(7).loosely_eq(&RecordId::Int(8)));
    }

    #[test]
    fn text_ids_compare_exactly() {
        assert!(RecordId::from("WIDGET").loosely_eq(&RecordId::from("WIDGET")));
        assert!(!RecordId::from("WIDGET").loosely_eq(&RecordId::from("widget")));
        assert!(!RecordId::from("").loosely_eq(&RecordId::Int(0)));
    }

    #[test]
    fn from_str_prefers_integers() {
        assert_eq!("42".parse::<RecordId>().unwrap(), RecordId::Int(42));
        assert_eq!(" A-7 ".parse::<RecordId>().unwrap(), RecordId::from("A-7"));
        assert!(matches!("  ".parse::<RecordId>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn large_integer_ids_stay_distinct() {
        let a = RecordId::Int(9_007_199_254_740_993);
        let b = RecordId::Int(9_007_199_254_740_992);
        assert!(!a.loosely_eq(&b));
        assert!(!a.loosely_eq(&RecordId::from("9007199254740992")));
        assert!(a.loosely_eq(&RecordId::from("9007199254740993")));
    }

    proptest! {
        #[test]
        fn int_matches_its_decimal_text(n in any::<i32>()) {
            let a = RecordId::Int(n.into());
            let b = RecordId::Text(n.to_string());
            prop_assert!(a.loosely_eq(&b));
            prop_assert!(b.loosely_eq(&a));
        }

        #[test]
        fn loose_equality_is_symmetric(a in "[0-9a-c]{0,3}", b in "[0-9a-c]{0,3}") {
            let a = RecordId::Text(a);
            let b = RecordId::Text(b);
            prop_assert_eq!(a.loosely_eq(&b), b.loosely_eq(&a));
        }
    }
}
