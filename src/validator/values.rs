//! Leaf value coercion
//!
//! Checks a document scalar against a declared value type. Surrounding
//! whitespace is insignificant for every type except `string`, which takes
//! the text verbatim.

use crate::schema::ValueType;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Why a scalar failed its declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ValueIssue {
    /// The value does not parse as the declared type
    TypeMismatch(String),
    /// The value parses but is outside the enumeration's set
    OutsideEnum(String),
}

/// Check a scalar value against a value type
pub(super) fn check_value(value_type: &ValueType, raw: &str) -> Result<(), ValueIssue> {
    match value_type {
        ValueType::String => Ok(()),
        ValueType::Boolean => match raw.trim() {
            "true" | "false" => Ok(()),
            other => Err(ValueIssue::TypeMismatch(format!(
                "value '{}' is not a valid boolean",
                other
            ))),
        },
        ValueType::Int => {
            let trimmed = raw.trim();
            if trimmed.parse::<i64>().is_ok() {
                Ok(())
            } else {
                Err(ValueIssue::TypeMismatch(format!(
                    "value '{}' is not a valid int",
                    trimmed
                )))
            }
        }
        ValueType::Decimal => {
            let trimmed = raw.trim();
            if Decimal::from_str(trimmed).is_ok() {
                Ok(())
            } else {
                Err(ValueIssue::TypeMismatch(format!(
                    "value '{}' is not a valid decimal",
                    trimmed
                )))
            }
        }
        ValueType::Enumeration(allowed) => {
            let trimmed = raw.trim();
            if allowed.iter().any(|v| v == trimmed) {
                Ok(())
            } else {
                Err(ValueIssue::OutsideEnum(format!(
                    "value '{}' is not one of [{}]",
                    trimmed,
                    allowed.join(", ")
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_accepts_anything() {
        assert!(check_value(&ValueType::String, "").is_ok());
        assert!(check_value(&ValueType::String, "  spaced  ").is_ok());
        assert!(check_value(&ValueType::String, "true").is_ok());
    }

    #[test]
    fn test_boolean_lexical_space() {
        assert!(check_value(&ValueType::Boolean, "true").is_ok());
        assert!(check_value(&ValueType::Boolean, "false").is_ok());
        assert!(check_value(&ValueType::Boolean, " true ").is_ok());
        assert!(check_value(&ValueType::Boolean, "notabool").is_err());
        assert!(check_value(&ValueType::Boolean, "TRUE").is_err());
        assert!(check_value(&ValueType::Boolean, "1").is_err());
    }

    #[test]
    fn test_int_parsing() {
        assert!(check_value(&ValueType::Int, "1500").is_ok());
        assert!(check_value(&ValueType::Int, "-42").is_ok());
        assert!(check_value(&ValueType::Int, " 7 ").is_ok());
        assert!(check_value(&ValueType::Int, "1.5").is_err());
        assert!(check_value(&ValueType::Int, "abc").is_err());
        assert!(check_value(&ValueType::Int, "").is_err());
        // Out of i64 range
        assert!(check_value(&ValueType::Int, "9223372036854775808").is_err());
    }

    #[test]
    fn test_decimal_parsing() {
        assert!(check_value(&ValueType::Decimal, "3.14").is_ok());
        assert!(check_value(&ValueType::Decimal, "-0.001").is_ok());
        assert!(check_value(&ValueType::Decimal, "42").is_ok());
        assert!(check_value(&ValueType::Decimal, "1e3").is_err());
        assert!(check_value(&ValueType::Decimal, "pi").is_err());
    }

    #[test]
    fn test_enumeration_membership() {
        let vt = ValueType::Enumeration(vec!["auto".to_string(), "manual".to_string()]);
        assert!(check_value(&vt, "auto").is_ok());
        assert!(check_value(&vt, "manual").is_ok());

        let err = check_value(&vt, "turbo").unwrap_err();
        assert!(matches!(err, ValueIssue::OutsideEnum(ref msg)
            if msg.contains("turbo") && msg.contains("auto, manual")));
    }
}
