//! YANG identifier validation
//!
//! This module validates node, grouping, and enum names against the YANG
//! identifier rules (RFC 7950 §6.2): a leading letter or underscore followed
//! by letters, digits, underscores, hyphens, and dots, with the `xml` prefix
//! reserved in any capitalization.

use crate::error::{Error, Result, SchemaError};
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").unwrap());

/// Check if a string is a valid YANG identifier
pub fn is_valid_identifier(name: &str) -> bool {
    if !IDENTIFIER.is_match(name) {
        return false;
    }

    // Names starting with "xml" (any capitalization) are reserved
    !name.to_ascii_lowercase().starts_with("xml")
}

/// Validate a YANG identifier and return an error if invalid
pub fn validate_identifier(name: &str) -> Result<()> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(Error::Schema(SchemaError::BadIdentifier {
            name: name.to_string(),
        }))
    }
}
