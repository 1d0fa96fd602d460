//! # yanglite
//!
//! A YANG-subset schema validator for XML instance documents.
//!
//! yanglite loads a schema (containers, lists, leaves, and leaf-lists with
//! cardinalities, value types, and list keys), loads an instance document,
//! and checks the document's structure and values against the schema,
//! producing a complete diagnostic report in one pass.
//!
//! ## Example
//!
//! ```rust
//! use yanglite::{DocumentNode, Limits, Schema, validate};
//!
//! let schema = Schema::from_json_str(
//!     r#"{
//!         "name": "demo",
//!         "nodes": [
//!             {
//!                 "name": "config",
//!                 "kind": "container",
//!                 "children": [
//!                     { "name": "enabled", "kind": "leaf", "type": "boolean" }
//!                 ]
//!             }
//!         ]
//!     }"#,
//!     &Limits::default(),
//! )?;
//!
//! let doc = DocumentNode::from_xml_str("<config><enabled>true</enabled></config>")?;
//!
//! let result = validate(&schema, &doc);
//! assert!(result.is_valid());
//! # Ok::<(), yanglite::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod names;

// Models
pub mod document;
pub mod schema;

// Validation
pub mod validator;

// Re-exports for convenience
pub use document::DocumentNode;
pub use error::{DocumentError, Error, Result, SchemaError};
pub use limits::Limits;
pub use schema::{Cardinality, DataKind, Schema, SchemaNode, ValueType};
pub use validator::{
    summarize, validate, validate_with_context, Diagnostic, DiagnosticKind, Severity,
    ValidationContext, ValidationResult,
};

/// Version of the yanglite library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
