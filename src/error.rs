//! Error types for yanglite
//!
//! This module defines all load-time error types used throughout the library.
//! Validation-time problems are never errors; they are collected as
//! [`Diagnostic`](crate::validator::Diagnostic) values so a single validation
//! pass always yields the complete report.

use thiserror::Error;

/// Result type alias using yanglite Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for yanglite operations
#[derive(Error, Debug)]
pub enum Error {
    /// Schema loading/construction error
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Document loading error
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised while loading or constructing a schema
///
/// Fatal to the load call that produced it; a schema that loads successfully
/// upholds every structural invariant and never fails during validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema source could not be parsed
    #[error("malformed schema source: {message}")]
    MalformedSyntax {
        /// Underlying parser message
        message: String,
    },

    /// Two sibling nodes share a name
    #[error("duplicate node name '{name}' under '{parent}'")]
    DuplicateName {
        /// The repeated name
        name: String,
        /// Path of the parent holding both siblings
        parent: String,
    },

    /// A reference points at a component that does not exist
    #[error("unresolved reference '{reference}' in '{context}'")]
    UnresolvedReference {
        /// The dangling name
        reference: String,
        /// Node or grouping containing the reference
        context: String,
    },

    /// A grouping directly or indirectly includes itself
    #[error("cyclic definition through grouping '{grouping}'")]
    CyclicDefinition {
        /// The grouping closing the cycle
        grouping: String,
    },

    /// A node name is not a valid identifier
    #[error("invalid identifier '{name}'")]
    BadIdentifier {
        /// The rejected name
        name: String,
    },

    /// The expanded schema tree exceeds the configured depth limit
    #[error("schema nesting depth {depth} exceeds maximum {max}")]
    TooDeep {
        /// Depth reached before giving up
        depth: usize,
        /// The configured bound
        max: usize,
    },
}

/// Error raised while loading a document
///
/// Document loading is purely structural and schema-unaware; conformance
/// problems only surface later, during validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The document source could not be parsed
    #[error("malformed document: {message}")]
    MalformedSyntax {
        /// Underlying parser message
        message: String,
    },

    /// The document bytes are not valid text
    #[error("encoding error: {message}")]
    EncodingError {
        /// Underlying decoder message
        message: String,
    },
}

impl SchemaError {
    /// Create a malformed-syntax error from any parser message
    pub fn malformed(message: impl Into<String>) -> Self {
        SchemaError::MalformedSyntax {
            message: message.into(),
        }
    }
}

impl DocumentError {
    /// Create a malformed-syntax error from any parser message
    pub fn malformed(message: impl Into<String>) -> Self {
        DocumentError::MalformedSyntax {
            message: message.into(),
        }
    }

    /// Create an encoding error from any decoder message
    pub fn encoding(message: impl Into<String>) -> Self {
        DocumentError::EncodingError {
            message: message.into(),
        }
    }
}
