//! Validation diagnostics
//!
//! A [`Diagnostic`] is a single located finding: the document path of the
//! offending node, what went wrong, and how bad it is. Findings are collected
//! during the walk and aggregated into a [`ValidationResult`] at the end;
//! aggregation is pure and nothing here prints or logs.

use serde::Serialize;
use std::fmt;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The document does not conform to the schema
    Error,
    /// Suspicious but not a conformance failure
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What kind of conformance failure a diagnostic reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Document node with no corresponding schema declaration
    UnknownNode,
    /// Required node absent
    MissingRequiredNode,
    /// More instances than the cardinality allows
    TooManyInstances,
    /// Scalar value does not parse as the declared type
    TypeMismatch,
    /// Scalar value outside an enumeration's allowed set
    InvalidEnumValue,
    /// Two list instances share a key value
    DuplicateKey,
    /// Subtree deeper than the configured recursion bound
    MaxDepthExceeded,
}

impl DiagnosticKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnknownNode => "unknown-node",
            DiagnosticKind::MissingRequiredNode => "missing-required-node",
            DiagnosticKind::TooManyInstances => "too-many-instances",
            DiagnosticKind::TypeMismatch => "type-mismatch",
            DiagnosticKind::InvalidEnumValue => "invalid-enum-value",
            DiagnosticKind::DuplicateKey => "duplicate-key",
            DiagnosticKind::MaxDepthExceeded => "max-depth-exceeded",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single located validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Document path of the offending node
    pub path: String,
    /// Failure kind
    pub kind: DiagnosticKind,
    /// Human-readable explanation
    pub message: String,
    /// Severity of the finding
    pub severity: Severity,
}

impl Diagnostic {
    /// Create an error-severity diagnostic
    pub fn new(
        kind: DiagnosticKind,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Downgrade to a warning
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.message, self.kind)
    }
}

/// The outcome of one validation call
///
/// Owned by the caller; `valid` is true exactly when no diagnostics were
/// produced anywhere in the tree.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Whether the document conforms to the schema
    pub valid: bool,
    /// Findings in document pre-order
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Get the findings in document pre-order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the result, keeping only the findings
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Aggregate collected findings into a result
///
/// Pure: `valid` is simply "no diagnostics". Printing belongs to the caller.
pub fn summarize(diagnostics: Vec<Diagnostic>) -> ValidationResult {
    ValidationResult {
        valid: diagnostics.is_empty(),
        diagnostics,
    }
}
