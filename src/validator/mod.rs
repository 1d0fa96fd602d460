//! Document validation against a schema
//!
//! The validator walks a [`DocumentNode`](crate::document::DocumentNode) tree
//! under the direction of a [`Schema`](crate::schema::Schema) and produces a
//! [`ValidationResult`]. It never fails: every conformance problem is
//! collected as a [`Diagnostic`] so one pass yields the complete report.
//!
//! Validation is a pure function of (schema, document) with no I/O, so a
//! schema can be shared read-only across threads, each call owning its own
//! document tree and result.

pub mod context;
pub mod diagnostics;
mod values;
mod walk;

pub use context::ValidationContext;
pub use diagnostics::{
    summarize, Diagnostic, DiagnosticKind, Severity, ValidationResult,
};

use crate::document::DocumentNode;
use crate::schema::Schema;

/// Validate a document against a schema with the default depth bound
pub fn validate(schema: &Schema, root: &DocumentNode) -> ValidationResult {
    validate_with_context(schema, root, ValidationContext::new())
}

/// Validate a document using a caller-configured context
pub fn validate_with_context(
    schema: &Schema,
    root: &DocumentNode,
    mut context: ValidationContext,
) -> ValidationResult {
    walk::walk_root(schema, root, &mut context);
    context.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaNode, ValueType};

    #[test]
    fn test_validate_is_pure_and_repeatable() {
        let schema = Schema::with_defaults(
            "demo",
            "1.0",
            vec![SchemaNode::container("config")
                .with_child(SchemaNode::leaf("enabled", ValueType::Boolean))],
        )
        .unwrap();

        let doc = DocumentNode::interior("config");

        let first = validate(&schema, &doc);
        let second = validate(&schema, &doc);
        assert_eq!(first.diagnostics(), second.diagnostics());
    }

    #[test]
    fn test_validate_with_tight_depth() {
        let schema = Schema::with_defaults(
            "demo",
            "1.0",
            vec![SchemaNode::container("config")
                .with_child(SchemaNode::leaf("enabled", ValueType::Boolean))],
        )
        .unwrap();

        let doc = DocumentNode::interior("config")
            .with_child(DocumentNode::scalar("enabled", "true"));

        let context = ValidationContext::new().with_max_depth(1);
        let result = validate_with_context(&schema, &doc, context);
        assert!(!result.is_valid());
        assert_eq!(
            result.diagnostics()[0].kind,
            DiagnosticKind::MaxDepthExceeded
        );
    }
}
