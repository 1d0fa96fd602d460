//! Schema-driven document traversal
//!
//! Recursive descent over the document tree, steered by the schema. Problems
//! never abort the walk; each one becomes a diagnostic and traversal carries
//! on so a single pass reports everything. Diagnostics come out in document
//! pre-order: a node's own findings (cardinality, key uniqueness) first, then
//! its children's, left to right.

use super::context::ValidationContext;
use super::diagnostics::DiagnosticKind;
use super::values::{check_value, ValueIssue};
use crate::document::DocumentNode;
use crate::schema::{DataKind, Schema, SchemaNode};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Match the document root against a top-level declaration and descend
pub(super) fn walk_root(schema: &Schema, root: &DocumentNode, ctx: &mut ValidationContext) {
    match schema.root(root.name()) {
        None => {
            ctx.emit(
                DiagnosticKind::UnknownNode,
                "/",
                format!(
                    "unknown root node '{}' in schema '{}'",
                    root.name(),
                    schema.name()
                ),
            );
        }
        Some(decl) => {
            ctx.enter(root.name().to_string());
            walk_node(decl, root, ctx);
            ctx.exit();
        }
    }
}

fn walk_node(decl: &SchemaNode, node: &DocumentNode, ctx: &mut ValidationContext) {
    match decl.kind() {
        DataKind::Leaf | DataKind::LeafList => walk_leaf(decl, node, ctx),
        DataKind::Container | DataKind::List => walk_interior(decl, node, ctx),
    }
}

fn walk_leaf(decl: &SchemaNode, node: &DocumentNode, ctx: &mut ValidationContext) {
    let value_type = match decl.value_type() {
        Some(vt) => vt,
        // Unreachable for a sealed schema; stay silent rather than guess
        None => return,
    };

    if node.has_children() {
        ctx.emit(
            DiagnosticKind::TypeMismatch,
            ctx.current_path(),
            format!(
                "expected a {} value but found child elements",
                value_type.name()
            ),
        );
        return;
    }

    let raw = node.value().unwrap_or("");
    match check_value(value_type, raw) {
        Ok(()) => {}
        Err(ValueIssue::TypeMismatch(message)) => {
            ctx.emit(DiagnosticKind::TypeMismatch, ctx.current_path(), message);
        }
        Err(ValueIssue::OutsideEnum(message)) => {
            ctx.emit(DiagnosticKind::InvalidEnumValue, ctx.current_path(), message);
        }
    }
}

fn walk_interior(decl: &SchemaNode, node: &DocumentNode, ctx: &mut ValidationContext) {
    if ctx.depth_exceeded() {
        ctx.emit(
            DiagnosticKind::MaxDepthExceeded,
            ctx.current_path(),
            format!(
                "nesting depth {} reached the configured bound, subtree not validated",
                ctx.depth()
            ),
        );
        return;
    }

    if !node.has_children() {
        if let Some(value) = node.value() {
            if !value.trim().is_empty() {
                ctx.emit(
                    DiagnosticKind::TypeMismatch,
                    ctx.current_path(),
                    format!(
                        "{} '{}' cannot carry a scalar value",
                        decl.kind(),
                        decl.name()
                    ),
                );
                return;
            }
        }
    }

    // Instance counts per child name, in document order
    let mut totals: IndexMap<&str, usize> = IndexMap::new();
    for child in node.children() {
        *totals.entry(child.name()).or_insert(0) += 1;
    }

    check_cardinalities(decl, &totals, ctx);
    check_list_keys(decl, node, &totals, ctx);

    // Descend in document order
    let mut ordinals: HashMap<&str, usize> = HashMap::new();
    for child in node.children() {
        let ordinal = {
            let counter = ordinals.entry(child.name()).or_insert(0);
            *counter += 1;
            *counter
        };
        let total = totals.get(child.name()).copied().unwrap_or(1);
        let segment = render_segment(child.name(), ordinal, total);

        match decl.child(child.name()) {
            None => {
                // Lenient: report and keep checking the siblings
                ctx.emit(
                    DiagnosticKind::UnknownNode,
                    ctx.child_path(&segment),
                    format!("unknown node '{}' in '{}'", child.name(), decl.name()),
                );
            }
            Some(child_decl) => {
                ctx.enter(segment);
                walk_node(child_decl, child, ctx);
                ctx.exit();
            }
        }
    }
}

/// Compare declared cardinalities against the observed instance counts
fn check_cardinalities(
    decl: &SchemaNode,
    totals: &IndexMap<&str, usize>,
    ctx: &mut ValidationContext,
) {
    for decl_child in decl.children() {
        let count = totals.get(decl_child.name()).copied().unwrap_or(0);
        let cardinality = decl_child.cardinality();

        if count < cardinality.min() {
            ctx.emit(
                DiagnosticKind::MissingRequiredNode,
                ctx.child_path(decl_child.name()),
                format!(
                    "missing required {} '{}'",
                    decl_child.kind(),
                    decl_child.name()
                ),
            );
        }

        if let Some(max) = cardinality.max() {
            if count > max {
                ctx.emit(
                    DiagnosticKind::TooManyInstances,
                    ctx.child_path(decl_child.name()),
                    format!(
                        "{} instances of '{}' but cardinality {} allows at most {}",
                        count,
                        decl_child.name(),
                        cardinality,
                        max
                    ),
                );
            }
        }
    }
}

/// Enforce key uniqueness across sibling instances of keyed lists
fn check_list_keys(
    decl: &SchemaNode,
    node: &DocumentNode,
    totals: &IndexMap<&str, usize>,
    ctx: &mut ValidationContext,
) {
    for decl_child in decl.children() {
        if decl_child.kind() != DataKind::List {
            continue;
        }
        let key = match decl_child.key() {
            Some(key) => key,
            None => continue,
        };
        let total = totals.get(decl_child.name()).copied().unwrap_or(0);
        if total < 2 {
            continue;
        }

        // Key value -> path of the instance that introduced it
        let mut seen: IndexMap<&str, String> = IndexMap::new();
        let mut ordinal = 0usize;
        for child in node.children() {
            if child.name() != decl_child.name() {
                continue;
            }
            ordinal += 1;
            let path = ctx.child_path(&render_segment(child.name(), ordinal, total));

            // An instance without a usable key is reported by the
            // cardinality pass inside it, not here
            let key_value = match key_value_of(child, key) {
                Some(v) => v,
                None => continue,
            };

            match seen.get(key_value) {
                Some(first) => {
                    ctx.emit(
                        DiagnosticKind::DuplicateKey,
                        path.clone(),
                        format!(
                            "key '{}' value '{}' already used by {}",
                            key, key_value, first
                        ),
                    );
                }
                None => {
                    seen.insert(key_value, path);
                }
            }
        }
    }
}

fn key_value_of<'a>(instance: &'a DocumentNode, key: &str) -> Option<&'a str> {
    instance
        .children()
        .iter()
        .find(|c| c.name() == key && !c.has_children())
        .and_then(|c| c.value())
}

fn render_segment(name: &str, ordinal: usize, total: usize) -> String {
    if total > 1 {
        format!("{}[{}]", name, ordinal)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Cardinality, ValueType};
    use crate::validator::validate;

    fn demo_schema() -> Schema {
        Schema::with_defaults(
            "demo",
            "1.0",
            vec![SchemaNode::container("config")
                .with_child(SchemaNode::leaf("enabled", ValueType::Boolean))
                .with_child(
                    SchemaNode::leaf("mtu", ValueType::Int)
                        .with_cardinality(Cardinality::ZeroOrOne),
                )
                .with_child(
                    SchemaNode::list("server")
                        .with_key("name")
                        .with_child(SchemaNode::leaf("name", ValueType::String))
                        .with_child(
                            SchemaNode::leaf("port", ValueType::Int)
                                .with_cardinality(Cardinality::ZeroOrOne),
                        ),
                )],
        )
        .unwrap()
    }

    fn config(children: Vec<DocumentNode>) -> DocumentNode {
        let mut node = DocumentNode::interior("config");
        for child in children {
            node = node.with_child(child);
        }
        node
    }

    #[test]
    fn test_unknown_root() {
        let schema = demo_schema();
        let doc = DocumentNode::interior("nonsense");

        let result = validate(&schema, &doc);
        assert!(!result.is_valid());
        assert_eq!(result.diagnostics().len(), 1);
        assert_eq!(result.diagnostics()[0].kind, DiagnosticKind::UnknownNode);
        assert_eq!(result.diagnostics()[0].path, "/");
    }

    #[test]
    fn test_valid_document() {
        let schema = demo_schema();
        let doc = config(vec![DocumentNode::scalar("enabled", "true")]);

        let result = validate(&schema, &doc);
        assert!(result.is_valid(), "{:?}", result.diagnostics());
    }

    #[test]
    fn test_missing_required_leaf() {
        let schema = demo_schema();
        let doc = config(vec![DocumentNode::scalar("mtu", "1500")]);

        let result = validate(&schema, &doc);
        assert_eq!(result.diagnostics().len(), 1);
        let diag = &result.diagnostics()[0];
        assert_eq!(diag.kind, DiagnosticKind::MissingRequiredNode);
        assert_eq!(diag.path, "/config/enabled");
    }

    #[test]
    fn test_too_many_instances_of_optional() {
        let schema = demo_schema();
        let doc = config(vec![
            DocumentNode::scalar("enabled", "true"),
            DocumentNode::scalar("mtu", "1500"),
            DocumentNode::scalar("mtu", "9000"),
        ]);

        let result = validate(&schema, &doc);
        let too_many: Vec<_> = result
            .diagnostics()
            .iter()
            .filter(|d| d.kind == DiagnosticKind::TooManyInstances)
            .collect();
        assert_eq!(too_many.len(), 1);
        assert_eq!(too_many[0].path, "/config/mtu");
    }

    #[test]
    fn test_unknown_child_does_not_hide_siblings() {
        let schema = demo_schema();
        let doc = config(vec![
            DocumentNode::scalar("bogus", "1"),
            DocumentNode::scalar("enabled", "notabool"),
        ]);

        let result = validate(&schema, &doc);
        let kinds: Vec<_> = result.diagnostics().iter().map(|d| d.kind).collect();
        assert!(kinds.contains(&DiagnosticKind::UnknownNode));
        assert!(kinds.contains(&DiagnosticKind::TypeMismatch));
    }

    #[test]
    fn test_duplicate_list_keys() {
        let schema = demo_schema();
        let doc = config(vec![
            DocumentNode::scalar("enabled", "true"),
            DocumentNode::interior("server")
                .with_child(DocumentNode::scalar("name", "alpha")),
            DocumentNode::interior("server")
                .with_child(DocumentNode::scalar("name", "alpha")),
        ]);

        let result = validate(&schema, &doc);
        let dup: Vec<_> = result
            .diagnostics()
            .iter()
            .filter(|d| d.kind == DiagnosticKind::DuplicateKey)
            .collect();
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].path, "/config/server[2]");
        assert!(dup[0].message.contains("/config/server[1]"));
    }

    #[test]
    fn test_distinct_list_keys_pass() {
        let schema = demo_schema();
        let doc = config(vec![
            DocumentNode::scalar("enabled", "true"),
            DocumentNode::interior("server")
                .with_child(DocumentNode::scalar("name", "alpha")),
            DocumentNode::interior("server")
                .with_child(DocumentNode::scalar("name", "beta")),
        ]);

        let result = validate(&schema, &doc);
        assert!(result.is_valid(), "{:?}", result.diagnostics());
    }

    #[test]
    fn test_leaf_with_children_is_type_mismatch() {
        let schema = demo_schema();
        let doc = config(vec![
            DocumentNode::interior("enabled")
                .with_child(DocumentNode::scalar("sub", "x")),
        ]);

        let result = validate(&schema, &doc);
        let kinds: Vec<_> = result.diagnostics().iter().map(|d| d.kind).collect();
        assert!(kinds.contains(&DiagnosticKind::TypeMismatch));
    }

    #[test]
    fn test_container_with_scalar_is_type_mismatch() {
        let schema = Schema::with_defaults(
            "demo",
            "1.0",
            vec![SchemaNode::container("config")
                .with_child(SchemaNode::container("inner").with_cardinality(Cardinality::ZeroOrOne))],
        )
        .unwrap();

        let doc = config(vec![DocumentNode::scalar("inner", "oops")]);
        let result = validate(&schema, &doc);
        let kinds: Vec<_> = result.diagnostics().iter().map(|d| d.kind).collect();
        assert!(kinds.contains(&DiagnosticKind::TypeMismatch));
    }

    #[test]
    fn test_diagnostics_in_document_preorder() {
        let schema = demo_schema();
        let doc = config(vec![
            DocumentNode::scalar("mtu", "soft"),
            DocumentNode::interior("server")
                .with_child(DocumentNode::scalar("name", "a"))
                .with_child(DocumentNode::scalar("port", "not-a-port")),
        ]);

        let result = validate(&schema, &doc);
        let paths: Vec<_> = result
            .diagnostics()
            .iter()
            .map(|d| d.path.as_str())
            .collect();
        // Parent-level finding (missing enabled) precedes child findings,
        // which follow document order
        assert_eq!(
            paths,
            vec!["/config/enabled", "/config/mtu", "/config/server/port"]
        );
    }

    #[test]
    fn test_depth_guard_emits_and_stops() {
        let schema = Schema::with_defaults(
            "deep",
            "1.0",
            vec![SchemaNode::container("a").with_child(
                SchemaNode::container("b")
                    .with_child(SchemaNode::container("c").with_cardinality(Cardinality::ZeroOrOne))
                    .with_cardinality(Cardinality::ZeroOrOne),
            )],
        )
        .unwrap();

        let doc = DocumentNode::interior("a").with_child(
            DocumentNode::interior("b").with_child(DocumentNode::interior("c")),
        );

        let mut ctx = ValidationContext::new().with_max_depth(2);
        walk_root(&schema, &doc, &mut ctx);
        let result = ctx.finish();

        let kinds: Vec<_> = result.diagnostics().iter().map(|d| d.kind).collect();
        assert!(kinds.contains(&DiagnosticKind::MaxDepthExceeded));
    }
}
