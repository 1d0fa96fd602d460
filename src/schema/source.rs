//! Schema source loading
//!
//! This module reads the JSON schema description into a sealed [`Schema`].
//! The source format mirrors the statements the validator understands: a
//! `nodes` tree of containers, lists, leaves, and leaf-lists, plus named
//! `groupings` that nodes can splice in with `uses`. Grouping expansion is
//! where a cyclic definition can be written down, so the expander runs a
//! depth-first traversal with an on-stack marker set and rejects any
//! grouping that directly or indirectly includes itself.
//!
//! ```json
//! {
//!   "name": "interfaces",
//!   "version": "1.0",
//!   "groupings": {
//!     "endpoint": [
//!       { "name": "address", "kind": "leaf", "type": "string" },
//!       { "name": "port", "kind": "leaf", "type": "int" }
//!     ]
//!   },
//!   "nodes": [
//!     {
//!       "name": "config",
//!       "kind": "container",
//!       "children": [
//!         { "name": "enabled", "kind": "leaf", "type": "boolean" }
//!       ],
//!       "uses": ["endpoint"]
//!     }
//!   ]
//! }
//! ```

use crate::error::{Error, Result, SchemaError};
use crate::limits::Limits;
use crate::schema::{Cardinality, DataKind, Schema, SchemaNode, ValueType};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchema {
    name: String,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    groupings: IndexMap<String, Vec<RawNode>>,
    nodes: Vec<RawNode>,
}

fn default_version() -> String {
    "1.0".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    name: String,
    kind: DataKind,
    #[serde(rename = "type")]
    value_type: Option<RawType>,
    #[serde(default)]
    values: Vec<String>,
    cardinality: Option<Cardinality>,
    key: Option<String>,
    #[serde(default)]
    children: Vec<RawNode>,
    #[serde(default)]
    uses: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum RawType {
    String,
    Int,
    Boolean,
    Decimal,
    Enumeration,
}

impl Schema {
    /// Load a schema from its JSON source text
    pub fn from_json_str(source: &str, limits: &Limits) -> Result<Self> {
        limits.check_input_size(source.len())?;

        let raw: RawSchema = serde_json::from_str(source)
            .map_err(|e| Error::Schema(SchemaError::malformed(e.to_string())))?;

        let mut nodes = Vec::with_capacity(raw.nodes.len());
        let mut stack = Vec::new();
        for raw_node in &raw.nodes {
            nodes.push(expand_node(raw_node, &raw.groupings, &mut stack)?);
        }

        Schema::new(raw.name, raw.version, nodes, limits)
    }

    /// Load a schema from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>, limits: &Limits) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            Error::Resource(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&source, limits)
    }
}

/// Expand one raw node, splicing in grouping contents referenced by `uses`
///
/// `stack` holds the groupings currently being expanded; re-entering one of
/// them is a cyclic definition.
fn expand_node(
    raw: &RawNode,
    groupings: &IndexMap<String, Vec<RawNode>>,
    stack: &mut Vec<String>,
) -> Result<SchemaNode> {
    let value_type = resolve_type(raw)?;

    let mut node = match raw.kind {
        DataKind::Container => SchemaNode::container(&raw.name),
        DataKind::List => SchemaNode::list(&raw.name),
        DataKind::Leaf | DataKind::LeafList => {
            let vt = value_type.clone().ok_or_else(|| {
                Error::Schema(SchemaError::malformed(format!(
                    "{} '{}' has no type",
                    raw.kind, raw.name
                )))
            })?;
            if raw.kind == DataKind::Leaf {
                SchemaNode::leaf(&raw.name, vt)
            } else {
                SchemaNode::leaf_list(&raw.name, vt)
            }
        }
    };

    if !raw.kind.is_leafy() && value_type.is_some() {
        return Err(Error::Schema(SchemaError::malformed(format!(
            "{} '{}' cannot have a type",
            raw.kind, raw.name
        ))));
    }

    if let Some(cardinality) = raw.cardinality {
        node = node.with_cardinality(cardinality);
    }
    if let Some(key) = &raw.key {
        node = node.with_key(key);
    }

    for raw_child in &raw.children {
        node = node.with_child(expand_node(raw_child, groupings, stack)?);
    }

    for grouping_name in &raw.uses {
        let members = groupings.get(grouping_name).ok_or_else(|| {
            Error::Schema(SchemaError::UnresolvedReference {
                reference: grouping_name.clone(),
                context: format!("node '{}'", raw.name),
            })
        })?;

        if stack.iter().any(|g| g == grouping_name) {
            return Err(Error::Schema(SchemaError::CyclicDefinition {
                grouping: grouping_name.clone(),
            }));
        }

        stack.push(grouping_name.clone());
        for member in members {
            node = node.with_child(expand_node(member, groupings, stack)?);
        }
        stack.pop();
    }

    Ok(node)
}

fn resolve_type(raw: &RawNode) -> Result<Option<ValueType>> {
    let value_type = match raw.value_type {
        None => None,
        Some(RawType::String) => Some(ValueType::String),
        Some(RawType::Int) => Some(ValueType::Int),
        Some(RawType::Boolean) => Some(ValueType::Boolean),
        Some(RawType::Decimal) => Some(ValueType::Decimal),
        Some(RawType::Enumeration) => Some(ValueType::Enumeration(raw.values.clone())),
    };

    if !raw.values.is_empty() && raw.value_type != Some(RawType::Enumeration) {
        return Err(Error::Schema(SchemaError::malformed(format!(
            "'values' on node '{}' is only valid for enumeration",
            raw.name
        ))));
    }

    Ok(value_type)
}
