//! Schema model
//!
//! This module defines the in-memory representation of a loaded schema: a
//! named, versioned collection of node declarations forming a tree of
//! containers, lists, leaves, and leaf-lists. A [`Schema`] is immutable after
//! construction and upholds every structural invariant (unique sibling names,
//! childless leaves, resolvable list keys, bounded depth), so validation can
//! trust it unconditionally and share it read-only across threads.

pub mod source;

use crate::error::{Error, Result, SchemaError};
use crate::limits::Limits;
use crate::names::is_valid_identifier;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data kind of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataKind {
    /// Interior node holding named children, at most one instance
    Container,
    /// Interior node with repeated, optionally keyed instances
    List,
    /// Scalar-valued node
    Leaf,
    /// Scalar-valued node with repeated instances
    LeafList,
}

impl DataKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Container => "container",
            DataKind::List => "list",
            DataKind::Leaf => "leaf",
            DataKind::LeafList => "leaf-list",
        }
    }

    /// Whether nodes of this kind carry a scalar value instead of children
    pub fn is_leafy(&self) -> bool {
        matches!(self, DataKind::Leaf | DataKind::LeafList)
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Permitted repetition count of a schema node within its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    /// Required, single instance
    ExactlyOne,
    /// Optional, single instance
    ZeroOrOne,
    /// Any number of instances, including none
    ZeroOrMany,
    /// At least one instance
    OneOrMany,
}

impl Cardinality {
    /// Minimum number of instances required
    pub fn min(&self) -> usize {
        match self {
            Cardinality::ExactlyOne | Cardinality::OneOrMany => 1,
            Cardinality::ZeroOrOne | Cardinality::ZeroOrMany => 0,
        }
    }

    /// Maximum number of instances allowed (None = unbounded)
    pub fn max(&self) -> Option<usize> {
        match self {
            Cardinality::ExactlyOne | Cardinality::ZeroOrOne => Some(1),
            Cardinality::ZeroOrMany | Cardinality::OneOrMany => None,
        }
    }

    /// Get the cardinality as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::ExactlyOne => "exactly-one",
            Cardinality::ZeroOrOne => "zero-or-one",
            Cardinality::ZeroOrMany => "zero-or-many",
            Cardinality::OneOrMany => "one-or-many",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value type of a leaf or leaf-list node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    /// Any scalar text
    String,
    /// 64-bit signed integer
    Int,
    /// `true` or `false`
    Boolean,
    /// Arbitrary-precision decimal number
    Decimal,
    /// One of a fixed set of names
    Enumeration(Vec<String>),
}

impl ValueType {
    /// Get the type name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Boolean => "boolean",
            ValueType::Decimal => "decimal",
            ValueType::Enumeration(_) => "enumeration",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single node declaration in the schema tree
///
/// Interior kinds (container, list) hold an ordered sequence of uniquely
/// named children; leafy kinds (leaf, leaf-list) hold a value type and no
/// children. Invariants are checked when the node tree is sealed into a
/// [`Schema`], not on every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    name: String,
    kind: DataKind,
    value_type: Option<ValueType>,
    cardinality: Cardinality,
    key: Option<String>,
    children: Vec<SchemaNode>,
}

impl SchemaNode {
    /// Create a container node (default cardinality: exactly-one)
    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DataKind::Container,
            value_type: None,
            cardinality: Cardinality::ExactlyOne,
            key: None,
            children: Vec::new(),
        }
    }

    /// Create a list node (default cardinality: zero-or-many)
    pub fn list(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DataKind::List,
            value_type: None,
            cardinality: Cardinality::ZeroOrMany,
            key: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf node (default cardinality: exactly-one)
    pub fn leaf(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            kind: DataKind::Leaf,
            value_type: Some(value_type),
            cardinality: Cardinality::ExactlyOne,
            key: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf-list node (default cardinality: zero-or-many)
    pub fn leaf_list(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            kind: DataKind::LeafList,
            value_type: Some(value_type),
            cardinality: Cardinality::ZeroOrMany,
            key: None,
            children: Vec::new(),
        }
    }

    /// Override the cardinality
    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Designate the key child for a list
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Append a child declaration
    pub fn with_child(mut self, child: SchemaNode) -> Self {
        self.children.push(child);
        self
    }

    /// Get the node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the data kind
    pub fn kind(&self) -> DataKind {
        self.kind
    }

    /// Get the value type (leaves and leaf-lists only)
    pub fn value_type(&self) -> Option<&ValueType> {
        self.value_type.as_ref()
    }

    /// Get the cardinality
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Get the designated key child name (keyed lists only)
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the declared children in declaration order
    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }

    /// Look up a direct child declaration by name
    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// A named, versioned, immutable collection of top-level schema nodes
///
/// Loaded once per session and reused across many validations. Construction
/// rejects any tree that violates the structural invariants, so every method
/// on a live `Schema` is infallible.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    version: String,
    roots: IndexMap<String, SchemaNode>,
}

impl Schema {
    /// Seal a node tree into a schema, checking every structural invariant
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        nodes: Vec<SchemaNode>,
        limits: &Limits,
    ) -> Result<Self> {
        let name = name.into();
        let version = version.into();

        verify_tree(&nodes, "/", limits)?;

        let mut roots = IndexMap::with_capacity(nodes.len());
        for node in nodes {
            roots.insert(node.name.clone(), node);
        }

        Ok(Self {
            name,
            version,
            roots,
        })
    }

    /// Seal a node tree using default limits
    pub fn with_defaults(
        name: impl Into<String>,
        version: impl Into<String>,
        nodes: Vec<SchemaNode>,
    ) -> Result<Self> {
        Self::new(name, version, nodes, &Limits::default())
    }

    /// Get the schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the schema version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Look up a top-level node by name
    pub fn root(&self, name: &str) -> Option<&SchemaNode> {
        self.roots.get(name)
    }

    /// Iterate the top-level nodes in declaration order
    pub fn roots(&self) -> impl Iterator<Item = &SchemaNode> {
        self.roots.values()
    }

    /// Number of top-level nodes
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }
}

/// Walk the whole tree with an explicit stack, checking invariants
///
/// Iterative on purpose: the depth limit has not been established yet at
/// this point, so the checker itself must not recurse on hostile input.
fn verify_tree(roots: &[SchemaNode], root_path: &str, limits: &Limits) -> Result<()> {
    let mut total_nodes = 0usize;
    let mut stack: Vec<(&SchemaNode, String, usize)> = Vec::new();

    verify_siblings(roots, root_path)?;
    for node in roots.iter().rev() {
        stack.push((node, root_path.to_string(), 1));
    }

    while let Some((node, parent_path, depth)) = stack.pop() {
        total_nodes += 1;
        limits.check_schema_nodes(total_nodes)?;

        if depth > limits.max_depth {
            return Err(Error::Schema(SchemaError::TooDeep {
                depth,
                max: limits.max_depth,
            }));
        }

        if !is_valid_identifier(&node.name) {
            return Err(Error::Schema(SchemaError::BadIdentifier {
                name: node.name.clone(),
            }));
        }

        let path = join_path(&parent_path, &node.name);
        verify_node(node, &path)?;
        verify_siblings(&node.children, &path)?;
        limits.check_children(node.children.len())?;

        for child in node.children.iter().rev() {
            stack.push((child, path.clone(), depth + 1));
        }
    }

    Ok(())
}

fn verify_node(node: &SchemaNode, path: &str) -> Result<()> {
    if node.kind.is_leafy() {
        if !node.children.is_empty() {
            return Err(Error::Schema(SchemaError::MalformedSyntax {
                message: format!("{} node '{}' cannot have children", node.kind, path),
            }));
        }
        if node.value_type.is_none() {
            return Err(Error::Schema(SchemaError::MalformedSyntax {
                message: format!("{} node '{}' has no value type", node.kind, path),
            }));
        }
    } else if node.value_type.is_some() {
        return Err(Error::Schema(SchemaError::MalformedSyntax {
            message: format!("{} node '{}' cannot have a value type", node.kind, path),
        }));
    }

    if let Some(key) = &node.key {
        if node.kind != DataKind::List {
            return Err(Error::Schema(SchemaError::MalformedSyntax {
                message: format!("{} node '{}' cannot declare a key", node.kind, path),
            }));
        }
        match node.child(key) {
            Some(child) if child.kind == DataKind::Leaf => {}
            Some(_) => {
                return Err(Error::Schema(SchemaError::UnresolvedReference {
                    reference: key.clone(),
                    context: format!("list '{}' (key must be a leaf)", path),
                }));
            }
            None => {
                return Err(Error::Schema(SchemaError::UnresolvedReference {
                    reference: key.clone(),
                    context: format!("list '{}'", path),
                }));
            }
        }
    }

    if let Some(ValueType::Enumeration(values)) = &node.value_type {
        if values.is_empty() {
            return Err(Error::Schema(SchemaError::MalformedSyntax {
                message: format!("enumeration '{}' has no values", path),
            }));
        }
        let mut seen = std::collections::HashSet::new();
        for value in values {
            if !seen.insert(value.as_str()) {
                return Err(Error::Schema(SchemaError::DuplicateName {
                    name: value.clone(),
                    parent: format!("enumeration '{}'", path),
                }));
            }
        }
    }

    Ok(())
}

fn verify_siblings(nodes: &[SchemaNode], parent_path: &str) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for node in nodes {
        if !seen.insert(node.name.as_str()) {
            return Err(Error::Schema(SchemaError::DuplicateName {
                name: node.name.clone(),
                parent: parent_path.to_string(),
            }));
        }
    }
    Ok(())
}

fn join_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}
