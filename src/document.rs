//! Document model and XML loading
//!
//! This module provides the tree that validation walks: named nodes that are
//! either scalar (carry a text value) or interior (carry an ordered sequence
//! of children). Loading is purely structural and schema-unaware; conformance
//! is the validator's job.
//!
//! The XML loader matches how instance data reaches the validator in
//! practice: elements become nodes, text content becomes scalar values,
//! namespace declarations and prefixes are stripped, attributes are ignored.

use crate::error::{DocumentError, Error, Result};
use crate::limits::Limits;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// A node in a parsed instance document
///
/// Either a scalar (value, no children) or an interior node (children, no
/// value). Built once by a loader and treated as read-only input to
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNode {
    name: String,
    value: Option<String>,
    children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Create a scalar node
    pub fn scalar(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    /// Create an interior node with no children yet
    pub fn interior(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children: Vec::new(),
        }
    }

    /// Append a child node
    pub fn with_child(mut self, child: DocumentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Get the node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the scalar value, treating an empty childless node as ""
    pub fn value(&self) -> Option<&str> {
        if self.value.is_none() && self.children.is_empty() {
            Some("")
        } else {
            self.value.as_deref()
        }
    }

    /// Get the child nodes in document order
    pub fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    /// Whether this node has child elements
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Parse an instance document from XML text
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        Self::from_xml_bytes(xml.as_bytes())
    }

    /// Parse an instance document from XML bytes
    pub fn from_xml_bytes(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut root: Option<DocumentNode> = None;
        let mut stack: Vec<DocumentNode> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(malformed("multiple root elements"));
                    }
                    if let Some(parent) = stack.last() {
                        if parent.value.is_some() {
                            return Err(mixed_content(parent.name()));
                        }
                    }
                    let name = decode_name(e.name().as_ref())?;
                    stack.push(DocumentNode::interior(name));
                }
                Ok(Event::Empty(e)) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(malformed("multiple root elements"));
                    }
                    let name = decode_name(e.name().as_ref())?;
                    let node = DocumentNode::interior(name);
                    match stack.last_mut() {
                        Some(parent) => {
                            if parent.value.is_some() {
                                return Err(mixed_content(parent.name()));
                            }
                            parent.children.push(node);
                        }
                        None => root = Some(node),
                    }
                }
                Ok(Event::End(_)) => {
                    if let Some(node) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(node),
                            None => root = Some(node),
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| match e {
                            quick_xml::Error::NonDecodable(_) => {
                                Error::Document(DocumentError::encoding(e.to_string()))
                            }
                            other => malformed(other.to_string()),
                        })?
                        .to_string();

                    match stack.last_mut() {
                        Some(node) => {
                            if !node.children.is_empty() {
                                return Err(mixed_content(node.name()));
                            }
                            match &mut node.value {
                                // Split text events (entities, CDATA) merge
                                Some(existing) => existing.push_str(&text),
                                None => node.value = Some(text),
                            }
                        }
                        None => {
                            return Err(malformed("text outside of root element"));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {} // Comments, processing instructions, declarations
                Err(quick_xml::Error::NonDecodable(_)) => {
                    return Err(Error::Document(DocumentError::encoding(
                        "input is not valid UTF-8",
                    )));
                }
                Err(e) => {
                    return Err(malformed(format!(
                        "error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(malformed("unexpected end of input"));
        }

        root.ok_or_else(|| malformed("document has no root element"))
    }

    /// Read and parse an instance document from an XML file
    pub fn from_xml_file(path: impl AsRef<Path>, limits: &Limits) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            Error::Resource(format!("failed to read '{}': {}", path.display(), e))
        })?;
        limits.check_input_size(bytes.len())?;
        Self::from_xml_bytes(&bytes)
    }
}

fn malformed(message: impl Into<String>) -> Error {
    Error::Document(DocumentError::malformed(message))
}

fn mixed_content(name: &str) -> Error {
    malformed(format!(
        "element '{}' mixes text and child elements",
        name
    ))
}

/// Decode an element name, stripping any namespace prefix
fn decode_name(raw: &[u8]) -> Result<String> {
    let name = std::str::from_utf8(raw)
        .map_err(|e| Error::Document(DocumentError::encoding(e.to_string())))?;

    let local = match name.split_once(':') {
        Some((_prefix, local)) => local,
        None => name,
    };
    Ok(local.to_string())
}
