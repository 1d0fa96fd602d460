//! Limits and constraints for schema and document processing
//!
//! This module defines bounds that protect the validator against resource
//! exhaustion from pathological input (deeply nested trees, enormous files,
//! extreme fan-out). Every traversal is checked against these limits, so no
//! input can drive the library into unbounded recursion or allocation.

use crate::error::{Error, Result};

/// Default maximum nesting depth for schemas and documents
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Global limits configuration
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum nesting depth for schema and document trees
    pub max_depth: usize,

    /// Maximum input size in bytes (schema or document source)
    pub max_input_size: usize,

    /// Maximum number of children under a single node
    pub max_children: usize,

    /// Maximum number of schema nodes after grouping expansion
    pub max_schema_nodes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_size: 100 * 1024 * 1024, // 100 MB
            max_children: 100_000,
            max_schema_nodes: 100_000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_depth: 32,
            max_input_size: 10 * 1024 * 1024, // 10 MB
            max_children: 10_000,
            max_schema_nodes: 10_000,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_depth: 4096,
            max_input_size: 1024 * 1024 * 1024, // 1 GB
            max_children: 1_000_000,
            max_schema_nodes: 1_000_000,
        }
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Check if a tree depth is within limits
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            Err(Error::LimitExceeded(format!(
                "nesting depth {} exceeds maximum {}",
                depth, self.max_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if an input size is within limits
    pub fn check_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_input_size {
            Err(Error::LimitExceeded(format!(
                "input size {} bytes exceeds maximum {} bytes",
                size, self.max_input_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a node's child count is within limits
    pub fn check_children(&self, count: usize) -> Result<()> {
        if count > self.max_children {
            Err(Error::LimitExceeded(format!(
                "child count {} exceeds maximum {}",
                count, self.max_children
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a schema's total node count is within limits
    pub fn check_schema_nodes(&self, count: usize) -> Result<()> {
        if count > self.max_schema_nodes {
            Err(Error::LimitExceeded(format!(
                "schema node count {} exceeds maximum {}",
                count, self.max_schema_nodes
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_depth, DEFAULT_MAX_DEPTH);
        assert!(limits.check_depth(100).is_ok());
        assert!(limits.check_depth(500).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_depth < Limits::default().max_depth);
        assert!(limits.check_depth(100).is_err());
    }

    #[test]
    fn test_permissive_limits() {
        let limits = Limits::permissive();
        assert!(limits.max_depth > Limits::default().max_depth);
        assert!(limits.check_depth(2000).is_ok());
    }

    #[test]
    fn test_check_input_size() {
        let limits = Limits::default();
        assert!(limits.check_input_size(1024).is_ok());
        assert!(limits.check_input_size(200 * 1024 * 1024).is_err());
    }

    #[test]
    fn test_with_max_depth() {
        let limits = Limits::default().with_max_depth(4);
        assert!(limits.check_depth(4).is_ok());
        assert!(limits.check_depth(5).is_err());
    }
}
