//! Name Parsing, Validation and Hashing
//!
//! Node ids are computed by folding labels right to left starting at the
//! root:
//!
//! ```text
//! node("")                  = root
//! node("miningtoken.kowala") = H(node("kowala") || H("miningtoken"))
//! ```
//!
//! `H` is BLAKE3-256. Labels are lowercased before hashing, so names that
//! differ only in case map to the same node.

use super::types::{limits, LabelHash, NameLimits, Node};
use thiserror::Error;

// ============================================================================
// Validation Errors
// ============================================================================

/// Errors that can occur while parsing a name or label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// A label between dots is empty
    #[error("Name '{name}' contains an empty label")]
    EmptyLabel { name: String },

    /// A standalone label is empty
    #[error("Label must not be empty")]
    MissingLabel,

    /// Name exceeds maximum length
    #[error("Name exceeds maximum length of {max} characters (got {actual})")]
    NameTooLong { max: usize, actual: usize },

    /// Label exceeds maximum length
    #[error("Label '{label}' exceeds maximum length of {max} characters")]
    LabelTooLong { label: String, max: usize },

    /// Invalid characters in label
    #[error("Label '{label}' contains invalid characters (only alphanumeric and hyphens allowed)")]
    InvalidCharacters { label: String },

    /// Label starts or ends with hyphen
    #[error("Label '{label}' cannot start or end with a hyphen")]
    InvalidHyphenPosition { label: String },

    /// Text record key empty or too long
    #[error("Text record key '{key}' must be 1-{max} characters")]
    InvalidTextKey { key: String, max: usize },

    /// Too many labels
    #[error("Name exceeds maximum depth of {max} labels (got {actual})")]
    DepthExceeded { max: usize, actual: usize },
}

pub type NameResult<T> = Result<T, NameError>;

// ============================================================================
// Parsing
// ============================================================================

/// A validated, normalized dotted name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Normalized full name (e.g. "miningtoken.kowala")
    pub full_name: String,
    /// Labels from right to left (e.g. ["kowala", "miningtoken"])
    pub labels: Vec<String>,
}

impl ParsedName {
    /// Number of labels below the root
    pub fn depth(&self) -> usize {
        self.labels.len()
    }

    /// Node id of this name under `root`
    pub fn node(&self, root: Node) -> Node {
        self.labels
            .iter()
            .fold(root, |node, label| child_node_unchecked(&node, label))
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Validate a single label (already normalized) against the default limits
pub fn validate_label(label: &str) -> NameResult<()> {
    validate_label_with(label, &NameLimits::default())
}

pub fn validate_label_with(label: &str, bounds: &NameLimits) -> NameResult<()> {
    if label.is_empty() {
        return Err(NameError::MissingLabel);
    }

    if label.len() > bounds.max_label_length {
        return Err(NameError::LabelTooLong {
            label: label.to_string(),
            max: bounds.max_label_length,
        });
    }

    if !label
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(NameError::InvalidCharacters {
            label: label.to_string(),
        });
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(NameError::InvalidHyphenPosition {
            label: label.to_string(),
        });
    }

    Ok(())
}

/// Parse and validate a dotted name. The empty name denotes the root.
pub fn parse_name(name: &str) -> NameResult<ParsedName> {
    parse_name_with(name, &NameLimits::default())
}

pub fn parse_name_with(name: &str, bounds: &NameLimits) -> NameResult<ParsedName> {
    let normalized = normalize_name(name);

    if normalized.len() > bounds.max_name_length {
        return Err(NameError::NameTooLong {
            max: bounds.max_name_length,
            actual: normalized.len(),
        });
    }

    if normalized.is_empty() {
        return Ok(ParsedName {
            full_name: normalized,
            labels: Vec::new(),
        });
    }

    let mut labels = Vec::new();
    for label in normalized.split('.').rev() {
        if label.is_empty() {
            return Err(NameError::EmptyLabel {
                name: normalized.clone(),
            });
        }
        validate_label_with(label, bounds)?;
        labels.push(label.to_string());
    }

    if labels.len() > limits::MAX_DEPTH {
        return Err(NameError::DepthExceeded {
            max: limits::MAX_DEPTH,
            actual: labels.len(),
        });
    }

    Ok(ParsedName {
        full_name: normalized,
        labels,
    })
}

// ============================================================================
// Hashing
// ============================================================================

/// Hash a single label (normalized first)
pub fn label_hash(label: &str) -> LabelHash {
    let hash = blake3::hash(normalize_name(label).as_bytes());
    LabelHash(*hash.as_bytes())
}

/// Combine a parent node with a label hash
pub fn combine(parent: &Node, label: &LabelHash) -> Node {
    let mut hasher = blake3::Hasher::new();
    hasher.update(parent.as_bytes());
    hasher.update(&label.0);
    Node(*hasher.finalize().as_bytes())
}

fn child_node_unchecked(parent: &Node, label: &str) -> Node {
    combine(parent, &label_hash(label))
}

/// Node id of `label` directly under `parent`, validating the label
pub fn child_node(parent: &Node, label: &str) -> NameResult<Node> {
    child_node_with(parent, label, &NameLimits::default())
}

pub fn child_node_with(parent: &Node, label: &str, bounds: &NameLimits) -> NameResult<Node> {
    let normalized = normalize_name(label);
    validate_label_with(&normalized, bounds)?;
    Ok(child_node_unchecked(parent, &normalized))
}

/// Node id of a full dotted name under `root`
pub fn namehash(root: Node, name: &str) -> NameResult<Node> {
    Ok(parse_name(name)?.node(root))
}

// ============================================================================
// Tests
// ============================================================================
