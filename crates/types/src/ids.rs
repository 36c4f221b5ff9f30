//! Newtype wrappers for record identifiers.
//!
//! Templates and merge fields are both keyed by opaque strings; wrapping them
//! keeps a template id from being passed where a merge-field id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a document template.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(Arc<str>);

impl TemplateId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for TemplateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an operator-defined merge field.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeFieldId(Arc<str>);

impl MergeFieldId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MergeFieldId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for MergeFieldId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for MergeFieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MergeFieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
