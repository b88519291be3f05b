//! Field addressing inside a record
//!
//! A path is either a top-level field (`title`) or one level of nesting
//! (`x_axis.label`). Deeper paths are rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::mutations::MutationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    field: String,
}

impl FieldPath {
    /// Top-level field; the name is taken literally, dots included
    pub fn top(field: impl Into<String>) -> Self {
        Self {
            parent: None,
            field: field.into(),
        }
    }

    /// Field of a nested sub-record
    pub fn nested(parent: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            parent: Some(parent.into()),
            field: field.into(),
        }
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl FromStr for FieldPath {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split('.');
        let first = segments.next().unwrap_or_default();
        let second = segments.next();

        if segments.next().is_some() {
            return Err(MutationError::InvalidPath(s.to_string()));
        }

        match second {
            None if !first.is_empty() => Ok(FieldPath::top(first)),
            Some(child) if !first.is_empty() && !child.is_empty() => {
                Ok(FieldPath::nested(first, child))
            }
            _ => Err(MutationError::InvalidPath(s.to_string())),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{}.{}", parent, self.field),
            None => f.write_str(&self.field),
        }
    }
}
