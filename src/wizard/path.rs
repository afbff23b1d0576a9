//! Structural field paths used to address form schema nodes and state slots

use super::error::FormError;
use std::fmt;

/// Dotted path to a field of a wizard form (e.g. `nestedProp2.prop2`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The empty path, addressing the form root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path. Empty input and empty segments are rejected.
    pub fn parse(input: &str) -> Result<Self, FormError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FormError::InvalidPath {
                path: input.to_string(),
                reason: "path is empty".to_string(),
            });
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('.') {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(FormError::InvalidPath {
                    path: input.to_string(),
                    reason: "path contains an empty segment".to_string(),
                });
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path of a direct child of this node
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Self { segments }
    }

    /// Last segment, if any
    pub fn key(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
