// ============================================================
// Layer 3 — Context Domain Type
// ============================================================
// The passage every answer is extracted from. Set once per
// session and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::{QaError, QaResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    text: String,
}

impl Context {
    /// Wrap a caller-supplied string with no transformation.
    pub fn from_literal(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Reject contexts with nothing to extract from.
    pub fn ensure_non_empty(self) -> QaResult<Self> {
        if self.is_blank() {
            return Err(QaError::Configuration("the context is empty".to_string()));
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
