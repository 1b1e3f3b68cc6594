//! Type classifier
//!
//! Checks that the value being converted and the requested target shape denote the
//! same [`SemanticKind`] before any payload is read.

use crate::error::{Error, Result};
use crate::kind::SemanticKind;

/// Returns the shared kind, or [`Error::KindMismatch`] when the two sides differ.
pub fn classify(source: SemanticKind, target: SemanticKind) -> Result<SemanticKind> {
    if source != target {
        tracing::debug!(source = %source, target = %target, "rejecting primitive conversion");
        return Err(Error::KindMismatch {
            source_kind: source,
            target_kind: target,
        });
    }
    Ok(source)
}
