//! Identifier generation for threads and replies.

use uuid::Uuid;

/// Source of fresh identifiers.
///
/// Uniqueness is probabilistic for [`UuidIds`]; stores do not re-check it.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
