//! Success/failure results for write operations.
//!
//! Every add/update/delete in the repositories reports back a
//! [`WriteOutcome`] instead of an error: the flag tells the caller whether the
//! statement committed, and the message is ready for direct display. Updates
//! and deletes against an unknown key still succeed with `affected == 0`; the
//! count is there for callers that want to treat that case as "not found".

use super::messages::Message;
use rusqlite::ffi;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    pub success: bool,
    pub message: String,
    /// Rows touched by the statement; always 0 for failures.
    pub affected: usize,
}

impl WriteOutcome {
    pub fn ok(message: Message, affected: usize) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            affected,
        }
    }

    pub fn failed(message: Message) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            affected: 0,
        }
    }

    /// Committed, but no row matched the key.
    pub fn is_noop(&self) -> bool {
        self.success && self.affected == 0
    }

    pub fn into_pair(self) -> (bool, String) {
        (self.success, self.message)
    }
}

/// Returns the engine's message when `err` is a UNIQUE or PRIMARY KEY violation.
pub fn unique_violation(err: &rusqlite::Error) -> Option<String> {
    match err {
        rusqlite::Error::SqliteFailure(e, msg)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            Some(msg.clone().unwrap_or_else(|| e.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_only_for_successful_zero_row_writes() {
        assert!(WriteOutcome::ok(Message::CourseUpdated, 0).is_noop());
        assert!(!WriteOutcome::ok(Message::CourseUpdated, 1).is_noop());
        assert!(!WriteOutcome::failed(Message::CourseAlreadyExists).is_noop());
    }

    #[test]
    fn pair_keeps_display_text() {
        let (ok, message) = WriteOutcome::failed(Message::CourseAlreadyExists).into_pair();
        assert!(!ok);
        assert_eq!(message, "Course already exists!");
    }
}
