use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a persisted snapshot was rejected during restore.
///
/// These never reach the user: a rejected snapshot is treated as absent
/// and the session starts from defaults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("current question {current} out of range for bank of {bank_len}")]
    IndexOutOfRange { current: usize, bank_len: usize },

    #[error("answer recorded for question {index} beyond bank of {bank_len}")]
    AnswerOutOfRange { index: usize, bank_len: usize },

    #[error("snapshot is already submitted")]
    AlreadySubmitted,
}

/// Persisted shape of a session, stored under the `quizState` key.
///
/// Wire keys are fixed (`currentQuestion`, `answers`, `timer`,
/// `quizSubmitted`); `answers` maps stringified question indices to the
/// selected choice. Unknown or missing fields fail deserialization, so a
/// partially written record can never half-restore a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionSnapshot {
    pub current_question: usize,
    pub answers: HashMap<usize, String>,
    pub timer: u32,
    pub quiz_submitted: bool,
}

impl SessionSnapshot {
    /// Check the snapshot against the bank it is being restored into.
    ///
    /// Restore is all-or-nothing: any violation rejects the whole
    /// snapshot, never a field-by-field merge.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` when the position or an answer index falls
    /// outside the bank, or when the snapshot claims to be submitted
    /// (submission deletes the record, so a submitted snapshot is
    /// inconsistent by construction).
    pub fn validate(&self, bank_len: usize) -> Result<(), SnapshotError> {
        if self.quiz_submitted {
            return Err(SnapshotError::AlreadySubmitted);
        }
        if bank_len == 0 {
            // Nothing to restore into; only the pristine position is coherent.
            if self.current_question != 0 || !self.answers.is_empty() {
                return Err(SnapshotError::IndexOutOfRange {
                    current: self.current_question,
                    bank_len,
                });
            }
            return Ok(());
        }
        if self.current_question >= bank_len {
            return Err(SnapshotError::IndexOutOfRange {
                current: self.current_question,
                bank_len,
            });
        }
        if let Some(index) = self.answers.keys().copied().find(|i| *i >= bank_len) {
            return Err(SnapshotError::AnswerOutOfRange { index, bank_len });
        }
        Ok(())
    }
}
