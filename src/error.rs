//! Error types.
//!
//! The domain is purely computational, so the taxonomy is narrow:
//! configuration problems are rejected at construction, an empty policy
//! selection is a caller mistake, and anything that slips past both and
//! produces a non-finite or negative time is a computation error tied to
//! the task that caused it.

use thiserror::Error;

/// Errors raised by the scheduling core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulingError {
    /// Pool size, task count, processing power or workload shape is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A comparison run was requested with no policy selected.
    #[error("no scheduling policy selected")]
    EmptyPolicySelection,

    /// A task produced a time value the engine refuses to record.
    #[error("computation error on task {task_id}: {reason}")]
    Computation {
        /// Offending task.
        task_id: u32,
        /// What went wrong.
        reason: String,
    },
}

impl SchedulingError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub(crate) fn computation(task_id: u32, reason: impl Into<String>) -> Self {
        Self::Computation {
            task_id,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SchedulingError>;
