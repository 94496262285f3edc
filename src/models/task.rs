//! Task model.
//!
//! A task is one unit of compute work: it arrives at a point in simulated
//! time and needs a nominal amount of execution time on a processor of
//! power 1.0. Tasks are created in bulk at the start of a run and are
//! read-only afterwards.

use serde::{Deserialize, Serialize};

/// An immutable unit of work.
///
/// # Time Representation
/// Times are in abstract simulated time units relative to t=0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: u32,
    arrival_time: f64,
    execution_time: f64,
}

impl Task {
    /// Creates a task.
    ///
    /// Values are not checked here; see [`crate::validation::validate_tasks`]
    /// and the engine's pre-run check.
    pub fn new(id: u32, arrival_time: f64, execution_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            execution_time,
        }
    }

    /// Task identifier, unique within a run.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Time at which the task becomes eligible to start.
    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    /// Nominal execution time on a processor of power 1.0.
    pub fn execution_time(&self) -> f64 {
        self.execution_time
    }

    /// Wall-clock duration on a processor with the given power.
    #[inline]
    pub fn duration_on(&self, processing_power: f64) -> f64 {
        self.execution_time / processing_power
    }
}
