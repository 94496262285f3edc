//! Built-in dispatching rules.
//!
//! - **FIFO**: arrival order (first-come-first-served)
//! - **SPT**: shortest nominal execution time first (shortest-job-first)
//! - **LPT**: longest nominal execution time first
//!
//! # Score Convention
//! All rules return lower scores for tasks dispatched earlier.

use super::{DispatchingRule, RuleScore};
use crate::models::Task;

/// First In First Out.
///
/// Orders tasks by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        task.arrival_time()
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

/// Shortest Processing Time.
///
/// Orders tasks by nominal execution time, ignoring arrival. A short task
/// that arrives late is still dispatched early in queue order; its start is
/// clamped to its arrival by the processor.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        task.execution_time()
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time.
///
/// Useful for load balancing in parallel machine environments.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        -task.execution_time()
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}
