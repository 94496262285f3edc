//! Processor selectors.
//!
//! Both selectors scan the pool once, keep the first strictly better
//! candidate, and so break ties by pool order.

use super::ProcessorSelector;
use crate::models::{Processor, Task};

/// Picks the processor that becomes free first.
///
/// Ignores task cost and processor speed: a single global queue balanced
/// only by current free time.
#[derive(Debug, Clone, Copy)]
pub struct EarliestAvailable;

impl ProcessorSelector for EarliestAvailable {
    fn name(&self) -> &'static str {
        "EARLIEST_AVAILABLE"
    }

    fn select(&self, processors: &[Processor], _task: &Task) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_available = f64::INFINITY;

        for (i, processor) in processors.iter().enumerate() {
            if best.is_none() || processor.available_at() < best_available {
                best = Some(i);
                best_available = processor.available_at();
            }
        }

        best
    }
}

/// Picks the processor on which the task would finish first.
///
/// Evaluates `max(available_at, arrival) + execution_time / power` on every
/// processor without committing, so faster processors win even when busy a
/// little longer.
#[derive(Debug, Clone, Copy)]
pub struct EarliestFinish;

impl ProcessorSelector for EarliestFinish {
    fn name(&self) -> &'static str {
        "EARLIEST_FINISH"
    }

    fn select(&self, processors: &[Processor], task: &Task) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_finish = f64::INFINITY;

        for (i, processor) in processors.iter().enumerate() {
            let finish = processor.projected_finish(task);
            if best.is_none() || finish < best_finish {
                best = Some(i);
                best_finish = finish;
            }
        }

        best
    }
}
