//! Scheduling engine.
//!
//! # Algorithm
//!
//! 1. Check every task (finite, non-negative arrival; finite, positive
//!    execution time) before touching the pool.
//! 2. Reset the pool.
//! 3. Order tasks with the rule engine (stable).
//! 4. For each task in that order, pick a processor with the selector and
//!    commit the assignment.
//! 5. Return finish times in iteration order.
//!
//! # Complexity
//! O(n log n + n * p) where n=tasks, p=processors.
//!
//! # Concurrency
//! A run mutates the pool it is given and must not share it. Independent
//! runs on separate pools may proceed in parallel.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::dispatching::{Policy, ProcessorSelector, RuleEngine};
use crate::error::{Result, SchedulingError};
use crate::models::{ProcessorPool, Task};

/// Runs one ordering/selection combination over a pool.
///
/// # Example
///
/// ```
/// use cloud_schedule::dispatching::Policy;
/// use cloud_schedule::models::{ProcessorPool, Task};
/// use cloud_schedule::scheduler::SchedulingEngine;
///
/// let mut pool = ProcessorPool::new(2).unwrap();
/// let tasks = vec![Task::new(0, 0.0, 10.0), Task::new(1, 0.0, 5.0)];
///
/// let finish = SchedulingEngine::for_policy(Policy::Fcfs)
///     .run(&mut pool, &tasks)
///     .unwrap();
/// assert_eq!(finish, vec![10.0, 5.0]);
/// ```
#[derive(Debug, Clone)]
pub struct SchedulingEngine {
    rule_engine: RuleEngine,
    selector: Arc<dyn ProcessorSelector>,
}

impl SchedulingEngine {
    /// Builds an engine from a custom ordering and selector.
    pub fn new<S: ProcessorSelector + 'static>(rule_engine: RuleEngine, selector: S) -> Self {
        Self {
            rule_engine,
            selector: Arc::new(selector),
        }
    }

    /// Builds the engine for one of the standard policies.
    pub fn for_policy(policy: Policy) -> Self {
        Self {
            rule_engine: policy.rule_engine(),
            selector: policy.selector(),
        }
    }

    pub fn rule_engine(&self) -> &RuleEngine {
        &self.rule_engine
    }

    pub fn selector(&self) -> &dyn ProcessorSelector {
        self.selector.as_ref()
    }

    /// Resets `pool`, schedules every task and returns finish times in
    /// dispatch order.
    ///
    /// # Errors
    /// `Computation` naming the offending task if a task has a non-finite
    /// or negative arrival, a non-finite or non-positive execution time, or
    /// would finish at a non-finite time or before it arrives. Malformed
    /// tasks are caught before the pool is reset, and a rejected finish time
    /// is caught before the placement is committed.
    pub fn run(&self, pool: &mut ProcessorPool, tasks: &[Task]) -> Result<Vec<f64>> {
        for task in tasks {
            check_task(task)?;
        }

        pool.reset();
        let order = self.rule_engine.sort_indices(tasks);
        let mut finish_times = Vec::with_capacity(order.len());

        for idx in order {
            let task = &tasks[idx];
            let Some(slot) = self
                .selector
                .select(pool.processors(), task)
                .filter(|&slot| slot < pool.len())
            else {
                warn!(task_id = task.id(), selector = self.selector.name(), "no processor selected");
                return Err(SchedulingError::computation(
                    task.id(),
                    "selector returned no processor",
                ));
            };

            // Checked before committing so a failed run leaves no bad placement.
            let projected = pool[slot].projected_finish(task);
            if !projected.is_finite() || projected < task.arrival_time() {
                warn!(task_id = task.id(), processor = slot, projected, "rejected finish time");
                return Err(SchedulingError::computation(
                    task.id(),
                    format!("finish time {projected} is not a finite time after arrival"),
                ));
            }

            let finish = pool[slot].assign(task, task.arrival_time());

            trace!(task_id = task.id(), processor = slot, finish, "task placed");
            finish_times.push(finish);
        }

        debug!(
            rules = ?self.rule_engine.rule_names(),
            selector = self.selector.name(),
            tasks = finish_times.len(),
            processors = pool.len(),
            "schedule complete"
        );
        Ok(finish_times)
    }
}

/// Schedules `tasks` on `pool` with a standard policy.
///
/// Finish times are in the policy's iteration order, not task id order.
pub fn run_schedule(policy: Policy, pool: &mut ProcessorPool, tasks: &[Task]) -> Result<Vec<f64>> {
    SchedulingEngine::for_policy(policy).run(pool, tasks)
}

fn check_task(task: &Task) -> Result<()> {
    let arrival = task.arrival_time();
    if !arrival.is_finite() || arrival < 0.0 {
        return Err(SchedulingError::computation(
            task.id(),
            format!("arrival time {arrival} is not a non-negative finite number"),
        ));
    }
    let execution = task.execution_time();
    if !execution.is_finite() || execution <= 0.0 {
        return Err(SchedulingError::computation(
            task.id(),
            format!("execution time {execution} is not a positive finite number"),
        ));
    }
    Ok(())
}
