//! Task-ordering rules, processor selectors and policies.
//!
//! A scheduling policy is two independent pieces:
//!
//! - a **task ordering**: a [`RuleEngine`] of [`DispatchingRule`]s that
//!   sorts the task set (stable, lower score first);
//! - a **processor selection**: a [`ProcessorSelector`] that picks the pool
//!   slot for each task in that order.
//!
//! [`Policy`] names the three standard combinations.
//!
//! # Usage
//!
//! ```
//! use cloud_schedule::dispatching::{rules, RuleEngine, TieBreaker};
//! use cloud_schedule::models::Task;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Spt)
//!     .with_final_tie_breaker(TieBreaker::ById);
//!
//! let tasks = vec![Task::new(0, 0.0, 30.0), Task::new(1, 0.0, 10.0)];
//! assert_eq!(engine.sort_indices(&tasks), vec![1, 0]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Topcuoglu et al. (2002), "Performance-Effective and Low-Complexity Task
//!   Scheduling for Heterogeneous Computing" (earliest finish time selection)

mod engine;
mod policy;
pub mod rules;
mod selection;

pub use engine::{RuleEngine, TieBreaker};
pub use policy::Policy;
pub use selection::{EarliestAvailable, EarliestFinish};

use crate::models::{Processor, Task};
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = scheduled earlier.
pub type RuleScore = f64;

/// A rule that scores a task for ordering.
///
/// # Score Convention
/// **Lower score = earlier in the dispatch order.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT").
    fn name(&self) -> &'static str;

    /// Scores a task. Lower = dispatched first.
    fn evaluate(&self, task: &Task) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Chooses the processor a task is assigned to.
///
/// Implementations must not mutate processors and must break ties by the
/// first occurrence in pool order.
pub trait ProcessorSelector: Send + Sync + Debug {
    /// Selector name (e.g., "EARLIEST_AVAILABLE").
    fn name(&self) -> &'static str;

    /// Returns the index of the chosen processor, or `None` if `processors`
    /// is empty.
    fn select(&self, processors: &[Processor], task: &Task) -> Option<usize>;
}
