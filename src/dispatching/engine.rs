//! Rule engine for task ordering.
//!
//! Applies rules in sequence, consulting the next rule only on ties, then
//! a final tie-breaker. The sort is stable, so an engine with no rules and
//! the default tie-breaker leaves tasks in insertion order.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchingRule, RuleScore};
use crate::models::Task;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep the original insertion order (stable sort).
    #[default]
    InsertionOrder,
    /// Ascending task id.
    ById,
}

/// A composable, sequential rule engine.
///
/// # Example
/// ```
/// use cloud_schedule::dispatching::{rules, RuleEngine};
/// use cloud_schedule::models::Task;
///
/// let engine = RuleEngine::new().with_rule(rules::Fifo).with_rule(rules::Spt);
/// let tasks = vec![
///     Task::new(0, 10.0, 5.0),
///     Task::new(1, 0.0, 50.0),
///     Task::new(2, 0.0, 20.0),
/// ];
/// // Arrival first, SPT among tasks arriving together
/// assert_eq!(engine.sort_indices(&tasks), vec![2, 1, 0]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine (insertion order).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule; later rules only break ties of earlier ones.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Whether the engine has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the configured rules, in application order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns indices into `tasks` in dispatch order.
    pub fn sort_indices(&self, tasks: &[Task]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..tasks.len()).collect();
        if self.rules.is_empty() && self.tie_breaker == TieBreaker::InsertionOrder {
            return indices;
        }

        // Scores are computed once; `sort_by` is stable.
        let scores: Vec<Vec<RuleScore>> = tasks.iter().map(|t| self.evaluate(t)).collect();
        indices.sort_by(|&a, &b| self.compare(&tasks[a], &scores[a], &tasks[b], &scores[b]));
        indices
    }

    /// Returns the index of the task dispatched first.
    pub fn select_best(&self, tasks: &[Task]) -> Option<usize> {
        self.sort_indices(tasks).first().copied()
    }

    /// Evaluates a single task and returns the score from each rule.
    pub fn evaluate(&self, task: &Task) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(task)).collect()
    }

    fn compare(&self, a: &Task, sa: &[RuleScore], b: &Task, sb: &[RuleScore]) -> Ordering {
        for (x, y) in sa.iter().zip(sb) {
            match x.partial_cmp(y).unwrap_or(Ordering::Equal) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        match self.tie_breaker {
            TieBreaker::InsertionOrder => Ordering::Equal,
            TieBreaker::ById => a.id().cmp(&b.id()),
        }
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
