//! Synthetic workload generation.
//!
//! Produces a deterministic task set from a seed:
//!
//! - arrival gaps ~ Exp(mean = 50), arrival times are their running sum;
//! - execution times ~ Exp(mean = 100) + 10.
//!
//! All gaps are drawn before any execution time, so a given
//! `(task_count, seed)` always yields the same tasks. Changing any
//! distribution parameter changes the task set; callers comparing runs
//! should record the `WorkloadConfig` they used.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};
use crate::models::Task;

/// Default mean gap between consecutive arrivals.
pub const DEFAULT_MEAN_ARRIVAL_GAP: f64 = 50.0;
/// Default mean of the exponential part of execution time.
pub const DEFAULT_MEAN_EXECUTION_TIME: f64 = 100.0;
/// Default constant added to every execution time.
pub const DEFAULT_EXECUTION_OFFSET: f64 = 10.0;
/// Default task count.
pub const DEFAULT_TASK_COUNT: usize = 100;
/// Default seed.
pub const DEFAULT_SEED: u64 = 42;

/// Workload shape and seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Number of tasks to generate (must be positive).
    pub task_count: usize,
    /// PRNG seed.
    pub seed: u64,
    /// Mean of the exponential inter-arrival gap.
    pub mean_arrival_gap: f64,
    /// Mean of the exponential part of execution time.
    pub mean_execution_time: f64,
    /// Constant added to every sampled execution time.
    pub execution_offset: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            task_count: DEFAULT_TASK_COUNT,
            seed: DEFAULT_SEED,
            mean_arrival_gap: DEFAULT_MEAN_ARRIVAL_GAP,
            mean_execution_time: DEFAULT_MEAN_EXECUTION_TIME,
            execution_offset: DEFAULT_EXECUTION_OFFSET,
        }
    }
}

impl WorkloadConfig {
    /// Creates the default workload shape with the given size and seed.
    pub fn new(task_count: usize, seed: u64) -> Self {
        Self {
            task_count,
            seed,
            ..Default::default()
        }
    }

    /// Sets the task count.
    pub fn with_task_count(mut self, task_count: usize) -> Self {
        self.task_count = task_count;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the mean inter-arrival gap.
    pub fn with_mean_arrival_gap(mut self, mean: f64) -> Self {
        self.mean_arrival_gap = mean;
        self
    }

    /// Sets the mean and offset of execution time.
    pub fn with_execution_time(mut self, mean: f64, offset: f64) -> Self {
        self.mean_execution_time = mean;
        self.execution_offset = offset;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// `InvalidConfiguration` if the task count is zero, a mean is not a
    /// positive finite number, or the offset is negative or non-finite.
    pub fn validate(&self) -> Result<()> {
        if self.task_count == 0 {
            return Err(SchedulingError::invalid("task count must be positive"));
        }
        if !(self.mean_arrival_gap.is_finite() && self.mean_arrival_gap > 0.0) {
            return Err(SchedulingError::invalid(format!(
                "mean arrival gap {} must be positive",
                self.mean_arrival_gap
            )));
        }
        if !(self.mean_execution_time.is_finite() && self.mean_execution_time > 0.0) {
            return Err(SchedulingError::invalid(format!(
                "mean execution time {} must be positive",
                self.mean_execution_time
            )));
        }
        if !(self.execution_offset.is_finite() && self.execution_offset >= 0.0) {
            return Err(SchedulingError::invalid(format!(
                "execution offset {} must be non-negative",
                self.execution_offset
            )));
        }
        Ok(())
    }
}

/// Deterministic task-set generator.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    config: WorkloadConfig,
    arrival_gap: Exp<f64>,
    execution: Exp<f64>,
}

impl WorkloadGenerator {
    /// Creates a generator after validating `config`.
    pub fn new(config: WorkloadConfig) -> Result<Self> {
        config.validate()?;
        let arrival_gap = Exp::new(1.0 / config.mean_arrival_gap)
            .map_err(|e| SchedulingError::invalid(format!("arrival distribution: {e}")))?;
        let execution = Exp::new(1.0 / config.mean_execution_time)
            .map_err(|e| SchedulingError::invalid(format!("execution distribution: {e}")))?;
        Ok(Self {
            config,
            arrival_gap,
            execution,
        })
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Generates the task set. Ids are `0..task_count` in arrival order.
    pub fn generate(&self) -> Vec<Task> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let n = self.config.task_count;

        let mut clock = 0.0_f64;
        let arrivals: Vec<f64> = (0..n)
            .map(|_| {
                clock += self.arrival_gap.sample(&mut rng);
                clock.max(0.0)
            })
            .collect();

        arrivals
            .into_iter()
            .enumerate()
            .map(|(i, arrival)| {
                let execution = self.execution.sample(&mut rng) + self.config.execution_offset;
                Task::new(i as u32, arrival, execution)
            })
            .collect()
    }
}

/// Generates `task_count` tasks with the default workload shape.
///
/// # Example
/// ```
/// use cloud_schedule::workload::generate_workload;
///
/// let a = generate_workload(10, 42).unwrap();
/// let b = generate_workload(10, 42).unwrap();
/// assert_eq!(a, b);
/// assert!(a.iter().all(|t| t.execution_time() >= 10.0));
/// ```
pub fn generate_workload(task_count: usize, seed: u64) -> Result<Vec<Task>> {
    Ok(WorkloadGenerator::new(WorkloadConfig::new(task_count, seed))?.generate())
}
