//! Policy comparison sessions.
//!
//! A session generates one workload and runs every selected policy against
//! it, each on a freshly built pool, so the runs are independent and can be
//! compared directly. Presentation (tables, charts, CSV) is left to the
//! caller; every result type here derives serde.
//!
//! # Example
//!
//! ```
//! use cloud_schedule::dispatching::Policy;
//! use cloud_schedule::simulation::{Simulation, SimulationConfig};
//! use cloud_schedule::workload::WorkloadConfig;
//!
//! let config = SimulationConfig::default()
//!     .with_workload(WorkloadConfig::new(100, 42))
//!     .with_policies(vec![Policy::Fcfs, Policy::Eft]);
//!
//! let report = Simulation::new(config).unwrap().run().unwrap();
//! assert_eq!(report.outcomes.len(), 2);
//! assert!(report.best_policy().is_some());
//! ```

use std::thread;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dispatching::Policy;
use crate::error::{Result, SchedulingError};
use crate::models::{PlacementRecord, ProcessorPool, Task, DEFAULT_POOL_SIZE, DEFAULT_PROCESSING_POWER};
use crate::scheduler::{run_schedule, SimulationMetrics};
use crate::validation::{into_configuration_error, validate_processing_powers, validate_tasks};
use crate::workload::{WorkloadConfig, WorkloadGenerator};

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Workload shape and seed.
    pub workload: WorkloadConfig,
    /// One processing power per processor, in pool order.
    pub processing_powers: Vec<f64>,
    /// Policies to compare, in report order.
    pub policies: Vec<Policy>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            workload: WorkloadConfig::default(),
            processing_powers: vec![DEFAULT_PROCESSING_POWER; DEFAULT_POOL_SIZE],
            policies: Policy::ALL.to_vec(),
        }
    }
}

impl SimulationConfig {
    /// Sets the workload.
    pub fn with_workload(mut self, workload: WorkloadConfig) -> Self {
        self.workload = workload;
        self
    }

    /// Uses `size` processors of power 1.0.
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.processing_powers = vec![DEFAULT_PROCESSING_POWER; size];
        self
    }

    /// Sets per-processor powers.
    pub fn with_processing_powers(mut self, powers: Vec<f64>) -> Self {
        self.processing_powers = powers;
        self
    }

    /// Sets the policies to compare.
    pub fn with_policies(mut self, policies: Vec<Policy>) -> Self {
        self.policies = policies;
        self
    }
}

/// Result of one policy in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyOutcome {
    pub policy: Policy,
    /// Finish times in the policy's dispatch order.
    pub finish_times: Vec<f64>,
    pub metrics: SimulationMetrics,
    /// Placement records per processor, in pool order.
    pub placements: Vec<Vec<PlacementRecord>>,
}

/// Results of all policies in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub task_count: usize,
    pub processing_powers: Vec<f64>,
    /// One outcome per selected policy, in selection order.
    pub outcomes: Vec<PolicyOutcome>,
}

impl ComparisonReport {
    /// Policy with the lowest makespan; the earliest selected wins ties.
    pub fn best_policy(&self) -> Option<Policy> {
        let mut best: Option<&PolicyOutcome> = None;
        for outcome in &self.outcomes {
            match best {
                Some(b) if b.metrics.makespan <= outcome.metrics.makespan => {}
                _ => best = Some(outcome),
            }
        }
        best.map(|o| o.policy)
    }

    /// Outcome for a given policy, if it was selected.
    pub fn outcome(&self, policy: Policy) -> Option<&PolicyOutcome> {
        self.outcomes.iter().find(|o| o.policy == policy)
    }
}

/// A validated comparison session.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    generator: WorkloadGenerator,
}

impl Simulation {
    /// Validates `config` and prepares the workload generator.
    ///
    /// # Errors
    /// - `EmptyPolicySelection` if no policy is selected.
    /// - `InvalidConfiguration` for an empty pool, a bad processing power or
    ///   a bad workload shape.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        if config.policies.is_empty() {
            return Err(SchedulingError::EmptyPolicySelection);
        }
        validate_processing_powers(&config.processing_powers).map_err(into_configuration_error)?;
        let generator = WorkloadGenerator::new(config.workload.clone())?;
        Ok(Self { config, generator })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The task set every policy in this session runs against.
    pub fn tasks(&self) -> Vec<Task> {
        self.generator.generate()
    }

    /// Generates the workload and runs every selected policy in turn.
    pub fn run(&self) -> Result<ComparisonReport> {
        let tasks = self.tasks();
        self.run_checked(&tasks)
    }

    /// Runs every selected policy against a caller-supplied task set.
    ///
    /// # Errors
    /// `InvalidConfiguration` listing every problem in `tasks`.
    pub fn run_with_tasks(&self, tasks: &[Task]) -> Result<ComparisonReport> {
        validate_tasks(tasks).map_err(into_configuration_error)?;
        self.run_checked(tasks)
    }

    /// Like [`Simulation::run`], with each policy on its own scoped thread
    /// and its own pool. Produces the same report.
    pub fn run_parallel(&self) -> Result<ComparisonReport> {
        let tasks = self.tasks();
        info!(
            tasks = tasks.len(),
            policies = self.config.policies.len(),
            "starting parallel comparison"
        );

        let outcomes = thread::scope(|scope| {
            let handles: Vec<_> = self
                .config
                .policies
                .iter()
                .map(|&policy| {
                    let tasks = &tasks;
                    scope.spawn(move || self.run_policy(policy, tasks))
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(self.report(&tasks, outcomes))
    }

    fn run_checked(&self, tasks: &[Task]) -> Result<ComparisonReport> {
        info!(
            tasks = tasks.len(),
            policies = self.config.policies.len(),
            "starting comparison"
        );
        let outcomes = self
            .config
            .policies
            .iter()
            .map(|&policy| self.run_policy(policy, tasks))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.report(tasks, outcomes))
    }

    fn run_policy(&self, policy: Policy, tasks: &[Task]) -> Result<PolicyOutcome> {
        let mut pool = ProcessorPool::with_processing_powers(&self.config.processing_powers)?;
        let finish_times = run_schedule(policy, &mut pool, tasks)?;
        let metrics = SimulationMetrics::calculate(&pool, &finish_times, tasks);

        info!(
            policy = policy.name(),
            makespan = metrics.makespan,
            throughput = metrics.throughput,
            utilization = metrics.resource_utilization,
            "policy finished"
        );

        Ok(PolicyOutcome {
            policy,
            finish_times,
            metrics,
            placements: pool.placements(),
        })
    }

    fn report(&self, tasks: &[Task], outcomes: Vec<PolicyOutcome>) -> ComparisonReport {
        ComparisonReport {
            task_count: tasks.len(),
            processing_powers: self.config.processing_powers.clone(),
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::compute_metrics;
    use crate::workload::generate_workload;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.processing_powers, vec![1.0; 4]);
        assert_eq!(config.policies, Policy::ALL.to_vec());
        assert_eq!(config.workload.task_count, 100);
    }

    #[test]
    fn test_empty_policy_selection() {
        let config = SimulationConfig::default().with_policies(Vec::new());
        assert!(matches!(
            Simulation::new(config),
            Err(SchedulingError::EmptyPolicySelection)
        ));
    }

    #[test]
    fn test_invalid_pool_rejected() {
        let config = SimulationConfig::default().with_pool_size(0);
        assert!(matches!(
            Simulation::new(config),
            Err(SchedulingError::InvalidConfiguration(_))
        ));

        let config = SimulationConfig::default().with_processing_powers(vec![1.0, -2.0]);
        assert!(matches!(
            Simulation::new(config),
            Err(SchedulingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_invalid_task_count_rejected() {
        let config = SimulationConfig::default().with_workload(WorkloadConfig::new(0, 42));
        assert!(matches!(
            Simulation::new(config),
            Err(SchedulingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_run_matches_direct_calls() {
        let sim = Simulation::new(SimulationConfig::default()).unwrap();
        let report = sim.run().unwrap();
        let tasks = generate_workload(100, 42).unwrap();

        assert_eq!(report.task_count, 100);
        assert_eq!(report.outcomes.len(), 3);
        for outcome in &report.outcomes {
            let mut pool = ProcessorPool::default();
            let finish = run_schedule(outcome.policy, &mut pool, &tasks).unwrap();
            assert_eq!(outcome.finish_times, finish);
            assert_eq!(outcome.metrics, compute_metrics(&pool, &finish, &tasks));
            assert_eq!(outcome.placements, pool.placements());
        }
    }

    #[test]
    fn test_runs_are_repeatable() {
        let sim = Simulation::new(SimulationConfig::default()).unwrap();
        assert_eq!(sim.run().unwrap(), sim.run().unwrap());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = SimulationConfig::default()
            .with_workload(WorkloadConfig::new(300, 7))
            .with_processing_powers(vec![1.0, 2.0, 0.5]);
        let sim = Simulation::new(config).unwrap();
        assert_eq!(sim.run_parallel().unwrap(), sim.run().unwrap());
    }

    #[test]
    fn test_run_with_tasks() {
        let config = SimulationConfig::default()
            .with_pool_size(2)
            .with_policies(vec![Policy::Fcfs, Policy::Sjf]);
        let sim = Simulation::new(config).unwrap();
        let tasks = vec![Task::new(0, 0.0, 10.0), Task::new(1, 0.0, 5.0)];

        let report = sim.run_with_tasks(&tasks).unwrap();
        let fcfs = report.outcome(Policy::Fcfs).unwrap();
        assert_eq!(fcfs.finish_times, vec![10.0, 5.0]);
        assert!((fcfs.metrics.resource_utilization - 75.0).abs() < 1e-10);
        let sjf = report.outcome(Policy::Sjf).unwrap();
        assert_eq!(sjf.finish_times, vec![5.0, 10.0]);
        assert!(report.outcome(Policy::Eft).is_none());

        // Equal makespans: first selected wins
        assert_eq!(report.best_policy(), Some(Policy::Fcfs));
    }

    #[test]
    fn test_run_with_invalid_tasks() {
        let sim = Simulation::new(SimulationConfig::default()).unwrap();
        let tasks = vec![Task::new(0, 0.0, 1.0), Task::new(0, 0.0, -1.0)];
        let err = sim.run_with_tasks(&tasks).unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_best_policy_lowest_makespan() {
        let config = SimulationConfig::default()
            .with_pool_size(1)
            .with_policies(vec![Policy::Eft, Policy::Fcfs]);
        let sim = Simulation::new(config).unwrap();
        // Insertion order makes the late task block the early one under EFT
        let tasks = vec![Task::new(0, 100.0, 10.0), Task::new(1, 0.0, 10.0)];

        let report = sim.run_with_tasks(&tasks).unwrap();
        assert!((report.outcome(Policy::Eft).unwrap().metrics.makespan - 120.0).abs() < 1e-10);
        assert!((report.outcome(Policy::Fcfs).unwrap().metrics.makespan - 110.0).abs() < 1e-10);
        assert_eq!(report.best_policy(), Some(Policy::Fcfs));
    }

    #[test]
    fn test_heterogeneous_pool_favors_eft() {
        let config = SimulationConfig::default()
            .with_workload(WorkloadConfig::new(400, 42))
            .with_processing_powers(vec![0.5, 0.5, 4.0]);
        let report = Simulation::new(config).unwrap().run().unwrap();

        let eft = report.outcome(Policy::Eft).unwrap().metrics.makespan;
        let fcfs = report.outcome(Policy::Fcfs).unwrap().metrics.makespan;
        assert!(eft < fcfs, "eft {eft} fcfs {fcfs}");
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "workload": { "task_count": 200, "seed": 7 },
            "processing_powers": [1.0, 2.0],
            "policies": ["SJF", "EFT"]
        }"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.workload.task_count, 200);
        assert_eq!(config.workload.seed, 7);
        assert!((config.workload.mean_execution_time - 100.0).abs() < 1e-10);
        assert_eq!(config.policies, vec![Policy::Sjf, Policy::Eft]);

        let report = Simulation::new(config).unwrap().run().unwrap();
        assert_eq!(report.processing_powers, vec![1.0, 2.0]);
        assert_eq!(report.outcomes[0].policy, Policy::Sjf);
    }

    #[test]
    fn test_report_serializes() {
        let config = SimulationConfig::default()
            .with_workload(WorkloadConfig::new(5, 1))
            .with_policies(vec![Policy::Eft]);
        let report = Simulation::new(config).unwrap().run().unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""policy":"EFT""#));
        let back: ComparisonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.task_count, 5);
        assert_eq!(back.outcomes[0].finish_times.len(), 5);
        assert_eq!(back.outcomes[0].placements.len(), 4);
    }
}
