//! Simulation metrics.
//!
//! Reduces a completed run (pool state + finish times + task set) to a
//! summary.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | max(finish times), 0 if none |
//! | Throughput | task count / makespan, 0 if makespan is 0 |
//! | Utilization (per processor) | 100 × Σ charged execution time / makespan |
//! | Resource utilization | mean of per-processor utilization |
//! | Mean flow time | mean(finish − arrival) over all placements |
//!
//! Utilization charges the *nominal* execution time, not the power-adjusted
//! occupied time. It measures workload share, so a processor with power
//! above 1.0 can exceed 100 %. With power 1.0 it cannot.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};

use crate::models::{ProcessorPool, Task};

/// Summary of one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Latest finish time.
    pub makespan: f64,
    /// Tasks per unit simulated time.
    pub throughput: f64,
    /// Mean per-processor utilization (percent).
    pub resource_utilization: f64,
    /// Per-processor utilization in pool order (percent).
    pub utilization_by_processor: Vec<f64>,
    /// Mean time from arrival to completion.
    pub mean_flow_time: f64,
    /// Number of tasks in the run.
    pub task_count: usize,
}

impl SimulationMetrics {
    /// Computes metrics from a completed run.
    ///
    /// # Arguments
    /// * `pool` - The pool after the run (placement records).
    /// * `finish_times` - Finish times returned by the engine.
    /// * `tasks` - The task set that was scheduled.
    pub fn calculate(pool: &ProcessorPool, finish_times: &[f64], tasks: &[Task]) -> Self {
        let makespan = finish_times.iter().copied().fold(0.0_f64, f64::max);

        let throughput = if makespan > 0.0 {
            tasks.len() as f64 / makespan
        } else {
            0.0
        };

        let utilization_by_processor: Vec<f64> = pool
            .iter()
            .map(|p| {
                if makespan > 0.0 {
                    100.0 * p.busy_time() / makespan
                } else {
                    0.0
                }
            })
            .collect();

        let resource_utilization = if utilization_by_processor.is_empty() {
            0.0
        } else {
            utilization_by_processor.iter().sum::<f64>() / utilization_by_processor.len() as f64
        };

        let (flow_sum, placed) = pool
            .iter()
            .flat_map(|p| p.placements())
            .fold((0.0, 0usize), |(sum, n), r| (sum + r.flow_time(), n + 1));
        let mean_flow_time = if placed == 0 {
            0.0
        } else {
            flow_sum / placed as f64
        };

        Self {
            makespan,
            throughput,
            resource_utilization,
            utilization_by_processor,
            mean_flow_time,
            task_count: tasks.len(),
        }
    }
}

/// Computes metrics for a completed run. See [`SimulationMetrics::calculate`].
pub fn compute_metrics(pool: &ProcessorPool, finish_times: &[f64], tasks: &[Task]) -> SimulationMetrics {
    SimulationMetrics::calculate(pool, finish_times, tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::Policy;
    use crate::scheduler::run_schedule;
    use crate::workload::generate_workload;

    #[test]
    fn test_metrics_two_processors() {
        let mut pool = ProcessorPool::new(2).unwrap();
        let tasks = vec![Task::new(0, 0.0, 10.0), Task::new(1, 0.0, 5.0)];
        let finish = run_schedule(Policy::Fcfs, &mut pool, &tasks).unwrap();

        let m = compute_metrics(&pool, &finish, &tasks);
        assert!((m.makespan - 10.0).abs() < 1e-10);
        assert!((m.throughput - 0.2).abs() < 1e-10);
        assert!((m.utilization_by_processor[0] - 100.0).abs() < 1e-10);
        assert!((m.utilization_by_processor[1] - 50.0).abs() < 1e-10);
        assert!((m.resource_utilization - 75.0).abs() < 1e-10);
        assert!((m.mean_flow_time - 7.5).abs() < 1e-10);
        assert_eq!(m.task_count, 2);
    }

    #[test]
    fn test_sjf_symmetric_makespan() {
        let mut pool = ProcessorPool::new(2).unwrap();
        let tasks = vec![Task::new(0, 0.0, 10.0), Task::new(1, 0.0, 5.0)];
        let finish = run_schedule(Policy::Sjf, &mut pool, &tasks).unwrap();

        let m = compute_metrics(&pool, &finish, &tasks);
        assert!((m.makespan - 10.0).abs() < 1e-10);
        // Short task on P0, long on P1
        assert!((m.utilization_by_processor[0] - 50.0).abs() < 1e-10);
        assert!((m.utilization_by_processor[1] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_equal_makespan_different_flow() {
        let tasks = vec![
            Task::new(0, 0.0, 30.0),
            Task::new(1, 0.0, 10.0),
            Task::new(2, 0.0, 20.0),
        ];
        let mut pool = ProcessorPool::new(1).unwrap();

        let f = run_schedule(Policy::Sjf, &mut pool, &tasks).unwrap();
        let sjf = compute_metrics(&pool, &f, &tasks);
        let f = run_schedule(Policy::Fcfs, &mut pool, &tasks).unwrap();
        let fcfs = compute_metrics(&pool, &f, &tasks);

        assert!((sjf.makespan - 60.0).abs() < 1e-10);
        assert!((fcfs.makespan - 60.0).abs() < 1e-10);
        // (10+30+60)/3 vs (30+40+60)/3
        assert!((sjf.mean_flow_time - 100.0 / 3.0).abs() < 1e-10);
        assert!((fcfs.mean_flow_time - 130.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_nominal_charge_exceeds_100_on_fast_processor() {
        let mut pool = ProcessorPool::with_processing_powers(&[2.0]).unwrap();
        let tasks = vec![Task::new(0, 0.0, 10.0)];
        let finish = run_schedule(Policy::Eft, &mut pool, &tasks).unwrap();

        let m = compute_metrics(&pool, &finish, &tasks);
        assert!((m.makespan - 5.0).abs() < 1e-10);
        assert!((m.resource_utilization - 200.0).abs() < 1e-10);
    }

    #[test]
    fn test_unit_power_utilization_bounded() {
        let tasks = generate_workload(300, 42).unwrap();
        for policy in Policy::ALL {
            let mut pool = ProcessorPool::with_processing_powers(&[1.0, 1.0, 2.0, 1.0]).unwrap();
            let finish = run_schedule(policy, &mut pool, &tasks).unwrap();
            let m = compute_metrics(&pool, &finish, &tasks);

            for (p, u) in pool.iter().zip(&m.utilization_by_processor) {
                assert!(*u >= 0.0);
                if p.processing_power() == 1.0 {
                    assert!(*u <= 100.0 + 1e-9, "{policy}: processor {} at {u}", p.id());
                }
            }
            assert!(m.makespan.is_finite() && m.makespan > 0.0);
        }
    }

    #[test]
    fn test_empty_run() {
        let pool = ProcessorPool::default();
        let m = compute_metrics(&pool, &[], &[]);
        assert!((m.makespan - 0.0).abs() < 1e-10);
        assert!((m.throughput - 0.0).abs() < 1e-10);
        assert!((m.resource_utilization - 0.0).abs() < 1e-10);
        assert_eq!(m.utilization_by_processor, vec![0.0; 4]);
        assert!((m.mean_flow_time - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_rerun_metrics_identical() {
        let tasks = generate_workload(100, 5).unwrap();
        let mut pool = ProcessorPool::default();
        let f1 = run_schedule(Policy::Eft, &mut pool, &tasks).unwrap();
        let m1 = compute_metrics(&pool, &f1, &tasks);
        pool.reset();
        let f2 = run_schedule(Policy::Eft, &mut pool, &tasks).unwrap();
        let m2 = compute_metrics(&pool, &f2, &tasks);
        assert_eq!(m1, m2);
    }
}
