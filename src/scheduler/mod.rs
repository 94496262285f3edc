//! Scheduling engine and run metrics.
//!
//! # Algorithm
//!
//! `SchedulingEngine` is a greedy list scheduler: order the tasks once,
//! then place each on the processor the selector prefers. No preemption,
//! no precedence, all tasks known up front.
//!
//! # Metrics
//!
//! `SimulationMetrics` computes makespan, throughput and mean utilization
//! over the pool's placement records.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-5
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"

mod engine;
mod kpi;

pub use engine::{run_schedule, SchedulingEngine};
pub use kpi::{compute_metrics, SimulationMetrics};
