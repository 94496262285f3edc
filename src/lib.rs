//! Offline task scheduling simulator for a pool of processors.
//!
//! Places a known set of tasks (arrival time + nominal execution time) onto
//! a fixed pool of homogeneous or heterogeneous processors under one of
//! three policies, and reduces each run to comparable metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Processor`, `PlacementRecord`,
//!   `ProcessorPool`
//! - **`dispatching`**: Task-ordering rules, processor selectors, `Policy`
//!   (FCFS, SJF, EFT)
//! - **`scheduler`**: `SchedulingEngine`, `run_schedule`, `SimulationMetrics`
//! - **`workload`**: Seeded synthetic workload generation
//! - **`simulation`**: Side-by-side policy comparison sessions
//! - **`validation`**: Input integrity checks (duplicate IDs, bad times, bad powers)
//!
//! # Example
//!
//! ```
//! use cloud_schedule::dispatching::Policy;
//! use cloud_schedule::models::ProcessorPool;
//! use cloud_schedule::scheduler::{compute_metrics, run_schedule};
//! use cloud_schedule::workload::generate_workload;
//!
//! let tasks = generate_workload(100, 42).unwrap();
//! let mut pool = ProcessorPool::default();
//!
//! let finish = run_schedule(Policy::Eft, &mut pool, &tasks).unwrap();
//! let metrics = compute_metrics(&pool, &finish, &tasks);
//! assert!(metrics.makespan > 0.0);
//! ```
//!
//! # Scope
//!
//! No preemption, no precedence constraints, no processor failures, no
//! online arrivals: every run is an offline batch over a fixed task set.
//! Logging goes through `tracing`; installing a subscriber is up to the
//! caller.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Topcuoglu et al. (2002), "Performance-Effective and Low-Complexity Task
//!   Scheduling for Heterogeneous Computing"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod validation;
pub mod workload;

pub use error::{Result, SchedulingError};
