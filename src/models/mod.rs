//! Scheduling domain models.
//!
//! Tasks are addressed by id, processors by their position in the pool,
//! and each processor keeps a growth-only list of placement records.
//!
//! # Domain Mappings
//!
//! | cloud-schedule | Cloud | Cluster | Manufacturing |
//! |----------------|-------|---------|---------------|
//! | Task | Request/Job | Batch job | Order |
//! | Processor | VM/Core | Node | Machine |
//! | ProcessorPool | Datacenter | Partition | Shop floor |
//! | PlacementRecord | Execution log entry | Allocation | Operation slot |

mod pool;
mod processor;
mod task;

pub use pool::{ProcessorPool, DEFAULT_POOL_SIZE};
pub use processor::{PlacementRecord, Processor, DEFAULT_PROCESSING_POWER};
pub use task::Task;
