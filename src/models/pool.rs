//! Processor pool (the "datacenter").
//!
//! A fixed-length, ordered collection of processors. Pool order is the
//! tie-breaking order for every processor selector, and processor ids are
//! their positions, stable across runs.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::{PlacementRecord, Processor};
use crate::error::{Result, SchedulingError};

/// Number of processors in a pool when none is given.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Fixed-size collection of processors.
///
/// Deserialization rejects an empty pool, and ids that do not match positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PoolState")]
pub struct ProcessorPool {
    processors: Vec<Processor>,
}

impl ProcessorPool {
    /// Creates a pool of `size` processors of power 1.0.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(SchedulingError::invalid("pool size must be positive"));
        }
        Ok(Self {
            processors: (0..size).map(|i| Processor::unit(i as u32)).collect(),
        })
    }

    /// Creates a heterogeneous pool, one processor per power value.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `powers` is empty or any value is not a
    /// positive finite number.
    pub fn with_processing_powers(powers: &[f64]) -> Result<Self> {
        if powers.is_empty() {
            return Err(SchedulingError::invalid("pool size must be positive"));
        }
        let processors = powers
            .iter()
            .enumerate()
            .map(|(i, &power)| Processor::new(i as u32, power))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { processors })
    }

    /// Restores every processor to idle at t=0 with no placements.
    ///
    /// Idempotent. The engine calls it at the start of every run.
    pub fn reset(&mut self) {
        for processor in &mut self.processors {
            processor.reset();
        }
    }

    /// Number of processors. Never zero.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Always `false`, since every constructor rejects an empty pool.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Processor> {
        self.processors.iter()
    }

    /// Processing powers in pool order.
    pub fn processing_powers(&self) -> Vec<f64> {
        self.processors.iter().map(|p| p.processing_power()).collect()
    }

    /// Total number of placements across all processors.
    pub fn placement_count(&self) -> usize {
        self.processors.iter().map(|p| p.placements().len()).sum()
    }

    /// Placement records per processor, in pool order.
    pub fn placements(&self) -> Vec<Vec<PlacementRecord>> {
        self.processors
            .iter()
            .map(|p| p.placements().to_vec())
            .collect()
    }
}

impl Default for ProcessorPool {
    fn default() -> Self {
        Self {
            processors: (0..DEFAULT_POOL_SIZE)
                .map(|i| Processor::unit(i as u32))
                .collect(),
        }
    }
}

impl Index<usize> for ProcessorPool {
    type Output = Processor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.processors[index]
    }
}

impl IndexMut<usize> for ProcessorPool {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.processors[index]
    }
}

#[derive(Deserialize)]
struct PoolState {
    processors: Vec<Processor>,
}

impl TryFrom<PoolState> for ProcessorPool {
    type Error = SchedulingError;

    fn try_from(state: PoolState) -> Result<Self> {
        if state.processors.is_empty() {
            return Err(SchedulingError::invalid("pool size must be positive"));
        }
        if let Some((i, p)) = state
            .processors
            .iter()
            .enumerate()
            .find(|(i, p)| p.id() as usize != *i)
        {
            return Err(SchedulingError::invalid(format!(
                "processor at position {i} has id {}",
                p.id()
            )));
        }
        Ok(Self {
            processors: state.processors,
        })
    }
}
