//! Processor model.
//!
//! A processor runs one task at a time. Its `available_at` clock only moves
//! forward: each assignment starts at the later of the clock and the task's
//! arrival, and pushes the clock to the task's finish.

use serde::{Deserialize, Serialize};

use super::Task;
use crate::error::{Result, SchedulingError};

/// Processing power of a processor when none is given.
pub const DEFAULT_PROCESSING_POWER: f64 = 1.0;

/// Outcome of assigning one task to one processor.
///
/// `execution_time_charged` is the task's nominal execution time, kept so
/// utilization accounting never has to re-derive it from the pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// The placed task.
    pub task: Task,
    /// When the task started running.
    pub start_time: f64,
    /// When the task finished.
    pub finish_time: f64,
    /// Nominal (power-independent) execution time.
    pub execution_time_charged: f64,
}

impl PlacementRecord {
    /// Wall-clock time the processor was occupied.
    #[inline]
    pub fn occupied_time(&self) -> f64 {
        self.finish_time - self.start_time
    }

    /// Time from arrival to completion.
    #[inline]
    pub fn flow_time(&self) -> f64 {
        self.finish_time - self.task.arrival_time()
    }
}

/// A processor with a fixed power factor and a running clock.
///
/// Deserialization goes through the same checks as [`Processor::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProcessorState")]
pub struct Processor {
    id: u32,
    processing_power: f64,
    available_at: f64,
    placements: Vec<PlacementRecord>,
}

impl Processor {
    /// Creates an idle processor.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `processing_power` is not a positive finite number.
    pub fn new(id: u32, processing_power: f64) -> Result<Self> {
        if !(processing_power.is_finite() && processing_power > 0.0) {
            return Err(SchedulingError::invalid(format!(
                "processor {id} has non-positive processing power {processing_power}"
            )));
        }
        Ok(Self {
            id,
            processing_power,
            available_at: 0.0,
            placements: Vec::new(),
        })
    }

    /// Creates an idle processor of power 1.0.
    pub fn unit(id: u32) -> Self {
        Self {
            id,
            processing_power: DEFAULT_PROCESSING_POWER,
            available_at: 0.0,
            placements: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn processing_power(&self) -> f64 {
        self.processing_power
    }

    /// Time at which the processor becomes free.
    pub fn available_at(&self) -> f64 {
        self.available_at
    }

    /// Placement records in assignment order.
    pub fn placements(&self) -> &[PlacementRecord] {
        &self.placements
    }

    /// Finish time the task would get here, without committing it.
    pub fn projected_finish(&self, task: &Task) -> f64 {
        self.available_at.max(task.arrival_time()) + task.duration_on(self.processing_power)
    }

    /// Assigns a task and returns its finish time.
    ///
    /// `start = max(available_at, arrival_time)`,
    /// `finish = start + execution_time / processing_power`.
    /// Appends a placement record and advances `available_at` to `finish`.
    pub fn assign(&mut self, task: &Task, arrival_time: f64) -> f64 {
        let start_time = self.available_at.max(arrival_time);
        let finish_time = start_time + task.duration_on(self.processing_power);

        self.placements.push(PlacementRecord {
            task: *task,
            start_time,
            finish_time,
            execution_time_charged: task.execution_time(),
        });
        self.available_at = finish_time;
        finish_time
    }

    /// Sum of charged (nominal) execution time over all placements.
    pub fn busy_time(&self) -> f64 {
        self.placements
            .iter()
            .map(|p| p.execution_time_charged)
            .sum()
    }

    /// Returns the processor to its idle state at t=0.
    pub fn reset(&mut self) {
        self.available_at = 0.0;
        self.placements.clear();
    }
}

#[derive(Deserialize)]
struct ProcessorState {
    id: u32,
    processing_power: f64,
    #[serde(default)]
    available_at: f64,
    #[serde(default)]
    placements: Vec<PlacementRecord>,
}

impl TryFrom<ProcessorState> for Processor {
    type Error = SchedulingError;

    fn try_from(state: ProcessorState) -> Result<Self> {
        let mut processor = Processor::new(state.id, state.processing_power)?;
        if !(state.available_at.is_finite() && state.available_at >= 0.0) {
            return Err(SchedulingError::invalid(format!(
                "processor {} has invalid available_at {}",
                state.id, state.available_at
            )));
        }
        processor.available_at = state.available_at;
        processor.placements = state.placements;
        Ok(processor)
    }
}
