//! Moving obstacles on cyclic schedules
//!
//! An obstacle loops forever over a fixed waypoint sequence, advancing one
//! waypoint every `pace` ticks.

use serde::{Deserialize, Serialize};

use crate::core::error::{CourierError, Result};
use crate::core::types::{Cell, Tick};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingObstacle {
    /// Declared starting cell, kept so layouts round-trip
    start: Cell,
    path: Vec<Cell>,
    path_index: usize,
    pace: u32,
    pace_counter: u32,
}

impl MovingObstacle {
    /// Create an obstacle that will follow `path` at one waypoint per `pace` ticks
    pub fn new(start: Cell, path: Vec<Cell>, pace: u32) -> Result<Self> {
        if path.is_empty() {
            return Err(CourierError::EmptyObstaclePath);
        }
        if pace == 0 {
            return Err(CourierError::InvalidPace(pace));
        }

        Ok(Self {
            start,
            path,
            path_index: 0,
            pace,
            pace_counter: 0,
        })
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn pace(&self) -> u32 {
        self.pace
    }

    pub fn path_index(&self) -> usize {
        self.path_index
    }

    /// Cell currently occupied (the waypoint at the current index)
    pub fn position(&self) -> Cell {
        self.path[self.path_index]
    }

    /// Advance the internal clock by one tick
    pub fn advance_one_tick(&mut self) {
        self.pace_counter += 1;
        if self.pace_counter >= self.pace {
            self.pace_counter = 0;
            self.path_index = (self.path_index + 1) % self.path.len();
        }
    }

    /// Predict the occupied cell `future_ticks` from now
    ///
    /// Advances the index one waypoint per tick and ignores both the pace and
    /// the progress already made through the current pace interval, so the
    /// prediction is exact only for pace 1 or at pace-aligned boundaries.
    pub fn predict_position(&self, future_ticks: Tick) -> Cell {
        let len = self.path.len() as u64;
        let index = (self.path_index as u64 + future_ticks % len) % len;
        self.path[index as usize]
    }
}
