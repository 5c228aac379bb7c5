//! Simulation clock: owns the current month and the run horizon.

use crate::types::Month;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub current_month: Month,
    pub horizon:       Month,
}

impl SimClock {
    pub fn new(horizon: Month) -> Self {
        Self {
            current_month: 0,
            horizon,
        }
    }

    /// Advance one month. Returns the new month, or None once the
    /// horizon has been simulated.
    pub fn advance(&mut self) -> Option<Month> {
        if self.current_month >= self.horizon {
            return None;
        }
        self.current_month += 1;
        Some(self.current_month)
    }

    pub fn is_finished(&self) -> bool {
        self.current_month >= self.horizon
    }
}
