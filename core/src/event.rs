//! Structured events emitted while a simulation runs.
//!
//! Events describe state transitions (admissions, rejections, scaling,
//! churn, breakeven). They are handed to the run's observer and never
//! read back by the engine.

use crate::types::{Currency, Hours, Month};
use serde::{Deserialize, Serialize};

/// Variants are added over time, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    RunStarted {
        simulation_months: Month,
        team_size:         u32,
        monthly_capacity:  Hours,
    },
    CustomersOnboarded {
        month:        Month,
        customer_ids: Vec<String>,
        added_effort: Hours,
    },
    /// Capacity-constrained month: later candidates did not fit.
    CandidatesRejected {
        month:    Month,
        rejected: u32,
        headroom: Hours,
    },
    TeamAutoScaled {
        month:           Month,
        from_size:       u32,
        to_size:         u32,
        required_effort: Hours,
    },
    CustomersChurned {
        month:        Month,
        customer_ids: Vec<String>,
        eligible:     u32,
    },
    BreakevenReached {
        month:             Month,
        cumulative_profit: Currency,
    },
    RunCompleted {
        months:       Month,
        final_profit: Currency,
    },
}

impl SimEvent {
    /// Stable string name for a variant, used in log lines.
    pub fn event_type(&self) -> &'static str {
        match self {
            SimEvent::RunStarted { .. }         => "run_started",
            SimEvent::CustomersOnboarded { .. } => "customers_onboarded",
            SimEvent::CandidatesRejected { .. } => "candidates_rejected",
            SimEvent::TeamAutoScaled { .. }     => "team_auto_scaled",
            SimEvent::CustomersChurned { .. }   => "customers_churned",
            SimEvent::BreakevenReached { .. }   => "breakeven_reached",
            SimEvent::RunCompleted { .. }       => "run_completed",
        }
    }
}
