//! Observer hooks for a simulation run.
//!
//! The engine never writes to a log or terminal itself. Callers that
//! want progress output, event capture or charts pass an observer; the
//! default run uses `NoopObserver`.

use crate::{engine::MonthlySimulationResult, event::SimEvent, types::Month};

pub trait SimObserver {
    /// Called once per month, after that month's record is final.
    fn on_step(&mut self, _month: Month, _snapshot: &MonthlySimulationResult) {}

    /// Called for each state transition, in the order it happens.
    fn on_event(&mut self, _event: &SimEvent) {}
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Forwards steps and events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SimObserver for LogObserver {
    fn on_step(&mut self, month: Month, s: &MonthlySimulationResult) {
        log::debug!(
            "month={month} engine: active={} revenue={:.2} cost={:.2} profit={:.2} cumulative={:.2} capacity={:.1}% team={}",
            s.active_customers,
            s.total_revenue,
            s.team_cost,
            s.profit,
            s.cumulative_profit,
            s.capacity_used_percentage,
            s.team_size,
        );
        if s.is_over_capacity {
            log::warn!(
                "month={month} engine: over capacity at {:.1}%",
                s.capacity_used_percentage
            );
        }
    }

    fn on_event(&mut self, event: &SimEvent) {
        match event {
            SimEvent::TeamAutoScaled { month, from_size, to_size, .. } => {
                log::info!("month={month} engine: team auto-scaled {from_size} -> {to_size}");
            }
            SimEvent::CandidatesRejected { month, rejected, headroom } => {
                log::warn!(
                    "month={month} engine: {rejected} candidate(s) rejected, headroom {headroom:.1}h"
                );
            }
            SimEvent::BreakevenReached { month, cumulative_profit } => {
                log::info!("month={month} engine: breakeven reached, cumulative {cumulative_profit:.2}");
            }
            other => log::debug!("engine: {}", other.event_type()),
        }
    }
}

/// Keeps every event and month record, in order. Used by tests and by
/// callers that render the run afterwards.
#[derive(Debug, Default, Clone)]
pub struct EventRecorder {
    pub events: Vec<SimEvent>,
    pub steps:  Vec<(Month, MonthlySimulationResult)>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&SimEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }
}

impl SimObserver for EventRecorder {
    fn on_step(&mut self, month: Month, snapshot: &MonthlySimulationResult) {
        self.steps.push((month, snapshot.clone()));
    }

    fn on_event(&mut self, event: &SimEvent) {
        self.events.push(event.clone());
    }
}
