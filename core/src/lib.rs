//! Profitability model and month-stepped growth simulation for a
//! managed-services team.
//!
//! Two entry points:
//!   - [`profitability::calculate_profitability`]: steady-state P&L of a
//!     static customer mix
//!   - [`engine::run_simulation`]: onboarding, capacity and churn
//!     projected month by month
//!
//! Nothing here performs I/O or formats values for display.

pub mod clock;
pub mod config;
pub mod customer;
pub mod engine;
pub mod error;
pub mod event;
pub mod observer;
pub mod onboarding;
pub mod pricing;
pub mod profitability;
pub mod snapshot;
pub mod team;
pub mod types;

pub use engine::{run_simulation, run_simulation_with, MonthlySimulationResult, SimulationResult};
pub use error::{SimError, SimResult};
pub use profitability::{calculate_profitability, ProfitabilityCalculation};
