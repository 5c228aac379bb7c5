//! Export snapshot: the combined analysis document a caller downloads.
//!
//! Field names are part of the exported format and must not change.

use crate::{
    config::ScenarioConfig,
    customer::CustomerMixItem,
    engine::{run_simulation, SimulationResult},
    error::SimResult,
    pricing::PricingTier,
    profitability::{calculate_profitability, ProfitabilityCalculation},
    team::TeamConfiguration,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSnapshot {
    pub team_configuration: TeamConfiguration,
    pub pricing:            Vec<PricingTier>,
    pub customer_mix:       Vec<CustomerMixItem>,
    pub profitability:      ProfitabilityCalculation,
    /// None when no simulation has been run.
    pub simulation:         Option<SimulationResult>,
}

impl AnalysisSnapshot {
    /// Bundle a scenario with its computed results.
    pub fn new(scenario: &ScenarioConfig, simulation: Option<SimulationResult>) -> Self {
        Self {
            team_configuration: scenario.team_configuration.clone(),
            pricing:            scenario.pricing.clone(),
            customer_mix:       scenario.customer_mix.clone(),
            profitability:      calculate_profitability(
                &scenario.team_configuration,
                &scenario.customer_mix,
            ),
            simulation,
        }
    }

    /// Compute both the steady-state calculation and the simulation.
    pub fn analyze(scenario: &ScenarioConfig) -> SimResult<Self> {
        let simulation = run_simulation(
            &scenario.onboarding,
            &scenario.team_configuration,
            &scenario.pricing,
        )?;
        Ok(Self::new(scenario, Some(simulation)))
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
