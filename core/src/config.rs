//! Scenario configuration: everything a caller needs to evaluate one
//! business setup, parsed from JSON.
//!
//! Every section is optional in the document; missing sections fall
//! back to the reference defaults. Reading the file is the caller's job.

use crate::{
    customer::CustomerMixItem,
    error::SimResult,
    onboarding::OnboardingConfiguration,
    pricing::{default_catalog, PricingCatalog, PricingTier},
    team::TeamConfiguration,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    #[serde(default)]
    pub team_configuration: TeamConfiguration,
    #[serde(default = "default_catalog")]
    pub pricing:            Vec<PricingTier>,
    #[serde(default)]
    pub customer_mix:       Vec<CustomerMixItem>,
    #[serde(default)]
    pub onboarding:         OnboardingConfiguration,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            team_configuration: TeamConfiguration::default_team(),
            pricing:            default_catalog(),
            customer_mix:       Vec::new(),
            onboarding:         OnboardingConfiguration::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_json(content: &str) -> SimResult<Self> {
        let scenario: ScenarioConfig = serde_json::from_str(content)?;
        log::debug!(
            "config: loaded scenario with {} pricing tiers, {} mix lines, {} months",
            scenario.pricing.len(),
            scenario.customer_mix.len(),
            scenario.onboarding.simulation_months
        );
        Ok(scenario)
    }

    pub fn catalog(&self) -> PricingCatalog<'_> {
        PricingCatalog::new(&self.pricing)
    }
}
